//! Integration tests

mod e2e_test;
mod pipeline_test;
mod publisher_test;
mod support;
