//! Periodic spread sampling
//!
//! The delta engine diffs consecutive spread samples; the scheduler drives
//! it on a fixed interval and forwards each delta to the metrics publisher.

mod delta;
mod scheduler;

pub use delta::{absolute_delta, DeltaEngine, DeltaKey, DeltaMode, SpreadDelta};
pub use scheduler::{
    shutdown_channel, FailurePolicy, Scheduler, SchedulerConfig, SchedulerStats, ShutdownHandle,
    ShutdownSignal,
};
