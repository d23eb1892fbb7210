//! Worker tasks that back the runtime orchestration.
//!
//! The scheduler worker drives periodic ticks; request handlers call the
//! runtime directly and never go through a worker.

mod scheduler;

pub use scheduler::{SchedulerHandle, SchedulerWorker};
