// Tue Jan 13 2026 - Alex

pub mod check;
pub mod error;
pub mod registry;
pub mod scheduler;
pub mod stats;

pub use check::{Check, CheckContext, FnCheck};
pub use error::CheckError;
pub use registry::CheckRegistry;
pub use scheduler::CheckScheduler;
pub use stats::SchedulerStats;
