// Wed Jan 15 2026 - Alex

pub mod registry;
pub mod subject_type;

pub use registry::SubjectRegistry;
pub use subject_type::{CheckOutcome, SubjectType};
