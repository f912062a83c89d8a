// Tue Jan 15 2026 - Alex

pub mod checks;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod manifest;
pub mod reflection;
pub mod streaming;
pub mod subject;
pub mod utils;

pub use checks::register_builtin_checks;
pub use config::AnalyzerConfig;
pub use diagnostics::{Diagnostic, DiagnosticEmitter, Severity, SourceLocator};
pub use engine::{Check, CheckError, CheckRegistry, CheckScheduler, SchedulerStats};
pub use reflection::{Catalog, ReflectedClass, Reflection};
pub use streaming::UninitializedDetector;
pub use subject::{SubjectRegistry, SubjectType};
