// Wed Jan 15 2026 - Alex

pub mod emitter;
pub mod locator;

pub use emitter::{Diagnostic, DiagnosticEmitter};
pub use locator::{LineLookup, SourceLocator};

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Note => write!(f, "note"),
        }
    }
}

/// Line pattern locating the declaration of member `name`.
pub fn member_pattern(name: &str) -> Result<regex::Regex, regex::Error> {
    regex::Regex::new(&format!(".*[^_a-zA-Z]{}[^_a-zA-Z0-9].*", regex::escape(name)))
}
