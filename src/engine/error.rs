// Tue Jan 13 2026 - Alex

use crate::reflection::ReflectionError;
use thiserror::Error;

/// Why a check body could not complete on a subject. The message is the
/// diagnostic reported for the subject.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Construction/Destruction of class '{class}' failed, manual check of backtrace above is needed!")]
    ConstructionFailed {
        class: String,
        #[source]
        source: ReflectionError,
    },
    #[error("Construction/Destruction of class '{class}' failed, manual check of backtrace above is needed!")]
    DestructionFailed {
        class: String,
        #[source]
        source: ReflectionError,
    },
    #[error("Streaming of class '{class}' failed fatally, needs manual investigation! Check the stacktrace!")]
    SerializationFailed {
        class: String,
        #[source]
        source: ReflectionError,
    },
}

impl CheckError {
    /// Tags a reflection failure by the stage it happened in.
    pub fn from_reflection(class: &str, source: ReflectionError) -> Self {
        let class = class.to_string();
        match source {
            ReflectionError::Streaming { .. } => Self::SerializationFailed { class, source },
            ReflectionError::Destruction { .. } | ReflectionError::NoDestructor(_) => {
                Self::DestructionFailed { class, source }
            }
            _ => Self::ConstructionFailed { class, source },
        }
    }

    pub fn source_error(&self) -> &ReflectionError {
        match self {
            Self::ConstructionFailed { source, .. }
            | Self::DestructionFailed { source, .. }
            | Self::SerializationFailed { source, .. } => source,
        }
    }
}
