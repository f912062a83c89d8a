// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReflectionError {
    #[error("Construction of '{class}' failed: {reason}")]
    Construction { class: String, reason: String },
    #[error("Destruction of '{class}' failed: {reason}")]
    Destruction { class: String, reason: String },
    #[error("Streaming of '{class}' failed: {reason}")]
    Streaming { class: String, reason: String },
    #[error("Storage of {available} bytes is too small for '{class}' ({required} bytes)")]
    StorageTooSmall {
        class: String,
        required: usize,
        available: usize,
    },
    #[error("Class '{0}' has no usable default constructor")]
    NoConstructor(String),
    #[error("Class '{0}' has no usable destructor")]
    NoDestructor(String),
    #[error("Unknown base class '{base}' for '{class}'")]
    UnknownBase { class: String, base: String },
    #[error("Catalog error: {0}")]
    Catalog(String),
}
