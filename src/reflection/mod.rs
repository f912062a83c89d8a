// Wed Jan 15 2026 - Alex

pub mod buffer;
pub mod catalog;
pub mod error;
pub mod types;

pub use buffer::{StreamBuffer, REFERENCE_TAG};
pub use catalog::{Catalog, CatalogClass, CatalogField, ClassSpec};
pub use error::ReflectionError;
pub use types::{DataType, FieldDescriptor, FieldFlags};

use std::path::PathBuf;
use std::sync::Arc;

/// A reflection-capable class as seen through the dictionary service.
///
/// Instances never live in memory the analyzer allocates for them: every
/// entry point takes the byte region the instance occupies. `construct` is an
/// in-place factory and expects a region of at least `size()` bytes whose
/// previous content it may or may not overwrite.
pub trait ReflectedClass: Send + Sync {
    fn name(&self) -> &str;
    fn class_version(&self) -> i32;
    fn inherits_base_object(&self) -> bool;
    fn has_new(&self) -> bool;
    fn has_destructor(&self) -> bool;

    fn has_default_constructor(&self) -> bool {
        self.has_new()
    }

    /// Instance footprint in bytes.
    fn size(&self) -> usize;

    /// Header the class was declared in, as recorded by the dictionary.
    fn decl_file(&self) -> &str;

    fn real_data(&self) -> Vec<FieldDescriptor>;
    fn bases(&self) -> Vec<Arc<dyn ReflectedClass>>;

    fn construct(&self, storage: &mut [u8]) -> Result<(), ReflectionError>;
    fn destruct(&self, storage: &mut [u8]) -> Result<(), ReflectionError>;

    /// Runtime identity lookup on a live instance; `None` means the class
    /// reports no descriptor for itself.
    fn identity(&self, storage: &[u8]) -> Option<String>;

    /// Encodes a live instance into `buf` at its current write position.
    fn stream(&self, storage: &[u8], buf: &mut StreamBuffer) -> Result<(), ReflectionError>;
}

pub trait Reflection: Send + Sync {
    /// Silent lookup; classes which cannot be loaded resolve to `None`.
    fn resolve(&self, name: &str) -> Option<Arc<dyn ReflectedClass>>;

    /// Every class manifest the service knows about.
    fn manifest_files(&self) -> Vec<PathBuf>;

    /// Manifest selection used when no manifest pattern was requested.
    fn default_manifest_pattern(&self) -> String {
        ".*".to_string()
    }
}
