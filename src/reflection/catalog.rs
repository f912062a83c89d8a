// Wed Jan 15 2026 - Alex

//! Table-driven reflection backend.
//!
//! Classes are described by their memory layout: members with offsets and
//! sizes, the value the default constructor stores in each member (if any),
//! schema version, bases and declaring header. Construction writes only the
//! members that have an initial value, so whatever was in the storage before
//! survives in the others, exactly like a hand-written constructor that forgets
//! a member. Streaming writes the schema version followed by the raw bytes of
//! every non-transient member in declaration order.

use crate::reflection::{
    DataType, FieldDescriptor, FieldFlags, ReflectedClass, Reflection, ReflectionError, StreamBuffer,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogField {
    pub name: String,
    pub offset: usize,
    pub size: usize,
    #[serde(default, rename = "type")]
    pub data_type: Option<DataType>,
    #[serde(default)]
    pub transient: bool,
    #[serde(default)]
    pub object: bool,
    /// Value stored by the default constructor, little endian. `None` leaves
    /// the member untouched.
    #[serde(default)]
    pub init: Option<u64>,
}

impl CatalogField {
    pub fn scalar(name: &str, offset: usize, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            offset,
            size: data_type.size(),
            data_type: Some(data_type),
            transient: false,
            object: false,
            init: None,
        }
    }

    pub fn object(name: &str, offset: usize, size: usize) -> Self {
        Self {
            name: name.to_string(),
            offset,
            size,
            data_type: None,
            transient: false,
            object: true,
            init: None,
        }
    }

    pub fn init(mut self, value: u64) -> Self {
        self.init = Some(value);
        self
    }

    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    fn descriptor(&self) -> FieldDescriptor {
        let mut flags = FieldFlags::empty();
        if self.transient {
            flags |= FieldFlags::TRANSIENT;
        }
        if self.object {
            flags |= FieldFlags::OBJECT;
        }
        let descriptor = FieldDescriptor::new(&self.name, self.offset, self.size).with_flags(flags);
        match self.data_type {
            Some(dt) => descriptor.with_data_type(dt),
            None => descriptor,
        }
    }

    fn end_offset(&self) -> usize {
        self.offset + self.size
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSpec {
    pub name: String,
    pub size: usize,
    #[serde(default)]
    pub version: i32,
    #[serde(default)]
    pub inherits_base_object: bool,
    #[serde(default)]
    pub decl_file: String,
    #[serde(default = "default_true")]
    pub has_new: bool,
    #[serde(default = "default_true")]
    pub has_destructor: bool,
    #[serde(default)]
    pub has_default_constructor: Option<bool>,
    #[serde(default = "default_true")]
    pub identity: bool,
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default)]
    pub fields: Vec<CatalogField>,
    #[serde(default)]
    pub fail_construct: bool,
    #[serde(default)]
    pub fail_destruct: bool,
    #[serde(default)]
    pub fail_stream: bool,
    /// Simulates a foreign constructor that crashes outright.
    #[serde(default)]
    pub panic_on_construct: bool,
}

impl ClassSpec {
    pub fn new(name: &str, size: usize) -> Self {
        Self {
            name: name.to_string(),
            size,
            version: 0,
            inherits_base_object: false,
            decl_file: format!("{}.h", name),
            has_new: true,
            has_destructor: true,
            has_default_constructor: None,
            identity: true,
            bases: Vec::new(),
            fields: Vec::new(),
            fail_construct: false,
            fail_destruct: false,
            fail_stream: false,
            panic_on_construct: false,
        }
    }

    /// Shorthand for a streamable object: base-object hierarchy plus `version`.
    pub fn data_object(name: &str, size: usize, version: i32) -> Self {
        Self::new(name, size).version(version).base_object()
    }

    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    pub fn base_object(mut self) -> Self {
        self.inherits_base_object = true;
        self
    }

    pub fn decl_file(mut self, file: &str) -> Self {
        self.decl_file = file.to_string();
        self
    }

    pub fn base(mut self, name: &str) -> Self {
        self.bases.push(name.to_string());
        self
    }

    pub fn field(mut self, field: CatalogField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn without_new(mut self) -> Self {
        self.has_new = false;
        self
    }

    pub fn without_destructor(mut self) -> Self {
        self.has_destructor = false;
        self
    }

    pub fn without_identity(mut self) -> Self {
        self.identity = false;
        self
    }

    pub fn failing_construct(mut self) -> Self {
        self.fail_construct = true;
        self
    }

    pub fn failing_destruct(mut self) -> Self {
        self.fail_destruct = true;
        self
    }

    pub fn failing_stream(mut self) -> Self {
        self.fail_stream = true;
        self
    }

    pub fn panicking_construct(mut self) -> Self {
        self.panic_on_construct = true;
        self
    }
}

#[derive(Debug)]
pub struct CatalogClass {
    spec: ClassSpec,
    bases: Vec<Arc<CatalogClass>>,
}

impl CatalogClass {
    fn check_storage(&self, available: usize) -> Result<(), ReflectionError> {
        if available < self.spec.size {
            return Err(ReflectionError::StorageTooSmall {
                class: self.spec.name.clone(),
                required: self.spec.size,
                available,
            });
        }
        Ok(())
    }
}

impl ReflectedClass for CatalogClass {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn class_version(&self) -> i32 {
        self.spec.version
    }

    fn inherits_base_object(&self) -> bool {
        self.spec.inherits_base_object
    }

    fn has_new(&self) -> bool {
        self.spec.has_new
    }

    fn has_destructor(&self) -> bool {
        self.spec.has_destructor
    }

    fn has_default_constructor(&self) -> bool {
        self.spec.has_default_constructor.unwrap_or(self.spec.has_new)
    }

    fn size(&self) -> usize {
        self.spec.size
    }

    fn decl_file(&self) -> &str {
        &self.spec.decl_file
    }

    fn real_data(&self) -> Vec<FieldDescriptor> {
        self.spec.fields.iter().map(CatalogField::descriptor).collect()
    }

    fn bases(&self) -> Vec<Arc<dyn ReflectedClass>> {
        self.bases
            .iter()
            .map(|base| base.clone() as Arc<dyn ReflectedClass>)
            .collect()
    }

    fn construct(&self, storage: &mut [u8]) -> Result<(), ReflectionError> {
        if !self.spec.has_new {
            return Err(ReflectionError::NoConstructor(self.spec.name.clone()));
        }
        self.check_storage(storage.len())?;
        if self.spec.panic_on_construct {
            panic!("constructor of '{}' crashed", self.spec.name);
        }
        if self.spec.fail_construct {
            return Err(ReflectionError::Construction {
                class: self.spec.name.clone(),
                reason: "constructor raised an error".to_string(),
            });
        }

        for field in &self.spec.fields {
            let Some(value) = field.init else {
                continue;
            };
            let target = &mut storage[field.offset..field.end_offset()];
            let bytes = value.to_le_bytes();
            let copied = target.len().min(bytes.len());
            target[..copied].copy_from_slice(&bytes[..copied]);
            target[copied..].fill(0);
        }
        Ok(())
    }

    fn destruct(&self, storage: &mut [u8]) -> Result<(), ReflectionError> {
        if !self.spec.has_destructor {
            return Err(ReflectionError::NoDestructor(self.spec.name.clone()));
        }
        self.check_storage(storage.len())?;
        if self.spec.fail_destruct {
            return Err(ReflectionError::Destruction {
                class: self.spec.name.clone(),
                reason: "destructor raised an error".to_string(),
            });
        }
        Ok(())
    }

    fn identity(&self, _storage: &[u8]) -> Option<String> {
        self.spec.identity.then(|| self.spec.name.clone())
    }

    fn stream(&self, storage: &[u8], buf: &mut StreamBuffer) -> Result<(), ReflectionError> {
        self.check_storage(storage.len())?;
        if self.spec.fail_stream {
            return Err(ReflectionError::Streaming {
                class: self.spec.name.clone(),
                reason: "streamer raised an error".to_string(),
            });
        }

        let address = storage.as_ptr() as usize;
        if let Some(tag) = buf.mapped_tag(address) {
            buf.write_reference(tag);
            return Ok(());
        }
        let version = i16::try_from(self.spec.version).map_err(|_| ReflectionError::Streaming {
            class: self.spec.name.clone(),
            reason: format!("class version {} does not fit the version field", self.spec.version),
        })?;
        buf.map_object(address);

        buf.write_version(version);
        for field in self.spec.fields.iter().filter(|f| !f.transient) {
            buf.write_bytes(&storage[field.offset..field.end_offset()]);
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    manifests: Vec<PathBuf>,
    #[serde(default)]
    classes: Vec<ClassSpec>,
}

/// Reflection service over a fixed set of described classes.
#[derive(Debug, Default)]
pub struct Catalog {
    classes: IndexMap<String, Arc<CatalogClass>>,
    manifests: Vec<PathBuf>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class. Bases must have been added before the classes deriving
    /// from them; see [`Catalog::add_all`] for unordered input.
    pub fn add(&mut self, mut spec: ClassSpec) -> Result<(), ReflectionError> {
        if spec.decl_file.is_empty() {
            spec.decl_file = format!("{}.h", spec.name);
        }
        if let Some(field) = spec.fields.iter().find(|f| f.end_offset() > spec.size) {
            return Err(ReflectionError::Catalog(format!(
                "member '{}' of '{}' ends at {} beyond the class size {}",
                field.name,
                spec.name,
                field.end_offset(),
                spec.size
            )));
        }

        let mut bases = Vec::with_capacity(spec.bases.len());
        for base in &spec.bases {
            let resolved = self.classes.get(base).ok_or_else(|| ReflectionError::UnknownBase {
                class: spec.name.clone(),
                base: base.clone(),
            })?;
            bases.push(resolved.clone());
        }

        self.classes
            .insert(spec.name.clone(), Arc::new(CatalogClass { spec, bases }));
        Ok(())
    }

    pub fn with_class(mut self, spec: ClassSpec) -> Result<Self, ReflectionError> {
        self.add(spec)?;
        Ok(self)
    }

    pub fn add_manifest(&mut self, path: PathBuf) {
        self.manifests.push(path);
    }

    /// Parses a JSON catalog. Relative manifest paths are taken relative to
    /// `base_dir`.
    pub fn from_json_str(content: &str, base_dir: &Path) -> Result<Self, ReflectionError> {
        let file: CatalogFile =
            serde_json::from_str(content).map_err(|e| ReflectionError::Catalog(e.to_string()))?;

        let mut catalog = Self::new();
        for manifest in file.manifests {
            let path = if manifest.is_relative() {
                base_dir.join(manifest)
            } else {
                manifest
            };
            catalog.add_manifest(path);
        }
        catalog.add_all(file.classes)?;
        Ok(catalog)
    }

    /// Adds classes in any order, each one once all of its bases are known.
    /// A base that never shows up, or a cycle, is reported as unknown.
    pub fn add_all(&mut self, specs: Vec<ClassSpec>) -> Result<(), ReflectionError> {
        let mut pending = specs;
        while !pending.is_empty() {
            let (ready, waiting): (Vec<_>, Vec<_>) = pending
                .into_iter()
                .partition(|spec| spec.bases.iter().all(|base| self.classes.contains_key(base)));

            if ready.is_empty() {
                let spec = &waiting[0];
                let base = spec
                    .bases
                    .iter()
                    .find(|base| !self.classes.contains_key(*base))
                    .cloned()
                    .unwrap_or_default();
                return Err(ReflectionError::UnknownBase {
                    class: spec.name.clone(),
                    base,
                });
            }
            for spec in ready {
                self.add(spec)?;
            }
            pending = waiting;
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, ReflectionError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ReflectionError::Catalog(format!("{}: {}", path.display(), e)))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_json_str(&content, base_dir)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Reflection for Catalog {
    fn resolve(&self, name: &str) -> Option<Arc<dyn ReflectedClass>> {
        self.classes
            .get(name)
            .map(|class| class.clone() as Arc<dyn ReflectedClass>)
    }

    fn manifest_files(&self) -> Vec<PathBuf> {
        self.manifests.clone()
    }

    fn default_manifest_pattern(&self) -> String {
        r"\.classmap$".to_string()
    }
}
