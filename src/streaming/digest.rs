// Thu Jan 16 2026 - Alex

use crate::reflection::{FieldDescriptor, ReflectedClass, ReflectionError, StreamBuffer};
use crate::utils::hex_string;
use indexmap::IndexMap;
use sha2::Sha256;
use std::fmt;

/// SHA-256 of a byte range.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    pub fn of(bytes: &[u8]) -> Self {
        use sha2::Digest as _;
        let mut out = [0u8; 32];
        out.copy_from_slice(&Sha256::digest(bytes));
        Self(out)
    }

    pub fn to_hex(&self) -> String {
        hex_string(&self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

/// Encodes the instance in `storage` from the start of `buffer` and digests
/// the encoded bytes.
pub fn stream_and_checksum(
    class: &dyn ReflectedClass,
    storage: &[u8],
    buffer: &mut StreamBuffer,
) -> Result<Digest, ReflectionError> {
    // A stale object map would turn the instance into a back-reference.
    buffer.reset_map();
    buffer.set_offset(0);
    class.stream(storage, buffer)?;
    Ok(Digest::of(buffer.as_bytes()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDigest {
    pub field: FieldDescriptor,
    pub digest: Digest,
}

/// Per-member digests of one instance, keyed by member name in declaration
/// order.
#[derive(Debug, Clone, Default)]
pub struct FieldDigests {
    pub digests: IndexMap<String, FieldDigest>,
    /// Member names declared more than once; only the first is digested.
    pub duplicates: Vec<String>,
}

impl FieldDigests {
    pub fn get(&self, name: &str) -> Option<&FieldDigest> {
        self.digests.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDigest)> {
        self.digests.iter().map(|(name, digest)| (name.as_str(), digest))
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}

/// Digests the bytes of every digestible member of `fields` within `storage`.
pub fn field_digests(fields: &[FieldDescriptor], storage: &[u8]) -> FieldDigests {
    let mut result = FieldDigests::default();

    for field in fields.iter().filter(|f| f.is_digestible()) {
        if result.digests.contains_key(&field.name) {
            result.duplicates.push(field.name.clone());
            continue;
        }
        let Some(bytes) = storage.get(field.offset..field.end_offset()) else {
            log::warn!("Member {} lies outside the instance, skipped", field);
            continue;
        };
        result.digests.insert(
            field.name.clone(),
            FieldDigest {
                field: field.clone(),
                digest: Digest::of(bytes),
            },
        );
    }
    result
}
