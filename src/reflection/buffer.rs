// Wed Jan 15 2026 - Alex

use bytes::{BufMut, BytesMut};
use std::collections::HashMap;

/// Tag written instead of an object body when the object was already streamed
/// into this buffer.
pub const REFERENCE_TAG: u32 = 0x8000_0000;

/// Write buffer of the structured binary encoder.
///
/// Besides the bytes it keeps the map of objects already written, keyed by
/// instance address, so repeated objects are emitted as back-references. A
/// buffer reused from the start must have that map reset, otherwise the second
/// write of the same instance collapses into a single reference tag.
#[derive(Debug)]
pub struct StreamBuffer {
    data: BytesMut,
    object_map: HashMap<usize, u32>,
}

impl StreamBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: BytesMut::with_capacity(capacity),
            object_map: HashMap::new(),
        }
    }

    pub fn reset_map(&mut self) {
        self.object_map.clear();
    }

    /// Moves the write position back; everything behind it is dropped.
    pub fn set_offset(&mut self, offset: usize) {
        self.data.truncate(offset);
    }

    /// Registers an instance and returns its tag, or `None` if it is already
    /// known to this buffer.
    pub fn map_object(&mut self, address: usize) -> Option<u32> {
        if self.object_map.contains_key(&address) {
            return None;
        }
        let tag = self.data.len() as u32;
        self.object_map.insert(address, tag);
        Some(tag)
    }

    pub fn mapped_tag(&self, address: usize) -> Option<u32> {
        self.object_map.get(&address).copied()
    }

    pub fn write_reference(&mut self, tag: u32) {
        self.data.put_u32(REFERENCE_TAG | tag);
    }

    pub fn write_version(&mut self, version: i16) {
        self.data.put_i16(version);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.put_slice(bytes);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for StreamBuffer {
    fn default() -> Self {
        Self::with_capacity(10_000)
    }
}
