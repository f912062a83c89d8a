// Thu Jan 16 2026 - Alex

use crate::reflection::{ReflectedClass, ReflectionError};
use crate::utils::{words_for, WORD_SIZE};

/// First sentinel; an implausible value for any real member.
pub const PATTERN_A: u32 = 0xB33F_D34D;
/// Second sentinel, distinct from the first in every byte.
pub const PATTERN_B: u32 = 0xD34D_B33F;

/// Scratch storage for in-place construction, sized in whole machine words
/// with at least one spare word behind the instance.
#[derive(Debug)]
pub struct ScratchArena {
    storage: Vec<u8>,
}

impl ScratchArena {
    pub fn for_size(instance_size: usize) -> Self {
        Self {
            storage: vec![0; words_for(instance_size) * WORD_SIZE],
        }
    }

    pub fn for_class(class: &dyn ReflectedClass) -> Self {
        Self::for_size(class.size())
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.storage
    }

    /// Overwrites the whole region with `pattern` repeated.
    pub fn fill(&mut self, pattern: u32) {
        let bytes = pattern.to_le_bytes();
        for chunk in self.storage.chunks_mut(bytes.len()) {
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    /// Default-constructs `class` in the region. The returned guard destroys
    /// the instance when dropped.
    pub fn construct<'a>(
        &'a mut self,
        class: &'a dyn ReflectedClass,
    ) -> Result<ConstructedInstance<'a>, ReflectionError> {
        class.construct(&mut self.storage)?;
        Ok(ConstructedInstance {
            class,
            storage: &mut self.storage,
            destroyed: false,
        })
    }
}

/// A live instance inside a [`ScratchArena`].
pub struct ConstructedInstance<'a> {
    class: &'a dyn ReflectedClass,
    storage: &'a mut [u8],
    destroyed: bool,
}

impl<'a> ConstructedInstance<'a> {
    pub fn storage(&self) -> &[u8] {
        &self.storage[..]
    }

    /// Destroys the instance and reports the destructor's outcome. Dropping
    /// the guard instead destroys it too, but only logs a failure.
    pub fn destroy(mut self) -> Result<(), ReflectionError> {
        self.destroyed = true;
        self.class.destruct(&mut *self.storage)
    }
}

impl Drop for ConstructedInstance<'_> {
    fn drop(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        if let Err(e) = self.class.destruct(&mut *self.storage) {
            log::warn!("Destroying '{}' after an earlier failure: {}", self.class.name(), e);
        }
    }
}
