// Thu Jan 16 2026 - Alex

//! Differential detection of members the default constructor leaves alone.
//!
//! The instance is built three times on scratch memory pre-filled with a
//! sentinel: twice with pattern A, once with pattern B. If every streamed byte
//! is written by the constructor, all three encodings are identical. Identical
//! A runs with a different B run mean the encoding depends on what was in
//! memory before construction. Requiring the A runs to agree rules out output
//! that changes from run to run for other reasons.
//!
//! A member that derives the same value from both sentinels goes unnoticed.

use crate::reflection::{ReflectedClass, ReflectionError, StreamBuffer};
use crate::streaming::{field_digests, stream_and_checksum, Digest, FieldDigests, ScratchArena, PATTERN_A, PATTERN_B};

#[derive(Debug, Clone)]
pub struct DetectionPass {
    pub pattern: u32,
    pub digest: Digest,
    pub fields: FieldDigests,
}

#[derive(Debug, Clone)]
pub struct DetectionReport {
    pub first: DetectionPass,
    pub repeat: DetectionPass,
    pub alternate: DetectionPass,
}

impl DetectionReport {
    /// The two runs on pattern A produced the same encoding.
    pub fn is_reproducible(&self) -> bool {
        self.first.digest == self.repeat.digest
    }

    pub fn leaks_uninitialized(&self) -> bool {
        self.is_reproducible() && self.first.digest != self.alternate.digest
    }
}

pub struct UninitializedDetector<'a> {
    class: &'a dyn ReflectedClass,
    arena: ScratchArena,
}

impl<'a> UninitializedDetector<'a> {
    pub fn new(class: &'a dyn ReflectedClass) -> Self {
        Self {
            class,
            arena: ScratchArena::for_class(class),
        }
    }

    pub fn run(&mut self, buffer: &mut StreamBuffer) -> Result<DetectionReport, ReflectionError> {
        let first = self.pass(PATTERN_A, buffer)?;
        let repeat = self.pass(PATTERN_A, buffer)?;
        let alternate = self.pass(PATTERN_B, buffer)?;

        log::debug!(
            "{}: A1 {} A2 {} B {}",
            self.class.name(),
            first.digest,
            repeat.digest,
            alternate.digest
        );
        Ok(DetectionReport {
            first,
            repeat,
            alternate,
        })
    }

    fn pass(&mut self, pattern: u32, buffer: &mut StreamBuffer) -> Result<DetectionPass, ReflectionError> {
        let class = self.class;
        self.arena.fill(pattern);

        let instance = self.arena.construct(class)?;
        let digest = stream_and_checksum(class, instance.storage(), buffer)?;
        let fields = field_digests(&class.real_data(), instance.storage());
        instance.destroy()?;

        Ok(DetectionPass {
            pattern,
            digest,
            fields,
        })
    }
}
