// Thu Jan 16 2026 - Alex

pub mod arena;
pub mod attribution;
pub mod detector;
pub mod digest;

pub use arena::{ConstructedInstance, ScratchArena, PATTERN_A, PATTERN_B};
pub use attribution::{attribute, differing_fields, Attribution};
pub use detector::{DetectionPass, DetectionReport, UninitializedDetector};
pub use digest::{field_digests, stream_and_checksum, Digest, FieldDigest, FieldDigests};
