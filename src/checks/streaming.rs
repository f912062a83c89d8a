// Thu Jan 16 2026 - Alex

use crate::checks::SERIALIZATION;
use crate::engine::{Check, CheckContext, CheckError};
use crate::streaming::{stream_and_checksum, ScratchArena};
use crate::subject::SubjectType;

/// Streams one default instance.
pub struct StreamingCheck;

impl Check for StreamingCheck {
    fn name(&self) -> &str {
        SERIALIZATION
    }

    fn prerequisites(&self, subject: &SubjectType) -> bool {
        subject.is_data_object()
    }

    fn run(&self, subject: &SubjectType, ctx: &mut CheckContext<'_>) -> Result<bool, CheckError> {
        if !subject.has_new() || !subject.has_destruct() {
            log::debug!("{}: no default instance can be built, not streamed", subject.name());
            return Ok(false);
        }

        let class = subject.class();
        let mut arena = ScratchArena::for_class(class);
        let instance = arena
            .construct(class)
            .map_err(|e| CheckError::from_reflection(subject.name(), e))?;

        let digest = stream_and_checksum(class, instance.storage(), ctx.buffer)
            .map_err(|e| CheckError::from_reflection(subject.name(), e))?;
        if ctx.debug {
            log::debug!("{}: {} bytes, digest {}", subject.name(), ctx.buffer.len(), digest);
        }

        instance
            .destroy()
            .map_err(|e| CheckError::from_reflection(subject.name(), e))?;
        Ok(true)
    }
}
