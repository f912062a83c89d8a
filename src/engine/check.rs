// Tue Jan 13 2026 - Alex

use crate::diagnostics::DiagnosticEmitter;
use crate::engine::CheckError;
use crate::reflection::StreamBuffer;
use crate::subject::SubjectType;

/// What a check body gets besides its subject.
pub struct CheckContext<'a> {
    pub diagnostics: &'a DiagnosticEmitter,
    /// Encoder buffer shared by all checks of a run; reset before each use.
    pub buffer: &'a mut StreamBuffer,
    pub debug: bool,
}

/// A named analysis run once per subject.
///
/// `run` returns the outcome to record: `Ok(false)` for a finding, `Err` when
/// the subject could not be exercised at all.
pub trait Check: Send + Sync {
    fn name(&self) -> &str;

    fn prerequisites(&self, _subject: &SubjectType) -> bool {
        true
    }

    fn run(&self, subject: &SubjectType, ctx: &mut CheckContext<'_>) -> Result<bool, CheckError>;
}

type Prerequisite = Box<dyn Fn(&SubjectType) -> bool + Send + Sync>;
type Body = Box<dyn Fn(&SubjectType, &mut CheckContext<'_>) -> Result<bool, CheckError> + Send + Sync>;

/// A check assembled from two closures.
pub struct FnCheck {
    name: String,
    prerequisite: Prerequisite,
    body: Body,
}

impl FnCheck {
    pub fn new<P, B>(name: &str, prerequisite: P, body: B) -> Self
    where
        P: Fn(&SubjectType) -> bool + Send + Sync + 'static,
        B: Fn(&SubjectType, &mut CheckContext<'_>) -> Result<bool, CheckError> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            prerequisite: Box::new(prerequisite),
            body: Box::new(body),
        }
    }
}

impl Check for FnCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn prerequisites(&self, subject: &SubjectType) -> bool {
        (self.prerequisite)(subject)
    }

    fn run(&self, subject: &SubjectType, ctx: &mut CheckContext<'_>) -> Result<bool, CheckError> {
        (self.body)(subject, ctx)
    }
}
