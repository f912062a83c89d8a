// Thu Jan 16 2026 - Alex

use crate::checks::CONSTRUCTION_DESTRUCTION;
use crate::engine::{Check, CheckContext, CheckError};
use crate::streaming::ScratchArena;
use crate::subject::SubjectType;

/// Builds and destroys one default instance.
pub struct ConstructionCheck;

impl Check for ConstructionCheck {
    fn name(&self) -> &str {
        CONSTRUCTION_DESTRUCTION
    }

    fn prerequisites(&self, subject: &SubjectType) -> bool {
        subject.has_new() && subject.has_destruct()
    }

    fn run(&self, subject: &SubjectType, _ctx: &mut CheckContext<'_>) -> Result<bool, CheckError> {
        let class = subject.class();
        let mut arena = ScratchArena::for_class(class);

        let instance = arena
            .construct(class)
            .map_err(|e| CheckError::from_reflection(subject.name(), e))?;
        instance
            .destroy()
            .map_err(|e| CheckError::from_reflection(subject.name(), e))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::tests::{run_single, subject};
    use crate::reflection::ClassSpec;

    #[test]
    fn test_prerequisites() {
        assert!(ConstructionCheck.prerequisites(&subject(ClassSpec::new("Plain", 8))));
        assert!(!ConstructionCheck.prerequisites(&subject(ClassSpec::new("NoNew", 8).without_new())));
        assert!(!ConstructionCheck.prerequisites(&subject(ClassSpec::new("NoDtor", 8).without_destructor())));
    }

    #[test]
    fn test_success() {
        let (result, diagnostics) = run_single(&ConstructionCheck, ClassSpec::data_object("Fine", 8, 1));
        assert!(result.unwrap());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_failures_are_tagged() {
        let (result, _) = run_single(&ConstructionCheck, ClassSpec::new("Broken", 8).failing_construct());
        let err = result.unwrap_err();
        assert!(matches!(err, CheckError::ConstructionFailed { .. }));
        assert_eq!(
            err.to_string(),
            "Construction/Destruction of class 'Broken' failed, manual check of backtrace above is needed!"
        );

        let (result, _) = run_single(&ConstructionCheck, ClassSpec::new("Sticky", 8).failing_destruct());
        assert!(matches!(result, Err(CheckError::DestructionFailed { .. })));
    }
}
