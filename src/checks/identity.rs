// Thu Jan 16 2026 - Alex

use crate::checks::{CONSTRUCTION_DESTRUCTION, IDENTITY};
use crate::engine::{Check, CheckContext, CheckError};
use crate::streaming::ScratchArena;
use crate::subject::SubjectType;

/// A base-object instance must be able to name its own class.
pub struct IdentityCheck;

impl Check for IdentityCheck {
    fn name(&self) -> &str {
        IDENTITY
    }

    fn prerequisites(&self, subject: &SubjectType) -> bool {
        subject.inherits_base_object() && subject.was_tested_successfully(CONSTRUCTION_DESTRUCTION)
    }

    fn run(&self, subject: &SubjectType, ctx: &mut CheckContext<'_>) -> Result<bool, CheckError> {
        let class = subject.class();
        let mut arena = ScratchArena::for_class(class);

        let instance = arena
            .construct(class)
            .map_err(|e| CheckError::from_reflection(subject.name(), e))?;
        let identity = class.identity(instance.storage());
        instance
            .destroy()
            .map_err(|e| CheckError::from_reflection(subject.name(), e))?;

        match identity {
            Some(descriptor) => {
                log::debug!("{} identifies as '{}'", subject.name(), descriptor);
                Ok(true)
            }
            None => {
                ctx.diagnostics.error(
                    subject.decl_file(),
                    &format!(
                        "Identity lookup of base-object class '{}' returned nothing, this should not be!",
                        subject.name()
                    ),
                );
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::tests::{run_single, subject};
    use crate::reflection::ClassSpec;

    #[test]
    fn test_requires_construction_success() {
        let mut s = subject(ClassSpec::data_object("Foo", 8, 1));
        assert!(!IdentityCheck.prerequisites(&s));
        s.mark_tested(CONSTRUCTION_DESTRUCTION, true);
        assert!(IdentityCheck.prerequisites(&s));

        let mut plain = subject(ClassSpec::new("Plain", 8));
        plain.mark_tested(CONSTRUCTION_DESTRUCTION, true);
        assert!(!IdentityCheck.prerequisites(&plain));
    }

    #[test]
    fn test_missing_identity_reported() {
        let (result, diagnostics) = run_single(&IdentityCheck, ClassSpec::data_object("Anon", 8, 1).without_identity());
        assert!(!result.unwrap());
        assert_eq!(
            diagnostics.diagnostics()[0].to_string(),
            "Anon.h:0: error: Identity lookup of base-object class 'Anon' returned nothing, this should not be!"
        );

        let (result, diagnostics) = run_single(&IdentityCheck, ClassSpec::data_object("Named", 8, 1));
        assert!(result.unwrap());
        assert!(diagnostics.is_empty());
    }
}
