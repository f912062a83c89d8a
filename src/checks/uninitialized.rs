// Thu Jan 16 2026 - Alex

use crate::checks::{SERIALIZATION, SERIALIZATION_UNINITIALIZED};
use crate::engine::{Check, CheckContext, CheckError};
use crate::streaming::{attribute, UninitializedDetector};
use crate::subject::SubjectType;

/// Finds streamed bytes the default constructor never writes.
pub struct UninitializedStreamingCheck;

impl Check for UninitializedStreamingCheck {
    fn name(&self) -> &str {
        SERIALIZATION_UNINITIALIZED
    }

    fn prerequisites(&self, subject: &SubjectType) -> bool {
        subject.is_data_object() && subject.was_tested_successfully(SERIALIZATION)
    }

    fn run(&self, subject: &SubjectType, ctx: &mut CheckContext<'_>) -> Result<bool, CheckError> {
        let report = UninitializedDetector::new(subject.class())
            .run(ctx.buffer)
            .map_err(|e| CheckError::from_reflection(subject.name(), e))?;

        for duplicate in &report.first.fields.duplicates {
            ctx.diagnostics.warning(
                subject.decl_file(),
                &format!(
                    "Class '{}' contains more than one realdata-member called '{}', that's a bad idea!",
                    subject.name(),
                    duplicate
                ),
            );
        }

        if !report.is_reproducible() {
            log::debug!("{}: encoding differs between identical runs, no verdict", subject.name());
        }
        if !report.leaks_uninitialized() {
            return Ok(true);
        }

        let attribution = attribute(subject.name(), subject.decl_file(), &report, ctx.diagnostics);
        log::debug!("{}: uninitialized members {:?}", subject.name(), attribution.fields);
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::tests::{run_single, subject};
    use crate::diagnostics::Severity;
    use crate::reflection::{CatalogField, ClassSpec, DataType};

    #[test]
    fn test_requires_successful_streaming() {
        let mut s = subject(ClassSpec::data_object("Foo", 8, 1));
        assert!(!UninitializedStreamingCheck.prerequisites(&s));
        s.mark_tested(SERIALIZATION, false);
        assert!(!UninitializedStreamingCheck.prerequisites(&s));

        let mut s = subject(ClassSpec::data_object("Bar", 8, 1));
        s.mark_tested(SERIALIZATION, true);
        assert!(UninitializedStreamingCheck.prerequisites(&s));
    }

    #[test]
    fn test_reports_member() {
        let (result, diagnostics) = run_single(
            &UninitializedStreamingCheck,
            ClassSpec::data_object("TLeaky", 16, 3)
                .field(CatalogField::scalar("fEntries", 0, DataType::Long64).init(0))
                .field(CatalogField::scalar("fWeight", 8, DataType::Double)),
        );
        assert!(!result.unwrap());
        let reported = diagnostics.diagnostics();
        assert_eq!(reported.len(), 1);
        assert_eq!(
            reported[0].message,
            "Streamed member 'double fWeight' of data object 'TLeaky' not initialized by constructor!"
        );
    }

    #[test]
    fn test_clean_class_passes() {
        let (result, diagnostics) = run_single(
            &UninitializedStreamingCheck,
            ClassSpec::data_object("TClean", 8, 3).field(CatalogField::scalar("fN", 0, DataType::Long).init(5)),
        );
        assert!(result.unwrap());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_duplicate_member_warned() {
        let (result, diagnostics) = run_single(
            &UninitializedStreamingCheck,
            ClassSpec::data_object("TTwice", 8, 1)
                .field(CatalogField::scalar("fN", 0, DataType::Int).init(1))
                .field(CatalogField::scalar("fN", 4, DataType::Int).init(2)),
        );
        assert!(result.unwrap());
        assert_eq!(diagnostics.count(Severity::Warning), 1);
        assert_eq!(
            diagnostics.diagnostics()[0].message,
            "Class 'TTwice' contains more than one realdata-member called 'fN', that's a bad idea!"
        );
    }
}
