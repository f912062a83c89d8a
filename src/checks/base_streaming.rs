// Thu Jan 16 2026 - Alex

use crate::checks::DATA_OBJECT_BASES;
use crate::engine::{Check, CheckContext, CheckError};
use crate::subject::SubjectType;
use itertools::Itertools;

/// Bases with a non-positive version are not streamed on their own, so a
/// data object deriving from one silently drops the base's members.
pub struct BaseStreamingCheck;

impl Check for BaseStreamingCheck {
    fn name(&self) -> &str {
        DATA_OBJECT_BASES
    }

    fn prerequisites(&self, subject: &SubjectType) -> bool {
        subject.is_data_object()
    }

    fn run(&self, subject: &SubjectType, ctx: &mut CheckContext<'_>) -> Result<bool, CheckError> {
        let mut clean = true;

        for base in subject.class().bases() {
            let version = base.class_version();
            if version > 0 {
                continue;
            }
            let members = base
                .real_data()
                .iter()
                .filter(|field| !field.is_transient())
                .map(|field| field.name.as_str())
                .join(",");
            if members.is_empty() {
                continue;
            }

            ctx.diagnostics.error(
                subject.decl_file(),
                &format!(
                    "Data object class '{}' inherits from '{}' which has class version '{}', members: {} will not be streamed!",
                    subject.name(),
                    base.name(),
                    version,
                    members
                ),
            );
            clean = false;
        }
        Ok(clean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::tests::{recording_emitter, subject_in};
    use crate::reflection::{Catalog, CatalogField, ClassSpec, DataType, StreamBuffer};

    fn run(catalog: &Catalog, name: &str) -> (bool, Vec<String>) {
        let s = subject_in(catalog, name);
        let diagnostics = recording_emitter();
        let mut buffer = StreamBuffer::with_capacity(64);
        let mut ctx = CheckContext {
            diagnostics: &diagnostics,
            buffer: &mut buffer,
            debug: false,
        };
        let result = BaseStreamingCheck.run(&s, &mut ctx).unwrap();
        (result, diagnostics.diagnostics().iter().map(|d| d.message.clone()).collect())
    }

    #[test]
    fn test_unversioned_base_members_reported() {
        let catalog = Catalog::new()
            .with_class(
                ClassSpec::data_object("TAttLine", 8, 0)
                    .field(CatalogField::scalar("fLineColor", 0, DataType::Short))
                    .field(CatalogField::scalar("fLineStyle", 2, DataType::Short))
                    .field(CatalogField::scalar("fCache", 4, DataType::Int).transient()),
            )
            .unwrap()
            .with_class(ClassSpec::data_object("TGraph", 16, 4).base("TAttLine"))
            .unwrap();

        let (clean, messages) = run(&catalog, "TGraph");
        assert!(!clean);
        assert_eq!(
            messages,
            vec![
                "Data object class 'TGraph' inherits from 'TAttLine' which has class version '0', members: fLineColor,fLineStyle will not be streamed!"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_versioned_or_empty_bases_pass() {
        let catalog = Catalog::new()
            .with_class(
                ClassSpec::data_object("TNamed", 8, 1).field(CatalogField::scalar("fName", 0, DataType::Long)),
            )
            .unwrap()
            .with_class(
                ClassSpec::data_object("TMarker", 8, -1)
                    .field(CatalogField::scalar("fTransientOnly", 0, DataType::Int).transient()),
            )
            .unwrap()
            .with_class(ClassSpec::data_object("THist", 32, 2).base("TNamed").base("TMarker"))
            .unwrap();

        let (clean, messages) = run(&catalog, "THist");
        assert!(clean);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_prerequisite_is_data_object() {
        let catalog = Catalog::new()
            .with_class(ClassSpec::data_object("Streamed", 8, 1))
            .unwrap()
            .with_class(ClassSpec::data_object("Unversioned", 8, 0))
            .unwrap();
        assert!(BaseStreamingCheck.prerequisites(&subject_in(&catalog, "Streamed")));
        assert!(!BaseStreamingCheck.prerequisites(&subject_in(&catalog, "Unversioned")));
    }
}
