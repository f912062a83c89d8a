// Thu Jan 16 2026 - Alex

pub mod base_streaming;
pub mod construction;
pub mod identity;
pub mod streaming;
pub mod uninitialized;

pub use base_streaming::BaseStreamingCheck;
pub use construction::ConstructionCheck;
pub use identity::IdentityCheck;
pub use streaming::StreamingCheck;
pub use uninitialized::UninitializedStreamingCheck;

use crate::engine::CheckRegistry;

pub const CONSTRUCTION_DESTRUCTION: &str = "construction-destruction";
pub const IDENTITY: &str = "identity";
pub const DATA_OBJECT_BASES: &str = "data-object-bases";
pub const SERIALIZATION: &str = "serialization";
pub const SERIALIZATION_UNINITIALIZED: &str = "serialization-uninitialized-detection";

/// Registers the built-in checks. Call once before running the scheduler.
pub fn register_builtin_checks(registry: &mut CheckRegistry) {
    registry.register(ConstructionCheck);
    registry.register(IdentityCheck);
    registry.register(BaseStreamingCheck);
    registry.register(StreamingCheck);
    registry.register(UninitializedStreamingCheck);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::DEFAULT_SUPPRESSION_MARKER;
    use crate::diagnostics::{DiagnosticEmitter, Severity, SourceLocator};
    use crate::engine::{Check, CheckContext, CheckError, CheckScheduler};
    use crate::reflection::{Catalog, CatalogField, ClassSpec, DataType, Reflection, StreamBuffer};
    use crate::subject::{CheckOutcome, SubjectType};

    pub(crate) fn recording_emitter() -> DiagnosticEmitter {
        DiagnosticEmitter::recording(SourceLocator::default(), DEFAULT_SUPPRESSION_MARKER)
    }

    pub(crate) fn subject_in(catalog: &Catalog, name: &str) -> SubjectType {
        SubjectType::new(catalog.resolve(name).unwrap())
    }

    pub(crate) fn subject(spec: ClassSpec) -> SubjectType {
        let name = spec.name.clone();
        let catalog = Catalog::new().with_class(spec).unwrap();
        subject_in(&catalog, &name)
    }

    pub(crate) fn run_single(check: &dyn Check, spec: ClassSpec) -> (Result<bool, CheckError>, DiagnosticEmitter) {
        let s = subject(spec);
        let diagnostics = recording_emitter();
        let mut buffer = StreamBuffer::with_capacity(256);
        let result = {
            let mut ctx = CheckContext {
                diagnostics: &diagnostics,
                buffer: &mut buffer,
                debug: true,
            };
            check.run(&s, &mut ctx)
        };
        (result, diagnostics)
    }

    #[test]
    fn test_builtin_registration_order() {
        let mut registry = CheckRegistry::new();
        register_builtin_checks(&mut registry);
        assert_eq!(
            registry.names(),
            vec![
                CONSTRUCTION_DESTRUCTION,
                IDENTITY,
                DATA_OBJECT_BASES,
                SERIALIZATION,
                SERIALIZATION_UNINITIALIZED
            ]
        );
    }

    #[test]
    fn test_full_run() {
        let catalog = Catalog::new()
            .with_class(
                ClassSpec::data_object("TAttFill", 4, 0).field(CatalogField::scalar("fFillColor", 0, DataType::Short)),
            )
            .unwrap()
            .with_class(
                ClassSpec::data_object("TBox", 16, 2)
                    .base("TAttFill")
                    .field(CatalogField::scalar("fX1", 0, DataType::Double).init(0))
                    .field(CatalogField::scalar("fY1", 8, DataType::Double)),
            )
            .unwrap()
            .with_class(
                ClassSpec::data_object("TGood", 8, 1).field(CatalogField::scalar("fN", 0, DataType::Int).init(0)),
            )
            .unwrap()
            .with_class(ClassSpec::data_object("TBroken", 8, 1).panicking_construct())
            .unwrap()
            .with_class(ClassSpec::new("Helper", 8))
            .unwrap();

        let mut subjects: Vec<SubjectType> = ["TBox", "TGood", "TBroken", "Helper"]
            .iter()
            .map(|name| subject_in(&catalog, name))
            .collect();

        let mut registry = CheckRegistry::new();
        register_builtin_checks(&mut registry);
        let diagnostics = recording_emitter();
        let stats = CheckScheduler::new(&registry, &diagnostics, 1024).run_all(&mut subjects);

        let [tbox, tgood, tbroken, helper] = &subjects[..] else {
            panic!("four subjects expected");
        };

        assert_eq!(tgood.outcome(SERIALIZATION_UNINITIALIZED), CheckOutcome::Succeeded);
        assert_eq!(tgood.outcome(IDENTITY), CheckOutcome::Succeeded);

        assert_eq!(tbox.outcome(DATA_OBJECT_BASES), CheckOutcome::Failed);
        assert_eq!(tbox.outcome(SERIALIZATION), CheckOutcome::Succeeded);
        assert_eq!(tbox.outcome(SERIALIZATION_UNINITIALIZED), CheckOutcome::Failed);

        assert_eq!(tbroken.outcome(CONSTRUCTION_DESTRUCTION), CheckOutcome::Failed);
        assert_eq!(tbroken.outcome(IDENTITY), CheckOutcome::NotRun);
        assert_eq!(tbroken.outcome(SERIALIZATION), CheckOutcome::Failed);
        assert_eq!(tbroken.outcome(SERIALIZATION_UNINITIALIZED), CheckOutcome::NotRun);

        assert_eq!(helper.outcome(CONSTRUCTION_DESTRUCTION), CheckOutcome::Succeeded);
        assert_eq!(helper.outcome(IDENTITY), CheckOutcome::NotRun);
        assert_eq!(helper.outcome(SERIALIZATION), CheckOutcome::NotRun);

        assert_eq!(stats.panicked, 2);
        assert_eq!(stats.executions_per_pass.last(), Some(&0));

        let messages: Vec<String> = diagnostics.diagnostics().iter().map(|d| d.message.clone()).collect();
        assert!(messages.contains(
            &"Streamed member 'double fY1' of data object 'TBox' not initialized by constructor!".to_string()
        ));
        assert_eq!(diagnostics.count(Severity::Error), messages.len());
    }
}
