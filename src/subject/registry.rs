// Wed Jan 15 2026 - Alex

use crate::config::AnalyzerConfig;
use crate::manifest::{self, ManifestError, NameFilter};
use crate::reflection::Reflection;
use crate::subject::SubjectType;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// The set of subjects of one run, sorted by class name.
#[derive(Debug, Default)]
pub struct SubjectRegistry {
    subjects: Vec<SubjectType>,
}

impl SubjectRegistry {
    /// Reads the class names of `sources`, filters them and resolves the
    /// survivors. Names the reflection service cannot resolve are dropped.
    pub fn discover(
        sources: &[PathBuf],
        include: &[String],
        exclude: &[String],
        reflection: &dyn Reflection,
    ) -> Result<Self, ManifestError> {
        let filter = NameFilter::new(include, exclude)?;
        let mut class_names = manifest::collect_class_names(sources);
        filter.apply(&mut class_names);
        Ok(Self::resolve(&class_names, reflection))
    }

    /// Full discovery as configured: manifest selection, filtering,
    /// resolution and the optional data-object restriction.
    pub fn from_config(config: &AnalyzerConfig, reflection: &dyn Reflection) -> Result<Self, ManifestError> {
        let sources = manifest::manifests_for_patterns(reflection, &config.manifest_patterns)?;
        log::debug!("{} manifests selected", sources.len());

        let mut registry = Self::discover(&sources, &config.include_patterns, &config.exclude_patterns, reflection)?;
        if config.data_objects_only {
            registry.subjects.retain(SubjectType::is_data_object);
        }

        if config.debug {
            log::debug!("List of considered classes:");
            for subject in &registry.subjects {
                log::debug!("- {}", subject.name());
            }
        }
        Ok(registry)
    }

    pub fn resolve(class_names: &BTreeSet<String>, reflection: &dyn Reflection) -> Self {
        let subjects = class_names
            .iter()
            .filter_map(|name| {
                let class = reflection.resolve(name);
                if class.is_none() {
                    log::debug!("'{}' could not be resolved, dropped", name);
                }
                class
            })
            .map(SubjectType::new)
            .collect::<Vec<_>>();

        let mut registry = Self { subjects };
        registry.dedup();
        registry
    }

    // Different manifest spellings may resolve to the same class.
    fn dedup(&mut self) {
        let mut seen = BTreeSet::new();
        self.subjects.retain(|subject| seen.insert(subject.name().to_string()));
        self.subjects.sort_by(|a, b| a.name().cmp(b.name()));
    }

    pub fn subjects(&self) -> &[SubjectType] {
        &self.subjects
    }

    pub fn subjects_mut(&mut self) -> &mut [SubjectType] {
        &mut self.subjects
    }

    pub fn get(&self, name: &str) -> Option<&SubjectType> {
        self.subjects.iter().find(|subject| subject.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.subjects.iter().map(SubjectType::name).collect()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::{Catalog, ClassSpec};
    use std::fs;

    fn catalog() -> Catalog {
        Catalog::new()
            .with_class(ClassSpec::data_object("Foo", 16, 1))
            .unwrap()
            .with_class(ClassSpec::new("Bar", 8))
            .unwrap()
            .with_class(ClassSpec::data_object("Baz", 8, 2))
            .unwrap()
    }

    #[test]
    fn test_discover_both_manifest_formats() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = dir.path().join("libFoo.classmap");
        fs::write(&legacy, "Library.Foo:   libFoo.so\n").unwrap();
        let modern = dir.path().join("libBar.classmap");
        fs::write(&modern, "[ libBar.so ]\nclass Bar\n").unwrap();

        let registry = SubjectRegistry::discover(&[legacy, modern], &[], &[], &catalog()).unwrap();
        assert_eq!(registry.names(), vec!["Bar", "Foo"]);
    }

    #[test]
    fn test_discover_drops_unresolvable() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("lib.classmap");
        fs::write(&manifest, "class Foo\nclass Ghost\n").unwrap();

        let registry = SubjectRegistry::discover(&[manifest], &[], &[], &catalog()).unwrap();
        assert_eq!(registry.names(), vec!["Foo"]);
        assert!(registry.get("Ghost").is_none());
    }

    #[test]
    fn test_discover_filters() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("lib.classmap");
        fs::write(&manifest, "class Foo\nclass Bar\nclass Baz\n").unwrap();

        let registry = SubjectRegistry::discover(
            &[manifest],
            &["^B".to_string()],
            &["z$".to_string()],
            &catalog(),
        )
        .unwrap();
        assert_eq!(registry.names(), vec!["Bar"]);
    }

    #[test]
    fn test_from_config_data_objects_only() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("lib.classmap");
        fs::write(&manifest, "class Foo\nclass Bar\nclass Baz\n").unwrap();

        let mut reflection = catalog();
        reflection.add_manifest(manifest);

        let config = AnalyzerConfig::default().with_data_objects_only(true);
        let registry = SubjectRegistry::from_config(&config, &reflection).unwrap();
        assert_eq!(registry.names(), vec!["Baz", "Foo"]);
    }

    #[test]
    fn test_resolve_dedups() {
        let names: BTreeSet<String> = ["Foo", "Foo "].iter().map(|s| s.to_string()).collect();
        struct Trimming(Catalog);
        impl Reflection for Trimming {
            fn resolve(&self, name: &str) -> Option<std::sync::Arc<dyn crate::reflection::ReflectedClass>> {
                self.0.resolve(name.trim())
            }
            fn manifest_files(&self) -> Vec<PathBuf> {
                Vec::new()
            }
        }
        let registry = SubjectRegistry::resolve(&names, &Trimming(catalog()));
        assert_eq!(registry.len(), 1);
    }
}
