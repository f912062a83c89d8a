// Tue Jan 13 2026 - Alex

pub mod error;
pub mod filter;
pub mod parser;

pub use error::ManifestError;
pub use filter::NameFilter;
pub use parser::{parse_manifest, parse_manifest_line, parse_manifest_str};

use crate::reflection::Reflection;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Keeps the candidate manifests whose path matches at least one pattern.
pub fn select_manifests(candidates: &[PathBuf], patterns: &[String]) -> Result<Vec<PathBuf>, ManifestError> {
    let regexps = error::compile_patterns(patterns)?;

    let mut selected = Vec::new();
    for path in candidates {
        let display = path.display().to_string();
        log::debug!("Checking manifest path {}", display);
        if let Some(re) = regexps.iter().find(|re| re.is_match(&display)) {
            log::debug!("Path matched by regex '{}'.", re.as_str());
            selected.push(path.clone());
        }
    }
    Ok(selected)
}

/// Manifests of the reflection service selected by `patterns`, falling back to
/// the service's default selection when no pattern is given.
pub fn manifests_for_patterns(
    reflection: &dyn Reflection,
    patterns: &[String],
) -> Result<Vec<PathBuf>, ManifestError> {
    let fallback;
    let patterns = if patterns.is_empty() {
        fallback = vec![reflection.default_manifest_pattern()];
        &fallback
    } else {
        patterns
    };
    select_manifests(&reflection.manifest_files(), patterns)
}

/// Union of the class names of every readable manifest. Unreadable manifests
/// are reported and skipped.
pub fn collect_class_names(sources: &[PathBuf]) -> BTreeSet<String> {
    let mut class_names = BTreeSet::new();
    for source in sources {
        match parse_manifest(source, &mut class_names) {
            Ok(added) => log::debug!("{}: {} new class names", source.display(), added),
            Err(e) => log::warn!("Skipping manifest: {}", e),
        }
    }
    class_names
}
