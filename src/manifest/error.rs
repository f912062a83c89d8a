// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error on manifest '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub fn compile_patterns(patterns: &[String]) -> Result<Vec<regex::Regex>, ManifestError> {
    patterns
        .iter()
        .map(|pattern| {
            regex::Regex::new(pattern).map_err(|source| ManifestError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}
