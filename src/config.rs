// Tue Jan 13 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SUPPRESSION_MARKER: &str = "static-analyzer: ignore";
pub const INCLUDE_PATH_ENV: &str = "ANALYZER_INCLUDE_PATH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error on config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid pattern '{0}'")]
    InvalidPattern(String),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub manifest_patterns: Vec<String>,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub data_objects_only: bool,
    pub debug: bool,
    pub search_paths: Vec<PathBuf>,
    pub stripped_search_paths: Vec<PathBuf>,
    pub suppression_marker: String,
    pub stream_buffer_capacity: usize,
    pub catalog: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            manifest_patterns: Vec::new(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            data_objects_only: false,
            debug: false,
            search_paths: Vec::new(),
            stripped_search_paths: Vec::new(),
            suppression_marker: DEFAULT_SUPPRESSION_MARKER.to_string(),
            stream_buffer_capacity: 10_000,
            catalog: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn with_manifest_pattern(mut self, pattern: &str) -> Self {
        self.manifest_patterns.push(pattern.to_string());
        self
    }

    pub fn with_include_pattern(mut self, pattern: &str) -> Self {
        self.include_patterns.push(pattern.to_string());
        self
    }

    pub fn with_exclude_pattern(mut self, pattern: &str) -> Self {
        self.exclude_patterns.push(pattern.to_string());
        self
    }

    pub fn with_data_objects_only(mut self, data_objects_only: bool) -> Self {
        self.data_objects_only = data_objects_only;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_search_path(mut self, path: PathBuf) -> Self {
        self.search_paths.push(path);
        self
    }

    pub fn with_catalog(mut self, catalog: PathBuf) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Appends the colon-separated directories of `value` (the content of
    /// `ANALYZER_INCLUDE_PATH`) to the search paths.
    pub fn with_include_path_list(mut self, value: &str) -> Self {
        self.search_paths.extend(
            value
                .split(':')
                .map(|segment| segment.trim_matches('"'))
                .filter(|segment| !segment.is_empty())
                .map(PathBuf::from),
        );
        self
    }

    pub fn with_env_include_path(self) -> Self {
        match std::env::var(INCLUDE_PATH_ENV) {
            Ok(value) => self.with_include_path_list(&value),
            Err(_) => self,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let all_patterns = self
            .manifest_patterns
            .iter()
            .chain(&self.include_patterns)
            .chain(&self.exclude_patterns);
        for pattern in all_patterns {
            if regex::Regex::new(pattern).is_err() {
                return Err(ConfigError::InvalidPattern(pattern.clone()));
            }
        }
        if self.suppression_marker.trim().is_empty() {
            return Err(ConfigError::Invalid("suppression_marker must not be empty".to_string()));
        }
        if self.stream_buffer_capacity == 0 {
            return Err(ConfigError::Invalid("stream_buffer_capacity must be greater than 0".to_string()));
        }
        Ok(())
    }
}
