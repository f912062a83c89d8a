// Tue Jan 13 2026 - Alex

use crate::manifest::error::{compile_patterns, ManifestError};
use regex::Regex;
use std::collections::BTreeSet;

/// Include/exclude filtering of class names. A name survives if it matches
/// at least one include pattern (or none are given) and no exclude pattern.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl NameFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, ManifestError> {
        Ok(Self {
            include: compile_patterns(include)?,
            exclude: compile_patterns(exclude)?,
        })
    }

    pub fn keeps(&self, name: &str) -> bool {
        if !self.include.is_empty() {
            match self.include.iter().find(|re| re.is_match(name)) {
                Some(re) => log::debug!("'{}' kept since it matched pattern '{}'.", name, re.as_str()),
                None => {
                    log::debug!("'{}' removed since it did not match any pattern.", name);
                    return false;
                }
            }
        }

        if let Some(re) = self.exclude.iter().find(|re| re.is_match(name)) {
            log::debug!("'{}' removed since it matched anti-pattern '{}'.", name, re.as_str());
            return false;
        }
        true
    }

    pub fn apply(&self, names: &mut BTreeSet<String>) {
        names.retain(|name| self.keeps(name));
    }
}
