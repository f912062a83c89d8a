// Wed Jan 15 2026 - Alex

use crate::reflection::ReflectedClass;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    NotRun,
    Succeeded,
    Failed,
}

impl CheckOutcome {
    pub fn from_result(result: bool) -> Self {
        if result {
            Self::Succeeded
        } else {
            Self::Failed
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRun => write!(f, "not run"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// One class under test.
///
/// The structural facts are read from the reflection service once, when the
/// subject is created. Check outcomes only ever get added.
pub struct SubjectType {
    class: Arc<dyn ReflectedClass>,
    name: String,
    inherits_base_object: bool,
    is_data_object: bool,
    has_new: bool,
    has_destruct: bool,
    has_default_construct: bool,
    outcomes: IndexMap<String, bool>,
}

impl SubjectType {
    pub fn new(class: Arc<dyn ReflectedClass>) -> Self {
        let inherits_base_object = class.inherits_base_object();
        // Version <= 0: not streamed on its own, relies on the owner.
        let is_data_object = inherits_base_object && class.class_version() > 0;
        Self {
            name: class.name().to_string(),
            inherits_base_object,
            is_data_object,
            has_new: class.has_new(),
            has_destruct: class.has_destructor(),
            has_default_construct: class.has_default_constructor(),
            outcomes: IndexMap::new(),
            class,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> &dyn ReflectedClass {
        self.class.as_ref()
    }

    pub fn decl_file(&self) -> &str {
        self.class.decl_file()
    }

    pub fn inherits_base_object(&self) -> bool {
        self.inherits_base_object
    }

    pub fn is_data_object(&self) -> bool {
        self.is_data_object
    }

    pub fn has_new(&self) -> bool {
        self.has_new
    }

    pub fn has_destruct(&self) -> bool {
        self.has_destruct
    }

    pub fn has_default_construct(&self) -> bool {
        self.has_default_construct
    }

    pub fn was_tested(&self, check: &str) -> bool {
        self.outcomes.contains_key(check)
    }

    pub fn was_tested_successfully(&self, check: &str) -> bool {
        self.outcomes.get(check).copied().unwrap_or(false)
    }

    /// Records the outcome of `check`. An outcome is final: a second record for
    /// the same check is ignored.
    pub fn mark_tested(&mut self, check: &str, result: bool) {
        if self.outcomes.contains_key(check) {
            log::warn!("{}: outcome of '{}' already recorded, keeping the first one", self.name, check);
            return;
        }
        self.outcomes.insert(check.to_string(), result);
    }

    pub fn outcome(&self, check: &str) -> CheckOutcome {
        self.outcomes
            .get(check)
            .map_or(CheckOutcome::NotRun, |&result| CheckOutcome::from_result(result))
    }

    pub fn outcomes(&self) -> impl Iterator<Item = (&str, CheckOutcome)> {
        self.outcomes
            .iter()
            .map(|(name, &result)| (name.as_str(), CheckOutcome::from_result(result)))
    }
}

impl fmt::Debug for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubjectType")
            .field("name", &self.name)
            .field("inherits_base_object", &self.inherits_base_object)
            .field("is_data_object", &self.is_data_object)
            .field("has_new", &self.has_new)
            .field("has_destruct", &self.has_destruct)
            .field("has_default_construct", &self.has_default_construct)
            .field("outcomes", &self.outcomes)
            .finish()
    }
}
