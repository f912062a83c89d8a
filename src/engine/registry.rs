// Tue Jan 13 2026 - Alex

use crate::engine::{Check, CheckContext, CheckError, FnCheck};
use crate::subject::SubjectType;
use indexmap::IndexMap;
use std::sync::Arc;

/// Named checks in registration order.
///
/// Registering a name again replaces the check but keeps its place in the
/// order. The registry is filled before a run and only read during it.
#[derive(Default)]
pub struct CheckRegistry {
    checks: IndexMap<String, Arc<dyn Check>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<C: Check + 'static>(&mut self, check: C) {
        self.register_arc(Arc::new(check));
    }

    pub fn register_arc(&mut self, check: Arc<dyn Check>) {
        let name = check.name().to_string();
        if self.checks.insert(name.clone(), check).is_some() {
            log::debug!("Check '{}' registered again, replacing the previous one", name);
        }
    }

    pub fn register_check<P, B>(&mut self, name: &str, prerequisite: P, body: B)
    where
        P: Fn(&SubjectType) -> bool + Send + Sync + 'static,
        B: Fn(&SubjectType, &mut CheckContext<'_>) -> Result<bool, CheckError> + Send + Sync + 'static,
    {
        self.register(FnCheck::new(name, prerequisite, body));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Check>> {
        self.checks.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Check>> {
        self.checks.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.checks.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = CheckRegistry::new();
        registry.register_check("zeta", |_| true, |_, _| Ok(true));
        registry.register_check("alpha", |_| true, |_, _| Ok(true));
        registry.register_check("mid", |_| true, |_, _| Ok(true));
        assert_eq!(registry.names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_reregistration_replaces_in_place() {
        let mut registry = CheckRegistry::new();
        registry.register_check("first", |_| true, |_, _| Ok(true));
        registry.register_check("second", |_| true, |_, _| Ok(true));
        registry.register_check("first", |_| false, |_, _| Ok(false));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["first", "second"]);

        let catalog = crate::reflection::Catalog::new()
            .with_class(crate::reflection::ClassSpec::new("Foo", 8))
            .unwrap();
        let subject = SubjectType::new(crate::reflection::Reflection::resolve(&catalog, "Foo").unwrap());
        assert!(!registry.get("first").unwrap().prerequisites(&subject));
    }
}
