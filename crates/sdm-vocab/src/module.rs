//! # Capability Modules
//!
//! A capability module is a reusable bundle of property contracts for one
//! rung of an inheritance chain — the vocabulary's `Thing` rung, `Place`
//! rung, and so on. Every entity type definition that composes a module
//! shares the same bundle; modules are never owned by a single type.

use std::sync::Arc;

use sdm_core::ModuleId;

use crate::contract::PropertyContract;

/// A named bundle of property contracts.
#[derive(Debug, Clone)]
pub struct CapabilityModule {
    id: ModuleId,
    properties: Vec<Arc<PropertyContract>>,
}

impl CapabilityModule {
    /// Create a module from its contracts. Declaration order is preserved
    /// and becomes serialization order within the rung.
    pub fn new(id: ModuleId, properties: Vec<PropertyContract>) -> Self {
        Self {
            id,
            properties: properties.into_iter().map(Arc::new).collect(),
        }
    }

    /// The module identifier.
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    /// The contracts in declaration order.
    pub fn properties(&self) -> &[Arc<PropertyContract>] {
        &self.properties
    }

    /// Look up a contract by property name.
    pub fn property(&self, name: &str) -> Option<&Arc<PropertyContract>> {
        self.properties.iter().find(|c| c.name().as_str() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::TypeAlternative;
    use sdm_core::PropertyName;

    #[test]
    fn test_module_lookup_and_order() {
        let module = CapabilityModule::new(
            ModuleId::new("thing").unwrap(),
            vec![
                PropertyContract::new(
                    PropertyName::new("name").unwrap(),
                    vec![TypeAlternative::parse("Text").unwrap()],
                    "The name of the item.",
                )
                .unwrap(),
                PropertyContract::new(
                    PropertyName::new("url").unwrap(),
                    vec![TypeAlternative::parse("URL").unwrap()],
                    "URL of the item.",
                )
                .unwrap(),
            ],
        );
        assert_eq!(module.properties().len(), 2);
        assert_eq!(module.properties()[0].name().as_str(), "name");
        assert!(module.property("url").is_some());
        assert!(module.property("missing").is_none());
    }
}
