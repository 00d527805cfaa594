//! Plugin Registry
//!
//! Explicit table of the planning features, built once at startup and
//! handed to whoever composes the dashboard.

use crate::domain::{
    default_item, BudgetData, CountdownData, DomainError, DomainResult, PackingListData,
    PluginId, PluginItem, TripPlanData,
};
use super::feature_gate::plugin_requires_premium;

#[derive(Debug, Clone, Copy)]
pub struct PluginDescriptor {
    pub id: PluginId,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub premium: bool,
    /// Factory for the empty item a new widget starts with
    pub new_item: fn() -> PluginItem,
}

#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: Vec<PluginDescriptor>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four built-in features
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let defaults = [
            PluginDescriptor {
                id: PluginId::Countdown,
                name: "Countdown",
                icon: "🏰",
                description: "Days until the magic starts",
                premium: plugin_requires_premium(PluginId::Countdown),
                new_item: default_item::<CountdownData>,
            },
            PluginDescriptor {
                id: PluginId::Budget,
                name: "Budget",
                icon: "💰",
                description: "Track what the trip costs",
                premium: plugin_requires_premium(PluginId::Budget),
                new_item: default_item::<BudgetData>,
            },
            PluginDescriptor {
                id: PluginId::Packing,
                name: "Packing List",
                icon: "🎒",
                description: "Everything that goes in the suitcase",
                premium: plugin_requires_premium(PluginId::Packing),
                new_item: default_item::<PackingListData>,
            },
            PluginDescriptor {
                id: PluginId::Planner,
                name: "Trip Planner",
                icon: "🗺️",
                description: "Day-by-day park itinerary",
                premium: plugin_requires_premium(PluginId::Planner),
                new_item: default_item::<TripPlanData>,
            },
        ];
        for descriptor in defaults {
            // Fresh registry, ids are distinct
            let _ = registry.register(descriptor);
        }
        registry
    }

    pub fn register(&mut self, descriptor: PluginDescriptor) -> DomainResult<()> {
        if self.get(descriptor.id).is_some() {
            return Err(DomainError::Conflict(format!(
                "plugin {} is already registered",
                descriptor.id
            )));
        }
        self.plugins.push(descriptor);
        Ok(())
    }

    pub fn get(&self, id: PluginId) -> Option<&PluginDescriptor> {
        self.plugins.iter().find(|d| d.id == id)
    }

    /// Descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.plugins.iter()
    }

    pub fn new_item(&self, id: PluginId) -> DomainResult<PluginItem> {
        self.get(id)
            .map(|d| (d.new_item)())
            .ok_or_else(|| DomainError::NotFound(format!("plugin {}", id)))
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_plugin() {
        let registry = PluginRegistry::with_defaults();
        assert_eq!(registry.len(), PluginId::ALL.len());
        let order: Vec<PluginId> = registry.iter().map(|d| d.id).collect();
        assert_eq!(order, PluginId::ALL.to_vec());
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = PluginRegistry::with_defaults();
        let countdown = *registry.get(PluginId::Countdown).unwrap();
        let err = registry.register(countdown).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn test_new_item_uses_factory() {
        let registry = PluginRegistry::with_defaults();
        let item = registry.new_item(PluginId::Packing).unwrap();
        assert_eq!(item.name, "Packing List");
        assert_eq!(item.get("entries"), Some(&serde_json::json!([])));

        let empty = PluginRegistry::new();
        assert!(empty.new_item(PluginId::Packing).unwrap_err().is_not_found());
    }
}
