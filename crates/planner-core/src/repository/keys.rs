//! Storage key layout

use crate::domain::PluginId;

pub const DEFAULT_APP_PREFIX: &str = "magic-planner";

/// Derives every persisted key from one app prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    prefix: String,
}

impl StorageKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Collection key for a plugin, e.g. `magic-planner-countdowns`
    pub fn plugin(&self, plugin: PluginId) -> String {
        format!("{}-{}", self.prefix, plugin.storage_suffix())
    }

    pub fn widget_configs(&self) -> String {
        format!("{}-widget-configs", self.prefix)
    }

    pub fn pending_links(&self) -> String {
        format!("{}-pending-widget-links", self.prefix)
    }

    pub fn user_preferences(&self) -> String {
        format!("{}-user-preferences", self.prefix)
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_APP_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let keys = StorageKeys::new("wdw");
        assert_eq!(keys.plugin(PluginId::Countdown), "wdw-countdowns");
        assert_eq!(keys.plugin(PluginId::Budget), "wdw-budgets");
        assert_eq!(keys.plugin(PluginId::Packing), "wdw-packing-lists");
        assert_eq!(keys.plugin(PluginId::Planner), "wdw-trip-plans");
        assert_eq!(keys.widget_configs(), "wdw-widget-configs");
        assert_eq!(keys.pending_links(), "wdw-pending-widget-links");
        assert_eq!(keys.user_preferences(), "wdw-user-preferences");
    }
}
