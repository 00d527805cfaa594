//! Plugin identifiers
//!
//! One plugin per planning feature. Each owns a storage collection.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginId {
    Countdown,
    Budget,
    Packing,
    Planner,
}

impl PluginId {
    pub const ALL: [PluginId; 4] = [
        PluginId::Countdown,
        PluginId::Budget,
        PluginId::Packing,
        PluginId::Planner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PluginId::Countdown => "countdown",
            PluginId::Budget => "budget",
            PluginId::Packing => "packing",
            PluginId::Planner => "planner",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "countdown" => Some(PluginId::Countdown),
            "budget" => Some(PluginId::Budget),
            "packing" => Some(PluginId::Packing),
            "planner" => Some(PluginId::Planner),
            _ => None,
        }
    }

    /// Suffix appended to the app prefix to form the collection key
    pub fn storage_suffix(&self) -> &'static str {
        match self {
            PluginId::Countdown => "countdowns",
            PluginId::Budget => "budgets",
            PluginId::Packing => "packing-lists",
            PluginId::Planner => "trip-plans",
        }
    }
}

impl std::fmt::Display for PluginId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_id_round_trip() {
        for id in PluginId::ALL {
            assert_eq!(PluginId::parse(id.as_str()), Some(id));
        }
        assert_eq!(PluginId::parse("castle"), None);
    }

    #[test]
    fn test_plugin_id_serializes_lowercase() {
        let json = serde_json::to_string(&PluginId::Packing).unwrap();
        assert_eq!(json, "\"packing\"");
    }
}
