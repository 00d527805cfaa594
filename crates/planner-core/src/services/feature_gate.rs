//! Feature access by user tier

use crate::domain::{PluginId, UserTier};
use crate::repository::PreferencesRepository;

/// Feature name checked before any auto-save commit is attempted
pub const AUTO_SAVE_FEATURE: &str = "autoSave";

const FREE_FEATURES: &[&str] = &["countdown", "packing", AUTO_SAVE_FEATURE];

pub trait FeatureGate {
    fn has_feature_access(&self, feature: &str) -> bool;
}

/// Whether `tier` includes `feature`, ignoring user toggles
pub fn tier_allows(tier: UserTier, feature: &str) -> bool {
    match tier {
        UserTier::Premium => true,
        UserTier::Free => FREE_FEATURES.contains(&feature),
    }
}

pub fn plugin_requires_premium(plugin: PluginId) -> bool {
    !tier_allows(UserTier::Free, plugin.as_str())
}

/// Grants everything; for tests and demos
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAllFeatures;

impl FeatureGate for AllowAllFeatures {
    fn has_feature_access(&self, _feature: &str) -> bool {
        true
    }
}

/// Reads the stored preferences on every check so tier changes apply
/// immediately
#[derive(Clone)]
pub struct TierFeatureGate {
    preferences: PreferencesRepository,
}

impl TierFeatureGate {
    pub fn new(preferences: PreferencesRepository) -> Self {
        Self { preferences }
    }
}

impl FeatureGate for TierFeatureGate {
    fn has_feature_access(&self, feature: &str) -> bool {
        let prefs = self.preferences.load();
        if feature == AUTO_SAVE_FEATURE && !prefs.auto_save {
            return false;
        }
        tier_allows(prefs.tier, feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{KeyValueStore, StorageKeys};

    fn gate() -> (TierFeatureGate, PreferencesRepository) {
        let prefs = PreferencesRepository::new(KeyValueStore::in_memory(), &StorageKeys::default());
        (TierFeatureGate::new(prefs.clone()), prefs)
    }

    #[test]
    fn test_free_tier_table() {
        let (gate, _) = gate();
        assert!(gate.has_feature_access("countdown"));
        assert!(gate.has_feature_access("packing"));
        assert!(gate.has_feature_access(AUTO_SAVE_FEATURE));
        assert!(!gate.has_feature_access("budget"));
        assert!(!gate.has_feature_access("planner"));
    }

    #[test]
    fn test_premium_unlocks_everything() {
        let (gate, prefs) = gate();
        prefs.update(|p| p.tier = UserTier::Premium).unwrap();
        assert!(gate.has_feature_access("budget"));
        assert!(gate.has_feature_access("planner"));
    }

    #[test]
    fn test_auto_save_toggle_overrides_tier() {
        let (gate, prefs) = gate();
        prefs
            .update(|p| {
                p.tier = UserTier::Premium;
                p.auto_save = false;
            })
            .unwrap();
        assert!(!gate.has_feature_access(AUTO_SAVE_FEATURE));
        assert!(gate.has_feature_access("countdown"));
    }

    #[test]
    fn test_premium_plugins() {
        assert!(!plugin_requires_premium(PluginId::Countdown));
        assert!(plugin_requires_premium(PluginId::Budget));
    }
}
