//! User preferences blob

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserTier {
    #[default]
    Free,
    Premium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub tier: UserTier,
    /// Background saving of widget edits
    pub auto_save: bool,
    pub compact_widgets: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            tier: UserTier::Free,
            auto_save: true,
            compact_widgets: false,
        }
    }
}

impl UserPreferences {
    /// The fields feature editors depend on. Layout-only fields are left
    /// out so toggling them never remounts an editor mid-edit.
    pub fn editor_settings(&self) -> (UserTier, bool) {
        (self.tier, self.auto_save)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_blob_uses_defaults() {
        let prefs: UserPreferences = serde_json::from_str(r#"{"tier":"premium"}"#).unwrap();
        assert_eq!(prefs.tier, UserTier::Premium);
        assert!(prefs.auto_save);
        assert!(!prefs.compact_widgets);
    }

    #[test]
    fn test_compact_toggle_keeps_editor_settings() {
        let prefs = UserPreferences::default();
        let compact = UserPreferences { compact_widgets: true, ..prefs.clone() };
        assert_eq!(prefs.editor_settings(), compact.editor_settings());

        let premium = UserPreferences { tier: UserTier::Premium, ..prefs.clone() };
        assert_ne!(prefs.editor_settings(), premium.editor_settings());
        let manual = UserPreferences { auto_save: false, ..prefs.clone() };
        assert_ne!(prefs.editor_settings(), manual.editor_settings());
    }
}
