//! User Preferences Repository

use crate::domain::{DomainResult, UserPreferences};
use super::keys::StorageKeys;
use super::kv_store::KeyValueStore;

#[derive(Clone)]
pub struct PreferencesRepository {
    store: KeyValueStore,
    key: String,
}

impl PreferencesRepository {
    pub fn new(store: KeyValueStore, keys: &StorageKeys) -> Self {
        Self {
            store,
            key: keys.user_preferences(),
        }
    }

    /// Stored preferences, or defaults when absent or unreadable
    pub fn load(&self) -> UserPreferences {
        self.store.get_json(&self.key).unwrap_or_default()
    }

    pub fn save(&self, prefs: &UserPreferences) -> DomainResult<()> {
        self.store.set_json(&self.key, prefs)
    }

    /// Read-modify-write; returns the saved preferences
    pub fn update(&self, f: impl FnOnce(&mut UserPreferences)) -> DomainResult<UserPreferences> {
        let mut prefs = self.load();
        f(&mut prefs);
        self.save(&prefs)?;
        Ok(prefs)
    }
}
