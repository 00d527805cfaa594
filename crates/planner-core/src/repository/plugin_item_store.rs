//! Plugin Item Store
//!
//! Per-feature item collections, keyed by plugin id.

use chrono::Utc;
use log::debug;

use crate::domain::{DomainError, DomainResult, ItemPatch, PluginId, PluginItem};
use super::collection::JsonCollection;
use super::keys::StorageKeys;
use super::kv_store::KeyValueStore;
use super::traits::Repository;

#[derive(Clone)]
pub struct PluginItemStore {
    store: KeyValueStore,
    keys: StorageKeys,
}

impl PluginItemStore {
    pub fn new(store: KeyValueStore, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// Repository view over one plugin's collection
    pub fn collection(&self, plugin: PluginId) -> JsonCollection<PluginItem> {
        JsonCollection::new(self.store.clone(), self.keys.plugin(plugin))
    }

    pub fn get_items(&self, plugin: PluginId) -> Vec<PluginItem> {
        self.collection(plugin).list()
    }

    pub fn get_item(&self, plugin: PluginId, id: &str) -> Option<PluginItem> {
        self.collection(plugin).find_by_id(id)
    }

    pub fn contains(&self, plugin: PluginId, id: &str) -> bool {
        self.get_item(plugin, id).is_some()
    }

    /// Append an item, stamping both timestamps.
    ///
    /// A blank id is replaced with a fresh one; an id already present in the
    /// collection is rejected with `Conflict`.
    pub fn add_item(&self, plugin: PluginId, mut item: PluginItem) -> DomainResult<PluginItem> {
        if item.id.trim().is_empty() {
            item.id = uuid::Uuid::new_v4().to_string();
        }
        let now = Utc::now();
        item.created_at = now;
        item.updated_at = now;

        let created = self.collection(plugin).create(&item).map_err(|err| match err {
            DomainError::Conflict(_) => {
                DomainError::Conflict(format!("{} item {} already exists", plugin, item.id))
            }
            other => other,
        })?;
        debug!("added {} item {}", plugin, created.id);
        Ok(created)
    }

    /// Merge `patch` into an existing item and bump `updated_at`
    pub fn update_item(&self, plugin: PluginId, id: &str, patch: &ItemPatch) -> DomainResult<PluginItem> {
        let collection = self.collection(plugin);
        let mut item = collection
            .find_by_id(id)
            .ok_or_else(|| DomainError::NotFound(format!("{} item {}", plugin, id)))?;
        item.merge(patch);
        item.updated_at = Utc::now();
        let updated = collection.update(&item)?;
        debug!("updated {} item {}", plugin, id);
        Ok(updated)
    }

    /// Idempotent: removing an unknown id leaves the collection untouched
    pub fn remove_item(&self, plugin: PluginId, id: &str) -> DomainResult<()> {
        self.collection(plugin).delete(id)
    }
}
