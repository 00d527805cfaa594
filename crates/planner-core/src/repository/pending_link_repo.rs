//! Pending Link Repository
//!
//! Map of placeholder id to [`PendingLink`] under
//! `<app>-pending-widget-links`.

use std::collections::BTreeMap;

use crate::domain::{DomainResult, PendingLink, PluginId};
use super::keys::StorageKeys;
use super::kv_store::KeyValueStore;

pub type PendingLinks = BTreeMap<String, PendingLink>;

#[derive(Clone)]
pub struct PendingLinkRepository {
    store: KeyValueStore,
    key: String,
}

impl PendingLinkRepository {
    pub fn new(store: KeyValueStore, keys: &StorageKeys) -> Self {
        Self {
            store,
            key: keys.pending_links(),
        }
    }

    pub fn load(&self) -> PendingLinks {
        self.store.get_json(&self.key).unwrap_or_default()
    }

    fn save(&self, links: &PendingLinks) -> DomainResult<()> {
        self.store.set_json(&self.key, links)
    }

    pub fn insert(&self, link: PendingLink) -> DomainResult<()> {
        let mut links = self.load();
        links.insert(link.item_id.clone(), link);
        self.save(&links)
    }

    pub fn find_for_widget(&self, widget_id: &str) -> Option<PendingLink> {
        self.load().into_values().find(|link| link.widget_id == widget_id)
    }

    pub fn of_type(&self, widget_type: PluginId) -> Vec<PendingLink> {
        self.load()
            .into_values()
            .filter(|link| link.widget_type == widget_type)
            .collect()
    }

    /// Remove by placeholder id; returns whether anything was removed
    pub fn remove(&self, placeholder_id: &str) -> DomainResult<bool> {
        let mut links = self.load();
        if links.remove(placeholder_id).is_none() {
            return Ok(false);
        }
        self.save(&links)?;
        Ok(true)
    }

    /// Remove every link held by `widget_id`; returns how many went
    pub fn remove_for_widget(&self, widget_id: &str) -> DomainResult<usize> {
        let mut links = self.load();
        let before = links.len();
        links.retain(|_, link| link.widget_id != widget_id);
        let removed = before - links.len();
        if removed > 0 {
            self.save(&links)?;
        }
        Ok(removed)
    }
}
