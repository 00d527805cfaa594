//! Widget Config Repository
//!
//! Dashboard widget list persisted under `<app>-widget-configs`.

use log::debug;

use crate::domain::{DomainError, DomainResult, PluginId, WidgetConfig, WidgetSize};
use super::collection::JsonCollection;
use super::keys::StorageKeys;
use super::kv_store::KeyValueStore;
use super::traits::Repository;

#[derive(Clone)]
pub struct WidgetConfigRepository {
    collection: JsonCollection<WidgetConfig>,
}

impl WidgetConfigRepository {
    pub fn new(store: KeyValueStore, keys: &StorageKeys) -> Self {
        Self {
            collection: JsonCollection::new(store, keys.widget_configs()),
        }
    }

    /// Widgets in dashboard order
    pub fn list(&self) -> Vec<WidgetConfig> {
        let mut widgets = self.collection.list();
        widgets.sort_by_key(|w| w.order);
        widgets
    }

    pub fn find(&self, id: &str) -> Option<WidgetConfig> {
        self.collection.find_by_id(id)
    }

    /// Append a widget after the current last one
    pub fn add(&self, widget_type: PluginId, size: WidgetSize) -> DomainResult<WidgetConfig> {
        let order = self
            .collection
            .list()
            .iter()
            .map(|w| w.order + 1)
            .max()
            .unwrap_or(0);
        let mut widget = WidgetConfig::new(widget_type, order);
        widget.size = size;
        let created = self.collection.create(&widget)?;
        debug!("added {} widget {} at {}", widget_type, created.id, order);
        Ok(created)
    }

    pub fn update(&self, widget: &WidgetConfig) -> DomainResult<WidgetConfig> {
        self.collection.update(widget)
    }

    pub fn remove(&self, id: &str) -> DomainResult<()> {
        self.collection.delete(id)
    }

    pub fn set_selected_item(&self, widget_id: &str, item_id: Option<String>) -> DomainResult<WidgetConfig> {
        let mut widget = self
            .find(widget_id)
            .ok_or_else(|| DomainError::NotFound(format!("widget {}", widget_id)))?;
        widget.selected_item_id = item_id;
        self.collection.update(&widget)
    }

    /// Put `ids` first, in the given order; unlisted widgets follow in
    /// their current order. `order` is renumbered from zero.
    pub fn reorder(&self, ids: &[String]) -> DomainResult<()> {
        let mut remaining = self.list();
        let mut ordered = Vec::with_capacity(remaining.len());
        for id in ids {
            if let Some(pos) = remaining.iter().position(|w| &w.id == id) {
                ordered.push(remaining.remove(pos));
            }
        }
        ordered.extend(remaining);
        for (index, widget) in ordered.iter_mut().enumerate() {
            widget.order = index as u32;
        }
        self.collection.save(&ordered)
    }
}
