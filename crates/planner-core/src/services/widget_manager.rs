//! Widget Config Manager
//!
//! Owns the dashboard widget list and the links from widgets to plugin
//! items, including pending links for widgets whose item has not been
//! written yet.

use std::rc::Rc;

use log::{debug, info, warn};

use crate::domain::{
    DomainError, DomainResult, PendingLink, PluginId, PluginItem, WidgetConfig, WidgetSize,
};
use crate::repository::{PendingLinkRepository, PluginItemStore, WidgetConfigRepository};
use super::plugin_registry::PluginRegistry;

pub struct WidgetConfigManager {
    widgets: WidgetConfigRepository,
    links: PendingLinkRepository,
    items: PluginItemStore,
    registry: Rc<PluginRegistry>,
}

impl WidgetConfigManager {
    pub fn new(
        widgets: WidgetConfigRepository,
        links: PendingLinkRepository,
        items: PluginItemStore,
        registry: Rc<PluginRegistry>,
    ) -> Self {
        Self { widgets, links, items, registry }
    }

    // ========================
    // Widget configs
    // ========================

    /// Widgets in dashboard order
    pub fn list_widgets(&self) -> Vec<WidgetConfig> {
        self.widgets.list()
    }

    pub fn get_widget(&self, widget_id: &str) -> Option<WidgetConfig> {
        self.widgets.find(widget_id)
    }

    /// Append a widget and hold a pending link until its item exists
    pub fn add_widget(&self, widget_type: PluginId, size: WidgetSize) -> DomainResult<WidgetConfig> {
        if self.registry.get(widget_type).is_none() {
            return Err(DomainError::InvalidInput(format!("no plugin registered for {}", widget_type)));
        }
        let widget = self.widgets.add(widget_type, size)?;
        self.set_pending_link(&widget.id, widget_type)?;
        info!("added {} widget {}", widget_type, widget.id);
        Ok(widget)
    }

    /// Idempotent; the widget's item stays in its collection
    pub fn remove_widget(&self, widget_id: &str) -> DomainResult<()> {
        self.links.remove_for_widget(widget_id)?;
        self.widgets.remove(widget_id)?;
        info!("removed widget {}", widget_id);
        Ok(())
    }

    pub fn resize_widget(&self, widget_id: &str, size: WidgetSize) -> DomainResult<WidgetConfig> {
        let mut widget = self
            .widgets
            .find(widget_id)
            .ok_or_else(|| DomainError::NotFound(format!("widget {}", widget_id)))?;
        widget.size = size;
        self.widgets.update(&widget)
    }

    pub fn reorder_widgets(&self, ids: &[String]) -> DomainResult<()> {
        self.widgets.reorder(ids)
    }

    /// Shift a widget `delta` places, clamped to the dashboard bounds
    pub fn move_widget(&self, widget_id: &str, delta: i32) -> DomainResult<()> {
        let mut ids: Vec<String> = self.widgets.list().into_iter().map(|w| w.id).collect();
        let pos = ids
            .iter()
            .position(|id| id == widget_id)
            .ok_or_else(|| DomainError::NotFound(format!("widget {}", widget_id)))?;
        let last = ids.len() as i64 - 1;
        let target = (pos as i64 + delta as i64).clamp(0, last) as usize;
        if target == pos {
            return Ok(());
        }
        let id = ids.remove(pos);
        ids.insert(target, id);
        self.widgets.reorder(&ids)
    }

    // ========================
    // Links
    // ========================

    /// Replace any pending link of the widget with a fresh placeholder
    pub fn set_pending_link(&self, widget_id: &str, widget_type: PluginId) -> DomainResult<String> {
        self.links.remove_for_widget(widget_id)?;
        let link = PendingLink::new(widget_id, widget_type);
        let placeholder = link.item_id.clone();
        self.links.insert(link)?;
        debug!("pending {} link {} for widget {}", widget_type, placeholder, widget_id);
        Ok(placeholder)
    }

    pub fn clear_pending_link(&self, widget_id: &str) -> DomainResult<()> {
        self.links.remove_for_widget(widget_id).map(|_| ())
    }

    pub fn pending_link_for(&self, widget_id: &str) -> Option<PendingLink> {
        self.links.find_for_widget(widget_id)
    }

    fn resolved_selection(&self, widget: &WidgetConfig) -> Option<PluginItem> {
        let item_id = widget.selected_item_id.as_deref()?;
        self.items.get_item(widget.widget_type, item_id)
    }

    /// Item the widget points at; dangling or missing selections are `None`
    pub fn get_selected_item_data(&self, widget_id: &str) -> Option<PluginItem> {
        let widget = self.widgets.find(widget_id)?;
        self.resolved_selection(&widget)
    }

    /// Create a default item for the widget and select it.
    ///
    /// A widget that already resolves to an item keeps it, so a repeated
    /// call returns the same id instead of creating a second item.
    pub fn create_and_link_item(&self, widget_id: &str, widget_type: PluginId) -> DomainResult<String> {
        let widget = self
            .widgets
            .find(widget_id)
            .ok_or_else(|| DomainError::NotFound(format!("widget {}", widget_id)))?;
        if widget.widget_type != widget_type {
            return Err(DomainError::InvalidInput(format!(
                "widget {} is a {} widget, not {}",
                widget_id, widget.widget_type, widget_type
            )));
        }
        if let Some(existing) = self.resolved_selection(&widget) {
            debug!("widget {} already linked to {}", widget_id, existing.id);
            self.links.remove_for_widget(widget_id)?;
            return Ok(existing.id);
        }

        let item = self.registry.new_item(widget_type)?;
        let created = self.items.add_item(widget_type, item)?;
        self.widgets.set_selected_item(widget_id, Some(created.id.clone()))?;
        self.links.remove_for_widget(widget_id)?;
        info!("created {} item {} for widget {}", widget_type, created.id, widget_id);
        Ok(created.id)
    }

    /// Select `item_id` on the widget unless it already resolves to an
    /// item. Returns whether the selection changed.
    pub fn link_widget(&self, widget_id: &str, item_id: &str) -> DomainResult<bool> {
        let Some(widget) = self.widgets.find(widget_id) else {
            warn!("cannot link {} to missing widget {}", item_id, widget_id);
            return Ok(false);
        };
        if self.resolved_selection(&widget).is_some() {
            return Ok(false);
        }
        self.widgets.set_selected_item(widget_id, Some(item_id.to_string()))?;
        self.links.remove_for_widget(widget_id)?;
        debug!("linked widget {} to {}", widget_id, item_id);
        Ok(true)
    }

    pub fn unlink_widget(&self, widget_id: &str) -> DomainResult<()> {
        self.widgets.set_selected_item(widget_id, None).map(|_| ())
    }

    /// Bind a freshly created item to the first waiting widget of its type.
    ///
    /// Only widgets with a pending link and no resolved selection qualify;
    /// the earliest in dashboard order wins. Links whose widget is gone or
    /// already resolved are dropped along the way.
    pub fn check_and_apply_pending_links(
        &self,
        item_id: &str,
        widget_type: PluginId,
    ) -> DomainResult<Option<String>> {
        let pending = self.links.of_type(widget_type);
        if pending.is_empty() {
            return Ok(None);
        }

        let widgets = self.widgets.list();
        let mut waiting = Vec::new();
        for link in pending {
            match widgets.iter().find(|w| w.id == link.widget_id) {
                Some(widget) if self.resolved_selection(widget).is_none() => waiting.push(widget),
                _ => {
                    self.links.remove(&link.item_id)?;
                }
            }
        }

        let Some(widget) = waiting.into_iter().min_by_key(|w| w.order) else {
            return Ok(None);
        };
        self.widgets.set_selected_item(&widget.id, Some(item_id.to_string()))?;
        self.links.remove_for_widget(&widget.id)?;
        info!("resolved pending {} link: widget {} -> {}", widget_type, widget.id, item_id);
        Ok(Some(widget.id.clone()))
    }
}
