//! Auto-Save Service
//!
//! Per-feature adapter between a widget's edit state and the plugin item
//! store. Shapes the data into an item, upserts it, then links the widget.

use std::marker::PhantomData;
use std::rc::Rc;

use async_trait::async_trait;
use log::debug;

use crate::domain::{
    BudgetData, CountdownData, DomainResult, FeatureData, PackingListData, TripPlanData,
};
use crate::repository::PluginItemStore;
use super::feature_gate::FeatureGate;
use super::widget_manager::WidgetConfigManager;

/// Persists one feature's edit state
#[async_trait(?Send)]
pub trait FeatureSaver<D: FeatureData> {
    /// Returns the saved item's id, or `None` when the save was skipped
    /// (feature locked or data not yet complete)
    async fn save_feature_data(&self, data: &D, widget_id: Option<&str>) -> DomainResult<Option<String>>;
}

pub struct AutoSaveService<D> {
    items: PluginItemStore,
    widgets: Rc<WidgetConfigManager>,
    gate: Rc<dyn FeatureGate>,
    _data: PhantomData<D>,
}

pub type CountdownSaver = AutoSaveService<CountdownData>;
pub type BudgetSaver = AutoSaveService<BudgetData>;
pub type PackingSaver = AutoSaveService<PackingListData>;
pub type TripPlanSaver = AutoSaveService<TripPlanData>;

impl<D: FeatureData> AutoSaveService<D> {
    pub fn new(items: PluginItemStore, widgets: Rc<WidgetConfigManager>, gate: Rc<dyn FeatureGate>) -> Self {
        Self { items, widgets, gate, _data: PhantomData }
    }

    /// Stored data for `id`, if it exists and still matches the shape
    pub fn load(&self, id: &str) -> Option<D> {
        let item = self.items.get_item(D::PLUGIN, id)?;
        D::from_item(&item).ok()
    }

    /// Data behind the widget's selection
    pub fn load_for_widget(&self, widget_id: &str) -> Option<D> {
        let item = self.widgets.get_selected_item_data(widget_id)?;
        D::from_item(&item).ok()
    }
}

#[async_trait(?Send)]
impl<D: FeatureData> FeatureSaver<D> for AutoSaveService<D> {
    async fn save_feature_data(&self, data: &D, widget_id: Option<&str>) -> DomainResult<Option<String>> {
        let plugin = D::PLUGIN;
        if !self.gate.has_feature_access(plugin.as_str()) {
            debug!("{} is locked for this tier, not saving", plugin);
            return Ok(None);
        }
        if let Err(reason) = data.validate() {
            debug!("{} data incomplete, not saving: {}", plugin, reason);
            return Ok(None);
        }

        let existing = data.id().filter(|id| self.items.contains(plugin, id));
        let (item_id, created) = match existing {
            Some(id) => match self.items.update_item(plugin, id, &data.to_patch()?) {
                Ok(item) => (item.id, false),
                Err(err) if err.is_not_found() => (self.items.add_item(plugin, data.to_item()?)?.id, true),
                Err(err) => return Err(err),
            },
            None => (self.items.add_item(plugin, data.to_item()?)?.id, true),
        };

        match widget_id {
            Some(widget_id) => {
                self.widgets.link_widget(widget_id, &item_id)?;
            }
            None if created => {
                self.widgets.check_and_apply_pending_links(&item_id, plugin)?;
            }
            None => {}
        }
        Ok(Some(item_id))
    }
}
