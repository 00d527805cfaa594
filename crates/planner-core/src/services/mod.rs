//! Service Layer
//!
//! Feature-level operations composed from the repositories, plus the
//! composition root that wires them to a storage backend.

mod auto_save_service;
mod feature_gate;
mod plugin_registry;
mod widget_manager;

use std::rc::Rc;

pub use auto_save_service::{
    AutoSaveService, BudgetSaver, CountdownSaver, FeatureSaver, PackingSaver, TripPlanSaver,
};
pub use feature_gate::{
    plugin_requires_premium, tier_allows, AllowAllFeatures, FeatureGate, TierFeatureGate,
    AUTO_SAVE_FEATURE,
};
pub use plugin_registry::{PluginDescriptor, PluginRegistry};
pub use widget_manager::WidgetConfigManager;

use crate::autosave::AutoSaveOptions;
use crate::config::AppConfig;
use crate::domain::FeatureData;
use crate::repository::{
    KeyValueStore, MemoryStorage, PendingLinkRepository, PluginItemStore, PreferencesRepository,
    RawStorage, WidgetConfigRepository,
};

/// Everything the UI needs, built from one config and one backend
pub struct PlannerServices {
    pub config: AppConfig,
    pub store: KeyValueStore,
    pub items: PluginItemStore,
    pub widgets: Rc<WidgetConfigManager>,
    pub preferences: PreferencesRepository,
    pub gate: Rc<dyn FeatureGate>,
    pub registry: Rc<PluginRegistry>,
}

impl PlannerServices {
    /// Services gated by the stored user tier
    pub fn new(config: AppConfig, backend: Rc<dyn RawStorage>) -> Self {
        let store = KeyValueStore::new(backend).with_policy(config.write_errors.policy());
        let preferences = PreferencesRepository::new(store.clone(), &config.keys());
        let gate = Rc::new(TierFeatureGate::new(preferences));
        Self::assemble(config, store, gate)
    }

    pub fn with_gate(config: AppConfig, backend: Rc<dyn RawStorage>, gate: Rc<dyn FeatureGate>) -> Self {
        let store = KeyValueStore::new(backend).with_policy(config.write_errors.policy());
        Self::assemble(config, store, gate)
    }

    /// Default config over a fresh in-memory backend, all features open
    pub fn in_memory() -> Self {
        Self::with_gate(
            AppConfig::default(),
            Rc::new(MemoryStorage::new()),
            Rc::new(AllowAllFeatures),
        )
    }

    fn assemble(config: AppConfig, store: KeyValueStore, gate: Rc<dyn FeatureGate>) -> Self {
        let keys = config.keys();
        let items = PluginItemStore::new(store.clone(), keys.clone());
        let registry = Rc::new(PluginRegistry::with_defaults());
        let widgets = Rc::new(WidgetConfigManager::new(
            WidgetConfigRepository::new(store.clone(), &keys),
            PendingLinkRepository::new(store.clone(), &keys),
            items.clone(),
            registry.clone(),
        ));
        let preferences = PreferencesRepository::new(store.clone(), &keys);
        Self { config, store, items, widgets, preferences, gate, registry }
    }

    /// Auto-save adapter for feature `D`
    pub fn saver<D: FeatureData>(&self) -> Rc<AutoSaveService<D>> {
        Rc::new(AutoSaveService::new(
            self.items.clone(),
            self.widgets.clone(),
            self.gate.clone(),
        ))
    }

    /// Configured debounce options, disabled when auto-save is locked
    pub fn auto_save_options(&self) -> AutoSaveOptions {
        let allowed = self.gate.has_feature_access(AUTO_SAVE_FEATURE);
        self.config.autosave.enabled(self.config.autosave.enabled && allowed)
    }
}
