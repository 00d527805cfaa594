//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use magic_planner_core::domain::{UserPreferences, WidgetConfig};
use magic_planner_core::PlannerServices;
use reactive_stores::Store;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Dashboard widgets in display order
    pub widgets: Vec<WidgetConfig>,
    pub preferences: UserPreferences,
}

impl AppState {
    pub fn load(services: &PlannerServices) -> Self {
        Self {
            widgets: services.widgets.list_widgets(),
            preferences: services.preferences.load(),
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Refresh both fields from storage
pub fn store_reload(store: &AppStore, services: &PlannerServices) {
    let fresh = AppState::load(services);
    store.widgets().set(fresh.widgets);
    store.preferences().set(fresh.preferences);
}

/// Replace one widget in the store by ID
pub fn store_update_widget(store: &AppStore, updated: WidgetConfig) {
    if let Some(widget) = store.widgets().write().iter_mut().find(|w| w.id == updated.id) {
        *widget = updated;
    }
}

/// Remove a widget from the store by ID
pub fn store_remove_widget(store: &AppStore, widget_id: &str) {
    store.widgets().write().retain(|w| w.id != widget_id);
}
