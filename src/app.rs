//! Magic Planner Frontend App
//!
//! Wires storage, services and the store, then renders the dashboard.

use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use magic_planner_core::domain::{PluginId, WidgetConfig};
use magic_planner_core::{AppConfig, PlannerServices};
use reactive_stores::Store;

use crate::components::{
    BudgetWidget, CountdownWidget, Dashboard, LogPanel, PackingWidget, PlannerWidget, WidgetView,
    WidgetViews,
};
use crate::context::AppContext;
use crate::storage::open_backend;
use crate::store::{store_reload, AppState};

fn countdown_view(widget: WidgetConfig) -> AnyView {
    view! { <CountdownWidget widget=widget /> }.into_any()
}

fn budget_view(widget: WidgetConfig) -> AnyView {
    view! { <BudgetWidget widget=widget /> }.into_any()
}

fn packing_view(widget: WidgetConfig) -> AnyView {
    view! { <PackingWidget widget=widget /> }.into_any()
}

fn planner_view(widget: WidgetConfig) -> AnyView {
    view! { <PlannerWidget widget=widget /> }.into_any()
}

static WIDGET_VIEWS: [(PluginId, WidgetView); 4] = [
    (PluginId::Countdown, countdown_view as WidgetView),
    (PluginId::Budget, budget_view as WidgetView),
    (PluginId::Packing, packing_view as WidgetView),
    (PluginId::Planner, planner_view as WidgetView),
];

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::default();
    let services = Rc::new(PlannerServices::new(config, open_backend()));
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    let state = AppState::load(&services);
    info!("dashboard loaded: {} widgets, {:?} tier", state.widgets.len(), state.preferences.tier);
    let store = Store::new(state);

    // Provide context to all children
    let ctx = AppContext::new(services, (reload_trigger, set_reload_trigger));
    provide_context(ctx);
    provide_context(store);

    // Reload layout from storage when asked
    Effect::new(move |seen: Option<()>| {
        reload_trigger.track();
        if seen.is_some() {
            store_reload(&store, &ctx.services());
        }
    });

    view! {
        <main class="app-layout">
            <Dashboard views=WidgetViews::new(&WIDGET_VIEWS) />
            <LogPanel />
        </main>
    }
}
