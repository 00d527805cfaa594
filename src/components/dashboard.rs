//! Dashboard Component
//!
//! Header with plan settings, the add-widget bar and the widget grid.

use leptos::prelude::*;
use log::error;
use magic_planner_core::domain::{PluginId, UserPreferences, UserTier, WidgetConfig};

use super::{AddWidgetBar, WidgetCard};
use crate::context::{use_app_context, AppContext};
use crate::store::{use_app_store, AppStateStoreFields, AppStore};

/// Renders the body of one widget type
pub type WidgetView = fn(WidgetConfig) -> AnyView;

/// Explicit plugin id → view table
#[derive(Clone, Copy)]
pub struct WidgetViews {
    entries: &'static [(PluginId, WidgetView)],
}

impl WidgetViews {
    pub const fn new(entries: &'static [(PluginId, WidgetView)]) -> Self {
        Self { entries }
    }

    pub fn render(&self, widget: WidgetConfig) -> AnyView {
        match self.entries.iter().find(|(id, _)| *id == widget.widget_type) {
            Some((_, view)) => view(widget),
            None => view! { <p class="widget-missing">"This widget type is not available"</p> }.into_any(),
        }
    }
}

#[component]
pub fn Dashboard(views: WidgetViews) -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="dashboard" class:compact=move || store.preferences().with(|p| p.compact_widgets)>
            <header class="dashboard-header">
                <h1>"Magic Planner"</h1>
                <PlanSettings />
            </header>
            <AddWidgetBar />
            <Show when=move || store.widgets().with(|w| w.is_empty())>
                <p class="empty-dashboard">"Add a widget to start planning your trip"</p>
            </Show>
            <div class="widget-grid">
                <For
                    each=move || store.widgets().get()
                    key=|widget| widget.id.clone()
                    let:widget
                >
                    <WidgetCard widget=widget views=views />
                </For>
            </div>
        </div>
    }
}

fn save_preferences(ctx: AppContext, store: AppStore, f: impl FnOnce(&mut UserPreferences)) {
    match ctx.services().preferences.update(f) {
        Ok(prefs) => store.preferences().set(prefs),
        Err(err) => error!("could not save preferences: {}", err),
    }
}

/// Tier and preference toggles
#[component]
fn PlanSettings() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let is_premium = move || store.preferences().with(|p| p.tier == UserTier::Premium);

    view! {
        <div class="plan-settings">
            <button
                class="tier-toggle"
                class:premium=is_premium
                on:click=move |_| {
                    let next = if is_premium() { UserTier::Free } else { UserTier::Premium };
                    save_preferences(ctx, store, |p| p.tier = next);
                }
            >
                {move || if is_premium() { "✨ Premium" } else { "Free plan" }}
            </button>
            <label class="checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || store.preferences().with(|p| p.auto_save)
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        save_preferences(ctx, store, |p| p.auto_save = on);
                    }
                />
                "Auto-save"
            </label>
            <label class="checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || store.preferences().with(|p| p.compact_widgets)
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        save_preferences(ctx, store, |p| p.compact_widgets = on);
                    }
                />
                "Compact"
            </label>
        </div>
    }
}
