//! Add Widget Bar Component

use leptos::prelude::*;
use log::error;
use magic_planner_core::domain::WidgetSize;

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

/// One button per registered plugin; premium ones are disabled on the free tier
#[component]
pub fn AddWidgetBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let descriptors: Vec<_> = ctx.services().registry.iter().copied().collect();
    let (size, set_size) = signal(WidgetSize::default());

    view! {
        <div class="add-widget-bar">
            {descriptors.into_iter().map(|plugin| {
                let locked = move || {
                    store.preferences().track();
                    !ctx.services().gate.has_feature_access(plugin.id.as_str())
                };
                view! {
                    <button
                        class="add-widget-btn"
                        title=plugin.description
                        disabled=locked
                        on:click=move |_| {
                            match ctx.services().widgets.add_widget(plugin.id, size.get_untracked()) {
                                Ok(widget) => store.widgets().write().push(widget),
                                Err(err) => error!("could not add {} widget: {}", plugin.id, err),
                            }
                        }
                    >
                        <span class="plugin-icon">{plugin.icon}</span>
                        {plugin.name}
                        <Show when=move || plugin.premium>
                            <span class="premium-badge">"Premium"</span>
                        </Show>
                    </button>
                }
            }).collect_view()}
            <select
                class="size-select"
                on:change=move |ev| {
                    if let Some(s) = WidgetSize::parse(&event_target_value(&ev)) {
                        set_size.set(s);
                    }
                }
            >
                {WidgetSize::ALL.iter().map(|s| {
                    let s = *s;
                    view! { <option value=s.as_str() selected=move || size.get() == s>{s.as_str()}</option> }
                }).collect_view()}
            </select>
        </div>
    }
}
