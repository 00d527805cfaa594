//! Widget Card Component
//!
//! Frame around one dashboard widget: title, item picker, layout controls
//! and the feature body.

use leptos::prelude::*;
use log::{error, info};
use magic_planner_core::domain::{WidgetConfig, WidgetSize};

use super::dashboard::WidgetViews;
use super::RemoveWidgetButton;
use crate::context::use_app_context;
use crate::store::{store_remove_widget, store_update_widget, use_app_store, AppStateStoreFields};

#[component]
pub fn WidgetCard(widget: WidgetConfig, views: WidgetViews) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let widget_id = StoredValue::new(widget.id.clone());
    let widget_type = widget.widget_type;
    let descriptor = ctx.services().registry.get(widget_type).copied();
    let (title, icon) = descriptor
        .map(|d| (d.name, d.icon))
        .unwrap_or((widget_type.as_str(), "❔"));

    // Bumped to remount the body on a different item
    let (generation, set_generation) = signal(0u32);

    let current = move || {
        widget_id.with_value(|id| store.widgets().with(|ws| ws.iter().find(|w| &w.id == id).cloned()))
    };
    let size = move || current().map(|w| w.size).unwrap_or_default();
    // Only tier and auto-save remount the body; layout toggles must not
    // dispose an editor with a pending save.
    let editor_settings = Memo::new(move |_| store.preferences().with(|p| p.editor_settings()));
    let locked = Memo::new(move |_| {
        editor_settings.track();
        !ctx.services().gate.has_feature_access(widget_type.as_str())
    });

    let refresh = move || {
        if let Some(updated) = ctx.services().widgets.get_widget(&widget_id.get_value()) {
            store_update_widget(&store, updated);
        }
        set_generation.update(|g| *g += 1);
    };

    let new_item = move |_| {
        let services = ctx.services();
        let id = widget_id.get_value();
        let result = services
            .widgets
            .unlink_widget(&id)
            .and_then(|_| services.widgets.create_and_link_item(&id, widget_type));
        match result {
            Ok(item_id) => info!("widget {} now shows new item {}", id, item_id),
            Err(err) => error!("could not start a new {}: {}", widget_type, err),
        }
        refresh();
    };

    let pick_item = move |ev: leptos::ev::Event| {
        let item_id = event_target_value(&ev);
        if item_id.is_empty() {
            return;
        }
        let services = ctx.services();
        let id = widget_id.get_value();
        let result = services
            .widgets
            .unlink_widget(&id)
            .and_then(|_| services.widgets.link_widget(&id, &item_id));
        if let Err(err) = result {
            error!("could not link widget {} to {}: {}", id, item_id, err);
        }
        refresh();
    };

    let items = move || {
        generation.track();
        store.widgets().track();
        ctx.services().items.get_items(widget_type)
    };
    let selected_item = move || current().and_then(|w| w.selected_item_id);

    let resize = move |ev: leptos::ev::Event| {
        let Some(size) = WidgetSize::parse(&event_target_value(&ev)) else {
            return;
        };
        match ctx.services().widgets.resize_widget(&widget_id.get_value(), size) {
            Ok(updated) => store_update_widget(&store, updated),
            Err(err) => error!("resize failed: {}", err),
        }
    };

    let shift = move |delta: i32| {
        if let Err(err) = ctx.services().widgets.move_widget(&widget_id.get_value(), delta) {
            error!("move failed: {}", err);
        }
        ctx.reload();
    };

    let remove = move |_: ()| {
        let id = widget_id.get_value();
        match ctx.services().widgets.remove_widget(&id) {
            Ok(()) => store_remove_widget(&store, &id),
            Err(err) => error!("could not remove widget {}: {}", id, err),
        }
    };

    view! {
        <article class=move || format!("widget-card size-{}", size().as_str())>
            <header class="widget-card-header">
                <span class="plugin-icon">{icon}</span>
                <h2>{title}</h2>
                <Show when=move || !locked.get()>
                    <select class="item-picker" on:change=pick_item>
                        <option value="" selected=move || selected_item().is_none()>"Choose saved..."</option>
                        {move || {
                            let selected = selected_item();
                            items().into_iter().map(|item| {
                                let is_selected = selected.as_deref() == Some(item.id.as_str());
                                view! { <option value=item.id.clone() selected=is_selected>{item.name.clone()}</option> }
                            }).collect_view()
                        }}
                    </select>
                    <button class="new-item-btn" title="Start a new one" on:click=new_item>"+"</button>
                </Show>
                <select class="size-select" on:change=resize>
                    {WidgetSize::ALL.iter().map(|s| {
                        let s = *s;
                        view! { <option value=s.as_str() selected=move || size() == s>{s.as_str()}</option> }
                    }).collect_view()}
                </select>
                <button class="move-btn" title="Move left" on:click=move |_| shift(-1)>"◀"</button>
                <button class="move-btn" title="Move right" on:click=move |_| shift(1)>"▶"</button>
                <RemoveWidgetButton title=title on_confirm=remove />
            </header>
            <div class="widget-body">
                {move || {
                    generation.track();
                    editor_settings.track();
                    if locked.get_untracked() {
                        view! {
                            <p class="widget-locked">"Upgrade to Premium to use this widget. Your saved data is kept."</p>
                        }.into_any()
                    } else {
                        views.render(widget.clone())
                    }
                }}
            </div>
        </article>
    }
}
