//! Packing List Widget

use leptos::prelude::*;
use magic_planner_core::domain::{PackingListData, WidgetConfig};

use super::SaveIndicator;
use crate::hooks::use_feature_editor;

#[component]
pub fn PackingWidget(widget: WidgetConfig) -> impl IntoView {
    let editor = use_feature_editor::<PackingListData>(widget.id);
    let draft = editor.draft;
    let (new_entry, set_new_entry) = signal(String::new());

    let add_entry = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_entry.get().trim().to_string();
        if name.is_empty() {
            return;
        }
        draft.update(|d| {
            d.add_entry(name, None);
        });
        set_new_entry.set(String::new());
    };

    view! {
        <div class="packing-widget">
            <input
                class="widget-title-input"
                type="text"
                prop:value=move || draft.with(|d| d.name.clone())
                on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
            />
            <div class="packing-progress">
                {move || {
                    let (packed, total) = draft.with(|d| d.progress());
                    format!("{} of {} packed", packed, total)
                }}
            </div>
            <ul class="packing-entries">
                <For
                    each=move || draft.get().entries
                    key=|entry| (entry.id.clone(), entry.packed, entry.name.clone())
                    let:entry
                >
                    {
                        let id = entry.id.clone();
                        let remove_id = entry.id.clone();
                        view! {
                            <li class:packed=entry.packed>
                                <label class="checkbox">
                                    <input
                                        type="checkbox"
                                        prop:checked=entry.packed
                                        on:change=move |ev| {
                                            let checked = event_target_checked(&ev);
                                            draft.update(|d| {
                                                if let Some(e) = d.entries.iter_mut().find(|e| e.id == id) {
                                                    e.packed = checked;
                                                }
                                            });
                                        }
                                    />
                                    {entry.name.clone()}
                                </label>
                                <button
                                    class="entry-remove-btn"
                                    on:click=move |_| draft.update(|d| d.entries.retain(|e| e.id != remove_id))
                                >
                                    "×"
                                </button>
                            </li>
                        }
                    }
                </For>
            </ul>
            <form class="packing-add" on:submit=add_entry>
                <input
                    type="text"
                    placeholder="Add something to pack..."
                    prop:value=move || new_entry.get()
                    on:input=move |ev| set_new_entry.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </form>
            <SaveIndicator
                handle=editor.auto_save
                auto_enabled=editor.auto_enabled
                on_save=move |_: ()| editor.save()
            />
        </div>
    }
}
