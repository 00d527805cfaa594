//! Trip Planner Widget

use leptos::prelude::*;
use magic_planner_core::domain::{Activity, TripPlanData, WidgetConfig};

use super::SaveIndicator;
use crate::hooks::use_feature_editor;

#[component]
pub fn PlannerWidget(widget: WidgetConfig) -> impl IntoView {
    let editor = use_feature_editor::<TripPlanData>(widget.id);
    let draft = editor.draft;

    view! {
        <div class="planner-widget">
            <input
                class="widget-title-input"
                type="text"
                prop:value=move || draft.with(|d| d.name.clone())
                on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
            />
            <label>
                "Arrival"
                <input
                    type="date"
                    prop:value=move || draft.with(|d| d.start_date.clone().unwrap_or_default())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.start_date = (!value.is_empty()).then_some(value));
                    }
                />
            </label>
            <div class="planner-summary">
                {move || draft.with(|d| format!("{} days · {} activities", d.days.len(), d.activity_count()))}
            </div>
            {move || (0..draft.with(|d| d.days.len())).map(|index| view! { <PlanDayView draft=draft index=index /> }).collect_view()}
            <button class="add-day-btn" on:click=move |_| draft.update(|d| { d.add_day(); })>
                "Add day"
            </button>
            <SaveIndicator
                handle=editor.auto_save
                auto_enabled=editor.auto_enabled
                on_save=move |_: ()| editor.save()
            />
        </div>
    }
}

/// One itinerary day, edited in place inside the plan draft
#[component]
fn PlanDayView(draft: RwSignal<TripPlanData>, index: usize) -> impl IntoView {
    let (title, set_title) = signal(String::new());
    let (time, set_time) = signal(String::new());

    let day = move || draft.with(|d| d.days.get(index).cloned());
    let add_activity = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get().trim().to_string();
        if text.is_empty() {
            return;
        }
        let at = Some(time.get()).filter(|t| !t.is_empty());
        draft.update(|d| {
            if let Some(day) = d.days.get_mut(index) {
                day.activities.push(Activity::new(text, at));
            }
        });
        set_title.set(String::new());
        set_time.set(String::new());
    };

    view! {
        <section class="plan-day">
            <header>
                <strong>{move || day().map(|d| d.date).unwrap_or_default()}</strong>
                <input
                    type="text"
                    placeholder="Park"
                    prop:value=move || day().and_then(|d| d.park).unwrap_or_default()
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| {
                            if let Some(day) = d.days.get_mut(index) {
                                day.park = (!value.is_empty()).then_some(value);
                            }
                        });
                    }
                />
                <button
                    class="entry-remove-btn"
                    on:click=move |_| draft.update(|d| {
                        if index < d.days.len() {
                            d.days.remove(index);
                        }
                    })
                >
                    "×"
                </button>
            </header>
            <ul class="plan-activities">
                {move || day().map(|d| d.activities).unwrap_or_default().into_iter().map(|activity| {
                    let id = activity.id.clone();
                    view! {
                        <li>
                            <span class="activity-time">{activity.time.clone().unwrap_or_default()}</span>
                            <span class="activity-title">{activity.title.clone()}</span>
                            <button
                                class="entry-remove-btn"
                                on:click=move |_| draft.update(|d| {
                                    if let Some(day) = d.days.get_mut(index) {
                                        day.activities.retain(|a| a.id != id);
                                    }
                                })
                            >
                                "×"
                            </button>
                        </li>
                    }
                }).collect_view()}
            </ul>
            <form class="plan-add" on:submit=add_activity>
                <input
                    type="time"
                    prop:value=move || time.get()
                    on:input=move |ev| set_time.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Ride, show, dining..."
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </form>
        </section>
    }
}
