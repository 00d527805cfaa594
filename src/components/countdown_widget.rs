//! Countdown Widget

use leptos::prelude::*;
use magic_planner_core::domain::{CountdownData, WidgetConfig};

use super::SaveIndicator;
use crate::hooks::use_feature_editor;

const PARKS: &[&str] = &[
    "Magic Kingdom",
    "EPCOT",
    "Hollywood Studios",
    "Animal Kingdom",
    "Disneyland",
    "Disney California Adventure",
];

#[component]
pub fn CountdownWidget(widget: WidgetConfig) -> impl IntoView {
    let editor = use_feature_editor::<CountdownData>(widget.id);
    let draft = editor.draft;

    let summary = move || {
        let data = draft.get();
        let now = chrono::Local::now().naive_local();
        match data.remaining(now) {
            None => "Pick a date to start the countdown".to_string(),
            Some(left) if left.is_zero() => "It's magic time!".to_string(),
            Some(left) if data.show_seconds => format!(
                "{}d {}h {}m {}s",
                left.num_days(),
                left.num_hours() % 24,
                left.num_minutes() % 60,
                left.num_seconds() % 60
            ),
            Some(left) => match left.num_days() {
                0 => "Tomorrow!".to_string(),
                1 => "1 day to go".to_string(),
                n => format!("{} days to go", n),
            },
        }
    };

    view! {
        <div class="countdown-widget">
            <div class="countdown-display">{summary}</div>
            <label>
                "Name"
                <input
                    type="text"
                    prop:value=move || draft.with(|d| d.name.clone())
                    on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                />
            </label>
            <label>
                "Date"
                <input
                    type="date"
                    prop:value=move || draft.with(|d| d.target_date.clone().unwrap_or_default())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.target_date = (!value.is_empty()).then_some(value));
                    }
                />
            </label>
            <label>
                "Park"
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| d.park = (!value.is_empty()).then_some(value));
                }>
                    <option value="" selected=move || draft.with(|d| d.park.is_none())>"Any park"</option>
                    {PARKS.iter().map(|park| {
                        let selected = move || draft.with(|d| d.park.as_deref() == Some(*park));
                        view! { <option value=*park selected=selected>{*park}</option> }
                    }).collect_view()}
                </select>
            </label>
            <label class="checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || draft.with(|d| d.show_seconds)
                    on:change=move |ev| draft.update(|d| d.show_seconds = event_target_checked(&ev))
                />
                "Show hours and seconds"
            </label>
            <SaveIndicator
                handle=editor.auto_save
                auto_enabled=editor.auto_enabled
                on_save=move |_: ()| editor.save()
            />
        </div>
    }
}
