//! Diagnostics Log Panel
//!
//! Recent entries from the in-memory ring logger.

use leptos::prelude::*;
use log::Level;

const SHOWN: usize = 50;

#[component]
pub fn LogPanel() -> impl IntoView {
    let (open, set_open) = signal(false);
    let entries = RwSignal::new(Vec::new());
    let refresh = move || entries.set(ring_logger::recent_entries(SHOWN));

    view! {
        <section class="log-panel">
            <header class="log-panel-header">
                <button on:click=move |_| {
                    refresh();
                    set_open.update(|o| *o = !*o);
                }>
                    {move || if open.get() { "Hide diagnostics" } else { "Diagnostics" }}
                </button>
                <Show when=move || open.get()>
                    <button on:click=move |_| refresh()>"Refresh"</button>
                    <button on:click=move |_| {
                        ring_logger::clear();
                        refresh();
                    }>"Clear"</button>
                </Show>
            </header>
            <Show when=move || open.get()>
                <ul class="log-entries">
                    {move || entries.get().into_iter().rev().map(|entry| {
                        let time = chrono::DateTime::from_timestamp_millis(entry.timestamp_ms)
                            .map(|at| at.with_timezone(&chrono::Local).format("%H:%M:%S%.3f").to_string())
                            .unwrap_or_default();
                        let class = match entry.level {
                            Level::Error => "log-error",
                            Level::Warn => "log-warn",
                            Level::Info => "log-info",
                            Level::Debug | Level::Trace => "log-debug",
                        };
                        view! {
                            <li class=class>
                                <span class="log-time">{time}</span>
                                <span class="log-level">{entry.level.to_string()}</span>
                                <span class="log-target">{entry.target}</span>
                                <span class="log-message">{entry.message}</span>
                            </li>
                        }
                    }).collect_view()}
                </ul>
            </Show>
        </section>
    }
}
