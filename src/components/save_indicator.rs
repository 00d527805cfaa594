//! Save Indicator Component

use leptos::prelude::*;
use magic_planner_core::autosave::AutoSaveState;
use serde::Serialize;

use crate::hooks::AutoSaveHandle;

/// Shows what the widget's auto-save is doing, with a manual save button
#[component]
pub fn SaveIndicator<T>(
    handle: AutoSaveHandle<T>,
    /// Background saving on; otherwise the button is the only way to save
    auto_enabled: bool,
    #[prop(into)] on_save: Callback<()>,
) -> impl IntoView
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    let label = move || match handle.state() {
        AutoSaveState::PendingSave => "Unsaved changes".to_string(),
        AutoSaveState::Saving => "Saving…".to_string(),
        AutoSaveState::Error => "Save failed".to_string(),
        AutoSaveState::Idle => match (handle.error(), handle.last_saved()) {
            (Some(_), _) => "Save failed".to_string(),
            (None, Some(at)) => format!("Saved {}", at.with_timezone(&chrono::Local).format("%H:%M:%S")),
            (None, None) if auto_enabled => "Auto-save on".to_string(),
            (None, None) => "Auto-save off".to_string(),
        },
    };
    let has_error = move || handle.error().is_some();

    view! {
        <div class="save-indicator" class:save-error=has_error class:saving=move || handle.is_saving()>
            <span class="save-label">{label}</span>
            <Show when=has_error>
                <span class="save-error-detail">{move || handle.error().unwrap_or_default()}</span>
            </Show>
            <button
                class="save-now-btn"
                disabled=move || handle.is_saving()
                on:click=move |_| on_save.run(())
            >
                {if auto_enabled { "Save now" } else { "Save" }}
            </button>
        </div>
    }
}
