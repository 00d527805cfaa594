//! Two-step removal for a dashboard widget. The widget's saved item stays
//! in its collection, and the prompt says so.

use leptos::prelude::*;

#[component]
pub fn RemoveWidgetButton(
    /// Widget name shown in the prompt
    #[prop(into)]
    title: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (asking, set_asking) = signal(false);
    let prompt = format!("Remove {}? Saved items are kept.", title);

    move || {
        if asking.get() {
            view! {
                <span class="remove-prompt" role="alertdialog">
                    <span class="remove-prompt-text">{prompt.clone()}</span>
                    <button
                        class="remove-yes"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_asking.set(false);
                            on_confirm.run(());
                        }
                    >
                        "Remove"
                    </button>
                    <button
                        class="remove-no"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_asking.set(false);
                        }
                    >
                        "Keep"
                    </button>
                </span>
            }
            .into_any()
        } else {
            view! {
                <button
                    class="widget-remove-btn"
                    title="Remove widget"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(true);
                    }
                >
                    "×"
                </button>
            }
            .into_any()
        }
    }
}
