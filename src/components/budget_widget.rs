//! Budget Widget

use leptos::prelude::*;
use magic_planner_core::domain::{BudgetData, Expense, WidgetConfig};

use super::SaveIndicator;
use crate::hooks::use_feature_editor;

fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().trim_start_matches('$').parse::<f64>().ok().filter(|n| n.is_finite())
}

#[component]
pub fn BudgetWidget(widget: WidgetConfig) -> impl IntoView {
    let editor = use_feature_editor::<BudgetData>(widget.id);
    let draft = editor.draft;

    let (description, set_description) = signal(String::new());
    let (amount, set_amount) = signal(String::new());
    let (category, set_category) = signal(String::new());

    let add_expense = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(value) = parse_amount(&amount.get()) else {
            return;
        };
        let label = description.get().trim().to_string();
        let category_id = Some(category.get()).filter(|c| !c.is_empty());
        draft.update(|d| {
            let mut expense = Expense::new(if label.is_empty() { "Expense" } else { label.as_str() }, value, category_id);
            expense.date = Some(chrono::Local::now().format("%Y-%m-%d").to_string());
            d.expenses.push(expense);
        });
        set_description.set(String::new());
        set_amount.set(String::new());
    };

    view! {
        <div class="budget-widget">
            <input
                class="widget-title-input"
                type="text"
                prop:value=move || draft.with(|d| d.name.clone())
                on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
            />
            <label>
                "Total budget"
                <input
                    type="number"
                    min="0"
                    step="0.01"
                    prop:value=move || draft.with(|d| d.total_budget.to_string())
                    on:change=move |ev| {
                        if let Some(total) = parse_amount(&event_target_value(&ev)) {
                            draft.update(|d| d.total_budget = total);
                        }
                    }
                />
            </label>
            <div class="budget-summary" class:over-budget=move || draft.with(|d| d.remaining() < 0.0)>
                {move || draft.with(|d| format!("Spent {} · Left {}", money(d.total_spent()), money(d.remaining())))}
            </div>
            <table class="budget-categories">
                <tbody>
                    {move || draft.with(|d| d.categories.iter().map(|c| {
                        let spent = d.spent_in(&c.id);
                        view! {
                            <tr>
                                <td>{c.name.clone()}</td>
                                <td>{money(spent)}</td>
                                <td>{money(c.budgeted)}</td>
                            </tr>
                        }
                    }).collect_view())}
                </tbody>
            </table>
            <ul class="budget-expenses">
                <For
                    each=move || draft.get().expenses
                    key=|e| e.id.clone()
                    let:expense
                >
                    {
                        let id = expense.id.clone();
                        view! {
                            <li>
                                <span class="expense-description">{expense.description.clone()}</span>
                                <span class="expense-amount">{money(expense.amount)}</span>
                                <button
                                    class="entry-remove-btn"
                                    on:click=move |_| draft.update(|d| d.expenses.retain(|e| e.id != id))
                                >
                                    "×"
                                </button>
                            </li>
                        }
                    }
                </For>
            </ul>
            <form class="budget-add" on:submit=add_expense>
                <input
                    type="text"
                    placeholder="What was it?"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                />
                <input
                    type="number"
                    step="0.01"
                    placeholder="0.00"
                    prop:value=move || amount.get()
                    on:input=move |ev| set_amount.set(event_target_value(&ev))
                />
                <select on:change=move |ev| set_category.set(event_target_value(&ev))>
                    <option value="">"No category"</option>
                    {move || draft.with(|d| d.categories.iter().map(|c| {
                        view! { <option value=c.id.clone()>{c.name.clone()}</option> }
                    }).collect_view())}
                </select>
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

