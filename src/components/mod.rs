//! UI Components
//!
//! Dashboard frame and one widget per planning feature.

mod add_widget_bar;
mod budget_widget;
mod countdown_widget;
mod dashboard;
mod remove_widget_button;
mod log_panel;
mod packing_widget;
mod planner_widget;
mod save_indicator;
mod widget_card;

pub use add_widget_bar::AddWidgetBar;
pub use budget_widget::BudgetWidget;
pub use countdown_widget::CountdownWidget;
pub use dashboard::{Dashboard, WidgetView, WidgetViews};
pub use remove_widget_button::RemoveWidgetButton;
pub use log_panel::LogPanel;
pub use packing_widget::PackingWidget;
pub use planner_widget::PlannerWidget;
pub use save_indicator::SaveIndicator;
pub use widget_card::WidgetCard;
