//! Domain Layer
//!
//! Entities, typed feature data and the error type shared by every layer.
//! No storage or UI dependencies live here.

mod entity;
mod features;
mod item;
mod pending_link;
mod plugin;
mod preferences;
mod widget;

pub use entity::{DomainError, DomainResult, Entity};
pub use features::{
    default_item, parse_target_date, Activity, BudgetCategory, BudgetData, CountdownData,
    Expense, FeatureData, PackingEntry, PackingListData, PlanDay, TripPlanData,
};
pub use item::{ItemPatch, PluginItem, RESERVED_KEYS};
pub use pending_link::PendingLink;
pub use plugin::PluginId;
pub use preferences::{UserPreferences, UserTier};
pub use widget::{WidgetConfig, WidgetSize};
