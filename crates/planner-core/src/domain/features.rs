//! Typed Feature Data
//!
//! The edit state each widget works on. Adapters convert between these
//! shapes and the feature-agnostic [`PluginItem`].

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::{DomainError, DomainResult};
use super::item::{ItemPatch, PluginItem};
use super::plugin::PluginId;

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Edit state of one plugin feature
pub trait FeatureData: Serialize + DeserializeOwned + Clone + Default + PartialEq + 'static {
    /// Collection this data is persisted into
    const PLUGIN: PluginId;

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);

    fn name(&self) -> &str;

    /// Minimum shape required before the data is worth persisting
    fn validate(&self) -> Result<(), String>;

    /// Assign an id if the data has none yet; returns the id
    fn ensure_id(&mut self) -> String {
        match self.id() {
            Some(id) => id.to_string(),
            None => {
                let id = new_id();
                self.set_id(id.clone());
                id
            }
        }
    }

    /// Patch carrying every feature field. Fields that serialize to `null`
    /// are removed from the stored item.
    fn to_patch(&self) -> DomainResult<ItemPatch> {
        let Value::Object(mut map) = serde_json::to_value(self)? else {
            return Err(DomainError::InvalidInput(format!(
                "{} data must serialize to an object",
                Self::PLUGIN
            )));
        };
        map.remove("id");
        let name = match map.remove("name") {
            Some(Value::String(name)) => Some(name),
            _ => None,
        };
        Ok(ItemPatch { name, fields: map })
    }

    /// Fresh item for this data, keeping its id when present
    fn to_item(&self) -> DomainResult<PluginItem> {
        let patch = self.to_patch()?;
        let id = self.id().map(str::to_string).unwrap_or_else(new_id);
        let mut item = PluginItem::with_id(id, self.name());
        item.merge(&patch);
        Ok(item)
    }

    fn from_item(item: &PluginItem) -> DomainResult<Self> {
        let mut map = item.fields.clone();
        map.insert("id".to_string(), Value::String(item.id.clone()));
        map.insert("name".to_string(), Value::String(item.name.clone()));
        Ok(serde_json::from_value(Value::Object(map))?)
    }
}

fn require_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        Err("name is required".to_string())
    } else {
        Ok(())
    }
}

// ========================
// Countdown
// ========================

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` and RFC 3339
pub fn parse_target_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub park: Option<String>,
    #[serde(default)]
    pub show_seconds: bool,
}

impl Default for CountdownData {
    fn default() -> Self {
        Self {
            id: None,
            name: "My Disney Countdown".to_string(),
            target_date: None,
            park: None,
            show_seconds: false,
        }
    }
}

impl CountdownData {
    pub fn target(&self) -> Option<NaiveDateTime> {
        self.target_date.as_deref().and_then(parse_target_date)
    }

    /// Time left until the target, zero once it has passed
    pub fn remaining(&self, now: NaiveDateTime) -> Option<Duration> {
        let left = self.target()? - now;
        Some(left.max(Duration::zero()))
    }

    pub fn days_remaining(&self, now: NaiveDateTime) -> Option<i64> {
        self.remaining(now).map(|left| left.num_days())
    }
}

impl FeatureData for CountdownData {
    const PLUGIN: PluginId = PluginId::Countdown;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), String> {
        match self.target_date.as_deref() {
            None => Err("countdown needs a target date".to_string()),
            Some(raw) if parse_target_date(raw).is_none() => {
                Err(format!("unrecognised target date: {}", raw))
            }
            Some(_) => Ok(()),
        }
    }
}

// ========================
// Budget
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub budgeted: f64,
}

impl BudgetCategory {
    pub fn new(name: impl Into<String>, budgeted: f64) -> Self {
        Self { id: new_id(), name: name.into(), budgeted }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    #[serde(default)]
    pub category_id: Option<String>,
    pub description: String,
    pub amount: f64,
    #[serde(default)]
    pub date: Option<String>,
}

impl Expense {
    pub fn new(description: impl Into<String>, amount: f64, category_id: Option<String>) -> Self {
        Self {
            id: new_id(),
            category_id,
            description: description.into(),
            amount,
            date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub total_budget: f64,
    #[serde(default)]
    pub categories: Vec<BudgetCategory>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Default for BudgetData {
    fn default() -> Self {
        Self {
            id: None,
            name: "Trip Budget".to_string(),
            total_budget: 0.0,
            categories: ["Tickets", "Lodging", "Food", "Souvenirs"]
                .into_iter()
                .map(|name| BudgetCategory::new(name, 0.0))
                .collect(),
            expenses: Vec::new(),
        }
    }
}

impl BudgetData {
    pub fn total_spent(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    pub fn remaining(&self) -> f64 {
        self.total_budget - self.total_spent()
    }

    pub fn spent_in(&self, category_id: &str) -> f64 {
        self.expenses
            .iter()
            .filter(|e| e.category_id.as_deref() == Some(category_id))
            .map(|e| e.amount)
            .sum()
    }
}

impl FeatureData for BudgetData {
    const PLUGIN: PluginId = PluginId::Budget;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), String> {
        if !self.total_budget.is_finite() || self.total_budget < 0.0 {
            return Err("total budget must be a non-negative number".to_string());
        }
        if self.expenses.iter().any(|e| !e.amount.is_finite()) {
            return Err("expense amounts must be numbers".to_string());
        }
        Ok(())
    }
}

// ========================
// Packing list
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub packed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingListData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub entries: Vec<PackingEntry>,
}

impl Default for PackingListData {
    fn default() -> Self {
        Self {
            id: None,
            name: "Packing List".to_string(),
            entries: Vec::new(),
        }
    }
}

impl PackingListData {
    pub fn add_entry(&mut self, name: impl Into<String>, category: Option<String>) -> &PackingEntry {
        self.entries.push(PackingEntry {
            id: new_id(),
            name: name.into(),
            category,
            packed: false,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// (packed, total)
    pub fn progress(&self) -> (usize, usize) {
        let packed = self.entries.iter().filter(|e| e.packed).count();
        (packed, self.entries.len())
    }
}

impl FeatureData for PackingListData {
    const PLUGIN: PluginId = PluginId::Packing;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), String> {
        require_name(&self.name)
    }
}

// ========================
// Trip planner
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(default)]
    pub time: Option<String>,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Activity {
    pub fn new(title: impl Into<String>, time: Option<String>) -> Self {
        Self { id: new_id(), time, title: title.into(), notes: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDay {
    pub date: String,
    #[serde(default)]
    pub park: Option<String>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlanData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub days: Vec<PlanDay>,
}

impl Default for TripPlanData {
    fn default() -> Self {
        Self {
            id: None,
            name: "Trip Itinerary".to_string(),
            start_date: None,
            days: Vec::new(),
        }
    }
}

impl TripPlanData {
    /// Append a day following the start date, or "Day N" without one
    pub fn add_day(&mut self) -> &mut PlanDay {
        let index = self.days.len();
        let date = self
            .start_date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
            .and_then(|start| start.checked_add_signed(Duration::days(index as i64)))
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("Day {}", index + 1));
        self.days.push(PlanDay { date, park: None, activities: Vec::new() });
        &mut self.days[index]
    }

    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).sum()
    }
}

impl FeatureData for TripPlanData {
    const PLUGIN: PluginId = PluginId::Planner;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), String> {
        require_name(&self.name)
    }
}

/// Default item for a plugin, used by the registry's item factories
pub fn default_item<D: FeatureData>() -> PluginItem {
    match D::default().to_item() {
        Ok(item) => item,
        Err(err) => {
            log::warn!("default {} item could not be shaped: {}", D::PLUGIN, err);
            PluginItem::new(D::default().name())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(raw: &str) -> NaiveDateTime {
        parse_target_date(raw).unwrap()
    }

    #[test]
    fn test_parse_target_date_formats() {
        assert!(parse_target_date("2026-12-24").is_some());
        assert!(parse_target_date("2026-12-24T09:30").is_some());
        assert!(parse_target_date("2026-12-24T09:30:00Z").is_some());
        assert!(parse_target_date("next tuesday").is_none());
    }

    #[test]
    fn test_countdown_validation() {
        let mut data = CountdownData::default();
        assert!(data.validate().is_err());
        data.target_date = Some("soon".to_string());
        assert!(data.validate().is_err());
        data.target_date = Some("2026-12-24".to_string());
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_countdown_remaining_clamps_at_zero() {
        let data = CountdownData {
            target_date: Some("2026-12-24".to_string()),
            ..Default::default()
        };
        assert_eq!(data.days_remaining(at("2026-12-14")), Some(10));
        assert_eq!(data.days_remaining(at("2027-01-01")), Some(0));
    }

    #[test]
    fn test_item_conversion_keeps_fields() {
        let data = CountdownData {
            id: Some("cd-1".to_string()),
            name: "Castle".to_string(),
            target_date: Some("2026-12-24".to_string()),
            park: Some("Magic Kingdom".to_string()),
            show_seconds: true,
        };
        let item = data.to_item().unwrap();
        assert_eq!(item.id, "cd-1");
        assert_eq!(item.name, "Castle");
        assert_eq!(item.get("targetDate"), Some(&json!("2026-12-24")));
        assert!(item.get("id").is_none());

        let back = CountdownData::from_item(&item).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_patch_nulls_clear_optional_fields() {
        let data = CountdownData { park: None, ..Default::default() };
        let patch = data.to_patch().unwrap();
        assert_eq!(patch.fields.get("park"), Some(&Value::Null));
        assert_eq!(patch.name.as_deref(), Some("My Disney Countdown"));
    }

    #[test]
    fn test_budget_totals() {
        let mut budget = BudgetData { total_budget: 500.0, ..Default::default() };
        let food = budget.categories[2].id.clone();
        budget.expenses.push(Expense::new("Dole Whip", 7.5, Some(food.clone())));
        budget.expenses.push(Expense::new("Ears", 30.0, None));

        assert_eq!(budget.total_spent(), 37.5);
        assert_eq!(budget.remaining(), 462.5);
        assert_eq!(budget.spent_in(&food), 7.5);
        assert!(budget.validate().is_ok());

        budget.total_budget = -1.0;
        assert!(budget.validate().is_err());
    }

    #[test]
    fn test_packing_progress() {
        let mut list = PackingListData::default();
        list.add_entry("Sunscreen", None);
        list.add_entry("Ponchos", Some("Rain".to_string()));
        list.entries[0].packed = true;
        assert_eq!(list.progress(), (1, 2));
    }

    #[test]
    fn test_trip_plan_days_follow_start_date() {
        let mut plan = TripPlanData {
            start_date: Some("2026-12-30".to_string()),
            ..Default::default()
        };
        plan.add_day();
        plan.add_day().activities.push(Activity::new("Fireworks", Some("21:00".to_string())));
        plan.add_day();
        assert_eq!(plan.days[1].date, "2026-12-31");
        assert_eq!(plan.days[2].date, "2027-01-01");
        assert_eq!(plan.activity_count(), 1);

        let mut undated = TripPlanData::default();
        assert_eq!(undated.add_day().date, "Day 1");
    }

    #[test]
    fn test_ensure_id_is_stable() {
        let mut data = PackingListData::default();
        let first = data.ensure_id();
        assert_eq!(data.ensure_id(), first);
    }
}
