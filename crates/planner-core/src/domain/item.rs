//! Plugin Item Entity
//!
//! A single record inside a plugin collection. The common header (id, name,
//! timestamps) is typed; the feature payload stays a flattened JSON map so
//! one store serves every plugin.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::Entity;

/// Keys owned by the item header; feature payloads may not shadow them
pub const RESERVED_KEYS: &[&str] = &["id", "name", "createdAt", "updatedAt"];

fn now() -> DateTime<Utc> {
    Utc::now()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginItem {
    /// Unique within the owning collection
    pub id: String,
    pub name: String,
    #[serde(default = "now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "now")]
    pub updated_at: DateTime<Utc>,
    /// Feature-specific fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl PluginItem {
    /// Create an item with a fresh id and no feature fields
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), name)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            fields: Map::new(),
        }
    }

    /// Builder-style field setter; reserved keys are ignored
    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if !RESERVED_KEYS.contains(&key.as_str()) {
            self.fields.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Apply a partial update. Does not touch `updated_at`.
    pub fn merge(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        for (key, value) in &patch.fields {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            if value.is_null() {
                self.fields.remove(key);
            } else {
                self.fields.insert(key.clone(), value.clone());
            }
        }
    }
}

impl Entity for PluginItem {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Partial update for a plugin item.
///
/// A `null` field value removes the field from the stored item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub fields: Map<String, Value>,
}

impl ItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_creation() {
        let item = PluginItem::new("Magic Kingdom trip");
        assert!(!item.id.is_empty());
        assert_eq!(item.name, "Magic Kingdom trip");
        assert_eq!(item.created_at, item.updated_at);
        assert!(item.fields.is_empty());
    }

    #[test]
    fn test_fields_flatten_into_json() {
        let item = PluginItem::with_id("abc", "Trip").field("targetDate", json!("2026-12-01"));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["targetDate"], "2026-12-01");
        assert!(value.get("fields").is_none());

        let back: PluginItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_reserved_keys_are_not_fields() {
        let item = PluginItem::with_id("abc", "Trip").field("id", json!("other"));
        assert_eq!(item.id, "abc");
        assert!(item.get("id").is_none());
    }

    #[test]
    fn test_merge_sets_and_removes_fields() {
        let mut item = PluginItem::with_id("abc", "Trip")
            .field("park", json!("Epcot"))
            .field("showSeconds", json!(true));

        let patch = ItemPatch::new()
            .name("Renamed")
            .field("park", Value::Null)
            .field("targetDate", json!("2027-01-05"))
            .field("createdAt", json!("nope"));
        item.merge(&patch);

        assert_eq!(item.name, "Renamed");
        assert!(item.get("park").is_none());
        assert_eq!(item.get("targetDate"), Some(&json!("2027-01-05")));
        assert_eq!(item.get("showSeconds"), Some(&json!(true)));
        assert!(item.get("createdAt").is_none());
    }

    #[test]
    fn test_missing_timestamps_default() {
        let item: PluginItem = serde_json::from_value(json!({"id": "x", "name": "Old"})).unwrap();
        assert_eq!(item.id, "x");
    }
}
