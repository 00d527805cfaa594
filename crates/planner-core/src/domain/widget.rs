//! Dashboard widget configuration

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::Entity;
use super::plugin::PluginId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetSize {
    Small,
    #[default]
    Medium,
    Large,
    Full,
}

impl WidgetSize {
    pub const ALL: [WidgetSize; 4] = [
        WidgetSize::Small,
        WidgetSize::Medium,
        WidgetSize::Large,
        WidgetSize::Full,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetSize::Small => "small",
            WidgetSize::Medium => "medium",
            WidgetSize::Large => "large",
            WidgetSize::Full => "full",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        WidgetSize::ALL.into_iter().find(|size| size.as_str() == s)
    }
}

/// One widget instance on the dashboard.
///
/// `selected_item_id` is a soft reference into the matching plugin
/// collection; a dangling id is treated as "no selection".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub widget_type: PluginId,
    #[serde(default)]
    pub size: WidgetSize,
    /// Dashboard position, ascending
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_item_id: Option<String>,
    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl WidgetConfig {
    pub fn new(widget_type: PluginId, order: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            widget_type,
            size: WidgetSize::default(),
            order,
            width: None,
            selected_item_id: None,
            settings: Map::new(),
        }
    }
}

impl Entity for WidgetConfig {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_widget_json_shape() {
        let mut widget = WidgetConfig::new(PluginId::Budget, 3);
        widget.selected_item_id = Some("item-1".to_string());
        let value = serde_json::to_value(&widget).unwrap();

        assert_eq!(value["type"], "budget");
        assert_eq!(value["size"], "medium");
        assert_eq!(value["order"], 3);
        assert_eq!(value["selectedItemId"], "item-1");
        assert!(value.get("width").is_none());
    }

    #[test]
    fn test_widget_defaults_on_sparse_json() {
        let widget: WidgetConfig =
            serde_json::from_value(json!({"id": "w1", "type": "countdown", "order": 0})).unwrap();
        assert_eq!(widget.size, WidgetSize::Medium);
        assert!(widget.selected_item_id.is_none());
        assert!(widget.settings.is_empty());
    }

    #[test]
    fn test_size_parse() {
        assert_eq!(WidgetSize::parse("full"), Some(WidgetSize::Full));
        assert_eq!(WidgetSize::parse("huge"), None);
    }
}
