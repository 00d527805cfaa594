//! Pending widget links
//!
//! A widget added before its item exists holds a placeholder link until the
//! first real item of its type is saved.

use serde::{Deserialize, Serialize};

use super::plugin::PluginId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingLink {
    pub widget_id: String,
    /// Placeholder id, also the map key
    pub item_id: String,
    pub widget_type: PluginId,
}

impl PendingLink {
    pub fn new(widget_id: impl Into<String>, widget_type: PluginId) -> Self {
        Self {
            widget_id: widget_id.into(),
            item_id: uuid::Uuid::new_v4().to_string(),
            widget_type,
        }
    }
}
