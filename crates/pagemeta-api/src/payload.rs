//! Webhook payload sent by the PageMeta service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event type that triggers a revalidation.
pub const METADATA_UPDATE: &str = "metadata_update";

/// Incoming webhook body.
///
/// Only `_type` is required. `path: null` (or a missing path) asks for every
/// path to be revalidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    #[serde(rename = "_type")]
    pub kind: String,

    #[serde(default)]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_revision_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
}

impl WebhookPayload {
    /// Build a `metadata_update` payload for `path`.
    pub fn metadata_update(path: Option<&str>) -> Self {
        Self {
            kind: METADATA_UPDATE.to_string(),
            path: path.map(str::to_string),
            metadata_revision_id: None,
            metadata: None,
            site: None,
            timestamp: None,
        }
    }

    pub fn is_metadata_update(&self) -> bool {
        self.kind == METADATA_UPDATE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    #[serde(default)]
    pub hostname: Option<String>,

    #[serde(default)]
    pub dsn: Option<String>,
}
