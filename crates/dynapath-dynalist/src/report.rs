use chrono::{DateTime, Utc};
use dynapath_core::Resolution;
use serde::Serialize;

/// What the CLI prints for a resolved node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReport {
    pub document_id: String,
    pub node_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    pub child_count: usize,
    /// Last modification, RFC 3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

impl From<&Resolution> for NodeReport {
    fn from(resolution: &Resolution) -> Self {
        let node = &resolution.node;
        Self {
            document_id: resolution.document_id.clone(),
            node_id: node.id.clone(),
            content: node.content.clone(),
            note: node.note.clone().filter(|n| !n.is_empty()),
            checked: node.checked,
            child_count: node.child_ids().len(),
            modified: node
                .modified
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|dt| dt.to_rfc3339()),
        }
    }
}
