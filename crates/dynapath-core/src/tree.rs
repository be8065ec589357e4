use serde::{Deserialize, Serialize};

/// Identifier of the top node of every outline document.
pub const ROOT_NODE_ID: &str = "root";

/// Kind tag of a file-tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Folder,
    Document,
    #[serde(other)]
    Other,
}

/// A file or folder in the account's file tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Child ids in display order (folders only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
    /// Access level granted to the token owner, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<u8>,
}

impl FileEntry {
    pub fn is_folder(&self) -> bool {
        self.kind == FileKind::Folder
    }

    pub fn child_ids(&self) -> &[String] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// Flat listing of every file and folder visible to the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileListing {
    pub root_file_id: String,
    pub files: Vec<FileEntry>,
}

/// A single bullet of an outline document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Creation time (Unix milliseconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    /// Last modification time (Unix milliseconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
}

impl OutlineNode {
    pub fn child_ids(&self) -> &[String] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// Flat node list of one document, rooted at `ROOT_NODE_ID`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineDocument {
    #[serde(default)]
    pub file_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub nodes: Vec<OutlineNode>,
}
