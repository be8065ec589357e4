use async_trait::async_trait;

use crate::error::BackendError;
use crate::tree::{FileListing, OutlineDocument};

/// Read-only access to a remote outliner account.
///
/// Implementations carry their own credentials; every call hits the
/// remote service, nothing is cached between calls.
#[async_trait]
pub trait OutlineBackend: Send + Sync {
    /// List every file and folder visible to the account.
    async fn list_files(&self) -> Result<FileListing, BackendError>;

    /// Read the full node tree of one document.
    async fn read_document(&self, file_id: &str) -> Result<OutlineDocument, BackendError>;
}
