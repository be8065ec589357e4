//! Dynalist `OutlineBackend` implementation.

use std::sync::Arc;

use async_trait::async_trait;
use dynapath_core::{BackendError, FileListing, OutlineBackend, OutlineDocument};
use tracing::instrument;

use crate::client::{ApiError, DynalistClient};

impl From<ApiError> for BackendError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http(e) => BackendError::Transport(e.to_string()),
            ApiError::Status { status, body } => BackendError::Status { status, body },
            ApiError::Service { code, message } => BackendError::Service { code, message },
            ApiError::Json(e) => BackendError::Malformed(e.to_string()),
        }
    }
}

/// Dynalist backend (single account, token held by the client).
pub struct DynalistBackend {
    client: Arc<DynalistClient>,
}

impl DynalistBackend {
    pub fn new(client: Arc<DynalistClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OutlineBackend for DynalistBackend {
    #[instrument(skip(self), level = "debug")]
    async fn list_files(&self) -> Result<FileListing, BackendError> {
        self.client.list_files().await.map_err(BackendError::from)
    }

    #[instrument(skip(self), level = "debug")]
    async fn read_document(&self, file_id: &str) -> Result<OutlineDocument, BackendError> {
        self.client
            .read_document(file_id)
            .await
            .map_err(BackendError::from)
    }
}
