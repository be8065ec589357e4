//! Dynalist API v1 client.
//!
//! Every call is a JSON `POST` carrying the API token in the body. Responses
//! share an envelope: `_code` is `"Ok"` on success, otherwise `_msg`
//! explains the failure.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use dynapath_core::{FileListing, OutlineDocument};

pub const DEFAULT_API_URL: &str = "https://dynalist.io/api/v1";

const OK_CODE: &str = "Ok";

/// Errors from a single API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dynalist API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Dynalist API error {code}: {message}")]
    Service { code: String, message: String },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "_code")]
    code: String,
    #[serde(rename = "_msg", default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct ListFilesRequest<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct ReadDocumentRequest<'a> {
    token: &'a str,
    file_id: &'a str,
}

/// Dynalist API client. The token is fixed at construction.
pub struct DynalistClient {
    http: Client,
    base_url: String,
    token: String,
}

impl DynalistClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route)
    }

    /// List every file and folder of the account.
    #[instrument(skip(self), level = "debug")]
    pub async fn list_files(&self) -> Result<FileListing, ApiError> {
        let listing: FileListing = self
            .call("file/list", &ListFilesRequest { token: &self.token })
            .await?;
        debug!(
            "Listed {} files (root {})",
            listing.files.len(),
            listing.root_file_id
        );
        Ok(listing)
    }

    /// Read all nodes of one document.
    #[instrument(skip(self), level = "debug")]
    pub async fn read_document(&self, file_id: &str) -> Result<OutlineDocument, ApiError> {
        let mut document: OutlineDocument = self
            .call(
                "doc/read",
                &ReadDocumentRequest {
                    token: &self.token,
                    file_id,
                },
            )
            .await?;
        if document.file_id.is_empty() {
            document.file_id = file_id.to_string();
        }
        debug!("Read {} nodes from document {}", document.nodes.len(), file_id);
        Ok(document)
    }

    async fn call<B, T>(&self, route: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.http.post(self.endpoint(route)).json(body).send().await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&text)?;
        let envelope = Envelope::deserialize(&value)?;
        if envelope.code != OK_CODE {
            return Err(ApiError::Service {
                code: envelope.code,
                message: envelope.message.unwrap_or_default(),
            });
        }

        Ok(serde_json::from_value(value)?)
    }
}
