use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::submission::SubmissionPayload;

/// Location of an uploaded document as returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteReference(pub String);

/// Local file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Build a file from memory, guessing the content type from the name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lower-cased extension, if the name has one.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
    }
}

/// Remote endpoints the form talks to.
#[async_trait]
pub trait IntakeGateway: Send + Sync {
    async fn upload_file(&self, file: UploadFile) -> Result<RemoteReference, GatewayError>;
    async fn submit_form(&self, payload: &SubmissionPayload) -> Result<(), GatewayError>;
}

/// Failure talking to a remote endpoint.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("unexpected response body from {endpoint}: {message}")]
    MalformedBody { endpoint: String, message: String },
}
