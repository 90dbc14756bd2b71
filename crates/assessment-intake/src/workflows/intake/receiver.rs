//! Local stand-in for the upload and submission endpoints.
//!
//! Files and submissions are held in memory for the lifetime of the process. Used by the
//! `serve` command and by the gateway integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{debug, info};

use super::submission::SubmissionPayload;

/// Multipart framing allowance on top of the file size cap.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// In-memory storage behind the receiver routes.
#[derive(Debug)]
pub struct ReceiverStore {
    public_base_url: String,
    max_upload_bytes: u64,
    sequence: AtomicU64,
    files: Mutex<HashMap<String, StoredFile>>,
    submissions: Mutex<Vec<SubmissionPayload>>,
}

impl ReceiverStore {
    pub fn new(public_base_url: impl Into<String>, max_upload_bytes: u64) -> Self {
        Self {
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            max_upload_bytes,
            sequence: AtomicU64::new(1),
            files: Mutex::new(HashMap::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Store a file and return the URL it is served from.
    pub fn store_file(&self, file_name: &str, content_type: &str, bytes: Bytes) -> String {
        let id = format!("file-{:06}", self.sequence.fetch_add(1, Ordering::Relaxed));
        let file_name = sanitize_file_name(file_name);
        let url = format!("{}/files/{}/{}", self.public_base_url, id, file_name);

        self.files.lock().expect("file store mutex poisoned").insert(
            id,
            StoredFile {
                file_name,
                content_type: content_type.to_string(),
                bytes,
            },
        );
        url
    }

    pub fn file(&self, id: &str) -> Option<StoredFile> {
        self.files
            .lock()
            .expect("file store mutex poisoned")
            .get(id)
            .cloned()
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().expect("file store mutex poisoned").len()
    }

    /// Record a submission, returning its 1-based position.
    pub fn record_submission(&self, payload: SubmissionPayload) -> usize {
        let mut guard = self.submissions.lock().expect("submission mutex poisoned");
        guard.push(payload);
        guard.len()
    }

    pub fn submissions(&self) -> Vec<SubmissionPayload> {
        self.submissions
            .lock()
            .expect("submission mutex poisoned")
            .clone()
    }
}

fn sanitize_file_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReceiverError {
    #[error("multipart body is missing a 'file' part")]
    MissingFilePart,
    #[error("invalid multipart body: {0}")]
    Multipart(String),
}

impl IntoResponse for ReceiverError {
    fn into_response(self) -> Response {
        let payload = json!({ "error": self.to_string() });
        (StatusCode::BAD_REQUEST, Json(payload)).into_response()
    }
}

/// Router exposing `POST /upload-file`, `GET /files/:file_id/:file_name` and `POST /submit`.
pub fn intake_receiver_router(store: Arc<ReceiverStore>) -> Router {
    let body_limit = usize::try_from(store.max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/upload-file", post(upload_handler))
        .route("/files/:file_id/:file_name", get(file_handler))
        .route("/submit", post(submit_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(store)
}

pub(crate) async fn upload_handler(
    State(store): State<Arc<ReceiverStore>>,
    mut multipart: Multipart,
) -> Result<Response, ReceiverError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ReceiverError::Multipart(err.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ReceiverError::Multipart(err.to_string()))?;

        let size = bytes.len();
        let url = store.store_file(&file_name, &content_type, bytes);
        info!(file = %file_name, size, %url, "file received");
        return Ok((StatusCode::OK, Json(json!({ "url": url }))).into_response());
    }

    Err(ReceiverError::MissingFilePart)
}

pub(crate) async fn file_handler(
    State(store): State<Arc<ReceiverStore>>,
    Path((file_id, _file_name)): Path<(String, String)>,
) -> Response {
    match store.file(&file_id) {
        Some(file) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, file.content_type)],
            file.bytes,
        )
            .into_response(),
        None => {
            debug!(%file_id, "unknown file requested");
            let payload = json!({ "error": "file not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn submit_handler(
    State(store): State<Arc<ReceiverStore>>,
    Json(payload): Json<SubmissionPayload>,
) -> Response {
    let applicant = payload.basic_details.email.clone();
    let position = store.record_submission(payload);
    info!(%applicant, submission = position, "application received");

    let body = json!({ "status": "received", "submission": position });
    (StatusCode::CREATED, Json(body)).into_response()
}
