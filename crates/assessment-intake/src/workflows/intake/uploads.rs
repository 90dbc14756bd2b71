use std::sync::Arc;

use tracing::{debug, info, warn};

use super::catalog::{ACCEPTED_EXTENSIONS, DEFAULT_MAX_UPLOAD_MB};
use super::domain::{DocumentField, SectionPatch};
use super::gateway::{IntakeGateway, UploadFile};
use super::notify::{Notice, Notifier};
use super::session::FormSession;

pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload file. Please try again.";

/// Checks applied to a file before it is sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    pub accepted_extensions: Vec<String>,
}

impl UploadPolicy {
    pub fn with_max_megabytes(max_megabytes: u64) -> Self {
        Self {
            max_bytes: max_megabytes.saturating_mul(1024 * 1024),
            ..Self::default()
        }
    }

    fn check(&self, file: &UploadFile) -> Result<(), UploadRejection> {
        if file.size() > self.max_bytes {
            return Err(UploadRejection::TooLarge {
                file_name: file.file_name.clone(),
                max_bytes: self.max_bytes,
            });
        }

        let accepted = file.extension().is_some_and(|ext| {
            self.accepted_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(&ext))
        });
        if !accepted {
            return Err(UploadRejection::UnsupportedType {
                file_name: file.file_name.clone(),
            });
        }

        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            accepted_extensions: ACCEPTED_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

/// Why an upload was refused without contacting the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("an upload for this document is already in progress")]
    AlreadyInFlight,
    #[error("{file_name}: File size must be less than {}MB", .max_bytes / (1024 * 1024))]
    TooLarge { file_name: String, max_bytes: u64 },
    #[error("{file_name}: File type is not supported")]
    UnsupportedType { file_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Stored { url: String },
    Cleared,
    Failed,
    Rejected(UploadRejection),
}

/// Per-field upload workflow: local file in, remote reference stored in the record.
pub struct UploadCoordinator<G, N> {
    session: FormSession,
    gateway: Arc<G>,
    notifier: Arc<N>,
    policy: UploadPolicy,
}

impl<G, N> Clone for UploadCoordinator<G, N> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            gateway: Arc::clone(&self.gateway),
            notifier: Arc::clone(&self.notifier),
            policy: self.policy.clone(),
        }
    }
}

impl<G, N> UploadCoordinator<G, N>
where
    G: IntakeGateway + 'static,
    N: Notifier + 'static,
{
    pub fn new(
        session: FormSession,
        gateway: Arc<G>,
        notifier: Arc<N>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            session,
            gateway,
            notifier,
            policy,
        }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Handle a file selection for `field`. `None` means the selection was cleared.
    pub async fn select_file(&self, field: DocumentField, file: Option<UploadFile>) -> UploadOutcome {
        let Some(file) = file else {
            self.remove_file(field);
            return UploadOutcome::Cleared;
        };

        if let Err(rejection) = self.policy.check(&file) {
            debug!(%field, reason = %rejection, "upload rejected before sending");
            self.notifier.notify(Notice::failure(rejection.to_string()));
            return UploadOutcome::Rejected(rejection);
        }

        let Some(_in_flight) = self.session.begin_upload(field) else {
            debug!(%field, "upload already in flight");
            let rejection = UploadRejection::AlreadyInFlight;
            self.notifier.notify(Notice::info(rejection.to_string()));
            return UploadOutcome::Rejected(rejection);
        };

        let file_name = file.file_name.clone();
        match self.gateway.upload_file(file).await {
            Ok(reference) => {
                info!(%field, file = %file_name, url = %reference.0, "document uploaded");
                self.session
                    .merge_section(SectionPatch::single(field, reference.0.clone()));
                UploadOutcome::Stored { url: reference.0 }
            }
            Err(err) => {
                warn!(%field, file = %file_name, error = %err, "document upload failed");
                self.notifier.notify(Notice::failure(UPLOAD_FAILED_MESSAGE));
                UploadOutcome::Failed
            }
        }
    }

    /// Forget the stored reference for `field`. The remote object is left in place.
    pub fn remove_file(&self, field: DocumentField) {
        debug!(%field, "document reference cleared");
        self.session.merge_section(SectionPatch::single(field, ""));
    }
}
