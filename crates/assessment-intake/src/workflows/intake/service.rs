use std::sync::Arc;

use super::domain::{ApplicantRecord, DocumentField, SectionPatch};
use super::gateway::{IntakeGateway, UploadFile};
use super::notify::Notifier;
use super::session::FormSession;
use super::steps::{Step, Transition};
use super::submission::{SubmissionCoordinator, SubmitOutcome};
use super::uploads::{UploadCoordinator, UploadOutcome, UploadPolicy};
use super::validation::ErrorMap;

/// Facade composing the session state with the upload and submission coordinators.
pub struct IntakeFormService<G, N> {
    session: FormSession,
    uploads: UploadCoordinator<G, N>,
    submissions: SubmissionCoordinator<G, N>,
}

impl<G, N> Clone for IntakeFormService<G, N> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            uploads: self.uploads.clone(),
            submissions: self.submissions.clone(),
        }
    }
}

impl<G, N> IntakeFormService<G, N>
where
    G: IntakeGateway + 'static,
    N: Notifier + 'static,
{
    /// Start a fresh session with an empty record at the first step.
    pub fn new(gateway: Arc<G>, notifier: Arc<N>, policy: UploadPolicy) -> Self {
        Self::with_session(FormSession::new(), gateway, notifier, policy)
    }

    pub fn with_session(
        session: FormSession,
        gateway: Arc<G>,
        notifier: Arc<N>,
        policy: UploadPolicy,
    ) -> Self {
        let uploads = UploadCoordinator::new(
            session.clone(),
            Arc::clone(&gateway),
            Arc::clone(&notifier),
            policy,
        );
        let submissions = SubmissionCoordinator::new(session.clone(), gateway, notifier);

        Self {
            session,
            uploads,
            submissions,
        }
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn uploads(&self) -> &UploadCoordinator<G, N> {
        &self.uploads
    }

    pub fn merge_section(&self, patch: SectionPatch) {
        self.session.merge_section(patch);
    }

    pub fn record(&self) -> ApplicantRecord {
        self.session.record()
    }

    pub fn current_step(&self) -> Step {
        self.session.current_step()
    }

    pub fn errors(&self) -> ErrorMap {
        self.session.errors()
    }

    pub fn advance(&self) -> Transition {
        self.session.advance()
    }

    pub fn retreat(&self) -> Step {
        self.session.retreat()
    }

    pub async fn select_file(&self, field: DocumentField, file: Option<UploadFile>) -> UploadOutcome {
        self.uploads.select_file(field, file).await
    }

    pub fn remove_file(&self, field: DocumentField) {
        self.uploads.remove_file(field);
    }

    pub async fn submit(&self) -> SubmitOutcome {
        self.submissions.submit().await
    }
}
