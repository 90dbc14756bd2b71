use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::domain::{ApplicantRecord, DocumentField, SectionPatch};
use super::steps::{Step, StepController, Transition};
use super::validation::ErrorMap;

/// Everything a single form session owns.
#[derive(Debug, Default)]
struct SessionState {
    record: ApplicantRecord,
    steps: StepController,
    uploading: BTreeSet<DocumentField>,
    submitting: bool,
}

/// Handle to one applicant's form session. Clones share the same state.
///
/// The lock is only taken for short synchronous sections and never across an
/// `.await`, so pending uploads never block edits to other fields.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    state: Arc<Mutex<SessionState>>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn merge_section(&self, patch: SectionPatch) {
        self.lock().record.merge_section(patch);
    }

    /// Snapshot of the applicant record.
    pub fn record(&self) -> ApplicantRecord {
        self.lock().record.clone()
    }

    pub fn current_step(&self) -> Step {
        self.lock().steps.current()
    }

    pub fn errors(&self) -> ErrorMap {
        self.lock().steps.errors().clone()
    }

    pub fn advance(&self) -> Transition {
        let mut state = self.lock();
        let SessionState { record, steps, .. } = &mut *state;
        steps.advance(record)
    }

    pub fn retreat(&self) -> Step {
        self.lock().steps.retreat()
    }

    /// Re-validate the current step and replace the displayed errors.
    pub fn validate_current(&self) -> bool {
        let mut state = self.lock();
        let SessionState { record, steps, .. } = &mut *state;
        steps.validate_current(record)
    }

    pub fn is_uploading(&self, field: DocumentField) -> bool {
        self.lock().uploading.contains(&field)
    }

    pub fn uploads_in_flight(&self) -> Vec<DocumentField> {
        self.lock().uploading.iter().copied().collect()
    }

    pub fn is_submitting(&self) -> bool {
        self.lock().submitting
    }

    /// Mark `field` in flight. Returns `None` if an upload for it is already pending.
    pub(crate) fn begin_upload(&self, field: DocumentField) -> Option<UploadGuard> {
        if !self.lock().uploading.insert(field) {
            return None;
        }
        Some(UploadGuard {
            session: self.clone(),
            field,
        })
    }

    /// Raise the submitting flag. Returns `None` if a submission is already running.
    pub(crate) fn begin_submission(&self) -> Option<SubmissionGuard> {
        let mut state = self.lock();
        if state.submitting {
            return None;
        }
        state.submitting = true;
        Some(SubmissionGuard {
            session: self.clone(),
        })
    }
}

/// Clears a field's in-flight marker when dropped.
#[derive(Debug)]
pub(crate) struct UploadGuard {
    session: FormSession,
    field: DocumentField,
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        self.session.lock().uploading.remove(&self.field);
    }
}

/// Clears the submitting flag when dropped.
#[derive(Debug)]
pub(crate) struct SubmissionGuard {
    session: FormSession,
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        self.session.lock().submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_guard_rejects_second_claim_and_clears_on_drop() {
        let session = FormSession::new();
        let guard = session
            .begin_upload(DocumentField::Resume)
            .expect("first claim succeeds");

        assert!(session.is_uploading(DocumentField::Resume));
        assert!(session.begin_upload(DocumentField::Resume).is_none());
        assert!(session.begin_upload(DocumentField::Others).is_some());

        drop(guard);
        assert!(!session.is_uploading(DocumentField::Resume));
        assert!(session.uploads_in_flight().is_empty());
    }

    #[test]
    fn submission_guard_is_exclusive() {
        let session = FormSession::new();
        let guard = session.begin_submission().expect("flag raised");
        assert!(session.is_submitting());
        assert!(session.begin_submission().is_none());

        drop(guard);
        assert!(!session.is_submitting());
    }

    #[test]
    fn clones_share_state() {
        let session = FormSession::new();
        let other = session.clone();
        other.merge_section(SectionPatch::single(DocumentField::Others, "https://x/y"));
        assert_eq!(session.record().documents.others, "https://x/y");
    }
}
