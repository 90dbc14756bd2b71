use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::workflows::intake::domain::{
    BasicDetailsPatch, DocumentField, InterviewAvailabilityPatch, SectionPatch,
    StatementOfPurposePatch,
};
use crate::workflows::intake::gateway::{GatewayError, IntakeGateway, RemoteReference, UploadFile};
use crate::workflows::intake::notify::{Notice, Notifier};
use crate::workflows::intake::service::IntakeFormService;
use crate::workflows::intake::steps::Step;
use crate::workflows::intake::submission::SubmissionPayload;
use crate::workflows::intake::uploads::UploadPolicy;

pub(super) fn basic_details() -> SectionPatch {
    SectionPatch::BasicDetails(BasicDetailsPatch {
        name: Some("Asha Rao".to_string()),
        email: Some("asha.rao@example.com".to_string()),
        mobile_number: Some("+91 98450 12345".to_string()),
        date_of_birth: Some("1996-04-12".to_string()),
    })
}

pub(super) fn essays() -> SectionPatch {
    SectionPatch::StatementOfPurpose(StatementOfPurposePatch {
        q1: Some("I volunteered to migrate our billing system and learned to ask early.".to_string()),
        q2: Some("A vendor slipped a launch by a month; I re-planned the rollout.".to_string()),
        q3: Some("growth, stability ,  impact".to_string()),
    })
}

pub(super) fn interview_availability() -> SectionPatch {
    SectionPatch::InterviewAvailability(InterviewAvailabilityPatch {
        email: Some("asha.rao@example.com".to_string()),
        location: Some("Bengaluru".to_string()),
        interview_date: Some("2025-11-03".to_string()),
        interview_time: Some("10:30".to_string()),
        time_zone: Some("UTC+05:30 (IST)".to_string()),
        interview_medium: Some("Video Call (Google Meet)".to_string()),
    })
}

pub(super) fn required_documents() -> Vec<SectionPatch> {
    DocumentField::ordered()
        .into_iter()
        .filter(|field| field.is_required())
        .map(|field| {
            SectionPatch::single(field, format!("https://files.example.com/{}.pdf", field.key()))
        })
        .collect()
}

pub(super) fn pdf(name: &str) -> UploadFile {
    UploadFile::new(name, b"%PDF-1.7 sample".to_vec())
}

pub(super) fn build_service(
    gateway: FakeGateway,
) -> (
    IntakeFormService<FakeGateway, MemoryNotifier>,
    Arc<FakeGateway>,
    Arc<MemoryNotifier>,
) {
    let gateway = Arc::new(gateway);
    let notifier = Arc::new(MemoryNotifier::default());
    let service = IntakeFormService::new(gateway.clone(), notifier.clone(), UploadPolicy::default());
    (service, gateway, notifier)
}

/// Fill every section and walk the service forward to the terminal step.
pub(super) fn complete_through_final_step(service: &IntakeFormService<FakeGateway, MemoryNotifier>) {
    service.merge_section(basic_details());
    assert!(service.advance().is_advanced(), "basic details accepted");

    for patch in required_documents() {
        service.merge_section(patch);
    }
    assert!(service.advance().is_advanced(), "documents accepted");

    service.merge_section(essays());
    assert!(service.advance().is_advanced(), "essays accepted");

    service.merge_section(interview_availability());
    assert_eq!(service.current_step(), Step::InterviewAvailability);
}

/// Yield to the runtime until `condition` holds.
pub(super) async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..1_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}

#[derive(Default)]
pub(super) struct FakeGateway {
    upload_failure: Option<u16>,
    submit_failure: Option<u16>,
    upload_gate: Option<Arc<Notify>>,
    uploads: Mutex<Vec<String>>,
    submissions: Mutex<Vec<SubmissionPayload>>,
}

impl FakeGateway {
    pub(super) fn succeeding() -> Self {
        Self::default()
    }

    pub(super) fn failing_uploads(status: u16) -> Self {
        Self {
            upload_failure: Some(status),
            ..Self::default()
        }
    }

    pub(super) fn failing_submissions(status: u16) -> Self {
        Self {
            submit_failure: Some(status),
            ..Self::default()
        }
    }

    /// Uploads park until the gate is notified.
    pub(super) fn gated(gate: Arc<Notify>) -> Self {
        Self {
            upload_gate: Some(gate),
            ..Self::default()
        }
    }

    pub(super) fn upload_calls(&self) -> Vec<String> {
        self.uploads.lock().expect("upload mutex poisoned").clone()
    }

    pub(super) fn submissions(&self) -> Vec<SubmissionPayload> {
        self.submissions
            .lock()
            .expect("submission mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl IntakeGateway for FakeGateway {
    async fn upload_file(&self, file: UploadFile) -> Result<RemoteReference, GatewayError> {
        self.uploads
            .lock()
            .expect("upload mutex poisoned")
            .push(file.file_name.clone());

        if let Some(gate) = &self.upload_gate {
            gate.notified().await;
        }

        match self.upload_failure {
            Some(status) => Err(GatewayError::Status {
                endpoint: "fake://upload-file".to_string(),
                status,
            }),
            None => Ok(RemoteReference(format!(
                "https://files.example.com/{}",
                file.file_name
            ))),
        }
    }

    async fn submit_form(&self, payload: &SubmissionPayload) -> Result<(), GatewayError> {
        self.submissions
            .lock()
            .expect("submission mutex poisoned")
            .push(payload.clone());

        match self.submit_failure {
            Some(status) => Err(GatewayError::Status {
                endpoint: "fake://submit".to_string(),
                status,
            }),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub(super) fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notice mutex poisoned").clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .expect("notice mutex poisoned")
            .push(notice);
    }
}
