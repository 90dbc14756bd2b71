//! Multi-step applicant intake: record, validation, navigation, uploads, and submission.

pub mod catalog;
pub mod domain;
pub mod gateway;
pub mod http;
pub mod notify;
pub mod receiver;
pub mod service;
pub mod session;
pub mod steps;
pub mod submission;
pub mod uploads;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{DocumentSlot, ESSAY_WORD_LIMIT, INTERVIEW_MEDIUMS, TIME_ZONES};
pub use domain::{
    ApplicantRecord, BasicDetails, BasicDetailsPatch, BasicField, DocumentField, Documents,
    DocumentsPatch, EssayField, FormField, InterviewAvailability, InterviewAvailabilityPatch,
    InterviewField, Section, SectionPatch, StatementOfPurpose, StatementOfPurposePatch,
};
pub use gateway::{GatewayError, IntakeGateway, RemoteReference, UploadFile};
pub use http::HttpIntakeGateway;
pub use notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use receiver::{intake_receiver_router, ReceiverError, ReceiverStore, StoredFile};
pub use service::IntakeFormService;
pub use session::FormSession;
pub use steps::{Step, StepController, Transition, TOTAL_STEPS};
pub use submission::{split_comma_list, SubmissionPayload, SubmitOutcome};
pub use uploads::{UploadOutcome, UploadPolicy, UploadRejection};
pub use validation::{validate_step, word_count, ErrorMap};
