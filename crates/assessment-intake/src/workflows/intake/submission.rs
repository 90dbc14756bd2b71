use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, info, warn};

use super::domain::{ApplicantRecord, BasicDetails, Documents, InterviewAvailability};
use super::gateway::IntakeGateway;
use super::notify::{Notice, Notifier};
use super::session::FormSession;

pub const SUBMIT_SUCCEEDED_MESSAGE: &str = "Form submitted successfully!";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit form. Please try again.";
pub const UPLOADS_PENDING_MESSAGE: &str =
    "Please wait for document uploads to finish before submitting.";

/// Statement-of-purpose answers as sent over the wire; `q3` is a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementOfPurposePayload {
    pub q1: String,
    pub q2: String,
    pub q3: Vec<String>,
}

/// JSON body posted to the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub basic_details: BasicDetails,
    pub documents: Documents,
    pub statement_of_purpose: StatementOfPurposePayload,
    pub interview_availability: InterviewAvailability,
    #[serde(
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionPayload {
    /// Build the outbound body. The record itself is not modified.
    pub fn from_record(record: &ApplicantRecord, submitted_at: DateTime<Utc>) -> Self {
        let answers = &record.statement_of_purpose;
        Self {
            basic_details: record.basic_details.clone(),
            documents: record.documents.clone(),
            statement_of_purpose: StatementOfPurposePayload {
                q1: answers.q1.clone(),
                q2: answers.q2.clone(),
                // TODO: confirm with product whether q3 is an essay or a list; the list
                // shape is kept because the submission endpoint expects it.
                q3: split_comma_list(&answers.q3),
            },
            interview_availability: record.interview_availability.clone(),
            submitted_at,
        }
    }
}

/// Split on commas, trim each item, and drop empty items.
pub fn split_comma_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn serialize_timestamp<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted { submitted_at: DateTime<Utc> },
    Invalid { error_count: usize },
    Failed,
    NotAtTerminalStep,
    UploadsPending,
    AlreadySubmitting,
}

/// Final-step orchestration: re-validate, transform, send, report.
pub struct SubmissionCoordinator<G, N> {
    session: FormSession,
    gateway: Arc<G>,
    notifier: Arc<N>,
}

impl<G, N> Clone for SubmissionCoordinator<G, N> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            gateway: Arc::clone(&self.gateway),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<G, N> SubmissionCoordinator<G, N>
where
    G: IntakeGateway + 'static,
    N: Notifier + 'static,
{
    pub fn new(session: FormSession, gateway: Arc<G>, notifier: Arc<N>) -> Self {
        Self {
            session,
            gateway,
            notifier,
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        if !self.session.current_step().is_terminal() {
            debug!(step = %self.session.current_step(), "submit ignored before the final step");
            return SubmitOutcome::NotAtTerminalStep;
        }

        if !self.session.validate_current() {
            let error_count = self.session.errors().len();
            debug!(error_count, "submission blocked by validation errors");
            return SubmitOutcome::Invalid { error_count };
        }

        let pending = self.session.uploads_in_flight();
        if !pending.is_empty() {
            debug!(?pending, "submission blocked by pending uploads");
            self.notifier.notify(Notice::info(UPLOADS_PENDING_MESSAGE));
            return SubmitOutcome::UploadsPending;
        }

        let Some(_submitting) = self.session.begin_submission() else {
            debug!("submission already in progress");
            return SubmitOutcome::AlreadySubmitting;
        };

        let submitted_at = Utc::now();
        let payload = SubmissionPayload::from_record(&self.session.record(), submitted_at);

        match self.gateway.submit_form(&payload).await {
            Ok(()) => {
                info!(submitted_at = %submitted_at, "application submitted");
                self.notifier.notify(Notice::success(SUBMIT_SUCCEEDED_MESSAGE));
                SubmitOutcome::Submitted { submitted_at }
            }
            Err(err) => {
                warn!(error = %err, "application submission failed");
                self.notifier.notify(Notice::failure(SUBMIT_FAILED_MESSAGE));
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn comma_list_is_trimmed_and_filtered() {
        assert_eq!(
            split_comma_list("growth, stability ,  impact"),
            vec!["growth", "stability", "impact"]
        );
        assert_eq!(split_comma_list(" , ,"), Vec::<String>::new());
        assert_eq!(split_comma_list("single answer"), vec!["single answer"]);
    }

    #[test]
    fn payload_serializes_timestamp_with_millis() {
        let mut record = ApplicantRecord::default();
        record.statement_of_purpose.q3 = "learning,team".to_string();
        let submitted_at = Utc
            .with_ymd_and_hms(2025, 3, 14, 9, 30, 5)
            .single()
            .expect("valid timestamp");

        let payload = SubmissionPayload::from_record(&record, submitted_at);
        let value = serde_json::to_value(&payload).expect("serializes");

        assert_eq!(value["submittedAt"], "2025-03-14T09:30:05.000Z");
        assert_eq!(value["statementOfPurpose"]["q3"], serde_json::json!(["learning", "team"]));
        assert_eq!(record.statement_of_purpose.q3, "learning,team");
        assert!(value["basicDetails"].get("dateOfBirth").is_some());
    }

    #[test]
    fn payload_parses_back_from_wire_json() {
        let submitted_at = Utc
            .with_ymd_and_hms(2025, 3, 14, 9, 30, 5)
            .single()
            .expect("valid timestamp");
        let payload = SubmissionPayload::from_record(&ApplicantRecord::default(), submitted_at);
        let json = serde_json::to_string(&payload).expect("serializes");

        let parsed: SubmissionPayload = serde_json::from_str(&json).expect("parses");
        assert_eq!(parsed.submitted_at, submitted_at);
    }
}
