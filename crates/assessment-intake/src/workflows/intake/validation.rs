use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::catalog::ESSAY_WORD_LIMIT;
use super::domain::{
    ApplicantRecord, BasicField, DocumentField, EssayField, FormField, InterviewField,
};
use super::steps::Step;

/// Field-level messages produced by validating one step. Empty means the step is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    errors: BTreeMap<FormField, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: impl Into<FormField>) -> Option<&str> {
        self.errors.get(&field.into()).map(String::as_str)
    }

    /// Lookup by external error key (`"email"`, `"interviewEmail"`, ...).
    pub fn get_key(&self, key: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(field, _)| field.error_key() == key)
            .map(|(_, message)| message.as_str())
    }

    pub fn contains(&self, field: impl Into<FormField>) -> bool {
        self.errors.contains_key(&field.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().map(|field| field.error_key())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: impl Into<FormField>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, message) in &self.errors {
            map.serialize_entry(field.error_key(), message)?;
        }
        map.end()
    }
}

/// Validate the section bound to `step`. Every field check runs, so several errors can surface at once.
pub fn validate_step(step: Step, record: &ApplicantRecord) -> ErrorMap {
    match step {
        Step::BasicDetails => validate_basic_details(record),
        Step::Documents => validate_documents(record),
        Step::StatementOfPurpose => validate_statement_of_purpose(record),
        Step::InterviewAvailability => validate_interview_availability(record),
    }
}

/// Whitespace-separated token count, ignoring empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

fn validate_basic_details(record: &ApplicantRecord) -> ErrorMap {
    let details = &record.basic_details;
    let mut errors = ErrorMap::new();

    if is_blank(&details.name) {
        errors.insert(BasicField::Name, "Name is required");
    }

    if is_blank(&details.email) {
        errors.insert(BasicField::Email, "Email is required");
    } else if !email_pattern().is_match(&details.email) {
        errors.insert(BasicField::Email, "Email is invalid");
    }

    if is_blank(&details.mobile_number) {
        errors.insert(BasicField::MobileNumber, "Mobile number is required");
    }

    if details.date_of_birth.is_empty() {
        errors.insert(BasicField::DateOfBirth, "Date of birth is required");
    }

    errors
}

fn validate_documents(record: &ApplicantRecord) -> ErrorMap {
    let mut errors = ErrorMap::new();

    for field in DocumentField::ordered() {
        if field.is_required() && record.document(field).is_empty() {
            errors.insert(field, format!("{} is required", field.label()));
        }
    }

    errors
}

fn validate_statement_of_purpose(record: &ApplicantRecord) -> ErrorMap {
    let mut errors = ErrorMap::new();

    for field in EssayField::ordered() {
        let answer = record.essay(field);
        if is_blank(answer) {
            errors.insert(field, "This answer is required");
        } else if word_count(answer) > ESSAY_WORD_LIMIT {
            errors.insert(
                field,
                format!("Answer must be within {ESSAY_WORD_LIMIT} words"),
            );
        }
    }

    errors
}

fn validate_interview_availability(record: &ApplicantRecord) -> ErrorMap {
    let availability = &record.interview_availability;
    let mut errors = ErrorMap::new();

    if is_blank(&availability.email) {
        errors.insert(InterviewField::Email, "Email is required");
    }
    if is_blank(&availability.location) {
        errors.insert(InterviewField::Location, "Location is required");
    }
    if availability.interview_date.is_empty() {
        errors.insert(InterviewField::InterviewDate, "Interview date is required");
    }
    if availability.interview_time.is_empty() {
        errors.insert(InterviewField::InterviewTime, "Interview time is required");
    }
    if availability.time_zone.is_empty() {
        errors.insert(InterviewField::TimeZone, "Time zone is required");
    }
    if availability.interview_medium.is_empty() {
        errors.insert(InterviewField::InterviewMedium, "Interview medium is required");
    }

    errors
}
