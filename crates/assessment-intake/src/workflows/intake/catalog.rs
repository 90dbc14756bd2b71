//! Static labels and option lists shown alongside the form.

use super::domain::{DocumentField, EssayField};

/// Upper bound on words per statement-of-purpose answer.
pub const ESSAY_WORD_LIMIT: usize = 300;

/// Upload size cap applied before any network request.
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 10;

pub const ACCEPTED_EXTENSIONS: [&str; 6] = ["pdf", "doc", "docx", "jpg", "jpeg", "png"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSlot {
    pub field: DocumentField,
    pub label: &'static str,
    pub required: bool,
}

impl DocumentField {
    pub const fn slot(self) -> DocumentSlot {
        let (label, required) = match self {
            DocumentField::Class10Marksheet => ("Class 10 Marksheet", true),
            DocumentField::Class12Marksheet => ("Class 12 Marksheet", true),
            DocumentField::GraduationMarksheet => ("Graduation Marksheet", true),
            DocumentField::PostGraduationMarksheet => ("Post Graduation Marksheet", false),
            DocumentField::Resume => ("Resume/CV", true),
            DocumentField::RecommendationLetter => ("Recommendation Letter", false),
            DocumentField::SalarySlips => ("Salary Slips", false),
            DocumentField::Others => ("Others", false),
        };

        DocumentSlot {
            field: self,
            label,
            required,
        }
    }

    pub const fn label(self) -> &'static str {
        self.slot().label
    }

    pub const fn is_required(self) -> bool {
        self.slot().required
    }
}

pub fn document_slots() -> Vec<DocumentSlot> {
    DocumentField::ordered()
        .into_iter()
        .map(DocumentField::slot)
        .collect()
}

impl EssayField {
    pub const fn prompt(self) -> &'static str {
        match self {
            EssayField::Q1 => "Tell me about a time you were asked to do something you had never done before. How did you react? What did you learn?",
            EssayField::Q2 => "Tell me about the last time something significant didn't go according to plan at work. What was your role? What was the outcome?",
            EssayField::Q3 => "What are the three things that are most important to you in a job?",
        }
    }
}

pub const TIME_ZONES: [&str; 26] = [
    "UTC-12:00",
    "UTC-11:00",
    "UTC-10:00",
    "UTC-09:00",
    "UTC-08:00",
    "UTC-07:00",
    "UTC-06:00",
    "UTC-05:00",
    "UTC-04:00",
    "UTC-03:00",
    "UTC-02:00",
    "UTC-01:00",
    "UTC+00:00",
    "UTC+01:00",
    "UTC+02:00",
    "UTC+03:00",
    "UTC+04:00",
    "UTC+05:00",
    "UTC+05:30 (IST)",
    "UTC+06:00",
    "UTC+07:00",
    "UTC+08:00",
    "UTC+09:00",
    "UTC+10:00",
    "UTC+11:00",
    "UTC+12:00",
];

pub const INTERVIEW_MEDIUMS: [&str; 6] = [
    "Video Call (Zoom)",
    "Video Call (Google Meet)",
    "Video Call (Microsoft Teams)",
    "Phone Call",
    "In-Person",
    "Other",
];
