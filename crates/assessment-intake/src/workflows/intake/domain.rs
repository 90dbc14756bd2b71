use std::fmt;

use serde::{Deserialize, Serialize};

/// Applicant identity and contact details collected on the first step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicDetails {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub date_of_birth: String,
}

/// Remote references for uploaded documents. An empty string means "not uploaded".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Documents {
    pub class10_marksheet: String,
    pub class12_marksheet: String,
    pub graduation_marksheet: String,
    pub post_graduation_marksheet: String,
    pub resume: String,
    pub recommendation_letter: String,
    pub salary_slips: String,
    pub others: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementOfPurpose {
    pub q1: String,
    pub q2: String,
    pub q3: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewAvailability {
    pub email: String,
    pub location: String,
    pub interview_date: String,
    pub interview_time: String,
    pub time_zone: String,
    pub interview_medium: String,
}

/// The single aggregate a form session collects, split into four disjoint sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRecord {
    pub basic_details: BasicDetails,
    pub documents: Documents,
    pub statement_of_purpose: StatementOfPurpose,
    pub interview_availability: InterviewAvailability,
}

impl ApplicantRecord {
    /// Shallow-merge a section patch. Fields the patch leaves unset keep their value.
    pub fn merge_section(&mut self, patch: SectionPatch) {
        match patch {
            SectionPatch::BasicDetails(patch) => patch.apply(&mut self.basic_details),
            SectionPatch::Documents(patch) => patch.apply(&mut self.documents),
            SectionPatch::StatementOfPurpose(patch) => patch.apply(&mut self.statement_of_purpose),
            SectionPatch::InterviewAvailability(patch) => {
                patch.apply(&mut self.interview_availability)
            }
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Basic(field) => self.basic_value(field),
            FormField::Document(field) => self.document(field),
            FormField::Essay(field) => self.essay(field),
            FormField::Interview(field) => self.interview_value(field),
        }
    }

    pub fn document(&self, field: DocumentField) -> &str {
        let docs = &self.documents;
        match field {
            DocumentField::Class10Marksheet => &docs.class10_marksheet,
            DocumentField::Class12Marksheet => &docs.class12_marksheet,
            DocumentField::GraduationMarksheet => &docs.graduation_marksheet,
            DocumentField::PostGraduationMarksheet => &docs.post_graduation_marksheet,
            DocumentField::Resume => &docs.resume,
            DocumentField::RecommendationLetter => &docs.recommendation_letter,
            DocumentField::SalarySlips => &docs.salary_slips,
            DocumentField::Others => &docs.others,
        }
    }

    pub fn essay(&self, field: EssayField) -> &str {
        let answers = &self.statement_of_purpose;
        match field {
            EssayField::Q1 => &answers.q1,
            EssayField::Q2 => &answers.q2,
            EssayField::Q3 => &answers.q3,
        }
    }

    fn basic_value(&self, field: BasicField) -> &str {
        let details = &self.basic_details;
        match field {
            BasicField::Name => &details.name,
            BasicField::Email => &details.email,
            BasicField::MobileNumber => &details.mobile_number,
            BasicField::DateOfBirth => &details.date_of_birth,
        }
    }

    fn interview_value(&self, field: InterviewField) -> &str {
        let availability = &self.interview_availability;
        match field {
            InterviewField::Email => &availability.email,
            InterviewField::Location => &availability.location,
            InterviewField::InterviewDate => &availability.interview_date,
            InterviewField::InterviewTime => &availability.interview_time,
            InterviewField::TimeZone => &availability.time_zone,
            InterviewField::InterviewMedium => &availability.interview_medium,
        }
    }
}

/// Named groupings of the applicant record, one per form step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    BasicDetails,
    Documents,
    StatementOfPurpose,
    InterviewAvailability,
}

impl Section {
    pub const fn key(self) -> &'static str {
        match self {
            Section::BasicDetails => "basicDetails",
            Section::Documents => "documents",
            Section::StatementOfPurpose => "statementOfPurpose",
            Section::InterviewAvailability => "interviewAvailability",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BasicField {
    Name,
    Email,
    MobileNumber,
    DateOfBirth,
}

impl BasicField {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Name,
            Self::Email,
            Self::MobileNumber,
            Self::DateOfBirth,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::MobileNumber => "mobileNumber",
            Self::DateOfBirth => "dateOfBirth",
        }
    }
}

/// Document slots on the collection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentField {
    Class10Marksheet,
    Class12Marksheet,
    GraduationMarksheet,
    PostGraduationMarksheet,
    Resume,
    RecommendationLetter,
    SalarySlips,
    Others,
}

impl DocumentField {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Class10Marksheet,
            Self::Class12Marksheet,
            Self::GraduationMarksheet,
            Self::PostGraduationMarksheet,
            Self::Resume,
            Self::RecommendationLetter,
            Self::SalarySlips,
            Self::Others,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Class10Marksheet => "class10Marksheet",
            Self::Class12Marksheet => "class12Marksheet",
            Self::GraduationMarksheet => "graduationMarksheet",
            Self::PostGraduationMarksheet => "postGraduationMarksheet",
            Self::Resume => "resume",
            Self::RecommendationLetter => "recommendationLetter",
            Self::SalarySlips => "salarySlips",
            Self::Others => "others",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for DocumentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EssayField {
    Q1,
    Q2,
    Q3,
}

impl EssayField {
    pub const fn ordered() -> [Self; 3] {
        [Self::Q1, Self::Q2, Self::Q3]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Q3 => "q3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterviewField {
    Email,
    Location,
    InterviewDate,
    InterviewTime,
    TimeZone,
    InterviewMedium,
}

impl InterviewField {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Email,
            Self::Location,
            Self::InterviewDate,
            Self::InterviewTime,
            Self::TimeZone,
            Self::InterviewMedium,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Location => "location",
            Self::InterviewDate => "interviewDate",
            Self::InterviewTime => "interviewTime",
            Self::TimeZone => "timeZone",
            Self::InterviewMedium => "interviewMedium",
        }
    }
}

/// Field identifier scoped by section, so `email` on step 1 and step 4 never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Basic(BasicField),
    Document(DocumentField),
    Essay(EssayField),
    Interview(InterviewField),
}

impl FormField {
    pub const fn section(self) -> Section {
        match self {
            FormField::Basic(_) => Section::BasicDetails,
            FormField::Document(_) => Section::Documents,
            FormField::Essay(_) => Section::StatementOfPurpose,
            FormField::Interview(_) => Section::InterviewAvailability,
        }
    }

    /// Key of the field inside its record section.
    pub const fn record_key(self) -> &'static str {
        match self {
            FormField::Basic(field) => field.key(),
            FormField::Document(field) => field.key(),
            FormField::Essay(field) => field.key(),
            FormField::Interview(field) => field.key(),
        }
    }

    /// Key used in error maps; unique across all steps.
    pub const fn error_key(self) -> &'static str {
        match self {
            FormField::Interview(InterviewField::Email) => "interviewEmail",
            other => other.record_key(),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_key())
    }
}

impl From<BasicField> for FormField {
    fn from(value: BasicField) -> Self {
        Self::Basic(value)
    }
}

impl From<DocumentField> for FormField {
    fn from(value: DocumentField) -> Self {
        Self::Document(value)
    }
}

impl From<EssayField> for FormField {
    fn from(value: EssayField) -> Self {
        Self::Essay(value)
    }
}

impl From<InterviewField> for FormField {
    fn from(value: InterviewField) -> Self {
        Self::Interview(value)
    }
}

/// Partial update for one section of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", content = "fields", rename_all = "camelCase")]
pub enum SectionPatch {
    BasicDetails(BasicDetailsPatch),
    Documents(DocumentsPatch),
    StatementOfPurpose(StatementOfPurposePatch),
    InterviewAvailability(InterviewAvailabilityPatch),
}

impl SectionPatch {
    pub fn section(&self) -> Section {
        match self {
            SectionPatch::BasicDetails(_) => Section::BasicDetails,
            SectionPatch::Documents(_) => Section::Documents,
            SectionPatch::StatementOfPurpose(_) => Section::StatementOfPurpose,
            SectionPatch::InterviewAvailability(_) => Section::InterviewAvailability,
        }
    }

    /// Patch touching exactly one field.
    pub fn single(field: impl Into<FormField>, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field.into() {
            FormField::Basic(field) => {
                let mut patch = BasicDetailsPatch::default();
                match field {
                    BasicField::Name => patch.name = value,
                    BasicField::Email => patch.email = value,
                    BasicField::MobileNumber => patch.mobile_number = value,
                    BasicField::DateOfBirth => patch.date_of_birth = value,
                }
                SectionPatch::BasicDetails(patch)
            }
            FormField::Document(field) => {
                let mut patch = DocumentsPatch::default();
                *patch.slot_mut(field) = value;
                SectionPatch::Documents(patch)
            }
            FormField::Essay(field) => {
                let mut patch = StatementOfPurposePatch::default();
                match field {
                    EssayField::Q1 => patch.q1 = value,
                    EssayField::Q2 => patch.q2 = value,
                    EssayField::Q3 => patch.q3 = value,
                }
                SectionPatch::StatementOfPurpose(patch)
            }
            FormField::Interview(field) => {
                let mut patch = InterviewAvailabilityPatch::default();
                match field {
                    InterviewField::Email => patch.email = value,
                    InterviewField::Location => patch.location = value,
                    InterviewField::InterviewDate => patch.interview_date = value,
                    InterviewField::InterviewTime => patch.interview_time = value,
                    InterviewField::TimeZone => patch.time_zone = value,
                    InterviewField::InterviewMedium => patch.interview_medium = value,
                }
                SectionPatch::InterviewAvailability(patch)
            }
        }
    }
}

fn merge_into(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BasicDetailsPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub date_of_birth: Option<String>,
}

impl BasicDetailsPatch {
    fn apply(self, target: &mut BasicDetails) {
        merge_into(&mut target.name, self.name);
        merge_into(&mut target.email, self.email);
        merge_into(&mut target.mobile_number, self.mobile_number);
        merge_into(&mut target.date_of_birth, self.date_of_birth);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentsPatch {
    pub class10_marksheet: Option<String>,
    pub class12_marksheet: Option<String>,
    pub graduation_marksheet: Option<String>,
    pub post_graduation_marksheet: Option<String>,
    pub resume: Option<String>,
    pub recommendation_letter: Option<String>,
    pub salary_slips: Option<String>,
    pub others: Option<String>,
}

impl DocumentsPatch {
    fn slot_mut(&mut self, field: DocumentField) -> &mut Option<String> {
        match field {
            DocumentField::Class10Marksheet => &mut self.class10_marksheet,
            DocumentField::Class12Marksheet => &mut self.class12_marksheet,
            DocumentField::GraduationMarksheet => &mut self.graduation_marksheet,
            DocumentField::PostGraduationMarksheet => &mut self.post_graduation_marksheet,
            DocumentField::Resume => &mut self.resume,
            DocumentField::RecommendationLetter => &mut self.recommendation_letter,
            DocumentField::SalarySlips => &mut self.salary_slips,
            DocumentField::Others => &mut self.others,
        }
    }

    fn apply(self, target: &mut Documents) {
        merge_into(&mut target.class10_marksheet, self.class10_marksheet);
        merge_into(&mut target.class12_marksheet, self.class12_marksheet);
        merge_into(&mut target.graduation_marksheet, self.graduation_marksheet);
        merge_into(
            &mut target.post_graduation_marksheet,
            self.post_graduation_marksheet,
        );
        merge_into(&mut target.resume, self.resume);
        merge_into(&mut target.recommendation_letter, self.recommendation_letter);
        merge_into(&mut target.salary_slips, self.salary_slips);
        merge_into(&mut target.others, self.others);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementOfPurposePatch {
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
}

impl StatementOfPurposePatch {
    fn apply(self, target: &mut StatementOfPurpose) {
        merge_into(&mut target.q1, self.q1);
        merge_into(&mut target.q2, self.q2);
        merge_into(&mut target.q3, self.q3);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterviewAvailabilityPatch {
    pub email: Option<String>,
    pub location: Option<String>,
    pub interview_date: Option<String>,
    pub interview_time: Option<String>,
    pub time_zone: Option<String>,
    pub interview_medium: Option<String>,
}

impl InterviewAvailabilityPatch {
    fn apply(self, target: &mut InterviewAvailability) {
        merge_into(&mut target.email, self.email);
        merge_into(&mut target.location, self.location);
        merge_into(&mut target.interview_date, self.interview_date);
        merge_into(&mut target.interview_time, self.interview_time);
        merge_into(&mut target.time_zone, self.time_zone);
        merge_into(&mut target.interview_medium, self.interview_medium);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> ApplicantRecord {
        let mut record = ApplicantRecord::default();
        record.merge_section(SectionPatch::BasicDetails(BasicDetailsPatch {
            name: Some("Asha Rao".to_string()),
            email: Some("asha@example.com".to_string()),
            mobile_number: Some("+91 98450 00000".to_string()),
            date_of_birth: Some("1996-04-12".to_string()),
        }));
        record
    }

    #[test]
    fn merge_keeps_sibling_fields() {
        let mut record = populated();
        record.merge_section(SectionPatch::single(BasicField::Name, "X"));

        assert_eq!(record.basic_details.name, "X");
        assert_eq!(record.basic_details.email, "asha@example.com");
        assert_eq!(record.basic_details.date_of_birth, "1996-04-12");
    }

    #[test]
    fn merge_leaves_other_sections_untouched() {
        let mut record = populated();
        record.merge_section(SectionPatch::single(
            DocumentField::Resume,
            "https://files.example.com/resume.pdf",
        ));

        assert_eq!(record.documents.resume, "https://files.example.com/resume.pdf");
        assert_eq!(record.documents.class10_marksheet, "");
        assert_eq!(record.basic_details, populated().basic_details);
    }

    #[test]
    fn interview_email_uses_distinct_error_key() {
        let interview = FormField::from(InterviewField::Email);
        let basic = FormField::from(BasicField::Email);

        assert_eq!(interview.record_key(), "email");
        assert_eq!(interview.error_key(), "interviewEmail");
        assert_eq!(basic.error_key(), "email");
    }

    #[test]
    fn record_serializes_with_wire_keys() {
        let value = serde_json::to_value(ApplicantRecord::default()).expect("serializes");

        assert!(value["basicDetails"].get("mobileNumber").is_some());
        assert!(value["documents"].get("class10Marksheet").is_some());
        assert!(value["documents"].get("postGraduationMarksheet").is_some());
        assert!(value["interviewAvailability"].get("interviewMedium").is_some());
        assert_eq!(value["statementOfPurpose"]["q3"], "");
    }

    #[test]
    fn section_patch_deserializes_from_tagged_json() {
        let patch: SectionPatch = serde_json::from_value(serde_json::json!({
            "section": "interviewAvailability",
            "fields": { "timeZone": "UTC+05:30 (IST)" }
        }))
        .expect("patch parses");

        let mut record = ApplicantRecord::default();
        record.merge_section(patch);
        assert_eq!(record.interview_availability.time_zone, "UTC+05:30 (IST)");
        assert_eq!(record.interview_availability.location, "");
    }

    #[test]
    fn document_keys_round_trip_through_lookup() {
        for field in DocumentField::ordered() {
            assert_eq!(DocumentField::from_key(field.key()), Some(field));
        }
        assert_eq!(DocumentField::from_key("passport"), None);
    }
}
