use assessment_intake::workflows::intake::catalog::{ACCEPTED_EXTENSIONS, DEFAULT_MAX_UPLOAD_MB};
use assessment_intake::workflows::intake::{
    BasicField, DocumentField, EssayField, FormField, InterviewField, Section, Step,
    ESSAY_WORD_LIMIT, INTERVIEW_MEDIUMS, TIME_ZONES,
};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Print the catalog as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct CatalogView {
    pub(crate) steps: Vec<StepView>,
    pub(crate) essay_word_limit: usize,
    pub(crate) accepted_extensions: Vec<&'static str>,
    pub(crate) max_upload_mb: u64,
    pub(crate) time_zones: Vec<&'static str>,
    pub(crate) interview_mediums: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StepView {
    pub(crate) index: u8,
    pub(crate) title: &'static str,
    pub(crate) section: Section,
    pub(crate) progress_percent: u8,
    pub(crate) fields: Vec<FieldView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FieldView {
    pub(crate) key: &'static str,
    pub(crate) error_key: &'static str,
    pub(crate) required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) label: Option<&'static str>,
}

fn step_fields(step: Step) -> Vec<FormField> {
    match step {
        Step::BasicDetails => BasicField::ordered().into_iter().map(FormField::from).collect(),
        Step::Documents => DocumentField::ordered().into_iter().map(FormField::from).collect(),
        Step::StatementOfPurpose => EssayField::ordered().into_iter().map(FormField::from).collect(),
        Step::InterviewAvailability => {
            InterviewField::ordered().into_iter().map(FormField::from).collect()
        }
    }
}

fn field_view(field: FormField) -> FieldView {
    let (required, label) = match field {
        FormField::Document(document) => (document.is_required(), Some(document.label())),
        FormField::Essay(essay) => (true, Some(essay.prompt())),
        FormField::Basic(_) | FormField::Interview(_) => (true, None),
    };

    FieldView {
        key: field.record_key(),
        error_key: field.error_key(),
        required,
        label,
    }
}

pub(crate) fn build_catalog() -> CatalogView {
    let steps = Step::ordered()
        .into_iter()
        .map(|step| StepView {
            index: step.index(),
            title: step.title(),
            section: step.section(),
            progress_percent: step.progress_percent(),
            fields: step_fields(step).into_iter().map(field_view).collect(),
        })
        .collect();

    CatalogView {
        steps,
        essay_word_limit: ESSAY_WORD_LIMIT,
        accepted_extensions: ACCEPTED_EXTENSIONS.to_vec(),
        max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
        time_zones: TIME_ZONES.to_vec(),
        interview_mediums: INTERVIEW_MEDIUMS.to_vec(),
    }
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), assessment_intake::error::AppError> {
    let catalog = build_catalog();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!("Applicant intake form");
    for step in &catalog.steps {
        println!(
            "\nStep {} - {} ({}%)",
            step.index, step.title, step.progress_percent
        );
        for field in &step.fields {
            let marker = if field.required { "*" } else { "" };
            match field.label {
                Some(label) => println!("  {}{marker}: {label}", field.error_key),
                None => println!("  {}{marker}", field.error_key),
            }
        }
    }

    println!("\nEssay answers: up to {} words each", catalog.essay_word_limit);
    println!(
        "Uploads: {} up to {}MB",
        catalog.accepted_extensions.join(", "),
        catalog.max_upload_mb
    );
    println!("Time zones: {}", catalog.time_zones.join(", "));
    println!("Interview mediums: {}", catalog.interview_mediums.join(", "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_every_step_in_order() {
        let catalog = build_catalog();
        let titles: Vec<_> = catalog.steps.iter().map(|step| step.title).collect();
        assert_eq!(
            titles,
            vec![
                "Basic Details",
                "Document Collection",
                "Statement of Purpose",
                "Interview Availability"
            ]
        );
        assert_eq!(catalog.steps[3].progress_percent, 100);
    }

    #[test]
    fn catalog_fields_use_error_keys_and_labels() {
        let catalog = build_catalog();

        let documents = &catalog.steps[1].fields;
        assert_eq!(documents.len(), 8);
        let optional: Vec<_> = documents
            .iter()
            .filter(|field| !field.required)
            .map(|field| field.key)
            .collect();
        assert_eq!(
            optional,
            vec!["postGraduationMarksheet", "recommendationLetter", "salarySlips", "others"]
        );

        let interview = serde_json::to_value(&catalog.steps[3]).expect("serializes");
        assert_eq!(interview["section"], "interviewAvailability");
        assert_eq!(interview["fields"][0]["error_key"], "interviewEmail");
        assert_eq!(interview["fields"][0]["key"], "email");
        assert!(interview["fields"][0].get("label").is_none());
    }
}
