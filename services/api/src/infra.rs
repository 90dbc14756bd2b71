use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use assessment_intake::error::AppError;
use assessment_intake::workflows::intake::{
    BasicDetailsPatch, DocumentField, InterviewAvailabilityPatch, Notice, NoticeLevel, Notifier,
    SectionPatch, StatementOfPurposePatch,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Prints notices for the operator running the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
            NoticeLevel::Failure => "error",
        };
        println!("  [{tag}] {}", notice.message);
    }
}

/// Answers consumed by `fill`. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct AnswersFile {
    pub(crate) basic_details: Option<BasicDetailsPatch>,
    pub(crate) documents: BTreeMap<DocumentField, PathBuf>,
    pub(crate) statement_of_purpose: Option<StatementOfPurposePatch>,
    pub(crate) interview_availability: Option<InterviewAvailabilityPatch>,
}

impl AnswersFile {
    /// Section patches in step order.
    pub(crate) fn section_patches(&self) -> Vec<SectionPatch> {
        let mut patches = Vec::new();
        if let Some(patch) = &self.basic_details {
            patches.push(SectionPatch::BasicDetails(patch.clone()));
        }
        if let Some(patch) = &self.statement_of_purpose {
            patches.push(SectionPatch::StatementOfPurpose(patch.clone()));
        }
        if let Some(patch) = &self.interview_availability {
            patches.push(SectionPatch::InterviewAvailability(patch.clone()));
        }
        patches
    }
}

/// Read an answers file. Relative document paths resolve against the file's directory.
pub(crate) async fn load_answers(path: &Path) -> Result<AnswersFile, AppError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let mut answers: AnswersFile = serde_json::from_str(&raw)?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for document in answers.documents.values_mut() {
        if document.is_relative() {
            *document = base.join(&*document);
        }
    }
    Ok(answers)
}
