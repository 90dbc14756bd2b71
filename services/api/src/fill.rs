use std::path::PathBuf;
use std::sync::Arc;

use assessment_intake::config::AppConfig;
use assessment_intake::error::AppError;
use assessment_intake::telemetry;
use assessment_intake::workflows::intake::{
    ErrorMap, HttpIntakeGateway, IntakeFormService, IntakeGateway, Notifier, Step,
    SubmitOutcome, Transition, UploadFile, UploadOutcome,
};
use clap::Args;
use tracing::info;

use crate::infra::{load_answers, AnswersFile, ConsoleNotifier};

#[derive(Args, Debug)]
pub(crate) struct FillArgs {
    /// JSON answers file with the applicant's sections and document paths
    #[arg(long)]
    pub(crate) answers: PathBuf,
}

/// Where a scripted session ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FillReport {
    Blocked { step: Step, errors: ErrorMap },
    Finished(SubmitOutcome),
}

pub(crate) async fn run_fill(args: FillArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let answers = load_answers(&args.answers).await?;
    let gateway = Arc::new(HttpIntakeGateway::new(&config.endpoints)?);
    let service = IntakeFormService::new(gateway, Arc::new(ConsoleNotifier), config.uploads.policy());

    info!(
        answers = %args.answers.display(),
        upload_url = %config.endpoints.upload_url,
        submit_url = %config.endpoints.submit_url,
        "filling intake form"
    );

    match drive_session(&service, answers).await? {
        FillReport::Blocked { step, errors } => {
            println!("Stopped at step {} ({}):", step.index(), step.title());
            for (field, message) in errors.iter() {
                println!("  {field}: {message}");
            }
        }
        FillReport::Finished(outcome) => println!("Submission result: {outcome:?}"),
    }
    Ok(())
}

/// Merge every answered section, upload the documents, walk the steps, and submit.
pub(crate) async fn drive_session<G, N>(
    service: &IntakeFormService<G, N>,
    answers: AnswersFile,
) -> Result<FillReport, AppError>
where
    G: IntakeGateway + 'static,
    N: Notifier + 'static,
{
    for patch in answers.section_patches() {
        service.merge_section(patch);
    }

    for (field, path) in &answers.documents {
        let file = UploadFile::from_path(path).await?;
        match service.select_file(*field, Some(file)).await {
            UploadOutcome::Stored { url } => println!("  {} uploaded: {url}", field.label()),
            outcome => println!("  {} not uploaded: {outcome:?}", field.label()),
        }
    }

    while !service.current_step().is_terminal() {
        match service.advance() {
            Transition::Advanced { to, .. } => {
                println!("Step {} of {}: {}", to.index(), Step::terminal().index(), to.title());
            }
            Transition::Blocked { step, .. } => {
                return Ok(FillReport::Blocked {
                    step,
                    errors: service.errors(),
                });
            }
        }
    }

    match service.submit().await {
        SubmitOutcome::Invalid { .. } => Ok(FillReport::Blocked {
            step: service.current_step(),
            errors: service.errors(),
        }),
        outcome => Ok(FillReport::Finished(outcome)),
    }
}
