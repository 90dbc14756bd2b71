use crate::catalog::{run_catalog, CatalogArgs};
use crate::fill::{run_fill, FillArgs};
use crate::server;
use assessment_intake::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Assessment Intake",
    about = "Run the applicant intake receiver or drive an intake form from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the local intake receiver (default command)
    Serve(ServeArgs),
    /// Fill and submit the intake form from a JSON answers file
    Fill(FillArgs),
    /// Print the steps, fields, and option lists of the form
    Catalog(CatalogArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Fill(args) => run_fill(args).await,
        Command::Catalog(args) => run_catalog(args),
    }
}
