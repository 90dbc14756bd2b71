mod catalog;
mod cli;
mod fill;
mod infra;
mod routes;
mod server;

use assessment_intake::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
