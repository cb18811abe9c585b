mod batch;
mod cli;
mod infra;
mod routes;
mod server;

use lead_scoring::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
