mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use pre_flourish::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
