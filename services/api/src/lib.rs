mod acta;
mod cli;
mod infra;
mod routes;
mod server;

use admision::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
