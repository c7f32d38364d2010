mod cli;
mod commands;
mod infra;

use rental_manager::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
