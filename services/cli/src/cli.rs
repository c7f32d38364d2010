use crate::commands::{
    run_add, run_delete, run_edit, run_export, run_list, run_search, run_summary, AddArgs,
    DeleteArgs, EditArgs, ExportArgs, ListArgs, SearchArgs,
};
use crate::infra::open_service;
use clap::{Parser, Subcommand};
use rental_manager::config::AppConfig;
use rental_manager::error::AppError;
use rental_manager::telemetry;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rental-manager",
    about = "Track rental properties, their tenants and monthly profit",
    version
)]
struct Cli {
    /// Override the configured store file (RENTALS_STORE_PATH)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every rental (default command)
    List(ListArgs),
    /// Add a rental with its tenant and monthly figures
    Add(AddArgs),
    /// Change fields of one rental
    Edit(EditArgs),
    /// Remove one rental
    Delete(DeleteArgs),
    /// Find rentals whose name or street contains a term
    Search(SearchArgs),
    /// Print portfolio totals
    Summary,
    /// Write the rental table as CSV
    Export(ExportArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::List(ListArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let storage = match cli.store {
        Some(path) => config.storage.with_path(path)?,
        None => config.storage,
    };
    let mut service = open_service(&storage)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::List(args) => run_list(&mut service, args, &mut out),
        Command::Add(args) => run_add(&mut service, args, &mut out),
        Command::Edit(args) => run_edit(&mut service, args, &mut out),
        Command::Delete(args) => run_delete(&mut service, args, &mut out),
        Command::Search(args) => run_search(&service, args, &mut out),
        Command::Summary => run_summary(&service, &mut out),
        Command::Export(args) => run_export(&service, args, &mut out),
    }
}
