use crate::commands::{
    run_consent_check, run_import, run_screen, ConsentCheckArgs, ImportArgs, ScreenArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pre_flourish::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Pre-Flourish caregiver intake",
    about = "Screen caregivers and check informed consent for the Pre-Flourish study",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate screening eligibility for a single caregiver
    Screen(ScreenArgs),
    /// Evaluate the informed consent checklist
    ConsentCheck(ConsentCheckArgs),
    /// Evaluate every caregiver in a screening CSV export
    Import(ImportArgs),
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
        Command::Screen(args) => {
            run_screen(args);
            Ok(())
        }
        Command::ConsentCheck(args) => {
            run_consent_check(args);
            Ok(())
        }
        Command::Import(args) => run_import(args),
    }
}
