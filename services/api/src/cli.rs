use crate::demo::{run_demo, run_report, DemoArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand, ValueEnum};
use marketplace::error::AppError;
use marketplace::users::UserType;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Digital Marketplace",
    about = "Review, score, and award Sprint With Us proposals from the command line",
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
    /// Print the report card and scoresheet for an opportunity snapshot
    Report(ReportArgs),
    /// Walk a seeded opportunity through review and award
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Additional opportunity snapshots (JSON) to serve alongside the seed data
    #[arg(long = "snapshot")]
    pub(crate) snapshots: Vec<PathBuf>,
}

/// Viewer role for rendered labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Viewer {
    Vendor,
    #[default]
    Government,
    Admin,
}

impl From<Viewer> for UserType {
    fn from(value: Viewer) -> Self {
        match value {
            Viewer::Vendor => UserType::Vendor,
            Viewer::Government => UserType::Government,
            Viewer::Admin => UserType::Admin,
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
