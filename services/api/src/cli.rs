use crate::report::{run_assess, run_merge, run_score, AssessArgs, MergeArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use workforce_risk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Workforce Risk",
    about = "Score employee risk signals, merge HR exports, and serve the scoring API",
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
    /// Score a population signal table and print tiers and scenarios
    Score(ScoreArgs),
    /// Merge raw HR dataset exports into one signal table
    Merge(MergeArgs),
    /// Assess one employee's health from raw HR dataset exports
    Assess(AssessArgs),
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
        Command::Score(args) => run_score(args),
        Command::Merge(args) => run_merge(args),
        Command::Assess(args) => run_assess(args),
    }
}
