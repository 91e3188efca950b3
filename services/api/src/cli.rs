use crate::demo::{
    run_care_path, run_demo, run_impact, run_triage, CarePathArgs, DemoArgs, ImpactArgs,
    TriageArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hearing_care::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hearing Care",
    about = "Run the hearing risk triage and tinnitus care service, or score answers offline",
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
    /// Classify hearing risk from triage answers
    Triage(TriageArgs),
    /// Score tinnitus handicap sections and print the recommended step
    Impact(ImpactArgs),
    /// Project the care path for a set of record counts
    CarePath(CarePathArgs),
    /// Walk a sample patient through triage, screening, assessment and care path
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
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Triage(args) => run_triage(args),
        Command::Impact(args) => run_impact(args),
        Command::CarePath(args) => run_care_path(args),
        Command::Demo(args) => run_demo(args),
    }
}
