use crate::demo::{run_demo, run_grade, DemoArgs, GradeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pitchgrade::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Pitch Grade",
    about = "Grade pitchers, evaluate trades, and recommend fantasy lineups",
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
    /// Grade one or more pitchers by name under a scoring profile
    Grade(GradeArgs),
    /// Walk through lineup, trade, and opponent reports on the loaded data
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
        Command::Grade(args) => run_grade(args),
        Command::Demo(args) => run_demo(args),
    }
}
