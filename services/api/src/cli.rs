use crate::report::{
    run_evaluate, run_guest_import, run_guest_summary, EvaluateArgs, GuestImportArgs,
    GuestSummaryArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use gradu::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "gradu",
    about = "Evaluate graduation requirements and serve graduation summaries",
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
    /// Evaluate a course list file and print the graduation summary
    Evaluate(EvaluateArgs),
    /// Work with the local guest cache
    Guest {
        #[command(subcommand)]
        command: GuestCommand,
    },
}

#[derive(Subcommand, Debug)]
enum GuestCommand {
    /// Append courses from a CSV export to a guest session
    Import(GuestImportArgs),
    /// Print the summary for a guest session
    Summary(GuestSummaryArgs),
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::Guest {
            command: GuestCommand::Import(args),
        } => run_guest_import(args),
        Command::Guest {
            command: GuestCommand::Summary(args),
        } => run_guest_summary(args),
    }
}
