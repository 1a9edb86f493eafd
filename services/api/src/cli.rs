use crate::demo::{run_portfolio_report, PortfolioReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use risk_signals::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Early Risk Signals",
    about = "Serve and inspect the credit-card delinquency risk engine from the command line",
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
    /// Print a portfolio risk report from a CSV export without serving
    Report(PortfolioReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured customer activity CSV path
    #[arg(long)]
    pub(crate) data_csv: Option<std::path::PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_portfolio_report(args),
    }
}
