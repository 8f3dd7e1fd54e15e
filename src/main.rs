use clap::Parser;
use std::process::ExitCode;

use token_bind_tool::cli::Cli;
use token_bind_tool::lifecycle;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match lifecycle::run(cli).await {
        Ok(()) => {
            tracing::info!("Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, exit_code = e.exit_code(), "Operation failed");
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
