//! Storefront binary. Setup lives in the library so it can be tested.

use std::process::ExitCode;

use clap::Parser;
use storefront::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    storefront::init_tracing();

    match storefront::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
