use clap::Parser;
use tracing::error;

use homebuyer::api::{AppError, Cli, run};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = homebuyer::telemetry::init(&cli.log_level) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = homebuyer::core::validate_reference_tables() {
        let e = AppError::from(e);
        error!(error = %e, "refusing to start");
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
