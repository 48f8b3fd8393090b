use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use joluv::app;
use joluv::cli::Cli;
use joluv::config::AppConfig;
use joluv::error::AppError;
use joluv::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "joluv=warn".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!("command failed: {:?}", e);
            eprintln!("error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, AppError> {
    let mut config = AppConfig::new_from_env()?;
    if let Some(base) = cli.api_base {
        config.api_base = base.trim_end_matches('/').to_string();
    }

    let state = AppState::bootstrap(config)?;
    app::run(&state, cli.command).await
}
