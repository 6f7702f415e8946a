use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use reminder_core::domain::Receipt;
use reminder_core::{EngineBuilder, Settings};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Birthday reminders: compute what is due today and send it.
#[derive(Parser)]
#[command(name = "reminder", version, about)]
struct Cli {
    /// Directory holding default.toml / local.toml.
    #[arg(short, long, default_value = "config")]
    config: PathBuf,

    /// Override `store.path` from the configuration.
    #[arg(long)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List reminders due today without sending anything.
    Check,

    /// Send every reminder due today.
    Dispatch,

    /// Send one message straight through the gateway.
    TestMessage {
        #[arg(long)]
        to: String,

        #[arg(long)]
        text: String,
    },
}

#[derive(Serialize)]
struct TestMessageOutput {
    success: bool,
    message: &'static str,
    result: Receipt,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load_from_path(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    if let Some(store) = cli.store {
        settings.store.path = store;
    }

    // stdout は JSON レポート専用、ログは stderr へ
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.observability.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let engine = EngineBuilder::from_settings(&settings)?.build()?;

    match cli.command {
        Command::Check => {
            tracing::info!("checking for birthday reminders");
            let report = engine
                .check_pending()
                .await
                .context("failed to check reminders")?;
            print_json(&report)?;
        }
        Command::Dispatch => {
            tracing::info!("dispatching birthday reminders");
            let report = engine
                .dispatch_all()
                .await
                .context("failed to process birthday reminders")?;
            if report.failure_count > 0 {
                tracing::warn!(failed = report.failure_count, "some reminders were not sent");
            }
            print_json(&report)?;
        }
        Command::TestMessage { to, text } => {
            let receipt = engine
                .send_test_message(&to, &text)
                .await
                .context("failed to send test message")?;
            print_json(&TestMessageOutput {
                success: true,
                message: "Test message sent successfully",
                result: receipt,
            })?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
