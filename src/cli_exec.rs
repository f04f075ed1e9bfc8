use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::warn;

use washq::booking::{self, ACCEPTED_MESSAGE, BookingForm};
use washq::config::ClientConfig;
use washq::headless::{self, PlainOptions, StatusReport};
use washq::poll::Health;
use washq::queue_view::WingFilter;
use washq::remote::{RemoteClient, RemoteStatusSource};

use crate::Commands;
use crate::cli_commands::{BookArgs, WatchArgs};

pub(crate) fn handle_command(config: ClientConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Watch(args) => handle_watch_command(config, args)?,
        Commands::Status(args) => handle_status_command(&config, args.wing, args.json)?,
        Commands::Book(args) => handle_book_command(&config, args)?,
        Commands::Logs(args) => handle_logs_command(&config, args.lines)?,
        Commands::Health => handle_health_command(&config)?,
    }

    Ok(())
}

fn handle_watch_command(config: ClientConfig, args: WatchArgs) -> Result<()> {
    if !args.plain {
        return washq::tui::run_with_options(washq::tui::TuiRunOptions { config });
    }

    let client = RemoteClient::new(&config)?;
    let opts = PlainOptions {
        cadence: config.poll_interval(),
        ticks: args.ticks,
    };
    println!("Watching {} (Ctrl-C to stop)", config.api_base);
    headless::run_plain(Arc::new(client), &opts, io::stdout())
}

fn handle_status_command(config: &ClientConfig, wing: Option<String>, json: bool) -> Result<()> {
    let client = RemoteClient::new(config)?;
    let snapshot = client
        .fetch_snapshot()
        .with_context(|| format!("fetch status from {}", client.base_url()))?;
    let filter = WingFilter::new(wing.as_deref());

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&StatusReport::new(&snapshot, &filter))
                .context("serialize status json")?
        );
    } else {
        print!("{}", headless::render_status(&snapshot, &filter));
    }
    Ok(())
}

fn handle_book_command(config: &ClientConfig, args: BookArgs) -> Result<()> {
    let client = RemoteClient::new(config)?;
    let form = BookingForm::new(args.name, args.wing, args.duration);
    match booking::submit(&client, &form) {
        Ok(_) => {
            println!("{}", ACCEPTED_MESSAGE);
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, "booking not accepted");
            anyhow::bail!("{}", err.user_message())
        }
    }
}

fn handle_logs_command(config: &ClientConfig, lines: Option<usize>) -> Result<()> {
    let client = RemoteClient::new(config)?;
    let n = lines.unwrap_or(config.log_lines);
    let text = client.tail_logs(n).context("Failed to load logs.")?;
    print!("{}", text);
    if !text.is_empty() && !text.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn handle_health_command(config: &ClientConfig) -> Result<()> {
    let client = RemoteClient::new(config)?;
    let health = Health::from_probe(client.fetch_health());
    println!("{}", health.badge());
    if health != Health::Healthy {
        anyhow::bail!("API at {} did not answer /health", client.base_url());
    }
    Ok(())
}
