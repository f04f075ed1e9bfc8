use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Where log lines go for a given front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// The TUI owns the terminal; logs go to a file or nowhere.
    Quiet,
}

pub fn init(target: LogTarget, file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("washq=info"));
    let registry = tracing_subscriber::registry().with(filter);

    if let Some(path) = file {
        let f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file {}", path.display()))?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(f)),
            )
            .try_init()
            .context("install tracing subscriber")?;
        return Ok(());
    }

    match target {
        LogTarget::Stderr => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .try_init()
            .context("install tracing subscriber")?,
        LogTarget::Quiet => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::sink))
            .try_init()
            .context("install tracing subscriber")?,
    }
    Ok(())
}
