use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use washq::config::ClientConfig;
use washq::logging::{self, LogTarget};

use crate::Commands;
use crate::cli_commands::WatchArgs;

#[derive(Parser)]
#[command(name = "washq")]
#[command(about = "Laundry machine queue watcher", long_about = None)]
pub(crate) struct Cli {
    /// API base URL
    #[arg(long, global = true, env = "WASHQ_API_BASE", value_name = "URL")]
    api: Option<String>,

    /// JSON config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long = "log-file", global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Watch(WatchArgs::default()));

    let target = if command.draws_tui() {
        LogTarget::Quiet
    } else {
        LogTarget::Stderr
    };
    logging::init(target, cli.log_file.as_deref())?;

    let config = load_config(cli.config.as_deref(), cli.api)?;
    crate::cli_exec::handle_command(config, command)
}

/// Defaults < config file < `WASHQ_API_BASE` < `--api`.
fn load_config(path: Option<&Path>, api: Option<String>) -> Result<ClientConfig> {
    let base = match path {
        Some(path) => ClientConfig::load_file(path)?,
        None => ClientConfig::default(),
    };
    base.with_api_base(api)
}
