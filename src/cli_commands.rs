use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Watch machines and the queue (default)
    Watch(WatchArgs),

    /// Fetch machine and queue state once
    Status(StatusArgs),

    /// Join the queue
    Book(BookArgs),

    /// Print the tail of the service log
    Logs(LogsArgs),

    /// Check whether the API answers
    Health,
}

impl Commands {
    /// Whether this command takes over the terminal.
    pub(crate) fn draws_tui(&self) -> bool {
        matches!(self, Commands::Watch(args) if !args.plain)
    }
}

#[derive(Args, Default)]
pub(crate) struct WatchArgs {
    /// Print completion notices as lines instead of drawing the TUI
    #[arg(long)]
    pub(crate) plain: bool,
    /// Stop after N polls (plain mode only)
    #[arg(long, value_name = "N", hide = true, requires = "plain")]
    pub(crate) ticks: Option<u64>,
}

#[derive(Args)]
pub(crate) struct StatusArgs {
    /// Only show queue entries for this wing
    #[arg(long)]
    pub(crate) wing: Option<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct BookArgs {
    /// Your name
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    /// Your wing
    #[arg(long, default_value = "")]
    pub(crate) wing: String,
    /// Cycle length in seconds
    #[arg(long, default_value = "")]
    pub(crate) duration: String,
}

#[derive(Args)]
pub(crate) struct LogsArgs {
    /// Number of lines (defaults to the configured `log_lines`)
    #[arg(short = 'n', long = "lines")]
    pub(crate) lines: Option<usize>,
}
