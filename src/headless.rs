//! Plain-text front end: `washq watch --plain` and the one-shot `status` view.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::model::{MachineState, QueueItem, Snapshot};
use crate::notify::{LineSink, clock_now};
use crate::poll::{Completion, Health, PollLoop, Poller, TickOutcome};
use crate::queue_view::{WingFilter, empty_queue_message, format_remaining, project};
use crate::remote::RemoteStatusSource;

/// Longest a plain watch sleeps before re-checking the cadence.
const MAX_WAIT: Duration = Duration::from_millis(250);

#[derive(Clone, Debug)]
pub struct PlainOptions {
    pub cadence: Duration,
    /// Stop after this many status results (any outcome). `None` runs forever.
    pub ticks: Option<u64>,
}

/// Poll `source` on a cadence, writing completion notices and health changes to `out`.
pub fn run_plain<W: Write>(
    source: Arc<dyn RemoteStatusSource + Send + Sync>,
    opts: &PlainOptions,
    mut out: W,
) -> Result<()> {
    let mut poller = Poller::new(source, opts.cadence);
    let mut poll = PollLoop::new();
    let mut shown = Health::Unknown;
    let mut completed = 0u64;

    poller.probe_health();
    loop {
        let now = Instant::now();
        poller.fire_if_due(&mut poll, now);

        let wait = poller.until_due(Instant::now()).min(MAX_WAIT);
        let Some(done) = poller.next_timeout(wait) else {
            continue;
        };

        match done {
            Completion::Status(ticket, result) => {
                let mut sink = LineSink::new(&mut out);
                let outcome = poll.complete_tick(ticket, result, &mut sink);
                if let TickOutcome::Stale { seq, newest } = outcome {
                    debug!(seq, newest, "ignored stale status");
                }
                completed += 1;
            }
            Completion::Health(ok) => poll.record_health(ok),
            // Plain mode never books or tails logs.
            Completion::Booking(_) | Completion::Logs(_) => {}
        }

        if poll.health() != shown {
            shown = poll.health();
            writeln!(out, "{} {}", clock_now(), shown.badge()).context("write health line")?;
        }
        out.flush().context("flush output")?;

        if opts.ticks.is_some_and(|limit| completed >= limit) {
            return Ok(());
        }
    }
}

/// Shape of `washq status --json`.
#[derive(Debug, Serialize)]
pub struct StatusReport<'a> {
    pub machines: &'a [MachineState],
    pub busy: usize,
    pub wing: Option<&'a str>,
    pub queue: Vec<QueueItem>,
}

impl<'a> StatusReport<'a> {
    pub fn new(snapshot: &'a Snapshot, filter: &'a WingFilter) -> Self {
        Self {
            machines: &snapshot.machines,
            busy: snapshot.busy_count(),
            wing: filter.as_str(),
            queue: project(&snapshot.queue, filter),
        }
    }
}

pub fn render_status(snapshot: &Snapshot, filter: &WingFilter) -> String {
    let mut s = String::new();

    s.push_str(&format!(
        "Machines ({} busy / {})\n",
        snapshot.busy_count(),
        snapshot.machines.len()
    ));
    if snapshot.machines.is_empty() {
        s.push_str("  (none reported)\n");
    }
    for m in &snapshot.machines {
        let remaining = if m.busy {
            format_remaining(m.remaining)
        } else {
            "-".to_string()
        };
        s.push_str(&format!(
            "  #{:<3} {:<4}  {:<12} {:<6} {}\n",
            m.id,
            if m.busy { "BUSY" } else { "FREE" },
            m.user.as_deref().unwrap_or("-"),
            m.wing.as_deref().unwrap_or("-"),
            remaining
        ));
    }

    let items = project(&snapshot.queue, filter);
    match filter.as_str() {
        Some(wing) => s.push_str(&format!(
            "Queue ({}/{} in wing {})\n",
            items.len(),
            snapshot.queue.len(),
            wing
        )),
        None => s.push_str(&format!("Queue ({})\n", items.len())),
    }
    if items.is_empty() {
        s.push_str(&format!("  {}\n", empty_queue_message(filter)));
    }
    for q in &items {
        s.push_str(&format!(
            "  {}. {}  wing {}  {}\n",
            q.seq,
            q.name,
            q.wing,
            format_remaining(q.duration)
        ));
    }
    s
}

#[cfg(test)]
#[path = "tests/headless_tests.rs"]
mod tests;
