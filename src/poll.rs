//! The poll loop: fetch, diff, swap, notify.
//!
//! [`PollLoop`] is the only writer of the current snapshot and of the health
//! indicator. Readers get `&Snapshot` through [`PollLoop::snapshot`], which
//! cannot outlive the borrow of the loop. Fetches may overlap when the server
//! is slow, so every fetch carries a [`TickTicket`]; a result older than the
//! newest completed one is dropped.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::diff::diff;
use crate::error::Unreachable;
use crate::model::{CompletionEvent, Snapshot};
use crate::notify::NotificationSink;
use crate::remote::RemoteStatusSource;

mod driver;
pub use self::driver::{Completion, Poller};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Health {
    /// No probe or poll has finished yet.
    Unknown,
    Healthy,
    Unreachable,
}

impl Health {
    pub fn from_probe(healthy: bool) -> Self {
        if healthy {
            Health::Healthy
        } else {
            Health::Unreachable
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Health::Unknown => "API: checking",
            Health::Healthy => "API: healthy",
            Health::Unreachable => "API: unreachable",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollPhase {
    Idle,
    Polling,
}

/// Issued by [`PollLoop::begin_tick`]; sequence numbers start at 1 and only grow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickTicket {
    seq: u64,
}

impl TickTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Snapshot replaced; `events` were handed to the sink in this order.
    Applied { events: Vec<CompletionEvent> },
    /// Fetch failed; snapshot untouched, health set to unreachable.
    Failed(Unreachable),
    /// A newer tick already completed; result dropped.
    Stale { seq: u64, newest: u64 },
}

#[derive(Debug)]
pub struct PollLoop {
    last: Snapshot,
    health: Health,
    issued: u64,
    in_flight: BTreeSet<u64>,
    newest_completed: u64,
}

impl Default for PollLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl PollLoop {
    pub fn new() -> Self {
        Self {
            last: Snapshot::empty(),
            health: Health::Unknown,
            issued: 0,
            in_flight: BTreeSet::new(),
            newest_completed: 0,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.last
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn phase(&self) -> PollPhase {
        if self.in_flight.is_empty() {
            PollPhase::Idle
        } else {
            PollPhase::Polling
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn begin_tick(&mut self) -> TickTicket {
        self.issued += 1;
        self.in_flight.insert(self.issued);
        debug!(seq = self.issued, in_flight = self.in_flight.len(), "tick started");
        TickTicket { seq: self.issued }
    }

    /// Apply the result of the fetch started with `ticket`.
    pub fn complete_tick(
        &mut self,
        ticket: TickTicket,
        result: Result<Snapshot, Unreachable>,
        sink: &mut dyn NotificationSink,
    ) -> TickOutcome {
        self.in_flight.remove(&ticket.seq);

        if ticket.seq <= self.newest_completed {
            debug!(
                seq = ticket.seq,
                newest = self.newest_completed,
                "dropping stale tick result"
            );
            return TickOutcome::Stale {
                seq: ticket.seq,
                newest: self.newest_completed,
            };
        }
        self.newest_completed = ticket.seq;

        let next = match result {
            Ok(snap) => snap,
            Err(err) => {
                if self.health != Health::Unreachable {
                    warn!(seq = ticket.seq, error = %err, "status poll failed");
                } else {
                    debug!(seq = ticket.seq, error = %err, "status poll failed");
                }
                self.health = Health::Unreachable;
                return TickOutcome::Failed(err);
            }
        };

        let events = diff(&self.last, &next);
        self.last = next;
        if self.health != Health::Healthy {
            info!(seq = ticket.seq, "status poll succeeded");
        }
        self.health = Health::Healthy;

        for event in &events {
            info!(machine = event.machine_id, user = ?event.user, "machine finished");
            sink.notify(event);
        }
        debug!(
            seq = ticket.seq,
            machines = self.last.machines.len(),
            queue = self.last.queue.len(),
            events = events.len(),
            "tick applied"
        );
        TickOutcome::Applied { events }
    }

    /// Fetch synchronously and apply. Used by one-shot commands and tests.
    pub fn tick(
        &mut self,
        source: &dyn RemoteStatusSource,
        sink: &mut dyn NotificationSink,
    ) -> TickOutcome {
        let ticket = self.begin_tick();
        let result = source.fetch_snapshot();
        self.complete_tick(ticket, result, sink)
    }

    /// Second writer of the health indicator (the startup probe). Last write wins.
    pub fn record_health(&mut self, healthy: bool) {
        let next = Health::from_probe(healthy);
        if next != self.health {
            info!(health = next.badge(), "health probe");
        }
        self.health = next;
    }
}

#[cfg(test)]
#[path = "tests/poll_tests.rs"]
mod tests;
