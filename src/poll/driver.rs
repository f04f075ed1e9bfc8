use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::{PollLoop, TickTicket};
use crate::booking::{self, BookingForm, BookingRequest};
use crate::error::{BookingError, Unreachable};
use crate::model::Snapshot;
use crate::remote::RemoteStatusSource;

/// Results coming back from background requests.
#[derive(Debug)]
pub enum Completion {
    Status(TickTicket, Result<Snapshot, Unreachable>),
    Health(bool),
    Booking(Result<BookingRequest, BookingError>),
    Logs(Result<String, Unreachable>),
}

/// Runs requests off the UI thread and hands results back over a channel.
///
/// The UI thread stays the only place state changes: it drains completions and
/// feeds status results into [`PollLoop::complete_tick`].
pub struct Poller {
    source: Arc<dyn RemoteStatusSource + Send + Sync>,
    cadence: Duration,
    next_due: Instant,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl Poller {
    /// The first tick is due immediately.
    pub fn new(source: Arc<dyn RemoteStatusSource + Send + Sync>, cadence: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            cadence,
            next_due: Instant::now(),
            tx,
            rx,
        }
    }

    pub fn until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Start a tick if the cadence says so. Returns whether one was started.
    pub fn fire_if_due(&mut self, poll: &mut PollLoop, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.cadence;
        self.fire(poll);
        true
    }

    /// Start a tick now without moving the cadence.
    pub fn fire(&mut self, poll: &mut PollLoop) {
        let ticket = poll.begin_tick();
        let source = Arc::clone(&self.source);
        self.spawn(
            "washq-poll",
            move || Completion::Status(ticket, source.fetch_snapshot()),
            Completion::Status(ticket, Err(Unreachable::new("could not start poll thread"))),
        );
    }

    /// One-shot reachability check shown before the first poll lands.
    pub fn probe_health(&self) {
        let source = Arc::clone(&self.source);
        self.spawn(
            "washq-health",
            move || Completion::Health(source.fetch_health()),
            Completion::Health(false),
        );
    }

    pub fn submit_booking(&self, form: BookingForm) {
        // Validation is local and instant; only valid bookings leave this thread.
        if let Err(err) = form.validate() {
            let _ = self.tx.send(Completion::Booking(Err(err.into())));
            return;
        }
        let source = Arc::clone(&self.source);
        self.spawn(
            "washq-book",
            move || Completion::Booking(booking::submit(source.as_ref(), &form)),
            Completion::Booking(Err(Unreachable::new("could not start booking thread").into())),
        );
    }

    pub fn tail_logs(&self, lines: usize) {
        let source = Arc::clone(&self.source);
        self.spawn(
            "washq-logs",
            move || Completion::Logs(source.tail_logs(lines)),
            Completion::Logs(Err(Unreachable::new("could not start logs thread"))),
        );
    }

    pub fn try_next(&self) -> Option<Completion> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next completion.
    pub fn next_timeout(&self, timeout: Duration) -> Option<Completion> {
        match self.rx.recv_timeout(timeout) {
            Ok(c) => Some(c),
            Err(RecvTimeoutError::Timeout) => None,
            // Unreachable while `self.tx` is alive.
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    fn spawn<F>(&self, name: &str, job: F, on_spawn_failure: Completion)
    where
        F: FnOnce() -> Completion + Send + 'static,
    {
        let tx = self.tx.clone();
        let spawned = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let done = job();
                if tx.send(done).is_err() {
                    debug!("completion dropped; receiver gone");
                }
            });
        if let Err(err) = spawned {
            warn!(thread = name, error = %err, "spawn request thread");
            let _ = self.tx.send(on_spawn_failure);
        }
    }
}

#[cfg(test)]
#[path = "../tests/poll/driver_tests.rs"]
mod tests;
