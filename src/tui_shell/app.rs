use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::booking::ACCEPTED_MESSAGE;
use crate::config::ClientConfig;
use crate::notify::{NotificationSink, ToastQueue, clock_now};
use crate::poll::{Completion, PollLoop, Poller, TickOutcome};
use crate::queue_view::WingFilter;
use crate::remote::RemoteStatusSource;

use super::View;
use super::modal::Modal;
use super::views::{LogsView, MachinesView, QueueView};

mod event_loop;
mod render;
mod runtime;

pub(super) use runtime::run;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum Pane {
    Machines,
    Queue,
}

#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct StatusLine {
    pub(in crate::tui_shell) text: String,
    pub(in crate::tui_shell) error: bool,
    pub(in crate::tui_shell) at: String,
}

pub(in crate::tui_shell) struct App {
    pub(in crate::tui_shell) config: ClientConfig,

    // Sole owner of the current snapshot; views get copies on each applied tick.
    pub(in crate::tui_shell) poll: PollLoop,
    pub(in crate::tui_shell) poller: Poller,

    pub(in crate::tui_shell) filter: WingFilter,

    pub(in crate::tui_shell) toasts: ToastQueue,
    pub(in crate::tui_shell) alerts: Box<dyn NotificationSink>,

    pub(in crate::tui_shell) machines: MachinesView,
    pub(in crate::tui_shell) queue: QueueView,
    pub(in crate::tui_shell) logs: Option<LogsView>,
    pub(in crate::tui_shell) focus: Pane,

    pub(in crate::tui_shell) modal: Option<Modal>,
    pub(in crate::tui_shell) status: Option<StatusLine>,

    pub(in crate::tui_shell) quit: bool,
}

impl App {
    pub(in crate::tui_shell) fn new(
        config: ClientConfig,
        source: Arc<dyn RemoteStatusSource + Send + Sync>,
        alerts: Box<dyn NotificationSink>,
    ) -> Self {
        let poller = Poller::new(source, config.poll_interval());
        Self {
            config,
            poll: PollLoop::new(),
            poller,
            filter: WingFilter::none(),
            toasts: ToastQueue::default(),
            alerts,
            machines: MachinesView::default(),
            queue: QueueView::default(),
            logs: None,
            focus: Pane::Machines,
            modal: None,
            status: None,
            quit: false,
        }
    }

    /// Kick off the one-shot health probe; the first poll fires on the first pump.
    pub(in crate::tui_shell) fn start(&mut self) {
        self.poller.probe_health();
    }

    /// Start a tick if due and apply everything that came back since the last frame.
    pub(in crate::tui_shell) fn pump(&mut self, now: Instant) {
        self.poller.fire_if_due(&mut self.poll, now);
        while let Some(done) = self.poller.try_next() {
            self.apply_completion(done);
        }
        self.toasts.prune(now);
    }

    pub(in crate::tui_shell) fn apply_completion(&mut self, done: Completion) {
        match done {
            Completion::Status(ticket, result) => {
                let mut sink = (&mut self.toasts, &mut self.alerts);
                let outcome = self.poll.complete_tick(ticket, result, &mut sink);
                match outcome {
                    TickOutcome::Applied { .. } => self.refresh_views(),
                    TickOutcome::Failed(_) => {}
                    TickOutcome::Stale { seq, newest } => {
                        debug!(seq, newest, "ignored stale status");
                    }
                }
            }
            Completion::Health(ok) => self.poll.record_health(ok),
            Completion::Booking(Ok(_)) => self.set_status(ACCEPTED_MESSAGE, false),
            Completion::Booking(Err(err)) => self.set_status(err.user_message(), true),
            Completion::Logs(result) => {
                let Some(view) = self.logs.as_mut() else {
                    // Pane was closed before the tail arrived.
                    return;
                };
                match result {
                    Ok(text) => view.set_text(&text),
                    Err(err) => {
                        debug!(error = %err, "log tail failed");
                        view.set_failed();
                    }
                }
            }
        }
    }

    pub(in crate::tui_shell) fn refresh_views(&mut self) {
        let snap = self.poll.snapshot();
        self.machines.refresh(&snap.machines, clock_now());
        self.queue.refresh(&snap.queue, &self.filter);
    }

    pub(in crate::tui_shell) fn set_filter(&mut self, filter: WingFilter) {
        self.filter = filter;
        self.queue.refresh(&self.poll.snapshot().queue, &self.filter);
    }

    pub(in crate::tui_shell) fn refresh_now(&mut self) {
        self.poller.fire(&mut self.poll);
    }

    pub(in crate::tui_shell) fn open_logs(&mut self) {
        let lines = self.config.log_lines;
        self.logs = Some(LogsView::loading(lines));
        self.poller.tail_logs(lines);
    }

    pub(in crate::tui_shell) fn set_status(&mut self, text: impl Into<String>, error: bool) {
        self.status = Some(StatusLine {
            text: text.into(),
            error,
            at: clock_now(),
        });
    }

    pub(in crate::tui_shell) fn focused_view_mut(&mut self) -> &mut dyn View {
        if let Some(logs) = self.logs.as_mut() {
            return logs;
        }
        match self.focus {
            Pane::Machines => &mut self.machines,
            Pane::Queue => &mut self.queue,
        }
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
