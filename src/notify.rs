//! Where completion events go once the poll loop has decided to announce them.
//!
//! Sinks run on the UI thread inside a tick, so none of them may block: the
//! terminal sinks only write a few bytes, the toast queue only pushes.

use std::io::Write;

use tracing::debug;

use crate::model::CompletionEvent;

mod desktop;
pub use self::desktop::{DesktopNotifier, DesktopPlatform, OscDesktop, Permission};
mod toast;
pub use self::toast::{Toast, ToastQueue, clock_now};

pub const NOTICE_TITLE: &str = "Washer Done";

pub trait NotificationSink {
    fn notify(&mut self, event: &CompletionEvent);
}

impl<S: NotificationSink + ?Sized> NotificationSink for &mut S {
    fn notify(&mut self, event: &CompletionEvent) {
        (**self).notify(event);
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for Box<S> {
    fn notify(&mut self, event: &CompletionEvent) {
        (**self).notify(event);
    }
}

impl<A: NotificationSink, B: NotificationSink> NotificationSink for (A, B) {
    fn notify(&mut self, event: &CompletionEvent) {
        self.0.notify(event);
        self.1.notify(event);
    }
}

/// `Machine #3: Done! Ann, please put in clothes.`
pub fn completion_message(event: &CompletionEvent) -> String {
    match event.user.as_deref() {
        Some(user) => format!(
            "Machine #{}: Done! {}, please put in clothes.",
            event.machine_id, user
        ),
        None => format!(
            "Machine #{}: Done! please put in clothes.",
            event.machine_id
        ),
    }
}

/// Audible bell plus an optional desktop notification, written to a terminal.
pub struct TerminalAlerts<W: Write, P: DesktopPlatform> {
    bell: bool,
    out: W,
    desktop: DesktopNotifier<P>,
}

impl<W: Write, P: DesktopPlatform> TerminalAlerts<W, P> {
    pub fn new(bell: bool, out: W, platform: P) -> Self {
        Self {
            bell,
            out,
            desktop: DesktopNotifier::new(platform),
        }
    }

    pub fn desktop(&self) -> &DesktopNotifier<P> {
        &self.desktop
    }
}

impl<W: Write, P: DesktopPlatform> NotificationSink for TerminalAlerts<W, P> {
    fn notify(&mut self, event: &CompletionEvent) {
        if self.bell {
            let rung = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
            if let Err(err) = rung {
                debug!(error = %err, "terminal bell failed");
            }
        }
        self.desktop.deliver(NOTICE_TITLE, &completion_message(event));
    }
}

/// Headless sink: one line per completion.
pub struct LineSink<W: Write> {
    out: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> NotificationSink for LineSink<W> {
    fn notify(&mut self, event: &CompletionEvent) {
        let msg = completion_message(event);
        if let Err(err) = writeln!(self.out, "{} {}: {}", clock_now(), NOTICE_TITLE, msg) {
            debug!(error = %err, "write completion line");
        }
    }
}

#[cfg(test)]
#[path = "tests/notify_tests.rs"]
mod tests;
