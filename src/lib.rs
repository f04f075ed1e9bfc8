//! Terminal client for a shared laundry-machine booking service.
//!
//! The interesting part lives in [`poll`], [`diff`] and [`queue_view`]: a
//! fixed-cadence poll loop that keeps exactly one snapshot of the service,
//! detects machines that went from busy to free, and hands those completions to
//! a [`notify::NotificationSink`]. Everything under [`tui_shell`] is drawing.

pub mod booking;
pub mod config;
pub mod diff;
pub mod error;
pub mod headless;
pub mod logging;
pub mod model;
pub mod notify;
pub mod poll;
pub mod queue_view;
pub mod remote;
pub mod tui;
mod tui_shell;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
