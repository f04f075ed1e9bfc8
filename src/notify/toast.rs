use std::collections::VecDeque;
use std::time::{Duration, Instant};

use time::OffsetDateTime;
use time::macros::format_description;

use super::{CompletionEvent, NotificationSink, completion_message};

#[derive(Clone, Debug)]
pub struct Toast {
    pub text: String,
    pub shown_at: String,
    created: Instant,
}

/// Visual notices shown in the TUI. Bounded; entries expire after `ttl`.
#[derive(Debug)]
pub struct ToastQueue {
    items: VecDeque<Toast>,
    capacity: usize,
    ttl: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(4, Duration::from_secs(30))
    }
}

impl ToastQueue {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            capacity: capacity.max(1),
            ttl,
        }
    }

    pub fn push(&mut self, text: String) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(Toast {
            text,
            shown_at: clock_now(),
            created: Instant::now(),
        });
    }

    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items
            .retain(|t| now.saturating_duration_since(t.created) < ttl);
    }

    pub fn dismiss_all(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter().rev()
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&mut self, event: &CompletionEvent) {
        self.push(completion_message(event));
    }
}

/// Wall-clock `HH:MM:SSZ` stamp for notices and status lines.
pub fn clock_now() -> String {
    OffsetDateTime::now_utc()
        .format(format_description!("[hour]:[minute]:[second]Z"))
        .unwrap_or_else(|_| "--:--:--".to_string())
}
