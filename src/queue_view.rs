use crate::model::QueueItem;

/// Wing filter, normalised (trimmed, lowercased) once when it is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WingFilter(Option<String>);

impl WingFilter {
    pub fn new(raw: Option<&str>) -> Self {
        let norm = raw
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        Self(norm)
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }

    pub fn matches(&self, item: &QueueItem) -> bool {
        match &self.0 {
            None => true,
            Some(wing) => item.wing.to_lowercase() == *wing,
        }
    }
}

impl From<&str> for WingFilter {
    fn from(raw: &str) -> Self {
        Self::new(Some(raw))
    }
}

/// Queue items in `filter`'s wing (all items if no filter), ordered by `seq`.
pub fn project(queue: &[QueueItem], filter: &WingFilter) -> Vec<QueueItem> {
    let mut out: Vec<QueueItem> = queue.iter().filter(|q| filter.matches(q)).cloned().collect();
    out.sort_by_key(|q| q.seq);
    out
}

pub fn empty_queue_message(filter: &WingFilter) -> String {
    match filter.as_str() {
        Some(wing) => format!("No waiting users in wing \"{}\".", wing),
        None => "No waiting users.".to_string(),
    }
}

/// `"2m 5s"` or `"45s"`.
pub fn format_remaining(secs: u64) -> String {
    let (m, s) = (secs / 60, secs % 60);
    if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    }
}

#[cfg(test)]
#[path = "tests/queue_view_tests.rs"]
mod tests;
