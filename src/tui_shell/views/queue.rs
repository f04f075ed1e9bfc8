use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::model::QueueItem;
use crate::queue_view::{WingFilter, empty_queue_message, project};

use super::super::{View, render_view_chrome};

/// Filtered, `seq`-ordered waiting list.
#[derive(Debug, Default)]
pub(in crate::tui_shell) struct QueueView {
    pub(in crate::tui_shell) items: Vec<QueueItem>,
    pub(in crate::tui_shell) total: usize,
    pub(in crate::tui_shell) filter: WingFilter,
    pub(in crate::tui_shell) scroll: usize,
}

impl QueueView {
    pub(in crate::tui_shell) fn refresh(&mut self, queue: &[QueueItem], filter: &WingFilter) {
        self.items = project(queue, filter);
        self.total = queue.len();
        self.filter = filter.clone();
        self.scroll = self.scroll.min(self.items.len().saturating_sub(1));
    }

    pub(in crate::tui_shell) fn lines(&self) -> Vec<Line<'static>> {
        if self.items.is_empty() {
            return vec![Line::from(Span::styled(
                empty_queue_message(&self.filter),
                Style::default().fg(Color::Gray),
            ))];
        }

        let mut out = Vec::with_capacity(self.items.len() * 2);
        for q in &self.items {
            out.push(Line::from(Span::styled(
                q.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            out.push(Line::from(Span::styled(
                format!("  Wing: {} • Duration: {}s • Seq: {}", q.wing, q.duration, q.seq),
                Style::default().fg(Color::Gray),
            )));
        }
        out
    }
}

impl View for QueueView {
    fn title(&self) -> String {
        match self.filter.as_str() {
            Some(wing) => format!("Queue {}/{} wing={}", self.items.len(), self.total, wing),
            None => format!("Queue {}", self.items.len()),
        }
    }

    fn move_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn move_down(&mut self) {
        let max = self.items.len().saturating_sub(1);
        self.scroll = (self.scroll + 1).min(max);
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let inner = render_view_chrome(frame, &self.title(), "", area);
        frame.render_widget(
            Paragraph::new(self.lines())
                .wrap(Wrap { trim: false })
                .scroll(((self.scroll * 2) as u16, 0)),
            inner,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/views/queue_tests.rs"]
mod tests;
