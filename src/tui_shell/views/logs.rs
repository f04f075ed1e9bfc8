use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use super::super::{View, render_view_chrome};

/// Service log tail, shown verbatim.
#[derive(Debug, Default)]
pub(in crate::tui_shell) struct LogsView {
    pub(in crate::tui_shell) requested: usize,
    pub(in crate::tui_shell) lines: Vec<String>,
    pub(in crate::tui_shell) loading: bool,
    pub(in crate::tui_shell) scroll: usize,
}

impl LogsView {
    pub(in crate::tui_shell) fn loading(requested: usize) -> Self {
        Self {
            requested,
            lines: vec!["Loading logs…".to_string()],
            loading: true,
            scroll: 0,
        }
    }

    pub(in crate::tui_shell) fn set_text(&mut self, text: &str) {
        self.lines = text.lines().map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push("(log is empty)".to_string());
        }
        self.loading = false;
        // Newest lines are at the bottom.
        self.scroll = self.lines.len().saturating_sub(1);
    }

    pub(in crate::tui_shell) fn set_failed(&mut self) {
        self.lines = vec!["Failed to load logs.".to_string()];
        self.loading = false;
        self.scroll = 0;
    }
}

impl View for LogsView {
    fn title(&self) -> String {
        format!("Logs (last {})", self.requested)
    }

    fn move_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn move_down(&mut self) {
        self.scroll = (self.scroll + 1).min(self.lines.len().saturating_sub(1));
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let note = if self.loading { "loading" } else { "Esc: close" };
        let inner = render_view_chrome(frame, &self.title(), note, area);

        // Keep the selected line near the bottom of the pane.
        let height = inner.height as usize;
        let top = (self.scroll + 1).saturating_sub(height);
        let lines: Vec<Line> = self.lines.iter().map(|s| Line::from(s.as_str())).collect();
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((top as u16, 0)),
            inner,
        );
    }
}
