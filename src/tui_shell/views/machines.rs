use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use crate::model::MachineState;
use crate::queue_view::format_remaining;

use super::super::{View, render_view_chrome};

/// Copy of the machines taken when a tick is applied.
#[derive(Debug, Default)]
pub(in crate::tui_shell) struct MachinesView {
    pub(in crate::tui_shell) items: Vec<MachineState>,
    pub(in crate::tui_shell) updated_at: Option<String>,
    pub(in crate::tui_shell) selected: usize,
}

impl MachinesView {
    pub(in crate::tui_shell) fn refresh(&mut self, items: &[MachineState], updated_at: String) {
        self.items = items.to_vec();
        self.updated_at = Some(updated_at);
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }

    fn row(m: &MachineState) -> Line<'static> {
        let badge = if m.busy {
            Span::styled(
                " BUSY ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                " FREE ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        };

        Line::from(vec![
            Span::styled(format!("#{:<3}", m.id), Style::default().fg(Color::Cyan)),
            Span::raw(" "),
            badge,
            Span::raw(format!(
                "  user {:<12} wing {:<8} ",
                m.user.as_deref().unwrap_or("-"),
                m.wing.as_deref().unwrap_or("-")
            )),
            Span::styled(
                if m.busy {
                    format_remaining(m.remaining)
                } else {
                    "-".to_string()
                },
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])
    }
}

impl View for MachinesView {
    fn title(&self) -> String {
        let busy = self.items.iter().filter(|m| m.busy).count();
        format!("Machines {}/{} busy", busy, self.items.len())
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self) {
        let max = self.items.len().saturating_sub(1);
        self.selected = (self.selected + 1).min(max);
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let note = self
            .updated_at
            .as_deref()
            .map(|t| format!("updated {}", t))
            .unwrap_or_else(|| "waiting for first poll".to_string());
        let inner = render_view_chrome(frame, &self.title(), &note, area);

        let mut rows: Vec<ListItem> = self.items.iter().map(|m| ListItem::new(Self::row(m))).collect();
        if rows.is_empty() {
            rows.push(ListItem::new("(no machines)"));
        }

        let mut state = ListState::default();
        if !self.items.is_empty() {
            state.select(Some(self.selected.min(self.items.len() - 1)));
        }
        let list = List::new(rows).highlight_style(Style::default().bg(Color::DarkGray));
        frame.render_stateful_widget(list, inner, &mut state);
    }
}
