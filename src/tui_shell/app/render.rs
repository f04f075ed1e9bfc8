use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::super::View;
use super::super::modal;
use super::{App, Pane};
use crate::notify::NOTICE_TITLE;
use crate::poll::{Health, PollPhase};

fn health_color(h: Health) -> Color {
    match h {
        Health::Healthy => Color::Green,
        Health::Unreachable => Color::Red,
        Health::Unknown => Color::Gray,
    }
}

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let toast_h = if app.toasts.is_empty() {
        0
    } else {
        app.toasts.len() as u16 + 2
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(toast_h),
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(area);

    // Header
    let health = app.poll.health();
    let mut spans = vec![
        Span::styled(" washq ", Style::default().fg(Color::Black).bg(Color::White)),
        Span::raw("  "),
        Span::raw(app.config.api_base.as_str()),
        Span::raw("  "),
        Span::styled(
            health.badge(),
            Style::default()
                .fg(health_color(health))
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(wing) = app.filter.as_str() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("wing={}", wing),
            Style::default().fg(Color::Cyan),
        ));
    }
    if app.poll.phase() == PollPhase::Polling {
        spans.push(Span::styled("  ·", Style::default().fg(Color::Gray)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM)),
        chunks[0],
    );

    // Completion notices
    if !app.toasts.is_empty() {
        let lines: Vec<Line> = app
            .toasts
            .iter()
            .map(|t| {
                Line::from(vec![
                    Span::styled(format!("{} ", t.shown_at), Style::default().fg(Color::Gray)),
                    Span::styled(
                        t.text.as_str(),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} (x: dismiss)", NOTICE_TITLE)),
            ),
            chunks[1],
        );
    }

    // Body
    if let Some(logs) = &app.logs {
        logs.render(frame, chunks[2]);
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(chunks[2]);
        app.machines.render(frame, cols[0]);
        app.queue.render(frame, cols[1]);
    }

    // Status line
    let status = match &app.status {
        Some(s) => Line::from(vec![
            Span::styled(format!("{} ", s.at), Style::default().fg(Color::Gray)),
            Span::styled(
                s.text.as_str(),
                Style::default().fg(if s.error { Color::Red } else { Color::Green }),
            ),
        ]),
        None => Line::from(""),
    };
    frame.render_widget(
        Paragraph::new(status)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP)),
        chunks[3],
    );

    // Key hints
    let hints = if app.logs.is_some() {
        Line::from(Span::styled(
            "Esc: close  r: reload  ↑/↓: scroll  q: quit",
            Style::default().fg(Color::Gray),
        ))
    } else {
        let focused = match app.focus {
            Pane::Machines => "machines",
            Pane::Queue => "queue",
        };
        Line::from(vec![
            Span::styled(format!("[{}] ", focused), Style::default().fg(Color::Cyan)),
            Span::styled(
                "r: refresh  f: filter wing  c: clear filter  b: book  l: logs  Tab: focus  q: quit",
                Style::default().fg(Color::Gray),
            ),
        ])
    };
    frame.render_widget(Paragraph::new(hints), chunks[4]);

    if let Some(m) = &app.modal {
        modal::draw_modal(frame, m);
    }
}
