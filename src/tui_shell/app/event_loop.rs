use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::super::input::Input;
use super::super::modal::{self, BookingDraft, Modal};
use super::{App, Pane};
use crate::queue_view::WingFilter;

const FRAME: Duration = Duration::from_millis(50);

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.pump(Instant::now());

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(FRAME).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

pub(in crate::tui_shell) fn handle_key(app: &mut App, key: KeyEvent) {
    if app.modal.is_some() {
        modal::handle_modal_key(app, key);
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }

    if app.logs.is_some() {
        match key.code {
            KeyCode::Esc | KeyCode::Char('l') => app.logs = None,
            KeyCode::Char('r') => app.open_logs(),
            KeyCode::Up | KeyCode::Char('k') => app.focused_view_mut().move_up(),
            KeyCode::Down | KeyCode::Char('j') => app.focused_view_mut().move_down(),
            KeyCode::Char('q') => app.quit = true,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,

        KeyCode::Char('r') => {
            app.refresh_now();
        }

        KeyCode::Char('f') => {
            let current = app.filter.as_str().unwrap_or_default();
            app.modal = Some(Modal::Filter {
                input: Input::with_text(current),
            });
        }

        KeyCode::Char('c') => {
            app.set_filter(WingFilter::none());
        }

        KeyCode::Char('b') => {
            app.modal = Some(Modal::Booking(BookingDraft::default()));
        }

        KeyCode::Char('l') => app.open_logs(),

        KeyCode::Char('x') => app.toasts.dismiss_all(),

        KeyCode::Tab => {
            app.focus = match app.focus {
                Pane::Machines => Pane::Queue,
                Pane::Queue => Pane::Machines,
            };
        }

        KeyCode::Up | KeyCode::Char('k') => app.focused_view_mut().move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.focused_view_mut().move_down(),

        _ => {}
    }
}
