use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::booking::BookingForm;
use crate::queue_view::WingFilter;

use super::input::Input;
use super::App;

pub(super) const BOOKING_FIELDS: [&str; 3] = ["Name", "Wing", "Duration (s)"];

#[derive(Debug)]
pub(super) enum Modal {
    /// Wing filter prompt; prefilled with the active filter.
    Filter { input: Input },
    Booking(BookingDraft),
}

#[derive(Debug, Default)]
pub(super) struct BookingDraft {
    pub(super) fields: [Input; 3],
    pub(super) focus: usize,
}

impl BookingDraft {
    pub(super) fn form(&self) -> BookingForm {
        BookingForm::new(
            self.fields[0].buf.as_str(),
            self.fields[1].buf.as_str(),
            self.fields[2].buf.as_str(),
        )
    }

    fn focused(&mut self) -> &mut Input {
        &mut self.fields[self.focus]
    }

    fn next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    fn prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }
}

fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub(super) fn draw_modal(frame: &mut ratatui::Frame, modal: &Modal) {
    match modal {
        Modal::Filter { input } => {
            let box_area = centered(frame.area(), 50, 5);
            frame.render_widget(Clear, box_area);
            let block = Block::default()
                .borders(Borders::ALL)
                .title("Filter by wing (Enter: apply, Esc: cancel)");
            let inner = block.inner(box_area);
            frame.render_widget(block, box_area);

            let prompt = "wing: ";
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(prompt, Style::default().fg(Color::Yellow)),
                    Span::raw(input.buf.as_str()),
                ])),
                inner,
            );
            frame.set_cursor_position((inner.x + prompt.len() as u16 + input.cursor as u16, inner.y));
        }

        Modal::Booking(draft) => {
            let box_area = centered(frame.area(), 56, 13);
            frame.render_widget(Clear, box_area);
            let block = Block::default()
                .borders(Borders::ALL)
                .title("Book a machine (Tab: next field, Enter: submit, Esc: close)");
            let inner = block.inner(box_area);
            frame.render_widget(block, box_area);

            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Min(0),
                ])
                .split(inner);

            for (i, label) in BOOKING_FIELDS.iter().enumerate() {
                let style = if i == draft.focus {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                frame.render_widget(
                    Paragraph::new(draft.fields[i].buf.as_str()).block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(Span::styled(*label, style)),
                    ),
                    parts[i],
                );
            }

            let focused = &parts[draft.focus];
            frame.set_cursor_position((
                focused.x + 1 + draft.fields[draft.focus].cursor as u16,
                focused.y + 1,
            ));
        }
    }
}

pub(super) fn handle_modal_key(app: &mut App, key: KeyEvent) {
    enum ModalAction {
        None,
        Close,
        ApplyFilter(String),
        SubmitBooking(BookingForm),
    }

    let action = {
        let Some(modal) = app.modal.as_mut() else {
            return;
        };

        match modal {
            Modal::Filter { input } => match key.code {
                KeyCode::Esc => ModalAction::Close,
                KeyCode::Enter => ModalAction::ApplyFilter(input.buf.clone()),
                _ => {
                    edit_input(input, key);
                    ModalAction::None
                }
            },

            Modal::Booking(draft) => match key.code {
                KeyCode::Esc => ModalAction::Close,
                KeyCode::Enter => ModalAction::SubmitBooking(draft.form()),
                KeyCode::Tab | KeyCode::Down => {
                    draft.next();
                    ModalAction::None
                }
                KeyCode::BackTab | KeyCode::Up => {
                    draft.prev();
                    ModalAction::None
                }
                _ => {
                    edit_input(draft.focused(), key);
                    ModalAction::None
                }
            },
        }
    };

    match action {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::ApplyFilter(raw) => {
            app.modal = None;
            app.set_filter(WingFilter::new(Some(&raw)));
        }
        ModalAction::SubmitBooking(form) => {
            // Invalid forms keep the modal open so the user can fix them.
            match form.validate() {
                Ok(_) => {
                    app.modal = None;
                    app.set_status("Submitting booking…", false);
                    app.poller.submit_booking(form);
                }
                Err(err) => app.set_status(err.user_message(), true),
            }
        }
    }
}

fn edit_input(input: &mut Input, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => input.clear(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert_char(c),
        _ => {}
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/modal_tests.rs"]
mod tests;
