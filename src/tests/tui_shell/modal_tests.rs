use std::sync::Arc;
use std::time::Duration;

use crate::booking::ACCEPTED_MESSAGE;
use crate::config::ClientConfig;
use crate::error::BookingError;
use crate::model::CompletionEvent;
use crate::notify::NotificationSink;
use crate::poll::Completion;
use crate::test_support::FakeSource;

use super::*;

const WAIT: Duration = Duration::from_secs(5);

struct Quiet;

impl NotificationSink for Quiet {
    fn notify(&mut self, _event: &CompletionEvent) {}
}

fn app_with(source: FakeSource) -> (App, Arc<FakeSource>) {
    let source = Arc::new(source);
    let app = App::new(ClientConfig::default(), source.clone(), Box::new(Quiet));
    (app, source)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        handle_modal_key(app, key(KeyCode::Char(c)));
    }
}

fn fill_booking(app: &mut App, name: &str, wing: &str, duration: &str) {
    app.modal = Some(Modal::Booking(BookingDraft::default()));
    type_text(app, name);
    handle_modal_key(app, key(KeyCode::Tab));
    type_text(app, wing);
    handle_modal_key(app, key(KeyCode::Tab));
    type_text(app, duration);
}

#[test]
fn booking_fields_cycle_with_tab_and_backtab() {
    let mut draft = BookingDraft::default();
    assert_eq!(draft.focus, 0);
    draft.next();
    draft.next();
    draft.next();
    assert_eq!(draft.focus, 0);
    draft.prev();
    assert_eq!(draft.focus, BOOKING_FIELDS.len() - 1);
}

#[test]
fn draft_form_reads_fields_in_order() {
    let (mut app, _) = app_with(FakeSource::default());
    fill_booking(&mut app, "Ann", "B", "90");
    let Some(Modal::Booking(draft)) = &app.modal else {
        panic!("booking modal closed");
    };
    let req = draft.form().validate().map(|r| (r.name, r.wing, r.duration_secs));
    assert_eq!(req.ok(), Some(("Ann".to_string(), "B".to_string(), 90)));
}

#[test]
fn incomplete_booking_stays_open_and_sends_nothing() {
    let (mut app, source) = app_with(FakeSource::default());
    fill_booking(&mut app, "Ann", "", "60");
    handle_modal_key(&mut app, key(KeyCode::Enter));

    assert!(matches!(app.modal, Some(Modal::Booking(_))));
    let status = app.status.clone().map(|s| (s.text, s.error));
    assert_eq!(status, Some(("Please fill all fields.".to_string(), true)));
    assert!(app.poller.try_next().is_none());
    assert_eq!(source.network_calls(), 0);
}

#[test]
fn valid_booking_closes_modal_and_reports_acceptance() {
    let (mut app, source) = app_with(FakeSource::default());
    fill_booking(&mut app, "Ann", "A", "60");
    handle_modal_key(&mut app, key(KeyCode::Enter));

    assert!(app.modal.is_none());
    assert_eq!(
        app.status.as_ref().map(|s| s.text.as_str()),
        Some("Submitting booking…")
    );

    match app.poller.next_timeout(WAIT) {
        Some(done @ Completion::Booking(_)) => app.apply_completion(done),
        other => panic!("unexpected completion: {:?}", other),
    }
    assert_eq!(
        app.status.as_ref().map(|s| s.text.as_str()),
        Some(ACCEPTED_MESSAGE)
    );
    assert_eq!(
        source
            .booking_calls
            .load(std::sync::atomic::Ordering::SeqCst),
        1
    );
}

#[test]
fn rejected_booking_shows_server_reason() {
    let (mut app, _) = app_with(FakeSource {
        booking_result: Some(BookingError::Rejected("Wing is full".to_string())),
        ..FakeSource::default()
    });
    fill_booking(&mut app, "Ann", "A", "60");
    handle_modal_key(&mut app, key(KeyCode::Enter));

    match app.poller.next_timeout(WAIT) {
        Some(done @ Completion::Booking(_)) => app.apply_completion(done),
        other => panic!("unexpected completion: {:?}", other),
    }
    let status = app.status.clone().map(|s| (s.text, s.error));
    assert_eq!(status, Some(("❌ Wing is full".to_string(), true)));
}

#[test]
fn filter_prompt_edits_and_cancels() {
    let (mut app, _) = app_with(FakeSource::default());
    app.modal = Some(Modal::Filter {
        input: Input::default(),
    });
    type_text(&mut app, "Bx");
    handle_modal_key(&mut app, key(KeyCode::Backspace));
    match &app.modal {
        Some(Modal::Filter { input }) => assert_eq!(input.buf, "B"),
        other => panic!("unexpected modal: {:?}", other),
    }
    handle_modal_key(&mut app, key(KeyCode::Esc));
    assert!(app.modal.is_none());
    assert!(!app.filter.is_active());
}

#[test]
fn blank_filter_clears_it() {
    let (mut app, _) = app_with(FakeSource::default());
    app.set_filter(crate::queue_view::WingFilter::from("A"));
    app.modal = Some(Modal::Filter {
        input: Input::with_text("   "),
    });
    handle_modal_key(&mut app, key(KeyCode::Enter));
    assert!(!app.filter.is_active());
}

#[test]
fn centered_box_is_clamped_to_the_area() {
    let area = Rect::new(0, 0, 20, 4);
    let r = centered(area, 50, 5);
    assert_eq!((r.width, r.height), (20, 4));
    let r = centered(Rect::new(0, 0, 100, 40), 50, 5);
    assert_eq!((r.x, r.y), (25, 17));
}
