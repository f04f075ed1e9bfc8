use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::event_loop::handle_key;
use super::*;
use crate::error::Unreachable;
use crate::model::{CompletionEvent, Snapshot};
use crate::poll::Health;
use crate::test_support::{FakeSource, item, machine, snap};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<Vec<CompletionEvent>>>);

impl NotificationSink for SharedSink {
    fn notify(&mut self, event: &CompletionEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

fn app_with(source: FakeSource) -> (App, Arc<FakeSource>, SharedSink) {
    let source = Arc::new(source);
    let alerts = SharedSink::default();
    let app = App::new(
        ClientConfig::default(),
        source.clone(),
        Box::new(alerts.clone()),
    );
    (app, source, alerts)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn apply_status(app: &mut App, result: Result<Snapshot, Unreachable>) {
    let ticket = app.poll.begin_tick();
    app.apply_completion(Completion::Status(ticket, result));
}

#[test]
fn applied_tick_refreshes_views_and_announces_completions() {
    let (mut app, _, alerts) = app_with(FakeSource::default());

    apply_status(&mut app, Ok(snap(vec![machine(1, true, Some("Ann"))])));
    assert_eq!(app.machines.items.len(), 1);
    assert!(app.toasts.is_empty());

    let mut next = snap(vec![machine(1, false, None)]);
    next.queue = vec![item("Bo", "A", 1)];
    apply_status(&mut app, Ok(next));

    assert!(!app.machines.items[0].busy);
    assert_eq!(app.queue.items.len(), 1);
    assert_eq!(app.toasts.len(), 1);
    let toast = app.toasts.iter().next().map(|t| t.text.clone());
    assert_eq!(
        toast.as_deref(),
        Some("Machine #1: Done! Ann, please put in clothes.")
    );
    assert_eq!(alerts.0.borrow().len(), 1);
    assert_eq!(app.poll.health(), Health::Healthy);
}

#[test]
fn older_result_arriving_late_leaves_views_alone() {
    let (mut app, _, alerts) = app_with(FakeSource::default());
    let old = app.poll.begin_tick();
    let new = app.poll.begin_tick();

    app.apply_completion(Completion::Status(
        new,
        Ok(snap(vec![machine(1, true, Some("Ann"))])),
    ));
    app.apply_completion(Completion::Status(old, Ok(snap(vec![machine(1, false, None)]))));

    assert!(app.machines.items[0].busy);
    assert!(app.poll.snapshot().machines[0].busy);
    assert!(alerts.0.borrow().is_empty());
}

#[test]
fn failed_tick_keeps_last_good_snapshot() {
    let (mut app, _, _) = app_with(FakeSource::default());
    apply_status(&mut app, Ok(snap(vec![machine(4, true, Some("Cy"))])));
    apply_status(&mut app, Err(Unreachable::new("connection refused")));

    assert_eq!(app.poll.health(), Health::Unreachable);
    assert_eq!(app.machines.items.len(), 1);
    assert_eq!(app.poll.snapshot().machines[0].id, 4);
}

#[test]
fn filter_modal_applies_wing_to_queue() {
    let (mut app, _, _) = app_with(FakeSource::default());
    let mut next = Snapshot::empty();
    next.queue = vec![item("Bo", "A", 2), item("Cy", "B", 1), item("Di", "a", 3)];
    apply_status(&mut app, Ok(next));
    assert_eq!(app.queue.items.len(), 3);

    handle_key(&mut app, key(KeyCode::Char('f')));
    assert!(matches!(app.modal, Some(Modal::Filter { .. })));
    handle_key(&mut app, key(KeyCode::Char('a')));
    handle_key(&mut app, key(KeyCode::Enter));

    assert!(app.modal.is_none());
    assert_eq!(app.filter.as_str(), Some("a"));
    let names: Vec<&str> = app.queue.items.iter().map(|q| q.name.as_str()).collect();
    assert_eq!(names, vec!["Bo", "Di"]);

    // Reopening prefills the active filter; `c` clears it.
    handle_key(&mut app, key(KeyCode::Char('f')));
    match &app.modal {
        Some(Modal::Filter { input }) => assert_eq!(input.buf, "a"),
        other => panic!("unexpected modal: {:?}", other),
    }
    handle_key(&mut app, key(KeyCode::Esc));
    handle_key(&mut app, key(KeyCode::Char('c')));
    assert!(!app.filter.is_active());
    assert_eq!(app.queue.items.len(), 3);
}

#[test]
fn booking_outcome_lands_on_the_status_line() {
    let (mut app, _, _) = app_with(FakeSource::default());

    app.apply_completion(Completion::Booking(Err(
        crate::error::BookingError::Rejected("Wing is full".to_string()),
    )));
    let status = app.status.clone().map(|s| (s.text, s.error));
    assert_eq!(status, Some(("❌ Wing is full".to_string(), true)));

    app.apply_completion(Completion::Booking(Err(Unreachable::new("timeout").into())));
    let status = app.status.clone().map(|s| s.text);
    assert_eq!(status.as_deref(), Some("❌ Failed to reach API."));
}

#[test]
fn logs_pane_loads_and_closes() {
    let (mut app, _, _) = app_with(FakeSource {
        logs: Some("one\ntwo\n".to_string()),
        ..FakeSource::default()
    });

    handle_key(&mut app, key(KeyCode::Char('l')));
    assert!(app.logs.as_ref().is_some_and(|l| l.loading));

    match app.poller.next_timeout(WAIT) {
        Some(done @ Completion::Logs(_)) => app.apply_completion(done),
        other => panic!("unexpected completion: {:?}", other),
    }
    let lines = app.logs.as_ref().map(|l| l.lines.clone());
    assert_eq!(lines, Some(vec!["one".to_string(), "two".to_string()]));

    handle_key(&mut app, key(KeyCode::Esc));
    assert!(app.logs.is_none());
    assert!(!app.quit);
}

#[test]
fn logs_arriving_after_close_are_dropped() {
    let (mut app, _, _) = app_with(FakeSource::default());
    app.apply_completion(Completion::Logs(Ok("late".to_string())));
    assert!(app.logs.is_none());
}

#[test]
fn health_probe_sets_badge() {
    let (mut app, _, _) = app_with(FakeSource::default());
    assert_eq!(app.poll.health(), Health::Unknown);
    app.start();
    match app.poller.next_timeout(WAIT) {
        Some(done @ Completion::Health(_)) => app.apply_completion(done),
        other => panic!("unexpected completion: {:?}", other),
    }
    // FakeSource::default() reports unhealthy.
    assert_eq!(app.poll.health(), Health::Unreachable);
}

#[test]
fn tab_switches_focus_and_q_quits() {
    let (mut app, _, _) = app_with(FakeSource::default());
    assert_eq!(app.focus, Pane::Machines);
    handle_key(&mut app, key(KeyCode::Tab));
    assert_eq!(app.focus, Pane::Queue);
    handle_key(&mut app, key(KeyCode::Char('q')));
    assert!(app.quit);
}

#[test]
fn ctrl_c_quits_even_from_a_modal_free_screen() {
    let (mut app, _, _) = app_with(FakeSource::default());
    handle_key(
        &mut app,
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
    );
    assert!(app.quit);
}
