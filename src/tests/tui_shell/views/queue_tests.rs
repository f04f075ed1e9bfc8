use super::*;
use crate::test_support::item;

fn text(view: &QueueView) -> Vec<String> {
    view.lines()
        .iter()
        .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}

#[test]
fn refresh_projects_with_the_active_filter() {
    let mut view = QueueView::default();
    let queue = vec![item("Bo", "A", 3), item("Cy", "B", 1), item("Di", "a", 2)];
    view.refresh(&queue, &WingFilter::from("A"));

    assert_eq!(view.title(), "Queue 2/3 wing=a");
    assert_eq!(
        text(&view),
        vec![
            "Di",
            "  Wing: a • Duration: 60s • Seq: 2",
            "Bo",
            "  Wing: A • Duration: 60s • Seq: 3",
        ]
    );
}

#[test]
fn empty_projection_shows_the_filter_message() {
    let mut view = QueueView::default();
    view.refresh(&[item("Cy", "B", 1)], &WingFilter::from("north"));
    assert_eq!(text(&view), vec!["No waiting users in wing \"north\"."]);

    view.refresh(&[], &WingFilter::none());
    assert_eq!(view.title(), "Queue 0");
    assert_eq!(text(&view), vec!["No waiting users."]);
}
