use std::time::Duration;

use uspy_model::{GradeStats, SubjectReview};
use uspy_view::{
    ChartPanel, GradesState, GraphPanel, PageBody, RelationsState, SubjectDetailView,
    SubjectLoadError, SubjectState, fetch_all,
};

use crate::common::{self, FakeApi, key, subject};

#[tokio::test]
async fn test_load_anonymous() {
    let api = FakeApi::new();
    api.with_subject(subject("SCC0218", 10, 7))
        .with_relations("SCC0218", &["SCC0216"], &["SCC0261"]);

    let mut view = SubjectDetailView::new(key("SCC0218"));
    view.load(&*api).await;

    assert!(!view.is_loading());
    assert!(matches!(view.subject(), SubjectState::Ready(s) if s.code == "SCC0218"));
    assert!(!view.can_evaluate(), "Anonymous users cannot review");
    assert_eq!(view.grades(), &GradesState::LoginRequired);
    assert_eq!(view.user_grade(), None);
    assert!(matches!(view.relations(), RelationsState::Ready(_)));

    let PageBody::Content(page) = view.page().unwrap() else {
        panic!("expected content");
    };
    assert_eq!(page.evaluation.header, "SOBRE A DISCIPLINA");
    assert!(matches!(page.chart, ChartPanel::LoginPrompt { .. }));
    let GraphPanel::Graph(graph) = page.graph else {
        panic!("expected a graph");
    };
    assert_eq!(graph.edges().len(), 2);
    assert_eq!(graph.card_height(), 80);
}

#[tokio::test]
async fn test_load_logged_in() {
    let api = FakeApi::new();
    api.logged_in()
        .with_subject(subject("SCC0218", 10, 7))
        .with_review("SCC0218", SubjectReview::new(true))
        .with_grades(
            "SCC0218",
            GradeStats {
                grades: [("5.0".to_string(), 3), ("7.5".to_string(), 5)].into(),
                average: 6.56,
                approval: 0.8,
            },
        )
        .with_user_grade("SCC0218", 8.0);

    let mut view = SubjectDetailView::new(key("SCC0218"));
    view.load(&*api).await;

    assert!(view.can_evaluate());
    assert_eq!(view.review(), Some(&SubjectReview::new(true)));
    assert_eq!(view.user_grade(), Some(8.0));

    let PageBody::Content(page) = view.page().unwrap() else {
        panic!("expected content");
    };
    let ChartPanel::Chart(chart) = page.chart else {
        panic!("expected a chart");
    };
    assert_eq!(chart.bars.len(), 2);
    assert_eq!(chart.your_grade_text.as_deref(), Some("Sua nota: 8.0"));
}

#[tokio::test]
async fn test_load_missing_subject() {
    let api = FakeApi::new();

    let mut view = SubjectDetailView::new(key("XXX0000"));
    view.load(&*api).await;

    assert_eq!(view.subject(), &SubjectState::Failed(SubjectLoadError::NotFound));
    assert_eq!(
        view.page().unwrap(),
        PageBody::Message("Não foi possível encontrar essa disciplina".to_string())
    );
}

#[tokio::test]
async fn test_relations_failure_shows_empty_graph() {
    let api = FakeApi::new();
    api.with_subject(subject("SCC0218", 0, 0));

    let mut view = SubjectDetailView::new(key("SCC0218"));
    view.load(&*api).await;

    assert_eq!(view.relations(), &RelationsState::Unavailable);
    let PageBody::Content(page) = view.page().unwrap() else {
        panic!("expected content");
    };
    assert_eq!(
        page.graph,
        GraphPanel::Empty {
            message: "Sem requerimentos ou trancamentos"
        }
    );
}

#[tokio::test]
async fn test_spawn_load_discards_slow_previous_subject() {
    let api = FakeApi::new();
    api.with_subject(subject("SLOW001", 1, 1))
        .with_subject(subject("FAST001", 2, 0))
        .with_delay("SLOW001", Duration::from_millis(150));

    let mut view = SubjectDetailView::new(key("SLOW001"));
    let mut slow = view.spawn_load(api.clone());

    view.navigate(key("FAST001"));
    let mut fast = view.spawn_load(api.clone());

    while let Some(update) = fast.recv().await {
        assert!(view.apply(update));
    }
    assert_eq!(common::stats(&view).total, 2);

    // The slow responses arrive after the view moved on
    let mut discarded = 0;
    while let Some(update) = slow.recv().await {
        assert!(!view.apply(update), "Stale update was accepted");
        discarded += 1;
    }

    assert_eq!(discarded, 5);
    assert!(matches!(view.subject(), SubjectState::Ready(s) if s.code == "FAST001"));
}

#[tokio::test]
async fn test_updates_for_previous_generation_of_same_subject_are_discarded() {
    let api = FakeApi::new();
    api.with_subject(subject("SCC0218", 4, 4));

    let mut view = SubjectDetailView::new(key("SCC0218"));
    let old_ticket = view.ticket();
    let updates = fetch_all(&*api, &old_ticket).await;

    view.navigate(key("SCC0218"));
    assert_eq!(view.apply_all(updates), 0);
    assert!(view.is_loading());
}
