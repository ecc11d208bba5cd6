use quiz_core::model::{Level, QuestionFilter};
use quiz_core::time::fixed_now;
use services::{AppServices, Clock};

#[tokio::test]
async fn register_browse_answer_dashboard_flow() {
    let app = AppServices::new_sqlite(
        "sqlite:file:memdb_practice_flow?mode=memory&cache=shared",
        Clock::fixed(fixed_now()),
    )
    .await
    .expect("bootstrap sqlite");

    // Registration establishes the identity that every later call receives
    // explicitly.
    let user_id = app
        .auth()
        .register("Grace@Example.com", "hunter2")
        .await
        .expect("register");
    let user = app
        .auth()
        .login("grace@example.com", "hunter2")
        .await
        .expect("login");
    assert_eq!(user.id, user_id);

    // Browse with a composed filter; the seeded set has one match.
    let filter = QuestionFilter {
        role: Some("SDE".to_string()),
        level: Some(Level::Beginner),
        term: Some("two sum".to_string()),
        ..QuestionFilter::default()
    };
    let page = app.questions().browse(&filter, 1).await.expect("browse");
    assert_eq!(page.total_items, 1);
    let question = &page.items[0];
    assert_eq!(question.title, "Two Sum (Array)");

    // One correct, one incorrect submission; each appends one attempt.
    let right = app
        .practice()
        .submit_answer(user_id, question.id, "B")
        .await
        .expect("submit correct");
    assert!(right.correct);
    assert!(!right.question.explanation.is_empty());

    let wrong = app
        .practice()
        .submit_answer(user_id, question.id, "A")
        .await
        .expect("submit incorrect");
    assert!(!wrong.correct);

    let summary = app.dashboard().summary(user_id).await.expect("summary");
    assert_eq!(summary.total, 2);
    assert_eq!(summary.correct, 1);
    assert_eq!(summary.accuracy, 50.0);
    assert_eq!(summary.recent.len(), 2);
}

#[tokio::test]
async fn short_answer_leniency_reaches_the_ledger() {
    let app = AppServices::new_sqlite(
        "sqlite:file:memdb_short_flow?mode=memory&cache=shared",
        Clock::fixed(fixed_now()),
    )
    .await
    .expect("bootstrap sqlite");

    let user_id = app
        .auth()
        .register("ada@example.com", "pw")
        .await
        .expect("register");

    let filter = QuestionFilter {
        term: Some("count vs count".to_string()),
        ..QuestionFilter::default()
    };
    let page = app.questions().browse(&filter, 1).await.expect("browse");
    assert_eq!(page.total_items, 1);
    let question = &page.items[0];

    // Keyword substring, not the canonical answer text.
    let outcome = app
        .practice()
        .submit_answer(user_id, question.id, "NULL values are skipped")
        .await
        .expect("submit");
    assert!(outcome.correct);

    let summary = app.dashboard().summary(user_id).await.expect("summary");
    assert_eq!(summary.total, 1);
    assert_eq!(summary.accuracy, 100.0);
    assert_eq!(summary.recent[0].submitted, "NULL values are skipped");
}
