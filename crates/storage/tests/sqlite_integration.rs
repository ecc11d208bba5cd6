use chrono::Duration;
use quiz_core::model::{Level, QuestionFilter, QuestionPayload, UserId};
use quiz_core::time::fixed_now;
use storage::repository::{
    AttemptRepository, NewAttemptRecord, NewUserRecord, QuestionRepository, StorageError,
    UserRepository,
};
use storage::seed::seed_questions_if_empty;
use storage::sqlite::SqliteRepository;

async fn seeded_repo(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    seed_questions_if_empty(&repo).await.expect("seed");
    repo
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let repo = seeded_repo("memdb_seed").await;
    assert_eq!(repo.count_questions().await.unwrap(), 6);

    let again = seed_questions_if_empty(&repo).await.unwrap();
    assert_eq!(again, 0);
    assert_eq!(repo.count_questions().await.unwrap(), 6);
}

#[tokio::test]
async fn search_returns_newest_first_with_metadata() {
    let repo = seeded_repo("memdb_search").await;

    let page = repo
        .search_questions(&QuestionFilter::default(), 1, 8)
        .await
        .unwrap();
    assert_eq!(page.total_items, 6);
    assert_eq!(page.total_pages, 1);
    assert!(!page.has_next());
    assert!(!page.has_prev());
    // Seeded in order; descending id puts the last sample first.
    assert_eq!(page.items[0].title, "Backend: 201 for POST");
    assert_eq!(page.items[5].title, "Two Sum (Array)");
}

#[tokio::test]
async fn filters_narrow_and_compose() {
    let repo = seeded_repo("memdb_filters").await;

    let by_role = QuestionFilter {
        role: Some("Data Analyst".to_string()),
        ..QuestionFilter::default()
    };
    let page = repo.search_questions(&by_role, 1, 8).await.unwrap();
    assert_eq!(page.total_items, 2);
    assert!(page.items.iter().all(|q| q.role == "Data Analyst"));

    let composed = QuestionFilter {
        role: Some("Data Analyst".to_string()),
        level: Some(Level::Intermediate),
        ..QuestionFilter::default()
    };
    let page = repo.search_questions(&composed, 1, 8).await.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].title, "SQL: Top N per group");
}

#[tokio::test]
async fn term_search_is_case_insensitive() {
    let repo = seeded_repo("memdb_term").await;

    let filter = QuestionFilter {
        term: Some("sql".to_string()),
        ..QuestionFilter::default()
    };
    let page = repo.search_questions(&filter, 1, 8).await.unwrap();
    assert_eq!(page.total_items, 2);
    assert!(page.items.iter().all(|q| q.title.contains("SQL")));
}

#[tokio::test]
async fn term_wildcards_match_literally() {
    let repo = seeded_repo("memdb_wildcards").await;

    // "_" would match any single character if passed through to LIKE raw;
    // no seeded title or body contains a literal underscore.
    let filter = QuestionFilter {
        term: Some("_".to_string()),
        ..QuestionFilter::default()
    };
    let page = repo.search_questions(&filter, 1, 8).await.unwrap();
    assert_eq!(page.total_items, 0);

    let filter = QuestionFilter {
        term: Some("%".to_string()),
        ..QuestionFilter::default()
    };
    let page = repo.search_questions(&filter, 1, 8).await.unwrap();
    assert_eq!(page.total_items, 0);
}

#[tokio::test]
async fn unmatched_filter_yields_empty_page_not_error() {
    let repo = seeded_repo("memdb_unmatched").await;

    let filter = QuestionFilter {
        role: Some("Mobile".to_string()),
        ..QuestionFilter::default()
    };
    let page = repo.search_questions(&filter, 1, 8).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 0);
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn page_beyond_end_is_empty_with_metadata() {
    let repo = seeded_repo("memdb_beyond").await;

    let page = repo
        .search_questions(&QuestionFilter::default(), 3, 8)
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 6);
    assert_eq!(page.total_pages, 1);
    assert!(!page.has_next());
}

#[tokio::test]
async fn question_payloads_roundtrip() {
    let repo = seeded_repo("memdb_payload").await;

    let filter = QuestionFilter {
        term: Some("two sum".to_string()),
        ..QuestionFilter::default()
    };
    let page = repo.search_questions(&filter, 1, 8).await.unwrap();
    assert_eq!(page.items.len(), 1);
    let question = &page.items[0];
    match &question.payload {
        QuestionPayload::MultipleChoice { choices, correct } => {
            assert_eq!(correct.as_str(), "B");
            assert_eq!(choices.b, "Use hash map to store complements O(n)");
        }
        QuestionPayload::ShortAnswer { .. } => panic!("expected mcq payload"),
    }

    let fetched = repo.get_question(question.id).await.unwrap();
    assert_eq!(fetched.as_ref(), Some(question));
}

#[tokio::test]
async fn duplicate_email_maps_to_conflict() {
    let repo = seeded_repo("memdb_users").await;

    let record = NewUserRecord {
        email: "ada@example.com".to_string(),
        password_hash: "hash".to_string(),
        created_at: fixed_now(),
    };
    let id = repo.insert_user(record.clone()).await.unwrap();
    let fetched = repo.get_user(id).await.unwrap().unwrap();
    assert_eq!(fetched.email, "ada@example.com");

    let err = repo.insert_user(record).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict));
}

#[tokio::test]
async fn attempts_append_count_and_order() {
    let repo = seeded_repo("memdb_attempts").await;

    let user_id = repo
        .insert_user(NewUserRecord {
            email: "grace@example.com".to_string(),
            password_hash: "hash".to_string(),
            created_at: fixed_now(),
        })
        .await
        .unwrap();

    let page = repo
        .search_questions(&QuestionFilter::default(), 1, 8)
        .await
        .unwrap();
    let question_id = page.items[0].id;

    let now = fixed_now();
    for (i, correct) in [(0, true), (1, false), (2, true)] {
        repo.append_attempt(&NewAttemptRecord {
            user_id,
            question_id,
            is_correct: correct,
            submitted: format!("answer {i}"),
            created_at: now + Duration::minutes(i),
        })
        .await
        .unwrap();
    }

    assert_eq!(repo.count_attempts(user_id).await.unwrap(), 3);
    assert_eq!(repo.count_correct_attempts(user_id).await.unwrap(), 2);

    let recent = repo.recent_attempts(user_id, 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].submitted, "answer 2");
    assert_eq!(recent[1].submitted, "answer 1");

    let other = repo
        .count_attempts(UserId::new(user_id.value() + 1))
        .await
        .unwrap();
    assert_eq!(other, 0);
}
