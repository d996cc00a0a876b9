mod common;

use common::{count_rows, open, options, question, temp_db_path};
use serde_json::json;
use sport10_questions::db::{
    fetch_answers_for_question, fetch_categories, fetch_questions, fetch_summary, has_schema,
};
use sport10_questions::ingest::ingest_questions;

#[tokio::test]
async fn well_formed_response_creates_linked_rows() {
    let path = temp_db_path();
    let records = vec![
        question("Programming Languages", "Technology", "Easy", 3),
        question("Operating Systems", "Technology", "Easy", 5),
    ];

    let added = ingest_questions(&records, &path).await;
    assert_eq!(added, 2);

    let pool = open(&path).await;
    assert_eq!(count_rows(&pool, "categories").await, 1);
    assert_eq!(count_rows(&pool, "questions").await, 2);
    assert_eq!(count_rows(&pool, "answers").await, 20);

    let questions = fetch_questions(&pool).await.unwrap();
    for (q, expected_correct) in questions.iter().zip([3, 5]) {
        let answers = fetch_answers_for_question(&pool, q.id).await.unwrap();
        assert_eq!(answers.len(), 10);
        assert!(answers.iter().all(|a| a.question_id == q.id));
        assert_eq!(answers.iter().filter(|a| a.is_correct).count(), expected_correct);
    }
}

#[tokio::test]
async fn technology_easy_scenario() {
    let path = temp_db_path();
    let records = vec![question("Programming Languages", "Technology", "Easy", 3)];

    assert_eq!(ingest_questions(&records, &path).await, 1);

    let pool = open(&path).await;
    let categories = fetch_categories(&pool).await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Technology");

    let questions = fetch_questions(&pool).await.unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].text, "Programming Languages");
    assert_eq!(questions[0].difficulty, "Easy");
    assert_eq!(questions[0].category_id, categories[0].id);

    let answers = fetch_answers_for_question(&pool, questions[0].id).await.unwrap();
    assert_eq!(answers.len(), 10);
    assert_eq!(answers.iter().filter(|a| a.is_correct).count(), 3);
}

#[tokio::test]
async fn category_is_reused_across_calls() {
    let path = temp_db_path();

    let first = ingest_questions(&[question("Ballon d'Or Winners", "Sports", "Hard", 4)], &path).await;
    let second = ingest_questions(&[question("Golden Boot Winners", "Sports", "Medium", 2)], &path).await;
    assert_eq!((first, second), (1, 1));

    let pool = open(&path).await;
    assert_eq!(count_rows(&pool, "categories").await, 1);

    let questions = fetch_questions(&pool).await.unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].category_id, questions[1].category_id);
}

#[tokio::test]
async fn category_match_is_case_sensitive() {
    let path = temp_db_path();
    let records = vec![
        question("Q1", "Music", "Easy", 1),
        question("Q2", "music", "Easy", 1),
    ];

    assert_eq!(ingest_questions(&records, &path).await, 2);

    let pool = open(&path).await;
    assert_eq!(count_rows(&pool, "categories").await, 2);
}

#[tokio::test]
async fn rerun_duplicates_questions() {
    let path = temp_db_path();
    let records = vec![question("Chess Openings", "Board Games", "Medium", 2)];

    ingest_questions(&records, &path).await;
    ingest_questions(&records, &path).await;

    let pool = open(&path).await;
    assert_eq!(count_rows(&pool, "categories").await, 1);
    assert_eq!(count_rows(&pool, "questions").await, 2);
    assert_eq!(count_rows(&pool, "answers").await, 20);
}

#[tokio::test]
async fn record_without_options_does_not_stop_the_batch() {
    let path = temp_db_path();
    let records = vec![
        json!({"question": "No Options", "category": "Science", "difficulty": "Easy"}),
        question("Noble Gases", "Science", "Easy", 6),
        json!("garbage"),
        question("Planets", "Science", "Medium", 8),
    ];

    assert_eq!(ingest_questions(&records, &path).await, 2);

    let pool = open(&path).await;
    let questions = fetch_questions(&pool).await.unwrap();
    let texts: Vec<_> = questions.iter().map(|q| q.text.as_str()).collect();
    assert_eq!(texts, vec!["Noble Gases", "Planets"]);
    assert_eq!(count_rows(&pool, "answers").await, 20);
}

#[tokio::test]
async fn malformed_options_are_skipped_individually() {
    let path = temp_db_path();
    let mut opts = options(2);
    opts[3] = json!({"text": "No flag"});
    opts[7] = json!({"isCorrect": true});
    let records = vec![json!({
        "question": "Rivers of Europe",
        "options": opts,
        "category": "Geography",
        "difficulty": "Medium"
    })];

    assert_eq!(ingest_questions(&records, &path).await, 1);

    let pool = open(&path).await;
    assert_eq!(count_rows(&pool, "questions").await, 1);
    assert_eq!(count_rows(&pool, "answers").await, 8);
}

#[tokio::test]
async fn empty_options_still_store_the_question() {
    let path = temp_db_path();
    let records = vec![json!({
        "question": "Impressionist Painters",
        "options": [],
        "category": "Art",
        "difficulty": "Hard"
    })];

    assert_eq!(ingest_questions(&records, &path).await, 1);

    let pool = open(&path).await;
    assert_eq!(count_rows(&pool, "questions").await, 1);
    assert_eq!(count_rows(&pool, "answers").await, 0);
}

#[tokio::test]
async fn empty_batch_creates_schema_only() {
    let path = temp_db_path();

    let pool = open(&path).await;
    assert!(!has_schema(&pool).await.unwrap());
    pool.close().await;

    assert_eq!(ingest_questions(&[], &path).await, 0);

    let pool = open(&path).await;
    assert!(has_schema(&pool).await.unwrap());
    assert_eq!(count_rows(&pool, "categories").await, 0);
    assert_eq!(count_rows(&pool, "questions").await, 0);
    assert_eq!(count_rows(&pool, "answers").await, 0);
}

#[tokio::test]
async fn storage_failure_yields_zero() {
    let dir = std::env::temp_dir().join(format!("sport10_missing_dir_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("nested").join("store.db");

    let added = ingest_questions(&[question("Q", "C", "Easy", 1)], &path).await;
    assert_eq!(added, 0);
    assert!(!path.exists());
}

#[tokio::test]
async fn failure_mid_batch_rolls_back_the_whole_call() {
    let path = temp_db_path();
    let pool = open(&path).await;
    sqlx::query(
        r#"
        CREATE TABLE questions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL CHECK (text <> 'boom'),
            category_id INTEGER NOT NULL,
            difficulty TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    pool.close().await;

    let records = vec![
        question("Ok Topic", "History", "Easy", 2),
        question("boom", "History", "Easy", 2),
        question("After Topic", "History", "Easy", 2),
    ];
    assert_eq!(ingest_questions(&records, &path).await, 0);

    let pool = open(&path).await;
    assert_eq!(count_rows(&pool, "questions").await, 0);
    let created: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('categories', 'answers')",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(created, 0);
}

#[tokio::test]
async fn summary_groups_by_category_and_difficulty() {
    let path = temp_db_path();
    let records = vec![
        question("Q1", "Film", "Easy", 2),
        question("Q2", "Film", "Easy", 3),
        question("Q3", "Film", "Hard", 1),
        question("Q4", "Art", "Medium", 10),
    ];
    ingest_questions(&records, &path).await;

    let pool = open(&path).await;
    let rows = fetch_summary(&pool).await.unwrap();
    let flat: Vec<_> = rows
        .iter()
        .map(|r| (r.category.as_str(), r.difficulty.as_str(), r.questions, r.answers, r.correct_answers))
        .collect();
    assert_eq!(
        flat,
        vec![
            ("Art", "Medium", 1, 10, 10),
            ("Film", "Easy", 2, 20, 5),
            ("Film", "Hard", 1, 10, 1),
        ]
    );
}
