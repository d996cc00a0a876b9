#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::PathBuf;

use serde_json::{Value, json};
use sport10_questions::db::connect;
use sport10_questions::generator::{QuestionGenerator, ServiceError};
use sqlx::SqlitePool;

/// A fresh database path under the system temp dir.
pub fn temp_db_path() -> PathBuf {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "sport10_questions_test_{}_{}.db",
        std::process::id(),
        id
    ));
    // Clean up leftover file from previous runs
    let _ = std::fs::remove_file(&path);
    path
}

pub async fn open(path: &PathBuf) -> SqlitePool {
    connect(path).await.expect("failed to open test database")
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count query failed")
}

/// Ten options, the first `correct` of them flagged correct.
pub fn options(correct: usize) -> Vec<Value> {
    (0..10)
        .map(|i| json!({"text": format!("Option {}", i + 1), "isCorrect": i < correct}))
        .collect()
}

pub fn question(text: &str, category: &str, difficulty: &str, correct: usize) -> Value {
    json!({
        "question": text,
        "options": options(correct),
        "category": category,
        "difficulty": difficulty
    })
}

/// Replays queued responses in order and remembers the prompts it saw.
#[derive(Default)]
pub struct CannedGenerator {
    responses: RefCell<VecDeque<Result<String, ServiceError>>>,
    pub prompts: RefCell<Vec<String>>,
    pub calls: Cell<usize>,
}

impl CannedGenerator {
    pub fn new(responses: Vec<Result<String, ServiceError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            ..Default::default()
        }
    }

    pub fn always_ok(response: &str, times: usize) -> Self {
        Self::new((0..times).map(|_| Ok(response.to_string())).collect())
    }
}

impl QuestionGenerator for CannedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        self.calls.set(self.calls.get() + 1);
        self.prompts.borrow_mut().push(prompt.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(ServiceError::EmptyResponse))
    }
}
