use std::path::Path;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{FromRow, SqliteConnection};

use crate::trivia::{Answer, Category, Question};

const CREATE_CATEGORIES: &str = r#"
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE NOT NULL
    )
"#;

const CREATE_QUESTIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS questions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        text TEXT NOT NULL,
        category_id INTEGER NOT NULL,
        difficulty TEXT NOT NULL,
        FOREIGN KEY (category_id) REFERENCES categories (id)
    )
"#;

const CREATE_ANSWERS: &str = r#"
    CREATE TABLE IF NOT EXISTS answers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        question_id INTEGER NOT NULL,
        text TEXT NOT NULL,
        is_correct BOOLEAN NOT NULL,
        FOREIGN KEY (question_id) REFERENCES questions (id)
    )
"#;

/// Question and answer totals for one category/difficulty pair.
#[derive(Debug, FromRow)]
pub struct SummaryRow {
    pub category: String,
    pub difficulty: String,
    pub questions: i64,
    pub answers: i64,
    pub correct_answers: i64,
}

/// Opens (creating if needed) the store at `path` with a single connection.
///
/// Callers close the pool when done; nothing is shared between calls.
pub async fn connect(path: &Path) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database: {}", path.display()))
}

/// Creates the three tables if they are absent.
pub async fn ensure_schema(conn: &mut SqliteConnection) -> anyhow::Result<()> {
    for statement in [CREATE_CATEGORIES, CREATE_QUESTIONS, CREATE_ANSWERS] {
        sqlx::query(statement)
            .execute(&mut *conn)
            .await
            .context("Failed to create database tables")?;
    }
    Ok(())
}

/// Inserts the category if it is new and returns its id. Matching is exact
/// and case-sensitive.
pub async fn ensure_category(conn: &mut SqliteConnection, name: &str) -> anyhow::Result<i64> {
    sqlx::query("INSERT OR IGNORE INTO categories (name) VALUES (?)")
        .bind(name)
        .execute(&mut *conn)
        .await
        .with_context(|| format!("Failed to insert category: {}", name))?;

    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM categories WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .with_context(|| format!("Failed to look up category: {}", name))?
        .with_context(|| format!("Failed to get category ID for: {}", name))?;

    Ok(id)
}

/// True when all three tables are present.
pub async fn has_schema(pool: &SqlitePool) -> anyhow::Result<bool> {
    let tables = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM sqlite_master
        WHERE type = 'table' AND name IN ('categories', 'questions', 'answers')
        "#,
    )
    .fetch_one(pool)
    .await
    .context("Failed to inspect the database schema.")?;

    Ok(tables == 3)
}

pub async fn fetch_categories(pool: &SqlitePool) -> anyhow::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id ASC")
        .fetch_all(pool)
        .await
        .context("Failed to fetch categories from the database.")
}

pub async fn fetch_questions(pool: &SqlitePool) -> anyhow::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        "SELECT id, text, category_id, difficulty FROM questions ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await
    .context("Failed to fetch questions from the database.")
}

pub async fn fetch_answers_for_question(
    pool: &SqlitePool,
    question_id: i64,
) -> anyhow::Result<Vec<Answer>> {
    sqlx::query_as::<_, Answer>(
        "SELECT id, question_id, text, is_correct FROM answers WHERE question_id = ? ORDER BY id ASC",
    )
    .bind(question_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("Failed to fetch answers for question_id: {}", question_id))
}

pub async fn fetch_summary(pool: &SqlitePool) -> anyhow::Result<Vec<SummaryRow>> {
    sqlx::query_as::<_, SummaryRow>(
        r#"
        SELECT
            c.name AS category,
            q.difficulty AS difficulty,
            COUNT(DISTINCT q.id) AS questions,
            COUNT(a.id) AS answers,
            COALESCE(SUM(a.is_correct), 0) AS correct_answers
        FROM
            questions q
        JOIN
            categories c ON q.category_id = c.id
        LEFT JOIN
            answers a ON a.question_id = q.id
        GROUP BY
            c.name, q.difficulty
        ORDER BY
            c.name ASC, q.difficulty ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to fetch the question summary.")
}
