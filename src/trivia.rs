use anyhow::Context;
use sqlx::FromRow;
use sqlx::SqliteConnection;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub category_id: i64,
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub is_correct: bool,
}

/// A question that passed the required-field check and is ready to store.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub text: String,
    pub category: String,
    pub difficulty: String,
}

impl NewQuestion {
    /// Inserts the question row and returns its generated id.
    pub async fn insert(&self, conn: &mut SqliteConnection, category_id: i64) -> anyhow::Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO questions (text, category_id, difficulty)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&self.text)
        .bind(category_id)
        .bind(&self.difficulty)
        .execute(&mut *conn)
        .await
        .with_context(|| format!("Failed to insert question: {}", self.text))?;

        Ok(result.last_insert_rowid())
    }
}

#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub text: String,
    pub is_correct: bool,
}

impl NewAnswer {
    pub async fn insert(&self, conn: &mut SqliteConnection, question_id: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO answers (question_id, text, is_correct)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(question_id)
        .bind(&self.text)
        .bind(self.is_correct)
        .execute(&mut *conn)
        .await
        .with_context(|| {
            format!(
                "Failed to insert answer '{}' for question_id: {}",
                self.text, question_id
            )
        })?;

        Ok(())
    }
}
