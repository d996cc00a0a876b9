use std::path::Path;

use anyhow::Context;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::db::{connect, ensure_category, ensure_schema};
use crate::trivia::{NewAnswer, NewQuestion};

const REQUIRED_FIELDS: [&str; 4] = ["category", "question", "difficulty", "options"];

/// Stores generated questions and returns how many question rows were added.
///
/// The whole call runs in one transaction. Any storage error rolls it back,
/// is logged, and yields 0.
#[instrument(level = "info", skip(records), fields(records = records.len(), db = %db_path.display()))]
pub async fn ingest_questions(records: &[Value], db_path: &Path) -> usize {
    match try_ingest(records, db_path).await {
        Ok(added) => {
            info!(added, "Successfully added questions to database");
            added
        }
        Err(e) => {
            error!(error = ?e, "Error adding questions to database");
            0
        }
    }
}

async fn try_ingest(records: &[Value], db_path: &Path) -> anyhow::Result<usize> {
    let pool = connect(db_path).await?;
    let result = write_records(&pool, records).await;
    pool.close().await;
    result
}

async fn write_records(pool: &sqlx::SqlitePool, records: &[Value]) -> anyhow::Result<usize> {
    let mut tx = pool
        .begin()
        .await
        .context("Failed to start ingestion transaction")?;

    ensure_schema(&mut *tx).await?;
    debug!("Database tables created/verified");

    let mut added = 0;
    for (i, record) in records.iter().enumerate() {
        let Some((question, options)) = validate_record(i + 1, record) else {
            continue;
        };

        let category_id = ensure_category(&mut *tx, &question.category).await?;
        let question_id = question.insert(&mut *tx, category_id).await?;
        debug!(question = i + 1, question_id, category_id, "Inserted question");

        let mut stored = 0;
        let mut correct = 0;
        for (j, option) in options.iter().enumerate() {
            let Some(answer) = validate_option(option) else {
                warn!(question = i + 1, option = j + 1, "Option missing required fields");
                continue;
            };
            answer.insert(&mut *tx, question_id).await?;
            stored += 1;
            if answer.is_correct {
                correct += 1;
            }
        }
        debug!(question = i + 1, options = stored, correct, "Inserted answers");

        added += 1;
    }

    tx.commit()
        .await
        .context("Failed to commit ingested questions")?;

    Ok(added)
}

/// Checks the required top-level fields. A record with any field absent or
/// of the wrong JSON type is skipped as a whole.
fn validate_record(index: usize, record: &Value) -> Option<(NewQuestion, &[Value])> {
    let Some(fields) = record.as_object() else {
        error!(question = index, "Question is not a JSON object");
        return None;
    };

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !fields.contains_key(**f)) {
        error!(question = index, field = *missing, "Question missing required field");
        return None;
    }

    let category = fields["category"].as_str();
    let text = fields["question"].as_str();
    let difficulty = fields["difficulty"].as_str();
    let options = fields["options"].as_array();

    match (category, text, difficulty, options) {
        (Some(category), Some(text), Some(difficulty), Some(options)) => Some((
            NewQuestion {
                text: text.to_string(),
                category: category.to_string(),
                difficulty: difficulty.to_string(),
            },
            options.as_slice(),
        )),
        _ => {
            error!(question = index, "Question has a field of the wrong type");
            None
        }
    }
}

fn validate_option(option: &Value) -> Option<NewAnswer> {
    let text = option.get("text")?.as_str()?;
    let is_correct = option.get("isCorrect")?.as_bool()?;
    Some(NewAnswer {
        text: text.to_string(),
        is_correct,
    })
}
