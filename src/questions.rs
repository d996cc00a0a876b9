//! Turning raw model text into question records.
//!
//! Records stay loosely typed (`serde_json::Value`) here; field checks happen
//! during ingestion so one bad record or option never spoils the rest.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use crate::generator::{QuestionGenerator, ServiceError};
use crate::prompt::build_prompt;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON parsing error: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON array of questions")]
    NotAnArray,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("error generating questions: {0}")]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Strictly parses the model output as a JSON array. No repair is attempted.
pub fn parse_response(raw: &str) -> Result<Vec<Value>, ParseError> {
    let parsed: Value = serde_json::from_str(raw).map_err(|e| {
        error!(error = %e, raw_response = %raw, "JSON parsing error");
        ParseError::InvalidJson(e)
    })?;

    match parsed {
        Value::Array(records) => Ok(records),
        _ => {
            error!(raw_response = %raw, "Response is not a JSON array");
            Err(ParseError::NotAnArray)
        }
    }
}

/// Prompt, call the model, parse. Failures are logged here and returned.
#[instrument(level = "info", skip(generator))]
pub async fn generate_questions<G: QuestionGenerator>(
    generator: &G,
    category: &str,
    difficulty: &str,
    count: u8,
) -> Result<Vec<Value>, PipelineError> {
    info!("Starting question generation");
    let prompt = build_prompt(category, difficulty, count);
    debug!(prompt_len = prompt.len(), "Generated prompt");

    let raw = generator.generate(&prompt).await.inspect_err(|e| {
        error!(error = %e, "Error generating questions");
    })?;

    let records = parse_response(&raw)?;
    info!(questions = records.len(), "Successfully parsed JSON response");

    for (i, record) in records.iter().enumerate() {
        let options = record.get("options").and_then(Value::as_array);
        let total = options.map_or(0, Vec::len);
        let correct = options.map_or(0, |opts| {
            opts.iter()
                .filter(|o| o.get("isCorrect").and_then(Value::as_bool) == Some(true))
                .count()
        });
        debug!(question = i + 1, options = total, correct, "Generated question");
    }

    Ok(records)
}
