use std::path::Path;
use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::config::BatchConfig;
use crate::generator::QuestionGenerator;
use crate::ingest::ingest_questions;
use crate::questions::generate_questions;

/// Outcome of one pass over the batch list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Category/difficulty combinations tried.
    pub attempted: usize,
    /// Combinations that produced nothing to store.
    pub failed: Vec<(String, String)>,
    pub total_added: usize,
}

/// Walks every category × difficulty combination in order.
///
/// A failing combination is logged and recorded; the loop always moves on.
#[instrument(level = "info", skip_all, fields(combinations = config.combinations()))]
pub async fn run_batch<G: QuestionGenerator>(
    generator: &G,
    config: &BatchConfig,
    db_path: &Path,
) -> BatchReport {
    let mut report = BatchReport::default();
    let delay = Duration::from_millis(config.delay_ms);

    println!(
        "Generating questions for {} category/difficulty combinations (up to {} questions)...",
        config.combinations(),
        config.requested_questions()
    );

    for category in &config.categories {
        for difficulty in &config.difficulties {
            report.attempted += 1;
            println!(
                "\nGenerating {} {} questions for {}...",
                category.count, difficulty, category.name
            );

            match generate_questions(generator, &category.name, difficulty, category.count).await {
                Ok(records) if !records.is_empty() => {
                    let added = ingest_questions(&records, db_path).await;
                    report.total_added += added;
                    info!(category = %category.name, %difficulty, added, "Batch step finished");
                    println!("✓ Added {} questions", added);
                }
                Ok(_) => {
                    warn!(category = %category.name, %difficulty, "Model returned no questions");
                    println!(
                        "✗ Failed to generate questions for {} ({})",
                        category.name, difficulty
                    );
                    report.failed.push((category.name.clone(), difficulty.clone()));
                }
                Err(e) => {
                    error!(category = %category.name, %difficulty, error = %e, "Batch step failed");
                    println!(
                        "✗ Failed to generate questions for {} ({})",
                        category.name, difficulty
                    );
                    report.failed.push((category.name.clone(), difficulty.clone()));
                }
            }

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    info!(
        attempted = report.attempted,
        failed = report.failed.len(),
        total_added = report.total_added,
        "Batch generation complete"
    );
    report
}
