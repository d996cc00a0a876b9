/// Generates Smart10-style trivia questions with Gemini and stores them in SQLite.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the SQLite database file.
    #[arg(long, global = true, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// The command to execute. If no command is given, help is shown.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generates questions for one category and difficulty.
    #[command(name = "generate", alias = "g")]
    Generate {
        /// Topic category.
        #[arg(value_parser = CATEGORIES)]
        category: String,
        /// Difficulty label.
        #[arg(value_parser = DIFFICULTIES)]
        difficulty: String,
        /// Number of questions to request (1-20).
        #[arg(value_parser = clap::value_parser!(u8).range(1..=MAX_COUNT as i64), default_value_t = DEFAULT_COUNT)]
        count: u8,
    },

    /// Walks the batch list of categories and difficulties.
    Batch {
        /// TOML file replacing the built-in batch list.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Shows how many questions and answers are stored per category.
    Summary {
        /// Also list every stored question with its answers.
        #[arg(long, short)]
        long: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- Parse CLI commands ---
    let cli = Cli::parse();

    telemetry::init_tracing(Path::new(DEFAULT_LOG_FILE))?;
    info!(args = ?std::env::args().collect::<Vec<_>>(), "Starting sport10-questions");

    let Some(command) = cli.command else {
        // If no command was given, print help.
        Cli::parse_from(["", "--help"]);
        return Ok(());
    };

    match command {
        Commands::Generate {
            category,
            difficulty,
            count,
        } => run_generate(&cli.db, &category, &difficulty, count).await,
        Commands::Batch { config } => {
            let config = match config {
                Some(path) => BatchConfig::load(&path)?,
                None => BatchConfig::default(),
            };
            let client = credentialed_client()?;
            let report = run_batch(&client, &config, &cli.db).await;
            println!(
                "\n🎉 Batch generation complete! Total questions added: {}",
                report.total_added
            );
            if !report.failed.is_empty() {
                println!("Failed combinations: {}", report.failed.len());
                for (category, difficulty) in &report.failed {
                    println!("  - {} ({})", category, difficulty);
                }
            }
            Ok(())
        }
        Commands::Summary { long } => print_summary(&cli.db, long).await,
    }
}

/// Builds the Gemini client, reporting a missing key before any network call.
fn credentialed_client() -> anyhow::Result<GeminiClient> {
    match GeminiClient::from_env() {
        Ok(client) => {
            info!(model = client.model(), "Using model");
            Ok(client)
        }
        Err(e) => {
            error!(error = %e, "Missing credential");
            eprintln!("Please set the {} environment variable", API_KEY_VAR);
            Err(e.into())
        }
    }
}

async fn run_generate(db: &Path, category: &str, difficulty: &str, count: u8) -> anyhow::Result<()> {
    info!(%category, %difficulty, count, "All input validation passed");
    let client = credentialed_client()?;

    println!("Generating {} {} questions for {}...", count, difficulty, category);
    let records = generate_questions(&client, category, difficulty, count)
        .await
        .context("Failed to generate questions")?;
    if records.is_empty() {
        bail!("Invalid response format from AI: no questions returned");
    }
    info!(questions = records.len(), "Generated questions");

    println!("Adding questions to database...");
    let added = ingest_questions(&records, db).await;
    if added == 0 {
        bail!("Failed to add questions to database");
    }

    println!("Successfully generated and added {} questions!", added);
    Ok(())
}

async fn print_summary(db: &Path, long: bool) -> anyhow::Result<()> {
    println!("\n--- Stored Questions ---");
    if !db.exists() {
        println!("No questions found in the database. Use the 'generate' or 'batch' command to populate it.");
        return Ok(());
    }

    let pool = connect(db).await?;
    let result = print_stored(&pool, long).await;
    pool.close().await;
    result
}

async fn print_stored(pool: &SqlitePool, long: bool) -> anyhow::Result<()> {
    let rows = if has_schema(pool).await? {
        fetch_summary(pool).await?
    } else {
        Vec::new()
    };
    if rows.is_empty() {
        println!("No questions found in the database. Use the 'generate' or 'batch' command to populate it.");
        return Ok(());
    }

    let mut last_category: Option<&str> = None;
    let mut total_questions = 0;
    for row in &rows {
        if last_category != Some(row.category.as_str()) {
            println!("\n{}", row.category);
            last_category = Some(row.category.as_str());
        }
        println!(
            "  - {:<8} Questions: {:<4} Answers: {:<5} Correct: {}",
            row.difficulty, row.questions, row.answers, row.correct_answers
        );
        total_questions += row.questions;
    }
    println!("\nTotal questions: {}", total_questions);

    if long {
        let categories: HashMap<i64, String> = fetch_categories(pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
        println!("\n--- All Questions ---");
        for question in fetch_questions(pool).await? {
            let category = categories
                .get(&question.category_id)
                .map(String::as_str)
                .unwrap_or("Unknown");
            println!(
                "\n#{} {} [{} / {}]",
                question.id, question.text, category, question.difficulty
            );
            for answer in fetch_answers_for_question(pool, question.id).await? {
                let mark = if answer.is_correct { "✓" } else { " " };
                println!("    [{}] {}", mark, answer.text);
            }
        }
    }
    Ok(())
}

use anyhow::{Context, bail};
use clap::Parser;
use clap::Subcommand;
use sport10_questions::batch::run_batch;
use sport10_questions::config::{
    API_KEY_VAR, BatchConfig, CATEGORIES, DEFAULT_COUNT, DEFAULT_DB_PATH, DEFAULT_LOG_FILE,
    DIFFICULTIES, MAX_COUNT,
};
use sport10_questions::db::{
    connect, fetch_answers_for_question, fetch_categories, fetch_questions, fetch_summary,
    has_schema,
};
use sport10_questions::gemini::GeminiClient;
use sport10_questions::ingest::ingest_questions;
use sport10_questions::questions::generate_questions;
use sport10_questions::telemetry;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{error, info};
