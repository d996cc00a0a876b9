//! Runtime configuration: Gemini credentials from the environment and the
//! batch topic list (built in, or loaded from a TOML file).

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use crate::generator::ServiceError;

pub const DEFAULT_DB_PATH: &str = "./sport10.db";
pub const DEFAULT_LOG_FILE: &str = "generate_questions.log";

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Categories accepted by the `generate` command.
pub const CATEGORIES: [&str; 9] = [
    "Technology",
    "Science",
    "Geography",
    "History",
    "Literature",
    "Sports",
    "Music",
    "Art",
    "Film",
];

/// Difficulty labels accepted by the `generate` command.
pub const DIFFICULTIES: [&str; 3] = ["Easy", "Medium", "Hard"];

pub const DEFAULT_COUNT: u8 = 5;
pub const MAX_COUNT: u8 = 20;

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    /// Reads the Gemini settings. Only the API key is mandatory.
    pub fn from_env() -> Result<Self, ServiceError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ServiceError::MissingCredential { var: API_KEY_VAR })?;
        let model = std::env::var(MODEL_VAR).unwrap_or_else(|_| DEFAULT_MODEL.into());
        let base_url = std::env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// One topic of the batch run and how many questions to request per difficulty.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BatchCategory {
    pub name: String,
    pub count: u8,
}

impl BatchCategory {
    fn new(name: &str, count: u8) -> Self {
        Self {
            name: name.to_string(),
            count,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub difficulties: Vec<String>,
    /// Pause between two generation calls, in milliseconds.
    pub delay_ms: u64,
    pub categories: Vec<BatchCategory>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            difficulties: vec!["Medium".into(), "Hard".into()],
            delay_ms: 1000,
            categories: default_batch_categories(),
        }
    }
}

impl BatchConfig {
    /// Loads a batch list from a TOML file. Fields left out keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch config '{}'", path.display()))?;
        let cfg: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse batch config '{}'", path.display()))?;
        cfg.validate()
            .with_context(|| format!("Invalid batch config '{}'", path.display()))?;
        info!(
            path = %path.display(),
            categories = cfg.categories.len(),
            difficulties = cfg.difficulties.len(),
            "Loaded batch config"
        );
        Ok(cfg)
    }

    /// Every topic must request between 1 and `MAX_COUNT` questions.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(bad) = self
            .categories
            .iter()
            .find(|c| !(1..=MAX_COUNT).contains(&c.count))
        {
            anyhow::bail!(
                "count for '{}' must be between 1 and {}, got {}",
                bad.name,
                MAX_COUNT,
                bad.count
            );
        }
        Ok(())
    }

    /// Number of generation calls a full run performs.
    pub fn combinations(&self) -> usize {
        self.categories.len() * self.difficulties.len()
    }

    /// Upper bound of questions a full run can request.
    pub fn requested_questions(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.count as usize * self.difficulties.len())
            .sum()
    }
}

fn default_batch_categories() -> Vec<BatchCategory> {
    [
        ("Sports - Soccer", 10),
        ("Sports - Football - International Competitions - FIFA World Cup - Winners", 10),
        ("Sports - Football - International Competitions - FIFA World Cup - Records", 10),
        ("Sports - Football - International Competitions - UEFA European Championship (Euros) - Winners", 10),
        ("Sports - Football - International Competitions - Copa América - Winners", 3),
        ("Sports - Football - International Competitions - Africa Cup of Nations (AFCON) - Winners", 6),
        ("Sports - Football - Club Competitions - UEFA Champions League - Winners", 10),
        ("Sports - Football - Club Competitions - UEFA Champions League - Records", 10),
        ("Sports - Football - Club Competitions - FIFA Club World Cup - Winners", 10),
        ("Sports - Football - English Football - Premier League", 10),
        ("Sports - Football - English Football - Premier League - Player Statistics", 10),
        ("Sports - Football - English Football - Premier League - Transfers Records", 10),
        ("Sports - Football - English Football - FA Cup - Winners", 10),
        ("E-Sports - Teams - Tournament Wins", 3),
        ("Video Games - General", 3),
        ("Video Games - Strategy Games - Civilization Series - Game Facts", 3),
        ("Video Games - Retro Gaming - Console Facts", 3),
        ("Board Games - Popular Titles & Rules", 3),
        ("Board Games - Specific Game Facts - Chess - Grandmaster Titles & Records", 3),
        ("Card Games - Traditional - Rules & History", 3),
        ("Tabletop RPGs - Dungeons & Dragons (D&D) - Edition Facts", 3),
        ("Sports Betting - Horse Racing - Major Race Winners", 3),
        ("Casino Games - Poker - World Series of Poker (WSOP) - Main Event Winners", 3),
        ("Casino Games - Roulette - Payouts & Probabilities", 3),
    ]
    .into_iter()
    .map(|(name, count)| BatchCategory::new(name, count))
    .collect()
}
