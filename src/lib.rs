pub mod batch;
pub mod config;
pub mod db;
pub mod gemini;
pub mod generator;
pub mod ingest;
pub mod prompt;
pub mod questions;
pub mod telemetry;
pub mod trivia;
