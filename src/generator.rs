use thiserror::Error;

/// Failure of the remote text service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{var} environment variable not set. Please set the {var} environment variable")]
    MissingCredential { var: &'static str },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("service returned no text")]
    EmptyResponse,
}

/// Anything that can turn a prompt into raw model text.
///
/// The pipeline only depends on this trait, so parsing and ingestion can be
/// driven by canned responses.
pub trait QuestionGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError>;
}
