//! blogsmith - Turn video transcripts into long-form blog articles
//!
//! The interesting part lives in [`llm`]: a generation pipeline that survives
//! replies of unpredictable shape, truncated output and unreachable endpoints.

pub mod cli;
pub mod config;
pub mod llm;
pub mod video;

use thiserror::Error;

pub use llm::generate_blog_content;

/// Main error type for blogsmith
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        let err = err.without_url();
        if err.is_timeout() {
            GenerationError::Transport(format!("request timed out: {err}"))
        } else {
            GenerationError::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
