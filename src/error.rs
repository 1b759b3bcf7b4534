//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

/// Message shown to the merchant for any failed generation.
pub const GENERATION_FAILED_MESSAGE: &str = "Gagal membuat konten promosi. Silakan coba lagi.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invariant violation: {0}")]
    Invariant(String),

    #[error("Malformed content response: {0}")]
    MalformedResponse(String),

    #[error("Provider returned no image")]
    EmptyImageResult,

    #[error("Generation failed: {0}")]
    GenerationFailed(#[source] Box<Error>),
}

impl Error {
    /// True for the failure kinds produced by a generation call.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            Error::MalformedResponse(_) | Error::EmptyImageResult | Error::GenerationFailed(_)
        )
    }

    /// User-safe text for this error. Generation failures collapse to one
    /// fixed message; provider detail stays in the logs.
    pub fn user_message(&self) -> String {
        if self.is_generation_failure() {
            GENERATION_FAILED_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
