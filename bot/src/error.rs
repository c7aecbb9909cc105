//! Bot error types

use thiserror::Error;
use shared::{ApiFailure, Collaborator, RatingBand};

/// Result type for bot operations
pub type BotResult<T> = Result<T, BotError>;

/// Bot error types
#[derive(Error, Debug)]
pub enum BotError {
    #[error("No member could be resolved for the next pick")]
    RotationUnavailable,

    #[error("No unvisited restaurant rated within {band}")]
    NoQualifyingCandidate { band: RatingBand },

    #[error("{collaborator} unavailable: {reason}")]
    CollaboratorUnavailable { collaborator: Collaborator, reason: ApiFailure },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid intent pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Logging setup failed: {0}")]
    LoggingError(#[from] shared::SharedError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BotError {
    pub fn store(reason: ApiFailure) -> Self {
        BotError::CollaboratorUnavailable { collaborator: Collaborator::VisitStore, reason }
    }

    pub fn search(reason: ApiFailure) -> Self {
        BotError::CollaboratorUnavailable { collaborator: Collaborator::RestaurantSearch, reason }
    }

    pub fn recognizer(reason: ApiFailure) -> Self {
        BotError::CollaboratorUnavailable { collaborator: Collaborator::IntentRecognizer, reason }
    }
}
