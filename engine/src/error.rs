//! Error taxonomy shared by every stage of the engine
//!
//! All failures are local and deterministic. Nothing is retried: the same
//! input always produces the same error.

use serde::Serialize;
use thiserror::Error;

use crate::model::Equilibrium;

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Malformed input. Raised before any computation is attempted.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The bounded mixed-strategy search found nothing beyond the pure
    /// equilibria in `partial`.
    #[error(
        "equilibrium search exhausted supports of size <= {max_support} without a mixed equilibrium ({} pure equilibria found)",
        .partial.len()
    )]
    SolverIncomplete {
        max_support: usize,
        partial: Vec<Equilibrium>,
    },

    /// An empty candidate list reached the recommender.
    #[error("no equilibrium available to rank")]
    NoEquilibrium,

    /// Best-response ties under a configuration that refuses to break them.
    #[error("degenerate game: {0}")]
    DegenerateGame(String),
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation(message.into())
    }

    /// Stable snake_case identifier used in the error envelope
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "validation_error",
            EngineError::SolverIncomplete { .. } => "solver_incomplete_error",
            EngineError::NoEquilibrium => "no_equilibrium_error",
            EngineError::DegenerateGame(_) => "degenerate_game_error",
        }
    }

    /// `{"error": {"kind": ..., "message": ...}}`, plus `partial_equilibria`
    /// for an incomplete search
    pub fn envelope(&self) -> ErrorEnvelope {
        let partial_equilibria = match self {
            EngineError::SolverIncomplete { partial, .. } => Some(partial.clone()),
            _ => None,
        };
        ErrorEnvelope {
            error: ErrorBody {
                kind: self.kind(),
                message: self.to_string(),
                partial_equilibria,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
    /// Pure equilibria found before the bounded search gave up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_equilibria: Option<Vec<Equilibrium>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}
