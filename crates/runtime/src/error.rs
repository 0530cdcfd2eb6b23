//! Unified error types surfaced by the runtime.
//!
//! Wraps failures from persistence, ability use and session sequencing so the
//! host can bubble them up with consistent context.
use battle_core::{AbilityError, CoreError, ErrorSeverity, StageError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Ability(#[from] AbilityError),

    #[error(transparent)]
    Stage(#[from] StageError),

    #[error("talent '{0}' is not in the catalog")]
    UnknownTalent(String),

    #[error("talent '{0}' is already active")]
    AlreadyActive(String),

    #[error("battle is {actual}, expected {expected}")]
    InvalidPhase {
        expected: crate::session::Phase,
        actual: crate::session::Phase,
    },

    #[error("the run is already at its last stage")]
    RunComplete,
}

impl CoreError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Ability(e) => e.severity(),
            Self::Stage(e) => e.severity(),
            Self::Repository(_) => ErrorSeverity::Internal,
            Self::UnknownTalent(_) | Self::AlreadyActive(_) | Self::RunComplete => {
                ErrorSeverity::Validation
            }
            Self::InvalidPhase { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::Ability(e) => e.error_code(),
            Self::Stage(e) => e.error_code(),
            Self::UnknownTalent(_) => "RUNTIME_UNKNOWN_TALENT",
            Self::AlreadyActive(_) => "RUNTIME_ALREADY_ACTIVE",
            Self::InvalidPhase { .. } => "RUNTIME_INVALID_PHASE",
            Self::RunComplete => "RUNTIME_RUN_COMPLETE",
        }
    }
}
