//! Unified error types surfaced by the runtime API.
//!
//! Wraps grid and configuration failures from tactics-core so battle setup
//! can bubble them up with consistent context. The turn loop itself never
//! fails: it ends the turn and logs instead.
use thiserror::Error;

use tactics_core::{ConfigError, ErrorSeverity, GridError, TacticsError, UnitId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("battle flow requires a grid before building")]
    MissingGrid,

    #[error("battle flow requires a session before building")]
    MissingSession,

    #[error("unit {0} is not part of the battle")]
    UnknownUnit(UnitId),

    #[error("unit {0} already has a loadout")]
    DuplicateLoadout(UnitId),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TacticsError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::MissingGrid | RuntimeError::MissingSession => ErrorSeverity::Fatal,
            RuntimeError::UnknownUnit(_) | RuntimeError::DuplicateLoadout(_) => {
                ErrorSeverity::Validation
            }
            RuntimeError::Grid(err) => err.severity(),
            RuntimeError::Config(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::MissingGrid => "RUNTIME_MISSING_GRID",
            RuntimeError::MissingSession => "RUNTIME_MISSING_SESSION",
            RuntimeError::UnknownUnit(_) => "RUNTIME_UNKNOWN_UNIT",
            RuntimeError::DuplicateLoadout(_) => "RUNTIME_DUPLICATE_LOADOUT",
            RuntimeError::Grid(err) => err.error_code(),
            RuntimeError::Config(err) => err.error_code(),
        }
    }
}
