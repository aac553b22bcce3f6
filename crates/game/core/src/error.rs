//! Error infrastructure for tactics-core.
//!
//! Expected "not found" outcomes (no path, no target, no action) are plain
//! `Vec::new()` / `None` values and never surface here. The types below cover
//! configuration defects and internal inconsistencies only.

use crate::grid::{GridPosition, Occupant};
use crate::unit::UnitId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; a different action or a later turn may succeed.
    Recoverable,

    /// Invalid input that should be rejected without retry.
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,

    /// Battle state is corrupted and cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics errors.
pub trait TacticsError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

// ============================================================================
// Pathfinding
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Parent links did not lead back to the start within the step bound.
    #[error("corrupt parent chain from {start} to {goal}: no start after {steps} steps")]
    CorruptParentChain {
        start: GridPosition,
        goal: GridPosition,
        steps: usize,
    },
}

impl TacticsError for PathError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            PathError::CorruptParentChain { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            PathError::CorruptParentChain { .. } => "PATH_CORRUPT_PARENT_CHAIN",
        }
    }
}

// ============================================================================
// Grid bookkeeping
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("position {0} is out of bounds")]
    OutOfBounds(GridPosition),

    #[error("position {position} is already held by {occupant:?}")]
    Occupied {
        position: GridPosition,
        occupant: Occupant,
    },

    /// A cell references an occupant whose footprint does not cover it, or
    /// a unit's cell does not reference the unit.
    #[error("occupancy mismatch at {position} for {occupant:?}")]
    OccupantMismatch {
        position: GridPosition,
        occupant: Occupant,
    },

    #[error("unit {0} is not part of the battle")]
    UnknownUnit(UnitId),
}

impl TacticsError for GridError {
    fn severity(&self) -> ErrorSeverity {
        use GridError::*;
        match self {
            OutOfBounds(_) | UnknownUnit(_) => ErrorSeverity::Validation,
            Occupied { .. } => ErrorSeverity::Recoverable,
            OccupantMismatch { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use GridError::*;
        match self {
            OutOfBounds(_) => "GRID_OUT_OF_BOUNDS",
            Occupied { .. } => "GRID_OCCUPIED",
            OccupantMismatch { .. } => "GRID_OCCUPANT_MISMATCH",
            UnknownUnit(_) => "GRID_UNKNOWN_UNIT",
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A cap or bound that must be positive was configured as zero.
    #[error("{0} must be greater than zero")]
    ZeroCap(&'static str),

    #[error("unknown targeting strategy '{0}'")]
    UnknownStrategy(String),

    #[error("chance must be within 0..=100, got {0}")]
    InvalidPercent(u32),
}

impl TacticsError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ZeroCap(_) => "CONFIG_ZERO_CAP",
            ConfigError::UnknownStrategy(_) => "CONFIG_UNKNOWN_STRATEGY",
            ConfigError::InvalidPercent(_) => "CONFIG_INVALID_PERCENT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_match_recovery_expectations() {
        let corrupt = PathError::CorruptParentChain {
            start: GridPosition::ORIGIN,
            goal: GridPosition::new(1, 1),
            steps: 1000,
        };
        assert!(corrupt.severity().is_internal());
        assert_eq!(corrupt.error_code(), "PATH_CORRUPT_PARENT_CHAIN");

        let occupied = GridError::Occupied {
            position: GridPosition::ORIGIN,
            occupant: Occupant::Unit(UnitId(1)),
        };
        assert!(occupied.severity().is_recoverable());
        assert_eq!(
            ConfigError::ZeroCap("max_iterations").to_string(),
            "max_iterations must be greater than zero"
        );
    }
}
