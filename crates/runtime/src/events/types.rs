//! Event types for different topics.

use serde::{Deserialize, Serialize};

use tactics_core::{ActionId, ActionKind, UnitId};

use crate::api::ActionOutcome;
use crate::turn::TurnReport;

/// Events related to turn management.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A unit's turn began with a fresh budget.
    Started { unit: UnitId, action_points: u32 },

    /// Emitted exactly once per turn, whatever ended it.
    Completed(TurnReport),
}

/// Events related to action execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionEvent {
    /// An action finished (or was cut short by the actor's death).
    Executed {
        unit: UnitId,
        action: ActionId,
        kind: ActionKind,
        cost: u32,
        points_left: u32,
        /// `None` if the actor died before the action resolved.
        outcome: Option<ActionOutcome>,
    },
}
