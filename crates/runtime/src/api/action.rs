//! Asynchronous half of an action.
//!
//! Runtime users plug in [`Action`] implementations so a unit's turn can run
//! real movement and attacks, scripted fixtures, or animation-backed effects.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tactics_core::{ActionRules, UnitId};

use crate::state::SharedBattle;

/// How an action's execution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Completed,
    /// The effect could not be applied (target gone, destination taken).
    Interrupted,
}

/// An action a unit can take during its turn.
///
/// Rules (cost, use limit, CanExecute) come from [`ActionRules`]. `execute`
/// resolves once the action has finished; it may hold the battle write lock
/// while applying its effect but must not hold it across unrelated awaits.
#[async_trait]
pub trait Action: ActionRules {
    async fn execute(&self, actor: UnitId, battle: &SharedBattle) -> ActionOutcome;
}
