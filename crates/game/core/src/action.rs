//! Action rules: the synchronous half of an action.
//!
//! Cost, use limits, and the CanExecute predicate are evaluated by the turn
//! controller and behavior patterns without awaiting anything. Execution
//! itself lives in the runtime.

use std::fmt;

use tracing::trace;

use crate::context::DecisionContext;
use crate::error::ConfigError;
use crate::trigger::Trigger;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionId(pub u32);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action#{}", self.0)
    }
}

/// Classification consulted by behavior patterns.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    /// The default advance toward the current target.
    MoveTowardTarget,
    Attack,
    Jump,
    Repair,
    BuildBridge,
    DestroyObstacle,
    LateralShuffle,
    Defend,
    Other,
}

impl ActionKind {
    /// Actions that get a unit past terrain or obstacles when it cannot
    /// advance normally.
    pub const fn is_obstacle_bypass(self) -> bool {
        matches!(
            self,
            ActionKind::Jump
                | ActionKind::Repair
                | ActionKind::BuildBridge
                | ActionKind::DestroyObstacle
                | ActionKind::LateralShuffle
        )
    }
}

pub trait ActionRules: Send + Sync {
    fn id(&self) -> ActionId;

    fn kind(&self) -> ActionKind;

    /// Action points spent per use.
    fn cost(&self) -> u32;

    /// Uses allowed per turn; 0 means unlimited.
    fn max_uses_per_turn(&self) -> u32 {
        0
    }

    fn can_execute(&self, ctx: &DecisionContext<'_>) -> bool;
}

/// Declarative action description. Its CanExecute is the conjunction of its
/// triggers; an empty trigger list always holds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSpec {
    pub id: ActionId,
    pub kind: ActionKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_uses_per_turn: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub triggers: Vec<Trigger>,
}

impl ActionSpec {
    pub fn new(id: ActionId, kind: ActionKind, cost: u32) -> Self {
        Self {
            id,
            kind,
            cost,
            max_uses_per_turn: 0,
            triggers: Vec::new(),
        }
    }

    pub fn with_max_uses(mut self, max_uses_per_turn: u32) -> Self {
        self.max_uses_per_turn = max_uses_per_turn;
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.triggers.iter().try_for_each(Trigger::validate)
    }
}

impl ActionRules for ActionSpec {
    fn id(&self) -> ActionId {
        self.id
    }

    fn kind(&self) -> ActionKind {
        self.kind
    }

    fn cost(&self) -> u32 {
        self.cost
    }

    fn max_uses_per_turn(&self) -> u32 {
        self.max_uses_per_turn
    }

    fn can_execute(&self, ctx: &DecisionContext<'_>) -> bool {
        let ok = self.triggers.iter().all(|t| t.is_triggered(ctx));
        trace!(unit = %ctx.actor.id, action = %self.id, kind = %self.kind, ok, "can_execute");
        ok
    }
}
