//! Priority-target strategy.

use crate::session::BattleView;
use crate::targeting::{TargetingStrategy, strategies::ClosestStrategy, utils::living};
use crate::unit::{UnitId, UnitState};

/// Stick to a designated unit while it is alive and among the candidates,
/// otherwise fall back to the closest enemy.
///
/// Without an explicit designation the actor's current target is used, so a
/// unit keeps hunting whatever it was last assigned.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityStrategy {
    pub priority: Option<UnitId>,
}

impl PriorityStrategy {
    pub fn with_priority(priority: UnitId) -> Self {
        Self {
            priority: Some(priority),
        }
    }
}

impl TargetingStrategy for PriorityStrategy {
    fn select_target(
        &self,
        view: BattleView<'_>,
        actor: &UnitState,
        candidates: &[&UnitState],
    ) -> Option<UnitId> {
        let designated = self.priority.or(actor.target);
        if let Some(id) = designated
            && living(candidates).any(|candidate| candidate.id == id)
        {
            return Some(id);
        }
        ClosestStrategy.select_target(view, actor, candidates)
    }

    fn name(&self) -> &'static str {
        "Priority"
    }

    fn description(&self) -> &'static str {
        "Targets a designated enemy, falling back to the nearest one"
    }
}
