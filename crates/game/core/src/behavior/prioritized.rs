use tracing::debug;

use super::BehaviorPattern;
use crate::action::{ActionId, ActionKind, ActionRules};
use crate::context::DecisionContext;

/// Prioritized-action policy with obstacle-bypass handling.
///
/// The executable list is scanned in priority order:
///
/// 1. If the unit can step toward its target, the first action that is not
///    an obstacle bypass wins.
/// 2. Otherwise the first bypass action (jump, repair, build bridge, destroy
///    obstacle, lateral shuffle) wins.
/// 3. Failing that, the first action that is neither a bypass nor the
///    default advance.
///
/// A unit without a live target counts as unable to move.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrioritizedPattern;

impl BehaviorPattern for PrioritizedPattern {
    fn decide_action(
        &self,
        ctx: &DecisionContext<'_>,
        executable: &[&dyn ActionRules],
    ) -> Option<ActionId> {
        let can_move = ctx.can_advance();

        let chosen = if can_move {
            executable.iter().find(|a| !a.kind().is_obstacle_bypass())
        } else {
            executable
                .iter()
                .find(|a| a.kind().is_obstacle_bypass())
                .or_else(|| {
                    executable.iter().find(|a| {
                        let kind = a.kind();
                        !kind.is_obstacle_bypass() && kind != ActionKind::MoveTowardTarget
                    })
                })
        };

        debug!(
            unit = %ctx.actor.id,
            can_move,
            executable = executable.len(),
            chosen = ?chosen.map(|a| a.kind()),
            "prioritized decision"
        );
        chosen.map(|a| a.id())
    }

    fn name(&self) -> &'static str {
        "prioritized"
    }
}
