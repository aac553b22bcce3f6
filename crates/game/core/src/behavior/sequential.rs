use super::BehaviorPattern;
use crate::action::{ActionId, ActionRules};
use crate::context::DecisionContext;

/// First executable action in priority order. Used for scripted units that
/// should not reason about obstacles.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialPattern;

impl BehaviorPattern for SequentialPattern {
    fn decide_action(
        &self,
        _ctx: &DecisionContext<'_>,
        executable: &[&dyn ActionRules],
    ) -> Option<ActionId> {
        executable.first().map(|a| a.id())
    }

    fn name(&self) -> &'static str {
        "sequential"
    }
}
