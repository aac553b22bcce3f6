//! Per-turn action point budget.

use std::collections::HashMap;

use tactics_core::{ActionId, ActionRules};

/// Action points and use counters for a single turn.
///
/// Points never increase within a turn and never go below zero. The budget
/// is rebuilt at every turn start.
#[derive(Debug, Clone, Default)]
pub struct ActionBudget {
    max_points: u32,
    points_left: u32,
    uses: HashMap<ActionId, u32>,
}

impl ActionBudget {
    pub fn new(max_points: u32) -> Self {
        Self {
            max_points,
            points_left: max_points,
            uses: HashMap::new(),
        }
    }

    pub fn points_left(&self) -> u32 {
        self.points_left
    }

    pub fn points_spent(&self) -> u32 {
        self.max_points - self.points_left
    }

    pub fn uses(&self, action: ActionId) -> u32 {
        self.uses.get(&action).copied().unwrap_or(0)
    }

    /// Within budget and under the per-turn use limit (0 = unlimited).
    pub fn allows(&self, action: &dyn ActionRules) -> bool {
        let limit = action.max_uses_per_turn();
        action.cost() <= self.points_left && (limit == 0 || self.uses(action.id()) < limit)
    }

    /// Charges one use of `action`. Returns the points left.
    pub fn spend(&mut self, action: ActionId, cost: u32) -> u32 {
        self.points_left = self.points_left.saturating_sub(cost);
        *self.uses.entry(action).or_insert(0) += 1;
        self.points_left
    }
}
