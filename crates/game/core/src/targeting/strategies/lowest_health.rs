//! Lowest-health targeting strategy.
//!
//! Useful for finisher units that clean up wounded enemies.

use crate::session::BattleView;
use crate::targeting::{TargetingStrategy, utils::living};
use crate::unit::{UnitId, UnitState};

/// Target the enemy with the lowest health percentage.
///
/// **Behavior:**
/// - Optional maximum distance filter
/// - Ties go to the earliest candidate
#[derive(Debug, Clone, Default)]
pub struct LowestHealthStrategy {
    /// Maximum distance to consider targets (None = unlimited).
    pub max_distance: Option<u32>,
}

impl LowestHealthStrategy {
    pub fn with_max_distance(max_distance: u32) -> Self {
        Self {
            max_distance: Some(max_distance),
        }
    }
}

impl TargetingStrategy for LowestHealthStrategy {
    fn select_target(
        &self,
        _view: BattleView<'_>,
        actor: &UnitState,
        candidates: &[&UnitState],
    ) -> Option<UnitId> {
        living(candidates)
            .filter(|candidate| {
                self.max_distance
                    .is_none_or(|max| actor.distance_to(candidate) <= max)
            })
            .min_by_key(|candidate| candidate.health.percent())
            .map(|candidate| candidate.id)
    }

    fn name(&self) -> &'static str {
        "Lowest Health"
    }

    fn description(&self) -> &'static str {
        "Targets the enemy with the lowest health percentage (finish them off)"
    }
}
