//! Closest-enemy targeting strategy.

use crate::session::BattleView;
use crate::targeting::{TargetingStrategy, utils::living};
use crate::unit::{UnitId, UnitState};

/// Target the live candidate at the smallest footprint-aware distance.
///
/// Ties go to the earliest candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosestStrategy;

impl TargetingStrategy for ClosestStrategy {
    fn select_target(
        &self,
        _view: BattleView<'_>,
        actor: &UnitState,
        candidates: &[&UnitState],
    ) -> Option<UnitId> {
        living(candidates)
            .min_by_key(|candidate| actor.distance_to(candidate))
            .map(|candidate| candidate.id)
    }

    fn name(&self) -> &'static str {
        "Closest"
    }

    fn description(&self) -> &'static str {
        "Targets the nearest enemy"
    }
}
