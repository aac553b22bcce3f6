//! Weighted-threat targeting strategy (default).
//!
//! Scores every live candidate by how dangerous it is right now and how
//! cheaply the actor can remove it:
//! - Immediate threat: melee already in reach of its goal, else a ranged
//!   unit lining up a shot, else a ranged unit merely in reach
//! - How far it has advanced from its spawn
//! - How wounded it is
//! - How hard it hits
//! - How few of the actor's strongest hits it would take to kill

use crate::config::ThreatWeights;
use crate::session::BattleView;
use crate::targeting::{
    TargetingStrategy,
    utils::{hits_to_kill, living},
};
use crate::unit::{UnitId, UnitState};

#[derive(Debug, Clone, Default)]
pub struct ThreatBasedStrategy {
    pub weights: ThreatWeights,
}

impl ThreatBasedStrategy {
    pub fn with_weights(weights: ThreatWeights) -> Self {
        Self { weights }
    }

    /// Higher score = more urgent target.
    pub fn score(&self, view: BattleView<'_>, actor: &UnitState, candidate: &UnitState) -> f32 {
        let w = &self.weights;

        // A candidate without a live target of its own threatens the actor.
        let goal = candidate
            .target
            .and_then(|id| view.unit(id))
            .filter(|goal| goal.is_alive())
            .unwrap_or(actor);
        let distance = candidate.distance_to(goal);

        let immediate = if candidate.melee_range().is_some_and(|reach| distance <= reach) {
            w.melee_in_range
        } else if candidate.aiming {
            w.aiming
        } else if candidate.ranged_range().is_some_and(|reach| distance <= reach) {
            w.ranged_in_range
        } else {
            0.0
        };

        let advance = candidate.spawn_position.manhattan(candidate.position) as f32 * w.advance_per_cell;
        let wounds = candidate.health.missing_fraction() * w.missing_health;
        let damage = candidate.strongest_damage() as f32 * w.per_damage;
        let killability = hits_to_kill(candidate.health.current, actor.strongest_damage())
            .map_or(0.0, |hits| w.killability / hits as f32);

        immediate + advance + wounds + damage + killability
    }
}

impl TargetingStrategy for ThreatBasedStrategy {
    fn select_target(
        &self,
        view: BattleView<'_>,
        actor: &UnitState,
        candidates: &[&UnitState],
    ) -> Option<UnitId> {
        let mut best: Option<(UnitId, f32)> = None;

        for candidate in living(candidates) {
            let score = self.score(view, actor, candidate);
            match best {
                None => best = Some((candidate.id, score)),
                Some((_, current)) if score > current => best = Some((candidate.id, score)),
                _ => {}
            }
        }

        best.map(|(id, _)| id)
    }

    fn name(&self) -> &'static str {
        "Threat-Based"
    }

    fn description(&self) -> &'static str {
        "Prioritizes enemies that are about to strike or are cheap to kill"
    }
}
