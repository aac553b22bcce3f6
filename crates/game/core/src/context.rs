use crate::grid::GridPosition;
use crate::planner::MovePlanner;
use crate::rng::RollSource;
use crate::session::BattleView;
use crate::unit::UnitState;

/// Everything a trigger, action rule, or behavior pattern may read while
/// deciding one step of a unit's turn.
#[derive(Clone, Copy)]
pub struct DecisionContext<'a> {
    pub view: BattleView<'a>,
    pub actor: &'a UnitState,
    pub planner: &'a dyn MovePlanner,
    pub rolls: &'a RollSource,
}

impl<'a> DecisionContext<'a> {
    pub fn new(
        view: BattleView<'a>,
        actor: &'a UnitState,
        planner: &'a dyn MovePlanner,
        rolls: &'a RollSource,
    ) -> Self {
        Self {
            view,
            actor,
            planner,
            rolls,
        }
    }

    /// The actor's current target, if it is still alive.
    pub fn target(&self) -> Option<&'a UnitState> {
        self.actor
            .target
            .and_then(|id| self.view.unit(id))
            .filter(|target| target.is_alive())
    }

    /// Next position toward the target, or `None` when no move exists.
    pub fn best_move(&self) -> Option<GridPosition> {
        let target = self.target()?;
        let next = self.planner.best_move(self.view, self.actor, target);
        (next != self.actor.position).then_some(next)
    }

    pub fn can_advance(&self) -> bool {
        self.best_move().is_some()
    }

    /// The target stands within the actor's melee reach.
    pub fn can_melee_target(&self) -> bool {
        match (self.target(), self.actor.melee_range()) {
            (Some(target), Some(range)) => self.actor.distance_to(target) <= range,
            _ => false,
        }
    }

    pub fn turn(&self) -> u32 {
        self.view.session.turn()
    }

    /// Uniform roll in `0..100`, deterministic for the battle seed.
    pub fn roll_percent(&self) -> u32 {
        self.rolls.roll_percent()
    }
}
