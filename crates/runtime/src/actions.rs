//! Built-in actions: advancing on the target and attacking it.
//!
//! Both wrap an [`ActionSpec`] for id, cost, use limit, and extra trigger
//! gates, and add the precondition their effect needs.

use async_trait::async_trait;
use tracing::{debug, warn};

use tactics_core::{
    ActionId, ActionKind, ActionRules, ActionSpec, DecisionContext, MovePlanner, PathMovePlanner,
    PathfinderConfig, UnitId, UnitState, WeaponMode,
};

use crate::api::{Action, ActionOutcome};
use crate::state::SharedBattle;

/// Moves the unit along its path toward the current target, up to its move
/// range, stopping on the closest exclusive cell.
#[derive(Debug, Clone)]
pub struct MoveTowardTarget {
    rules: ActionSpec,
    planner: PathMovePlanner,
}

impl MoveTowardTarget {
    pub fn new(id: ActionId, cost: u32) -> Self {
        Self::from_spec(ActionSpec::new(id, ActionKind::MoveTowardTarget, cost))
    }

    pub fn from_spec(rules: ActionSpec) -> Self {
        Self {
            rules,
            planner: PathMovePlanner::default(),
        }
    }

    pub fn with_pathfinder(mut self, config: PathfinderConfig) -> Self {
        self.planner = PathMovePlanner::new(config);
        self
    }
}

impl ActionRules for MoveTowardTarget {
    fn id(&self) -> ActionId {
        self.rules.id
    }

    fn kind(&self) -> ActionKind {
        self.rules.kind
    }

    fn cost(&self) -> u32 {
        self.rules.cost
    }

    fn max_uses_per_turn(&self) -> u32 {
        self.rules.max_uses_per_turn
    }

    fn can_execute(&self, ctx: &DecisionContext<'_>) -> bool {
        self.rules.can_execute(ctx) && ctx.can_advance()
    }
}

#[async_trait]
impl Action for MoveTowardTarget {
    async fn execute(&self, actor: UnitId, battle: &SharedBattle) -> ActionOutcome {
        let mut state = battle.write().await;
        let next = {
            let view = state.view();
            let Some(unit) = view.unit(actor) else {
                return ActionOutcome::Interrupted;
            };
            let Some(target) = unit
                .target
                .and_then(|id| view.unit(id))
                .filter(|t| t.is_alive())
            else {
                return ActionOutcome::Interrupted;
            };
            let next = self.planner.best_move(view, unit, target);
            if next == unit.position {
                debug!(unit = %actor, "no move toward target");
                return ActionOutcome::Interrupted;
            }
            next
        };

        match state.move_unit(actor, next) {
            Ok(()) => ActionOutcome::Completed,
            Err(err) => {
                warn!(unit = %actor, to = %next, error = %err, "move rejected");
                ActionOutcome::Interrupted
            }
        }
    }
}

/// Strikes the current target with the strongest weapon mode that reaches
/// it. Ranged modes spend one round of ammunition.
#[derive(Debug, Clone)]
pub struct AttackAction {
    rules: ActionSpec,
}

impl AttackAction {
    pub fn new(id: ActionId, cost: u32) -> Self {
        Self::from_spec(ActionSpec::new(id, ActionKind::Attack, cost))
    }

    pub fn from_spec(rules: ActionSpec) -> Self {
        Self { rules }
    }
}

/// Index of the strongest usable weapon mode with `target` in reach.
fn weapon_in_reach(attacker: &UnitState, target: &UnitState) -> Option<usize> {
    let distance = attacker.distance_to(target);
    let usable = |w: &WeaponMode| w.range >= distance && (!w.uses_ammo() || w.ammo.current > 0);
    attacker
        .weapons
        .iter()
        .enumerate()
        .filter(|(_, w)| usable(w))
        .fold(None, |best: Option<(usize, u32)>, (idx, w)| match best {
            Some((_, damage)) if damage >= w.damage => best,
            _ => Some((idx, w.damage)),
        })
        .map(|(idx, _)| idx)
}

impl ActionRules for AttackAction {
    fn id(&self) -> ActionId {
        self.rules.id
    }

    fn kind(&self) -> ActionKind {
        self.rules.kind
    }

    fn cost(&self) -> u32 {
        self.rules.cost
    }

    fn max_uses_per_turn(&self) -> u32 {
        self.rules.max_uses_per_turn
    }

    fn can_execute(&self, ctx: &DecisionContext<'_>) -> bool {
        self.rules.can_execute(ctx)
            && ctx
                .target()
                .is_some_and(|target| weapon_in_reach(ctx.actor, target).is_some())
    }
}

#[async_trait]
impl Action for AttackAction {
    async fn execute(&self, actor: UnitId, battle: &SharedBattle) -> ActionOutcome {
        let mut state = battle.write().await;

        let Some(attacker) = state.session.unit(actor) else {
            return ActionOutcome::Interrupted;
        };
        let Some(target) = attacker
            .target
            .and_then(|id| state.session.unit(id))
            .filter(|t| t.is_alive())
        else {
            return ActionOutcome::Interrupted;
        };
        let target_id = target.id;
        let Some(idx) = weapon_in_reach(attacker, target) else {
            debug!(unit = %actor, target = %target_id, "target out of reach");
            return ActionOutcome::Interrupted;
        };

        let damage = match state.session.unit_mut(actor) {
            Some(attacker) => {
                let weapon = &mut attacker.weapons[idx];
                if weapon.uses_ammo() {
                    weapon.ammo.current -= 1;
                }
                weapon.damage
            }
            None => return ActionOutcome::Interrupted,
        };

        match state.damage_unit(target_id, damage) {
            Ok(killed) => {
                debug!(unit = %actor, target = %target_id, damage, killed, "attack landed");
                ActionOutcome::Completed
            }
            Err(err) => {
                warn!(unit = %actor, target = %target_id, error = %err, "attack failed");
                ActionOutcome::Interrupted
            }
        }
    }
}
