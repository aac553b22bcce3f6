//! Turn controller.
//!
//! Runs one unit's turn as a loop over its action point budget:
//!
//! ```text
//! TurnStart -> (ComputeExecutable -> DecideAction -> ExecuteAndWait)* -> TurnEnd
//! ```
//!
//! Decision phases run under the battle read lock and never await. Execution
//! suspends until the action resolves or the acting unit dies, then always
//! yields one scheduling step so synchronously completing actions cannot
//! starve the executor.

use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, error, warn};

use tactics_core::{
    ActionId, ActionRules, BehaviorPattern, DecisionContext, PathMovePlanner, RollSource, UnitId,
};

use crate::api::{Action, Result, RuntimeError};
use crate::budget::ActionBudget;
use crate::events::{ActionEvent, Event, EventBus, TurnEvent};
use crate::flow::RuntimeConfig;
use crate::state::{BattleState, SharedBattle, UnitLoadout};

/// Why a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnEnd {
    /// No action points left, or the per-turn action bound was reached.
    BudgetExhausted,
    NoExecutableActions,
    /// The behavior pattern declined every executable action.
    NoActionChosen,
    UnitDied,
    UnitBusy,
    MissingBehavior,
    UnknownUnit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub unit: UnitId,
    /// Actions started this turn, in order.
    pub executed: Vec<ActionId>,
    pub points_spent: u32,
    pub end: TurnEnd,
}

impl TurnReport {
    fn ended(unit: UnitId, end: TurnEnd) -> Self {
        Self {
            unit,
            executed: Vec::new(),
            points_spent: 0,
            end,
        }
    }
}

pub struct TurnController {
    battle: SharedBattle,
    loadouts: HashMap<UnitId, UnitLoadout>,
    planner: PathMovePlanner,
    events: EventBus,
    points: watch::Sender<u32>,
    max_actions_per_turn: u32,
}

impl TurnController {
    pub fn new(battle: SharedBattle, config: &RuntimeConfig, events: EventBus) -> Self {
        let (points, _) = watch::channel(0);
        Self {
            battle,
            loadouts: HashMap::new(),
            planner: PathMovePlanner::new(config.tactics.pathfinder),
            events,
            points,
            max_actions_per_turn: config.max_actions_per_turn,
        }
    }

    pub fn register(&mut self, unit: UnitId, loadout: UnitLoadout) -> Result<()> {
        if self.loadouts.contains_key(&unit) {
            return Err(RuntimeError::DuplicateLoadout(unit));
        }
        self.loadouts.insert(unit, loadout);
        Ok(())
    }

    pub fn loadout(&self, unit: UnitId) -> Option<&UnitLoadout> {
        self.loadouts.get(&unit)
    }

    pub fn battle(&self) -> &SharedBattle {
        &self.battle
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Action points left for the unit currently acting.
    pub fn action_points(&self) -> watch::Receiver<u32> {
        self.points.subscribe()
    }

    pub async fn execute_turn(&self, unit: UnitId) -> TurnReport {
        self.execute_turn_with(unit, |_| {}).await
    }

    /// Runs a turn and invokes `on_complete` once it has ended. The turn
    /// completion event is published right after the callback.
    pub async fn execute_turn_with<F>(&self, unit: UnitId, on_complete: F) -> TurnReport
    where
        F: FnOnce(&TurnReport) + Send,
    {
        let report = self.run_turn(unit).await;
        debug!(
            unit = %unit,
            end = ?report.end,
            executed = report.executed.len(),
            points_spent = report.points_spent,
            "turn completed"
        );
        on_complete(&report);
        self.events
            .publish(Event::Turn(TurnEvent::Completed(report.clone())));
        report
    }

    async fn run_turn(&self, unit: UnitId) -> TurnReport {
        let Some(loadout) = self.loadouts.get(&unit) else {
            error!(unit = %unit, "no loadout registered for unit");
            return TurnReport::ended(unit, TurnEnd::UnknownUnit);
        };
        let Some(behavior) = loadout.behavior.as_deref() else {
            error!(unit = %unit, "unit has no behavior configured; ending turn");
            return TurnReport::ended(unit, TurnEnd::MissingBehavior);
        };

        let mut budget = ActionBudget::new(loadout.max_action_points);
        self.points.send_replace(budget.points_left());

        let mut deaths = {
            let mut state = self.battle.write().await;
            if state.session.unit(unit).is_none() {
                error!(unit = %unit, "unit is not part of the battle");
                return TurnReport::ended(unit, TurnEnd::UnknownUnit);
            }
            refresh_target(&mut state, unit, loadout);
            state.subscribe_deaths()
        };
        self.events.publish(Event::Turn(TurnEvent::Started {
            unit,
            action_points: budget.points_left(),
        }));

        let mut report = TurnReport::ended(unit, TurnEnd::BudgetExhausted);
        let mut rolls_taken = 0;
        let mut iterations = 0;

        let end = loop {
            if budget.points_left() == 0 {
                break TurnEnd::BudgetExhausted;
            }
            if iterations >= self.max_actions_per_turn {
                warn!(unit = %unit, iterations, "action bound reached; ending turn");
                break TurnEnd::BudgetExhausted;
            }
            iterations += 1;

            let action = {
                let state = self.battle.read().await;
                match self.decide(&state, unit, loadout, behavior, &budget, &mut rolls_taken) {
                    ControlFlow::Continue(action) => action,
                    ControlFlow::Break(end) => break end,
                }
            };

            let points_left = budget.spend(action.id(), action.cost());
            self.points.send_replace(points_left);
            debug!(
                unit = %unit,
                action = %action.id(),
                kind = %action.kind(),
                cost = action.cost(),
                points_left,
                "executing action"
            );

            let outcome = tokio::select! {
                biased;
                outcome = action.execute(unit, &self.battle) => Some(outcome),
                () = wait_for_death(&mut deaths, &self.battle, unit) => None,
            };
            tokio::task::yield_now().await;

            report.executed.push(action.id());
            self.events.publish(Event::Action(ActionEvent::Executed {
                unit,
                action: action.id(),
                kind: action.kind(),
                cost: action.cost(),
                points_left,
                outcome,
            }));

            if outcome.is_none() {
                break TurnEnd::UnitDied;
            }
        };

        report.points_spent = budget.points_spent();
        report.end = end;
        report
    }

    /// One ComputeExecutable + DecideAction step.
    fn decide(
        &self,
        state: &BattleState,
        unit: UnitId,
        loadout: &UnitLoadout,
        behavior: &dyn BehaviorPattern,
        budget: &ActionBudget,
        rolls_taken: &mut u32,
    ) -> ControlFlow<TurnEnd, Arc<dyn Action>> {
        let Some(actor) = state.session.unit(unit) else {
            return ControlFlow::Break(TurnEnd::UnknownUnit);
        };
        if !actor.is_alive() {
            return ControlFlow::Break(TurnEnd::UnitDied);
        }
        if actor.is_busy() {
            return ControlFlow::Break(TurnEnd::UnitBusy);
        }

        let rolls = RollSource::new(state.session.seed(), state.session.turn(), unit)
            .with_offset(*rolls_taken);
        let ctx = DecisionContext::new(state.view(), actor, &self.planner, &rolls);

        let executable: Vec<&dyn ActionRules> = loadout
            .actions
            .iter()
            .map(|action| action.as_ref() as &dyn ActionRules)
            .filter(|action| budget.allows(*action) && action.can_execute(&ctx))
            .collect();
        if executable.is_empty() {
            *rolls_taken = rolls.rolls_taken();
            debug!(unit = %unit, "no executable actions");
            return ControlFlow::Break(TurnEnd::NoExecutableActions);
        }

        let choice = behavior.decide_action(&ctx, &executable);
        *rolls_taken = rolls.rolls_taken();
        let Some(id) = choice else {
            debug!(unit = %unit, behavior = behavior.name(), "no action chosen");
            return ControlFlow::Break(TurnEnd::NoActionChosen);
        };
        if !executable.iter().any(|action| action.id() == id) {
            error!(unit = %unit, action = %id, "behavior chose an action outside the executable set");
            return ControlFlow::Break(TurnEnd::NoActionChosen);
        }

        match loadout.actions.iter().find(|action| action.id() == id) {
            Some(action) => ControlFlow::Continue(Arc::clone(action)),
            None => ControlFlow::Break(TurnEnd::NoActionChosen),
        }
    }
}

/// Re-runs the unit's targeting profile over the living hostiles.
fn refresh_target(state: &mut BattleState, unit: UnitId, loadout: &UnitLoadout) {
    let chosen = {
        let Some(actor) = state.session.unit(unit) else {
            return;
        };
        loadout.targeting.select_target(state.view(), actor)
    };
    if let Some(actor) = state.session.unit_mut(unit) {
        actor.target = chosen;
    }
}

/// Resolves once `unit` is dead. Never resolves if the death channel closes.
async fn wait_for_death(deaths: &mut watch::Receiver<u64>, battle: &SharedBattle, unit: UnitId) {
    loop {
        if deaths.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
        if !battle.read().await.is_alive(unit) {
            return;
        }
    }
}
