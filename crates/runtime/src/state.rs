//! Shared battle state and per-unit loadouts.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tracing::debug;

use tactics_core::{
    ActionRules, BattleSession, BattleView, BehaviorPattern, BehaviorProfile, GridError, GridMap,
    GridPosition, TargetSelector, UnitId,
};

use crate::api::Action;

/// Battle state behind a tokio lock. Decision phases take the read lock;
/// actions take the write lock only while applying their effect.
pub type SharedBattle = Arc<RwLock<BattleState>>;

pub struct BattleState {
    pub grid: GridMap,
    pub session: BattleSession,
    deaths: watch::Sender<u64>,
}

impl BattleState {
    /// Wraps a grid and roster that already agree on occupancy.
    pub fn new(grid: GridMap, session: BattleSession) -> Result<Self, GridError> {
        grid.check_occupancy(&session)?;
        let (deaths, _) = watch::channel(0);
        Ok(Self {
            grid,
            session,
            deaths,
        })
    }

    /// Places every living unit and every prop of `session` on `grid`.
    pub fn deploy(mut grid: GridMap, session: BattleSession) -> Result<Self, GridError> {
        for unit in session.units().filter(|u| u.is_alive()) {
            grid.place_unit(unit.id, unit.position, unit.footprint)?;
        }
        for prop in session.props() {
            grid.place_prop(prop.id, prop.position, prop.footprint)?;
        }
        Self::new(grid, session)
    }

    pub fn into_shared(self) -> SharedBattle {
        Arc::new(RwLock::new(self))
    }

    pub fn view(&self) -> BattleView<'_> {
        BattleView::new(&self.grid, &self.session)
    }

    pub fn is_alive(&self, unit: UnitId) -> bool {
        self.session.unit(unit).is_some_and(|u| u.is_alive())
    }

    /// Receiver that changes whenever any unit dies.
    pub fn subscribe_deaths(&self) -> watch::Receiver<u64> {
        self.deaths.subscribe()
    }

    /// Commits a move. The destination must be exclusive for the unit.
    pub fn move_unit(&mut self, unit: UnitId, to: GridPosition) -> Result<(), GridError> {
        let state = self
            .session
            .unit_mut(unit)
            .ok_or(GridError::UnknownUnit(unit))?;
        self.grid
            .relocate_unit(unit, state.position, to, state.footprint)?;
        debug!(unit = %unit, from = %state.position, %to, "unit moved");
        state.position = to;
        Ok(())
    }

    /// Applies one damage event. Returns true if the unit died from it.
    pub fn damage_unit(&mut self, unit: UnitId, amount: u32) -> Result<bool, GridError> {
        let state = self
            .session
            .unit_mut(unit)
            .ok_or(GridError::UnknownUnit(unit))?;
        let died = state.apply_damage(amount);
        debug!(unit = %unit, amount, health = state.health.current, died, "unit damaged");
        if died {
            self.on_death(unit);
        }
        Ok(died)
    }

    pub fn kill_unit(&mut self, unit: UnitId) -> Result<(), GridError> {
        let state = self
            .session
            .unit_mut(unit)
            .ok_or(GridError::UnknownUnit(unit))?;
        if !state.alive {
            return Ok(());
        }
        state.alive = false;
        state.health.current = 0;
        self.on_death(unit);
        Ok(())
    }

    fn on_death(&mut self, unit: UnitId) {
        self.grid.remove_unit(unit);
        self.deaths.send_modify(|count| *count += 1);
        debug!(unit = %unit, "unit died");
    }
}

/// What a unit brings to its turns: actions in priority order, a behavior
/// pattern, a targeting profile, and its action point pool.
pub struct UnitLoadout {
    pub actions: Vec<Arc<dyn Action>>,
    pub behavior: Option<Box<dyn BehaviorPattern>>,
    pub targeting: TargetSelector,
    pub max_action_points: u32,
}

impl UnitLoadout {
    pub fn new(max_action_points: u32) -> Self {
        Self {
            actions: Vec::new(),
            behavior: Some(BehaviorProfile::default().into_pattern()),
            targeting: TargetSelector::default(),
            max_action_points,
        }
    }

    pub fn with_action(mut self, action: impl Action + 'static) -> Self {
        self.actions.push(Arc::new(action));
        self
    }

    pub fn with_shared_action(mut self, action: Arc<dyn Action>) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_profile(mut self, profile: BehaviorProfile) -> Self {
        self.behavior = Some(profile.into_pattern());
        self
    }

    pub fn with_behavior(mut self, behavior: Box<dyn BehaviorPattern>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Drops the behavior pattern. Turns for such a unit end immediately.
    pub fn without_behavior(mut self) -> Self {
        self.behavior = None;
        self
    }

    pub fn with_targeting(mut self, targeting: TargetSelector) -> Self {
        self.targeting = targeting;
        self
    }
}

impl fmt::Debug for UnitLoadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitLoadout")
            .field("actions", &self.actions.iter().map(|a| a.id()).collect::<Vec<_>>())
            .field("behavior", &self.behavior.as_ref().map(|b| b.name()))
            .field("targeting", &self.targeting)
            .field("max_action_points", &self.max_action_points)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{Faction, GridModel, UnitState};

    fn battle() -> BattleState {
        let session = BattleSession::new(1)
            .with_unit(UnitState::new(UnitId(1), Faction::Hero, GridPosition::new(0, 0)))
            .with_unit(
                UnitState::new(UnitId(2), Faction::Enemy, GridPosition::new(2, 0)).with_health(5, 5),
            );
        BattleState::deploy(GridMap::new(4, 4), session).unwrap()
    }

    #[test]
    fn death_frees_cells_and_notifies() {
        let mut state = battle();
        let deaths = state.subscribe_deaths();
        assert!(!deaths.has_changed().unwrap());

        assert!(state.damage_unit(UnitId(2), 10).unwrap());
        assert!(deaths.has_changed().unwrap());
        assert!(!state.is_alive(UnitId(2)));
        assert!(
            !state
                .grid
                .cell(GridPosition::new(2, 0))
                .unwrap()
                .is_occupied()
        );
        assert!(state.grid.check_occupancy(&state.session).is_ok());
    }

    #[test]
    fn move_rejects_occupied_destination() {
        let mut state = battle();
        let err = state.move_unit(UnitId(1), GridPosition::new(2, 0)).unwrap_err();
        assert!(matches!(err, GridError::Occupied { .. }));
        assert_eq!(state.session.unit(UnitId(1)).unwrap().position, GridPosition::new(0, 0));

        state.move_unit(UnitId(1), GridPosition::new(1, 0)).unwrap();
        assert!(state.grid.check_occupancy(&state.session).is_ok());
    }

    #[test]
    fn deploy_rejects_overlapping_roster() {
        let session = BattleSession::new(1)
            .with_unit(UnitState::new(UnitId(1), Faction::Hero, GridPosition::new(0, 0)))
            .with_unit(UnitState::new(UnitId(2), Faction::Enemy, GridPosition::new(0, 0)));
        assert!(BattleState::deploy(GridMap::new(2, 2), session).is_err());
    }
}
