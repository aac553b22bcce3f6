//! Battle session context: the roster of units and props plus turn counter.
//!
//! Components that need faction rosters receive a [`BattleView`] rather than
//! reading global registries.

use crate::grid::GridModel;
use crate::unit::{Faction, PropId, PropState, UnitId, UnitState};

/// Roster and turn bookkeeping for one battle.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSession {
    units: Vec<UnitState>,
    props: Vec<PropState>,
    turn: u32,
    seed: u64,
}

impl BattleSession {
    pub fn new(seed: u64) -> Self {
        Self {
            units: Vec::new(),
            props: Vec::new(),
            turn: 0,
            seed,
        }
    }

    pub fn with_unit(mut self, unit: UnitState) -> Self {
        self.add_unit(unit);
        self
    }

    pub fn with_prop(mut self, prop: PropState) -> Self {
        self.add_prop(prop);
        self
    }

    /// Adds a unit, replacing any existing record with the same id.
    pub fn add_unit(&mut self, unit: UnitState) {
        match self.units.iter_mut().find(|u| u.id == unit.id) {
            Some(existing) => *existing = unit,
            None => self.units.push(unit),
        }
    }

    pub fn add_prop(&mut self, prop: PropState) {
        match self.props.iter_mut().find(|p| p.id == prop.id) {
            Some(existing) => *existing = prop,
            None => self.props.push(prop),
        }
    }

    pub fn remove_prop(&mut self, id: PropId) -> Option<PropState> {
        let index = self.props.iter().position(|p| p.id == id)?;
        Some(self.props.remove(index))
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitState> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut UnitState> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    /// All units in registration order.
    pub fn units(&self) -> impl Iterator<Item = &UnitState> {
        self.units.iter()
    }

    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut UnitState> {
        self.units.iter_mut()
    }

    pub fn prop(&self, id: PropId) -> Option<&PropState> {
        self.props.iter().find(|p| p.id == id)
    }

    pub fn props(&self) -> impl Iterator<Item = &PropState> {
        self.props.iter()
    }

    /// Living units of `faction`, in registration order.
    pub fn living(&self, faction: Faction) -> impl Iterator<Item = &UnitState> {
        self.units
            .iter()
            .filter(move |u| u.is_alive() && u.faction == faction)
    }

    /// Living units hostile to `unit`, in registration order.
    pub fn hostiles_of<'a>(&'a self, unit: &'a UnitState) -> impl Iterator<Item = &'a UnitState> {
        self.units
            .iter()
            .filter(move |u| u.is_alive() && u.is_hostile_to(unit))
    }

    /// Living units on `unit`'s side, excluding `unit` itself.
    pub fn allies_of<'a>(&'a self, unit: &'a UnitState) -> impl Iterator<Item = &'a UnitState> {
        self.units
            .iter()
            .filter(move |u| u.is_alive() && u.id != unit.id && u.faction == unit.faction)
    }

    /// Current turn number. Starts at 0 before the first round.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Advances the turn counter and clears per-turn unit flags.
    pub fn begin_turn(&mut self) -> u32 {
        self.turn += 1;
        for unit in self.units.iter_mut() {
            unit.damaged_this_turn = false;
        }
        self.turn
    }
}

/// Read-only view of the battlefield passed to pathfinding, triggers, and
/// targeting.
#[derive(Clone, Copy)]
pub struct BattleView<'a> {
    pub grid: &'a dyn GridModel,
    pub session: &'a BattleSession,
}

impl<'a> BattleView<'a> {
    pub fn new(grid: &'a dyn GridModel, session: &'a BattleSession) -> Self {
        Self { grid, session }
    }

    pub fn unit(&self, id: UnitId) -> Option<&'a UnitState> {
        self.session.unit(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridPosition;

    #[test]
    fn begin_turn_clears_damage_flags() {
        let mut unit = UnitState::new(UnitId(1), Faction::Hero, GridPosition::ORIGIN);
        unit.apply_damage(1);
        let mut session = BattleSession::new(7).with_unit(unit);

        assert_eq!(session.begin_turn(), 1);
        let unit = session.unit(UnitId(1)).unwrap();
        assert!(!unit.damaged_this_turn);
        assert_eq!(unit.damage_events, 1);
    }

    #[test]
    fn rosters_skip_dead_units() {
        let mut dead = UnitState::new(UnitId(3), Faction::Enemy, GridPosition::new(2, 0));
        dead.alive = false;
        let session = BattleSession::new(0)
            .with_unit(UnitState::new(UnitId(1), Faction::Hero, GridPosition::ORIGIN))
            .with_unit(UnitState::new(UnitId(2), Faction::Enemy, GridPosition::new(1, 0)))
            .with_unit(dead);

        let hero = session.unit(UnitId(1)).unwrap();
        let hostiles: Vec<_> = session.hostiles_of(hero).map(|u| u.id).collect();
        assert_eq!(hostiles, vec![UnitId(2)]);
        assert_eq!(session.living(Faction::Enemy).count(), 1);
    }
}
