//! Unit and prop records read by the decision core.
//!
//! Units are owned by external collaborators (stats, animation, weapons). The
//! decision core only needs the read-side view captured in [`UnitState`];
//! mutation helpers exist so the runtime and tests can play the collaborator
//! role.

use std::collections::BTreeMap;
use std::fmt;

use crate::grid::{Footprint, GridPosition, footprint_distance};

/// Unique identifier for a unit in a battle session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique identifier for a static world object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropId(pub u32);

impl fmt::Display for PropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prop#{}", self.0)
    }
}

/// Side a unit fights for. Units of different factions are hostile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Faction {
    Hero,
    Enemy,
}

impl Faction {
    #[inline]
    pub fn is_hostile_to(self, other: Faction) -> bool {
        self != other
    }
}

/// Integer resource meter (health) tracked per unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Current value as a percentage of maximum, in `[0, 100]`.
    ///
    /// A meter without a maximum counts as full.
    pub fn percent(&self) -> u32 {
        if self.maximum == 0 {
            return 100;
        }
        (u64::from(self.current) * 100 / u64::from(self.maximum)) as u32
    }

    /// Missing fraction in `[0.0, 1.0]`.
    pub fn missing_fraction(&self) -> f32 {
        if self.maximum == 0 {
            return 0.0;
        }
        (self.maximum - self.current) as f32 / self.maximum as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponKind {
    Melee,
    Ranged,
}

/// One firing mode of a unit's weapon loadout.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponMode {
    pub name: String,
    pub kind: WeaponKind,
    pub damage: u32,
    /// Attack reach in footprint-aware grid distance.
    pub range: u32,
    /// Magazine meter. A zero maximum means the mode does not consume ammo.
    pub ammo: ResourceMeter,
}

impl WeaponMode {
    pub fn melee(name: impl Into<String>, damage: u32) -> Self {
        Self {
            name: name.into(),
            kind: WeaponKind::Melee,
            damage,
            range: 1,
            ammo: ResourceMeter::default(),
        }
    }

    pub fn ranged(name: impl Into<String>, damage: u32, range: u32, magazine: u32) -> Self {
        Self {
            name: name.into(),
            kind: WeaponKind::Ranged,
            damage,
            range,
            ammo: ResourceMeter::full(magazine),
        }
    }

    pub fn with_ammo(mut self, current: u32) -> Self {
        self.ammo = ResourceMeter::new(current, self.ammo.maximum);
        self
    }

    pub fn uses_ammo(&self) -> bool {
        self.ammo.maximum > 0
    }
}

/// Read-side record of a unit on the battlefield.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitState {
    pub id: UnitId,
    pub faction: Faction,
    /// Anchor (lower-left) cell.
    pub position: GridPosition,
    pub footprint: Footprint,
    pub health: ResourceMeter,
    pub alive: bool,
    /// Cells the unit may travel in a single move action.
    pub move_range: u32,
    pub weapons: Vec<WeaponMode>,
    /// Currently selected enemy.
    pub target: Option<UnitId>,
    /// Anchor at deployment, used to measure how far the unit has advanced.
    pub spawn_position: GridPosition,
    /// Ranged unit is lining up a shot.
    pub aiming: bool,
    /// Mid-motion or mid-attack.
    pub busy: bool,
    pub damaged_this_turn: bool,
    /// Number of separate damage events ever taken.
    pub damage_events: u32,
    pub flags: BTreeMap<String, bool>,
}

impl UnitState {
    pub fn new(id: UnitId, faction: Faction, position: GridPosition) -> Self {
        Self {
            id,
            faction,
            position,
            footprint: Footprint::SINGLE,
            health: ResourceMeter::full(100),
            alive: true,
            move_range: 1,
            weapons: Vec::new(),
            target: None,
            spawn_position: position,
            aiming: false,
            busy: false,
            damaged_this_turn: false,
            damage_events: 0,
            flags: BTreeMap::new(),
        }
    }

    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    pub fn with_health(mut self, current: u32, maximum: u32) -> Self {
        self.health = ResourceMeter::new(current, maximum);
        self
    }

    pub fn with_move_range(mut self, move_range: u32) -> Self {
        self.move_range = move_range;
        self
    }

    pub fn with_weapon(mut self, weapon: WeaponMode) -> Self {
        self.weapons.push(weapon);
        self
    }

    pub fn with_target(mut self, target: UnitId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_spawn_position(mut self, spawn: GridPosition) -> Self {
        self.spawn_position = spawn;
        self
    }

    pub fn with_flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.flags.insert(name.into(), value);
        self
    }

    pub fn aiming(mut self, aiming: bool) -> Self {
        self.aiming = aiming;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_hostile_to(&self, other: &UnitState) -> bool {
        self.faction.is_hostile_to(other.faction)
    }

    /// Cells covered by the unit's footprint at its current anchor.
    pub fn occupied_cells(&self) -> Vec<GridPosition> {
        self.footprint.cells(self.position).collect()
    }

    pub fn occupies(&self, position: GridPosition) -> bool {
        self.footprint.covers(self.position, position)
    }

    /// Footprint-aware grid distance to another unit.
    pub fn distance_to(&self, other: &UnitState) -> u32 {
        footprint_distance(self.position, self.footprint, other.position, other.footprint)
    }

    pub fn distance_to_prop(&self, prop: &PropState) -> u32 {
        footprint_distance(self.position, self.footprint, prop.position, prop.footprint)
    }

    pub fn weapon(&self, name: &str) -> Option<&WeaponMode> {
        self.weapons.iter().find(|w| w.name == name)
    }

    /// Highest-damage weapon mode; the first listed wins ties.
    pub fn strongest_weapon(&self) -> Option<&WeaponMode> {
        self.weapons
            .iter()
            .fold(None, |best: Option<&WeaponMode>, w| match best {
                Some(b) if b.damage >= w.damage => Some(b),
                _ => Some(w),
            })
    }

    pub fn strongest_damage(&self) -> u32 {
        self.strongest_weapon().map_or(0, |w| w.damage)
    }

    /// Longest reach among melee modes, if the unit can melee at all.
    pub fn melee_range(&self) -> Option<u32> {
        self.weapons
            .iter()
            .filter(|w| w.kind == WeaponKind::Melee)
            .map(|w| w.range)
            .max()
    }

    /// Longest reach among ranged modes that still have ammunition.
    pub fn ranged_range(&self) -> Option<u32> {
        self.weapons
            .iter()
            .filter(|w| w.kind == WeaponKind::Ranged && (!w.uses_ammo() || w.ammo.current > 0))
            .map(|w| w.range)
            .max()
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    /// Applies one damage event. Returns true if the unit died from it.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.health.current = self.health.current.saturating_sub(amount);
        self.damaged_this_turn = true;
        self.damage_events += 1;
        if self.health.current == 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

/// Static world object (barricade, crate, pillar).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropState {
    pub id: PropId,
    pub position: GridPosition,
    pub footprint: Footprint,
    pub destructible: bool,
}

impl PropState {
    pub fn new(id: PropId, position: GridPosition, destructible: bool) -> Self {
        Self {
            id,
            position,
            footprint: Footprint::SINGLE,
            destructible,
        }
    }

    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strongest_weapon_prefers_first_on_tie() {
        let unit = UnitState::new(UnitId(1), Faction::Hero, GridPosition::ORIGIN)
            .with_weapon(WeaponMode::melee("sword", 12))
            .with_weapon(WeaponMode::ranged("bow", 12, 5, 10))
            .with_weapon(WeaponMode::melee("fist", 3));

        assert_eq!(unit.strongest_weapon().unwrap().name, "sword");
    }

    #[test]
    fn apply_damage_tracks_events_and_death() {
        let mut unit =
            UnitState::new(UnitId(1), Faction::Enemy, GridPosition::ORIGIN).with_health(10, 10);

        assert!(!unit.apply_damage(4));
        assert_eq!(unit.damage_events, 1);
        assert!(unit.damaged_this_turn);
        assert!(unit.apply_damage(20));
        assert!(!unit.is_alive());
        assert!(!unit.apply_damage(1));
        assert_eq!(unit.damage_events, 2);
    }

    #[test]
    fn empty_magazine_removes_ranged_reach() {
        let unit = UnitState::new(UnitId(1), Faction::Hero, GridPosition::ORIGIN)
            .with_weapon(WeaponMode::ranged("rifle", 8, 6, 4).with_ammo(0));
        assert_eq!(unit.ranged_range(), None);
    }

    #[test]
    fn meter_percent_handles_zero_maximum() {
        assert_eq!(ResourceMeter::new(0, 0).percent(), 100);
        assert_eq!(ResourceMeter::new(25, 100).percent(), 25);
        assert_eq!(ResourceMeter::full(u32::MAX).percent(), 100);
        assert_eq!(ResourceMeter::new(u32::MAX / 2, u32::MAX).percent(), 49);
        assert!((ResourceMeter::new(25, 100).missing_fraction() - 0.75).abs() < f32::EPSILON);
    }
}
