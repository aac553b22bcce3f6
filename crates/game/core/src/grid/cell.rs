use super::GridPosition;
use crate::unit::{PropId, UnitId};

/// Structural state of a cell's floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum CellState {
    #[default]
    Intact,
    Cracked,
    /// Collapsed floor. Holes are never passable.
    Hole,
}

/// Whatever currently stands on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupant {
    Unit(UnitId),
    /// Static world object (rock, barricade, crate).
    Obstacle(PropId),
}

impl Occupant {
    pub fn unit(self) -> Option<UnitId> {
        match self {
            Occupant::Unit(id) => Some(id),
            Occupant::Obstacle(_) => None,
        }
    }
}

/// A single grid cell.
///
/// Invariant: if `occupant` is set, the occupant's occupied cell set contains
/// `position`. [`super::GridMap`] maintains this when units and props are
/// placed through it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    position: GridPosition,
    passable: bool,
    state: CellState,
    occupant: Option<Occupant>,
}

impl Cell {
    /// Creates a passable, intact, empty cell.
    pub fn new(position: GridPosition) -> Self {
        Self {
            position,
            passable: true,
            state: CellState::Intact,
            occupant: None,
        }
    }

    pub fn position(&self) -> GridPosition {
        self.position
    }

    /// Terrain passability. A hole is impassable regardless of the terrain flag.
    pub fn is_passable(&self) -> bool {
        self.passable && self.state != CellState::Hole
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub(crate) fn set_passable(&mut self, passable: bool) {
        self.passable = passable;
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    pub(crate) fn set_occupant(&mut self, occupant: Option<Occupant>) {
        self.occupant = occupant;
    }
}
