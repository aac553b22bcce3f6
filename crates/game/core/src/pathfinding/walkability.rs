use tracing::warn;

use crate::grid::{Footprint, GridModel, GridPosition, Occupant};
use crate::session::{BattleSession, BattleView};
use crate::unit::{UnitId, UnitState};

/// Per-query walkability predicate.
///
/// A cell is walkable if it is in bounds, exists, is passable, and then one
/// of: it belongs to the mover's starting footprint, it is empty, it is the
/// ultimate target cell, or it holds a unit of the mover's faction. Hostile
/// units and obstacles block. Ally cells are only walkable during search;
/// committing to a final position is checked separately by the planner.
pub(crate) struct Walkability<'a> {
    grid: &'a dyn GridModel,
    session: &'a BattleSession,
    mover: Option<&'a UnitState>,
    start_cells: Vec<GridPosition>,
    target: GridPosition,
}

impl<'a> Walkability<'a> {
    pub(crate) fn new(
        view: BattleView<'a>,
        start: GridPosition,
        footprint: Footprint,
        mover: Option<UnitId>,
        target: GridPosition,
    ) -> Self {
        let resolved = mover.and_then(|id| view.session.unit(id));
        if resolved.is_none() {
            warn!(
                mover = ?mover,
                %start,
                %target,
                "pathfinding without a known mover; unit-occupied cells will block"
            );
        }
        Self {
            grid: view.grid,
            session: view.session,
            mover: resolved,
            start_cells: footprint.cells(start).collect(),
            target,
        }
    }

    pub(crate) fn target(&self) -> GridPosition {
        self.target
    }

    pub(crate) fn is_cell_walkable(&self, position: GridPosition) -> bool {
        if !self.grid.is_in_bounds(position) {
            return false;
        }
        let Some(cell) = self.grid.cell(position) else {
            return false;
        };
        if !cell.is_passable() {
            return false;
        }
        if self.start_cells.contains(&position) {
            return true;
        }
        let Some(occupant) = cell.occupant() else {
            return true;
        };
        if position == self.target {
            return true;
        }
        match (occupant, self.mover) {
            (Occupant::Unit(id), Some(mover)) => {
                id == mover.id
                    || self
                        .session
                        .unit(id)
                        .is_some_and(|other| other.faction == mover.faction)
            }
            (Occupant::Unit(_), None) => false,
            (Occupant::Obstacle(_), _) => false,
        }
    }

    /// Every cell of `footprint` anchored at `anchor` is walkable.
    pub(crate) fn is_anchor_walkable(&self, anchor: GridPosition, footprint: Footprint) -> bool {
        footprint.cells(anchor).all(|cell| self.is_cell_walkable(cell))
    }
}
