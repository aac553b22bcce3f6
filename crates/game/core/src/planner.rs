//! "Best next step toward a target" query used by behavior patterns and
//! move actions.

use crate::config::PathfinderConfig;
use crate::grid::{Footprint, GridModel, GridPosition, Occupant};
use crate::pathfinding::Pathfinder;
use crate::session::BattleView;
use crate::unit::{UnitId, UnitState};

pub trait MovePlanner: Send + Sync {
    /// Furthest position the unit can reach this move while closing in on
    /// `target`. Returns the unit's current position when no move exists.
    fn best_move(&self, view: BattleView<'_>, unit: &UnitState, target: &UnitState) -> GridPosition;
}

/// True if `unit` could stand with `footprint` at `anchor` without sharing a
/// cell with anyone else.
///
/// Searches may pass through allies; a committed position may not.
pub fn is_exclusive(
    grid: &dyn GridModel,
    unit: UnitId,
    anchor: GridPosition,
    footprint: Footprint,
) -> bool {
    footprint.cells(anchor).all(|position| {
        grid.cell(position).is_some_and(|cell| {
            cell.is_passable()
                && cell
                    .occupant()
                    .is_none_or(|occupant| occupant == Occupant::Unit(unit))
        })
    })
}

/// Planner backed by the A* pathfinder.
#[derive(Clone, Debug, Default)]
pub struct PathMovePlanner {
    config: PathfinderConfig,
}

impl PathMovePlanner {
    pub fn new(config: PathfinderConfig) -> Self {
        Self { config }
    }
}

impl MovePlanner for PathMovePlanner {
    fn best_move(&self, view: BattleView<'_>, unit: &UnitState, target: &UnitState) -> GridPosition {
        let current = unit.position;
        let path = Pathfinder::with_config(view, self.config).find_path(
            current,
            target.position,
            unit.footprint,
            Some(unit.id),
        );

        let baseline = current.manhattan(target.position);
        path.iter()
            .take(unit.move_range as usize)
            .copied()
            .filter(|step| step.manhattan(target.position) <= baseline)
            .filter(|step| is_exclusive(view.grid, unit.id, *step, unit.footprint))
            .last()
            .unwrap_or(current)
    }
}
