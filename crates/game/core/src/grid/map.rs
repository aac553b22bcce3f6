use super::{Cell, CellState, Footprint, GridPosition, Occupant};
use crate::error::GridError;
use crate::session::BattleSession;
use crate::unit::{PropId, UnitId};

/// Read contract for the grid store consumed by the pathfinder, triggers, and
/// targeting. Implementations are owned by the embedding game.
pub trait GridModel: Send + Sync {
    fn dimensions(&self) -> GridDimensions;

    fn cell(&self, position: GridPosition) -> Option<&Cell>;

    fn width(&self) -> u32 {
        self.dimensions().width
    }

    fn height(&self) -> u32 {
        self.dimensions().height
    }

    fn is_in_bounds(&self, position: GridPosition) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: GridPosition) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Dense row-major grid with occupancy bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    dimensions: GridDimensions,
    cells: Vec<Cell>,
}

impl GridMap {
    /// Creates a fully passable, empty grid.
    pub fn new(width: u32, height: u32) -> Self {
        let dimensions = GridDimensions::new(width, height);
        let cells = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Cell::new(GridPosition::new(x, y))))
            .collect();
        Self { dimensions, cells }
    }

    fn index(&self, position: GridPosition) -> Option<usize> {
        if !self.dimensions.contains(position) {
            return None;
        }
        Some(position.y as usize * self.dimensions.width as usize + position.x as usize)
    }

    fn cell_mut(&mut self, position: GridPosition) -> Result<&mut Cell, GridError> {
        let index = self
            .index(position)
            .ok_or(GridError::OutOfBounds(position))?;
        Ok(&mut self.cells[index])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn set_passable(&mut self, position: GridPosition, passable: bool) -> Result<(), GridError> {
        self.cell_mut(position)?.set_passable(passable);
        Ok(())
    }

    /// Marks every cell in the rectangle `[from, to]` (inclusive) impassable.
    pub fn add_wall(&mut self, from: GridPosition, to: GridPosition) -> Result<(), GridError> {
        for y in from.y.min(to.y)..=from.y.max(to.y) {
            for x in from.x.min(to.x)..=from.x.max(to.x) {
                self.set_passable(GridPosition::new(x, y), false)?;
            }
        }
        Ok(())
    }

    pub fn set_state(&mut self, position: GridPosition, state: CellState) -> Result<(), GridError> {
        self.cell_mut(position)?.set_state(state);
        Ok(())
    }

    /// Claims every cell of `footprint` at `anchor` for `occupant`.
    ///
    /// Fails without modifying the grid if any cell is out of bounds or held
    /// by a different occupant.
    pub fn place(
        &mut self,
        occupant: Occupant,
        anchor: GridPosition,
        footprint: Footprint,
    ) -> Result<(), GridError> {
        for position in footprint.cells(anchor) {
            let index = self
                .index(position)
                .ok_or(GridError::OutOfBounds(position))?;
            match self.cells[index].occupant() {
                Some(existing) if existing != occupant => {
                    return Err(GridError::Occupied {
                        position,
                        occupant: existing,
                    });
                }
                _ => {}
            }
        }
        for position in footprint.cells(anchor) {
            self.cell_mut(position)?.set_occupant(Some(occupant));
        }
        Ok(())
    }

    pub fn place_unit(
        &mut self,
        unit: UnitId,
        anchor: GridPosition,
        footprint: Footprint,
    ) -> Result<(), GridError> {
        self.place(Occupant::Unit(unit), anchor, footprint)
    }

    pub fn place_prop(
        &mut self,
        prop: PropId,
        anchor: GridPosition,
        footprint: Footprint,
    ) -> Result<(), GridError> {
        self.place(Occupant::Obstacle(prop), anchor, footprint)
    }

    /// Releases every cell held by `occupant`. Returns the number of cells freed.
    pub fn clear(&mut self, occupant: Occupant) -> usize {
        let mut freed = 0;
        for cell in self.cells.iter_mut() {
            if cell.occupant() == Some(occupant) {
                cell.set_occupant(None);
                freed += 1;
            }
        }
        freed
    }

    pub fn remove_unit(&mut self, unit: UnitId) -> usize {
        self.clear(Occupant::Unit(unit))
    }

    pub fn remove_prop(&mut self, prop: PropId) -> usize {
        self.clear(Occupant::Obstacle(prop))
    }

    /// Moves a unit's claim from its current cells to `footprint` at `to`.
    ///
    /// The old claim is restored if the destination cannot be taken.
    pub fn relocate_unit(
        &mut self,
        unit: UnitId,
        from: GridPosition,
        to: GridPosition,
        footprint: Footprint,
    ) -> Result<(), GridError> {
        let occupant = Occupant::Unit(unit);
        self.clear(occupant);
        if let Err(err) = self.place(occupant, to, footprint) {
            self.place(occupant, from, footprint)?;
            return Err(err);
        }
        Ok(())
    }

    /// Verifies the cell/occupant invariant against a roster.
    ///
    /// Every occupied cell must be covered by its occupant's footprint, and
    /// every living unit's cells must reference that unit.
    pub fn check_occupancy(&self, session: &BattleSession) -> Result<(), GridError> {
        for cell in &self.cells {
            let Some(occupant) = cell.occupant() else {
                continue;
            };
            let covered = match occupant {
                Occupant::Unit(id) => session
                    .unit(id)
                    .is_some_and(|u| u.footprint.covers(u.position, cell.position())),
                Occupant::Obstacle(id) => session
                    .prop(id)
                    .is_some_and(|p| p.footprint.covers(p.position, cell.position())),
            };
            if !covered {
                return Err(GridError::OccupantMismatch {
                    position: cell.position(),
                    occupant,
                });
            }
        }

        for unit in session.units().filter(|u| u.is_alive()) {
            for position in unit.occupied_cells() {
                let holds = self
                    .cell(position)
                    .is_some_and(|c| c.occupant() == Some(Occupant::Unit(unit.id)));
                if !holds {
                    return Err(GridError::OccupantMismatch {
                        position,
                        occupant: Occupant::Unit(unit.id),
                    });
                }
            }
        }
        Ok(())
    }
}

impl GridModel for GridMap {
    fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    fn cell(&self, position: GridPosition) -> Option<&Cell> {
        self.index(position).map(|index| &self.cells[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_rejects_overlap_without_partial_claim() {
        let mut grid = GridMap::new(4, 4);
        grid.place_unit(UnitId(1), GridPosition::new(1, 0), Footprint::SINGLE)
            .unwrap();

        let err = grid
            .place_unit(UnitId(2), GridPosition::new(0, 0), Footprint::new(2, 1))
            .unwrap_err();

        assert!(matches!(err, GridError::Occupied { .. }));
        assert!(!grid.cell(GridPosition::new(0, 0)).unwrap().is_occupied());
    }

    #[test]
    fn relocate_restores_claim_on_failure() {
        let mut grid = GridMap::new(3, 1);
        grid.place_unit(UnitId(1), GridPosition::new(0, 0), Footprint::SINGLE)
            .unwrap();
        grid.place_prop(PropId(9), GridPosition::new(2, 0), Footprint::SINGLE)
            .unwrap();

        let result = grid.relocate_unit(
            UnitId(1),
            GridPosition::new(0, 0),
            GridPosition::new(2, 0),
            Footprint::SINGLE,
        );

        assert!(result.is_err());
        assert_eq!(
            grid.cell(GridPosition::new(0, 0)).unwrap().occupant(),
            Some(Occupant::Unit(UnitId(1)))
        );
    }

    #[test]
    fn holes_are_impassable() {
        let mut grid = GridMap::new(2, 2);
        let p = GridPosition::new(1, 1);
        grid.set_state(p, CellState::Hole).unwrap();
        assert!(!grid.cell(p).unwrap().is_passable());
        grid.set_state(p, CellState::Cracked).unwrap();
        assert!(grid.cell(p).unwrap().is_passable());
    }

    #[test]
    fn out_of_bounds_lookup_is_none() {
        let grid = GridMap::new(2, 2);
        assert!(grid.cell(GridPosition::new(2, 0)).is_none());
        assert!(grid.cell(GridPosition::new(0, -1)).is_none());
        assert!(!grid.is_in_bounds(GridPosition::new(-1, 0)));
    }
}
