//! Grid coordinates, unit footprints, and the grid model contract.
//!
//! The grid itself is owned by an external collaborator; this module defines
//! the narrow read contract ([`GridModel`]) the decision core consumes, plus
//! [`GridMap`], a dense in-memory implementation used by the runtime and tests.

mod cell;
mod map;

pub use cell::{Cell, CellState, Occupant};
pub use map::{GridDimensions, GridMap, GridModel};

use std::fmt;

/// Discrete grid position expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Orthogonal neighbor offsets in search order (up, right, down, left).
    pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance in cells.
    #[inline]
    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Chebyshev (king-move) distance in cells.
    #[inline]
    pub fn chebyshev(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// The four orthogonal neighbors in [`Self::NEIGHBOR_OFFSETS`] order.
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        Self::NEIGHBOR_OFFSETS
            .into_iter()
            .map(move |(dx, dy)| self.offset(dx, dy))
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangular block of cells occupied by a unit or prop.
///
/// The block is anchored at its lower-left cell: an anchor `(x, y)` with a
/// `2x1` footprint covers `(x, y)` and `(x + 1, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub const SINGLE: Self = Self {
        width: 1,
        height: 1,
    };

    /// Creates a footprint; zero dimensions are clamped to one cell.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width: if width == 0 { 1 } else { width },
            height: if height == 0 { 1 } else { height },
        }
    }

    pub const fn area(self) -> u32 {
        self.width * self.height
    }

    /// Cells covered when anchored at `anchor`, in row-major order.
    pub fn cells(self, anchor: GridPosition) -> impl Iterator<Item = GridPosition> {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |dy| (0..width).map(move |dx| anchor.offset(dx, dy)))
    }

    /// Returns true if `position` lies inside the block anchored at `anchor`.
    pub fn covers(self, anchor: GridPosition, position: GridPosition) -> bool {
        position.x >= anchor.x
            && position.y >= anchor.y
            && position.x < anchor.x + self.width as i32
            && position.y < anchor.y + self.height as i32
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::SINGLE
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Minimum Manhattan distance between any cell of `a` and any cell of `b`.
///
/// For axis-aligned blocks this reduces to the per-axis gaps between the two
/// rectangles, so the result equals the pairwise minimum over both occupied
/// cell sets without enumerating them. Overlapping blocks have distance 0.
pub fn footprint_distance(
    a_anchor: GridPosition,
    a: Footprint,
    b_anchor: GridPosition,
    b: Footprint,
) -> u32 {
    axis_gap(a_anchor.x, a.width, b_anchor.x, b.width)
        + axis_gap(a_anchor.y, a.height, b_anchor.y, b.height)
}

fn axis_gap(a_start: i32, a_len: u32, b_start: i32, b_len: u32) -> u32 {
    let a_end = a_start + a_len as i32 - 1;
    let b_end = b_start + b_len as i32 - 1;
    if b_start > a_end {
        (b_start - a_end) as u32
    } else if a_start > b_end {
        (a_start - b_end) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(a: GridPosition, fa: Footprint, b: GridPosition, fb: Footprint) -> u32 {
        fa.cells(a)
            .flat_map(|ca| fb.cells(b).map(move |cb| ca.manhattan(cb)))
            .min()
            .unwrap()
    }

    #[test]
    fn footprint_cells_are_row_major_from_anchor() {
        let cells: Vec<_> = Footprint::new(2, 2).cells(GridPosition::new(3, 4)).collect();
        assert_eq!(
            cells,
            vec![
                GridPosition::new(3, 4),
                GridPosition::new(4, 4),
                GridPosition::new(3, 5),
                GridPosition::new(4, 5),
            ]
        );
    }

    #[test]
    fn zero_sized_footprint_is_clamped() {
        assert_eq!(Footprint::new(0, 3), Footprint::new(1, 3));
    }

    #[test]
    fn footprint_distance_matches_pairwise_minimum() {
        let shapes = [Footprint::SINGLE, Footprint::new(2, 1), Footprint::new(2, 3)];
        let anchors = [
            GridPosition::new(0, 0),
            GridPosition::new(3, 1),
            GridPosition::new(-2, 4),
            GridPosition::new(1, 0),
        ];
        for &fa in &shapes {
            for &fb in &shapes {
                for &a in &anchors {
                    for &b in &anchors {
                        assert_eq!(
                            footprint_distance(a, fa, b, fb),
                            brute_force(a, fa, b, fb),
                            "{a} {fa} vs {b} {fb}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn overlapping_blocks_have_zero_distance() {
        let d = footprint_distance(
            GridPosition::new(0, 0),
            Footprint::new(3, 3),
            GridPosition::new(2, 2),
            Footprint::SINGLE,
        );
        assert_eq!(d, 0);
    }

    #[test]
    fn chebyshev_and_manhattan() {
        let a = GridPosition::new(0, 0);
        let b = GridPosition::new(3, -4);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(a.chebyshev(b), 4);
    }
}
