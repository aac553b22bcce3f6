use tracing::{debug, trace};

use super::node::{heuristic, search};
use super::walkability::Walkability;
use crate::config::PathfinderConfig;
use crate::error::PathError;
use crate::grid::{Footprint, GridPosition};

/// Cells at Chebyshev distance exactly `radius` from `center`, scanned row by
/// row from the bottom.
pub(crate) fn ring(center: GridPosition, radius: i32) -> impl Iterator<Item = GridPosition> {
    (-radius..=radius).flat_map(move |dy| {
        (-radius..=radius)
            .filter(move |dx| dx.abs() == radius || dy.abs() == radius)
            .map(move |dx| center.offset(dx, dy))
    })
}

/// Successful fallback route.
pub(crate) struct FallbackHit {
    pub radius: u32,
    pub anchor: GridPosition,
    pub steps: Vec<GridPosition>,
}

/// Searches rings around the original target for a reachable anchor.
///
/// At each radius the candidates are the anchors whose whole footprint is
/// walkable, tried in ascending heuristic distance to the original target.
/// The first sub-search that reaches its candidate wins. Only the first ring
/// holding any walkable candidate is searched: if none of its candidates is
/// reachable there is no fallback route.
pub(crate) fn ring_search(
    walk: &Walkability<'_>,
    start: GridPosition,
    footprint: Footprint,
    config: &PathfinderConfig,
) -> Result<Option<FallbackHit>, PathError> {
    let target = walk.target();
    for radius in 1..=config.fallback_radius {
        let mut candidates: Vec<GridPosition> = ring(target, radius as i32)
            .filter(|anchor| *anchor != start && walk.is_anchor_walkable(*anchor, footprint))
            .collect();
        if candidates.is_empty() {
            continue;
        }
        candidates.sort_by_key(|anchor| heuristic(*anchor, target));
        trace!(radius, candidates = candidates.len(), "fallback ring");

        for anchor in candidates {
            let found = search(
                walk,
                start,
                anchor,
                footprint,
                config.fallback_iterations,
                config.max_path_length,
            )?;
            if let Some(steps) = found.filter(|steps| !steps.is_empty()) {
                debug!(%start, %target, %anchor, radius, "fallback route found");
                return Ok(Some(FallbackHit {
                    radius,
                    anchor,
                    steps,
                }));
            }
        }
        debug!(%start, %target, radius, "no reachable fallback candidate");
        return Ok(None);
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_contains_only_cells_at_radius() {
        let center = GridPosition::new(5, 5);
        for radius in 1..=3 {
            let cells: Vec<_> = ring(center, radius).collect();
            assert_eq!(cells.len(), 8 * radius as usize);
            assert!(cells.iter().all(|c| c.chebyshev(center) == radius as u32));
        }
    }

    #[test]
    fn ring_scan_starts_bottom_left() {
        let first = ring(GridPosition::ORIGIN, 1).next();
        assert_eq!(first, Some(GridPosition::new(-1, -1)));
    }
}
