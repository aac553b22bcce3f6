//! Footprint-aware A* over the battle grid.
//!
//! The pathfinder is stateless between queries: every call builds its own
//! node arena and walkability predicate from the [`BattleView`] it was given.
//! When the direct search fails, a ring search around the target looks for
//! the closest reachable anchor so that units still close in on a target they
//! cannot stand on.

mod fallback;
mod node;
mod walkability;

use tracing::{debug, error};

use crate::config::PathfinderConfig;
use crate::error::PathError;
use crate::grid::{Footprint, GridPosition};
use crate::session::BattleView;
use crate::unit::UnitId;

use walkability::Walkability;

/// How a path was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Direct search reached the requested target. Also used for the empty
    /// path when start and target coincide.
    Direct,
    /// Direct search failed; the path leads to `anchor` on the ring at
    /// `radius` around the target.
    Fallback { radius: u32, anchor: GridPosition },
    Unreachable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResult {
    /// Anchors to step through, excluding the start.
    pub steps: Vec<GridPosition>,
    pub route: Route,
}

impl PathResult {
    fn unreachable() -> Self {
        Self {
            steps: Vec::new(),
            route: Route::Unreachable,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<GridPosition> {
        self.steps.last().copied()
    }
}

pub struct Pathfinder<'a> {
    view: BattleView<'a>,
    config: PathfinderConfig,
}

impl<'a> Pathfinder<'a> {
    pub fn new(view: BattleView<'a>) -> Self {
        Self::with_config(view, PathfinderConfig::default())
    }

    pub fn with_config(view: BattleView<'a>, config: PathfinderConfig) -> Self {
        Self { view, config }
    }

    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    /// Route from `start` to `target` for a `footprint`-sized mover.
    ///
    /// Returns the anchors to step through, excluding `start`. An empty result
    /// means no move is available; it is never an error for callers.
    pub fn find_path(
        &self,
        start: GridPosition,
        target: GridPosition,
        footprint: Footprint,
        mover: Option<UnitId>,
    ) -> Vec<GridPosition> {
        match self.try_find_path(start, target, footprint, mover) {
            Ok(result) => result.steps,
            Err(err) => {
                error!(%start, %target, mover = ?mover, error = %err, "path reconstruction failed");
                Vec::new()
            }
        }
    }

    /// Like [`Self::find_path`], but reports the route kind and surfaces
    /// internal failures.
    pub fn try_find_path(
        &self,
        start: GridPosition,
        target: GridPosition,
        footprint: Footprint,
        mover: Option<UnitId>,
    ) -> Result<PathResult, PathError> {
        if start == target {
            return Ok(PathResult {
                steps: Vec::new(),
                route: Route::Direct,
            });
        }

        let walk = Walkability::new(self.view, start, footprint, mover, target);

        if walk.is_anchor_walkable(target, footprint) {
            let direct = node::search(
                &walk,
                start,
                target,
                footprint,
                self.config.max_iterations,
                self.config.max_path_length,
            )?;
            if let Some(steps) = direct {
                debug!(%start, %target, len = steps.len(), "direct route found");
                return Ok(PathResult {
                    steps,
                    route: Route::Direct,
                });
            }
        }

        match fallback::ring_search(&walk, start, footprint, &self.config)? {
            Some(hit) => Ok(PathResult {
                steps: hit.steps,
                route: Route::Fallback {
                    radius: hit.radius,
                    anchor: hit.anchor,
                },
            }),
            None => {
                debug!(%start, %target, "no route after fallback");
                Ok(PathResult::unreachable())
            }
        }
    }

    /// True if every cell of `footprint` at `anchor` is walkable for `mover`
    /// travelling from `start` toward `target`.
    pub fn is_anchor_walkable(
        &self,
        anchor: GridPosition,
        footprint: Footprint,
        start: GridPosition,
        mover: Option<UnitId>,
        target: GridPosition,
    ) -> bool {
        Walkability::new(self.view, start, footprint, mover, target)
            .is_anchor_walkable(anchor, footprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridMap;
    use crate::session::BattleSession;
    use crate::unit::{Faction, UnitState};

    fn p(x: i32, y: i32) -> GridPosition {
        GridPosition::new(x, y)
    }

    struct Battle {
        grid: GridMap,
        session: BattleSession,
    }

    impl Battle {
        fn new(width: u32, height: u32) -> Self {
            Self {
                grid: GridMap::new(width, height),
                session: BattleSession::new(0),
            }
        }

        fn unit(mut self, id: u32, faction: Faction, at: GridPosition, footprint: Footprint) -> Self {
            let unit = UnitState::new(UnitId(id), faction, at).with_footprint(footprint);
            self.grid.place_unit(unit.id, at, footprint).unwrap();
            self.session.add_unit(unit);
            self
        }

        fn pathfinder(&self) -> Pathfinder<'_> {
            Pathfinder::new(BattleView::new(&self.grid, &self.session))
        }
    }

    #[test]
    fn straight_corridor() {
        let battle = Battle::new(1, 4).unit(1, Faction::Hero, p(0, 0), Footprint::SINGLE);
        let path = battle
            .pathfinder()
            .find_path(p(0, 0), p(0, 3), Footprint::SINGLE, Some(UnitId(1)));
        assert_eq!(path, vec![p(0, 1), p(0, 2), p(0, 3)]);
    }

    #[test]
    fn start_equal_to_target_is_empty() {
        let battle = Battle::new(3, 3).unit(1, Faction::Hero, p(1, 1), Footprint::SINGLE);
        let result = battle
            .pathfinder()
            .try_find_path(p(1, 1), p(1, 1), Footprint::SINGLE, Some(UnitId(1)))
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.route, Route::Direct);
    }

    #[test]
    fn identical_queries_give_identical_paths() {
        let mut battle = Battle::new(8, 8).unit(1, Faction::Hero, p(0, 0), Footprint::SINGLE);
        battle.grid.add_wall(p(3, 0), p(3, 5)).unwrap();
        battle.grid.add_wall(p(5, 2), p(5, 7)).unwrap();

        let finder = battle.pathfinder();
        let first = finder.find_path(p(0, 0), p(7, 7), Footprint::SINGLE, Some(UnitId(1)));
        let second = finder.find_path(p(0, 0), p(7, 7), Footprint::SINGLE, Some(UnitId(1)));
        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert_eq!(first.last(), Some(&p(7, 7)));
    }

    #[test]
    fn allies_are_passed_through() {
        let battle = Battle::new(1, 4)
            .unit(1, Faction::Hero, p(0, 0), Footprint::SINGLE)
            .unit(2, Faction::Hero, p(0, 1), Footprint::SINGLE);
        let path = battle
            .pathfinder()
            .find_path(p(0, 0), p(0, 3), Footprint::SINGLE, Some(UnitId(1)));
        assert_eq!(path, vec![p(0, 1), p(0, 2), p(0, 3)]);
    }

    #[test]
    fn enemies_block_the_only_corridor() {
        let battle = Battle::new(1, 4)
            .unit(1, Faction::Hero, p(0, 0), Footprint::SINGLE)
            .unit(2, Faction::Enemy, p(0, 1), Footprint::SINGLE);
        let result = battle
            .pathfinder()
            .try_find_path(p(0, 0), p(0, 3), Footprint::SINGLE, Some(UnitId(1)))
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.route, Route::Unreachable);
    }

    #[test]
    fn occupied_target_cell_is_reachable() {
        let battle = Battle::new(1, 4)
            .unit(1, Faction::Hero, p(0, 0), Footprint::SINGLE)
            .unit(2, Faction::Enemy, p(0, 3), Footprint::SINGLE);
        let path = battle
            .pathfinder()
            .find_path(p(0, 0), p(0, 3), Footprint::SINGLE, Some(UnitId(1)));
        assert_eq!(path, vec![p(0, 1), p(0, 2), p(0, 3)]);
    }

    #[test]
    fn wide_unit_falls_back_to_adjacent_anchor() {
        let wide = Footprint::new(2, 1);
        let battle = Battle::new(2, 4)
            .unit(1, Faction::Hero, p(0, 0), wide)
            .unit(2, Faction::Enemy, p(1, 2), Footprint::SINGLE);
        let finder = battle.pathfinder();

        assert!(!finder.is_anchor_walkable(p(0, 2), wide, p(0, 0), Some(UnitId(1)), p(0, 2)));

        let result = finder
            .try_find_path(p(0, 0), p(0, 2), wide, Some(UnitId(1)))
            .unwrap();
        assert_eq!(
            result.route,
            Route::Fallback {
                radius: 1,
                anchor: p(0, 1)
            }
        );
        assert_eq!(result.steps, vec![p(0, 1)]);
    }

    #[test]
    fn fallback_prefers_closest_candidate() {
        let mut battle = Battle::new(5, 5).unit(1, Faction::Hero, p(2, 0), Footprint::SINGLE);
        battle.grid.set_passable(p(2, 2), false).unwrap();

        let target = p(2, 2);
        let result = battle
            .pathfinder()
            .try_find_path(p(2, 0), target, Footprint::SINGLE, Some(UnitId(1)))
            .unwrap();
        let Route::Fallback { radius, anchor } = result.route else {
            panic!("expected fallback route, got {:?}", result.route);
        };
        assert_eq!(radius, 1);
        assert_eq!(anchor, p(2, 1));
        let best = fallback::ring(target, 1)
            .map(|c| node::heuristic(c, target))
            .min()
            .unwrap();
        assert_eq!(node::heuristic(anchor, target), best);
        assert_eq!(result.steps, vec![p(2, 1)]);
    }

    #[test]
    fn fallback_gives_up_when_first_ring_is_cut_off() {
        let mut battle = Battle::new(7, 7).unit(1, Faction::Hero, p(0, 0), Footprint::SINGLE);
        let target = p(3, 3);
        for wall in [
            target,
            p(2, 2),
            p(4, 2),
            p(2, 4),
            p(4, 4),
            p(3, 1),
            p(1, 3),
            p(5, 3),
            p(3, 5),
        ] {
            battle.grid.set_passable(wall, false).unwrap();
        }

        let finder = battle.pathfinder();
        let first_ring: Vec<_> = fallback::ring(target, 1)
            .filter(|c| {
                finder.is_anchor_walkable(*c, Footprint::SINGLE, p(0, 0), Some(UnitId(1)), target)
            })
            .collect();
        assert_eq!(first_ring, vec![p(3, 2), p(2, 3), p(4, 3), p(3, 4)]);

        let result = finder
            .try_find_path(p(0, 0), target, Footprint::SINGLE, Some(UnitId(1)))
            .unwrap();
        assert_eq!(result.route, Route::Unreachable);
        assert!(result.is_empty());
    }

    #[test]
    fn every_path_cell_is_walkable() {
        let wide = Footprint::new(2, 2);
        let mut battle = Battle::new(10, 10)
            .unit(1, Faction::Hero, p(0, 0), wide)
            .unit(2, Faction::Hero, p(4, 4), Footprint::SINGLE)
            .unit(3, Faction::Enemy, p(6, 1), Footprint::new(2, 1));
        battle.grid.add_wall(p(3, 0), p(3, 6)).unwrap();
        battle
            .grid
            .place_prop(crate::unit::PropId(1), p(7, 6), Footprint::SINGLE)
            .unwrap();

        let finder = battle.pathfinder();
        let target = p(8, 8);
        let path = finder.find_path(p(0, 0), target, wide, Some(UnitId(1)));
        assert!(!path.is_empty());
        for step in &path {
            assert!(
                finder.is_anchor_walkable(*step, wide, p(0, 0), Some(UnitId(1)), target),
                "{step} is not walkable"
            );
        }
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1);
        }
    }

    #[test]
    fn unknown_mover_treats_units_as_blocking() {
        let battle = Battle::new(1, 4)
            .unit(1, Faction::Hero, p(0, 0), Footprint::SINGLE)
            .unit(2, Faction::Hero, p(0, 1), Footprint::SINGLE);
        let finder = battle.pathfinder();

        assert!(finder.find_path(p(0, 0), p(0, 3), Footprint::SINGLE, None).is_empty());
        assert!(
            finder
                .find_path(p(0, 0), p(0, 3), Footprint::SINGLE, Some(UnitId(99)))
                .is_empty()
        );
        assert!(
            !finder
                .find_path(p(0, 0), p(0, 3), Footprint::SINGLE, Some(UnitId(1)))
                .is_empty()
        );
    }

    #[test]
    fn iteration_cap_stops_search() {
        let battle = Battle::new(1, 4).unit(1, Faction::Hero, p(0, 0), Footprint::SINGLE);
        let config = PathfinderConfig {
            max_iterations: 1,
            fallback_iterations: 1,
            ..PathfinderConfig::default()
        };
        let finder =
            Pathfinder::with_config(BattleView::new(&battle.grid, &battle.session), config);
        let result = finder
            .try_find_path(p(0, 0), p(0, 3), Footprint::SINGLE, Some(UnitId(1)))
            .unwrap();
        assert_eq!(result.route, Route::Unreachable);
    }
}
