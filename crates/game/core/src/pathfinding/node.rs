use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use super::walkability::Walkability;
use crate::error::PathError;
use crate::grid::{Footprint, GridPosition};

pub(crate) const STEP_COST: u32 = 10;

#[inline]
pub(crate) fn heuristic(from: GridPosition, to: GridPosition) -> u32 {
    from.manhattan(to) * STEP_COST
}

/// Search node. Lives only for the duration of one search run.
#[derive(Clone, Debug)]
pub(crate) struct PathNode {
    pub position: GridPosition,
    /// Index of the parent in the arena. `None` only for the start node.
    pub parent: Option<usize>,
    pub g: u32,
    pub h: u32,
}

impl PathNode {
    #[inline]
    pub fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// Open-set key: lowest F, then lowest H, then earliest first insertion.
/// The arena index doubles as the insertion sequence.
type OpenKey = Reverse<(u32, u32, usize)>;

/// Single A* run from `start` to `goal` for `footprint`.
///
/// Returns `Ok(None)` when the open set empties or the expansion cap is hit.
pub(crate) fn search(
    walk: &Walkability<'_>,
    start: GridPosition,
    goal: GridPosition,
    footprint: Footprint,
    max_iterations: u32,
    max_path_length: usize,
) -> Result<Option<Vec<GridPosition>>, PathError> {
    let mut nodes = vec![PathNode {
        position: start,
        parent: None,
        g: 0,
        h: heuristic(start, goal),
    }];
    let mut index: HashMap<GridPosition, usize> = HashMap::from([(start, 0)]);
    let mut closed = vec![false];
    let mut open: BinaryHeap<OpenKey> = BinaryHeap::new();
    open.push(Reverse((nodes[0].f(), nodes[0].h, 0)));

    let mut iterations = 0u32;
    while let Some(Reverse((f, _, current))) = open.pop() {
        if closed[current] || f != nodes[current].f() {
            continue;
        }
        if iterations >= max_iterations {
            return Ok(None);
        }
        iterations += 1;

        if nodes[current].position == goal {
            return reconstruct(&nodes, current, max_path_length).map(Some);
        }
        closed[current] = true;

        let position = nodes[current].position;
        let g = nodes[current].g + STEP_COST;
        for neighbor in position.neighbors() {
            if !walk.is_anchor_walkable(neighbor, footprint) {
                continue;
            }
            match index.get(&neighbor) {
                Some(&existing) => {
                    if closed[existing] || g >= nodes[existing].g {
                        continue;
                    }
                    let node = &mut nodes[existing];
                    node.g = g;
                    node.parent = Some(current);
                    open.push(Reverse((node.f(), node.h, existing)));
                }
                None => {
                    let id = nodes.len();
                    let node = PathNode {
                        position: neighbor,
                        parent: Some(current),
                        g,
                        h: heuristic(neighbor, goal),
                    };
                    open.push(Reverse((node.f(), node.h, id)));
                    nodes.push(node);
                    closed.push(false);
                    index.insert(neighbor, id);
                }
            }
        }
    }
    Ok(None)
}

/// Follows parent links from `goal` back to the start. The start itself is
/// excluded from the returned path.
pub(crate) fn reconstruct(
    nodes: &[PathNode],
    goal: usize,
    max_path_length: usize,
) -> Result<Vec<GridPosition>, PathError> {
    let mut path = Vec::new();
    let mut current = goal;
    while let Some(parent) = nodes[current].parent {
        if path.len() >= max_path_length {
            return Err(PathError::CorruptParentChain {
                start: nodes[0].position,
                goal: nodes[goal].position,
                steps: path.len(),
            });
        }
        path.push(nodes[current].position);
        current = parent;
    }
    path.reverse();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: i32, parent: Option<usize>) -> PathNode {
        PathNode {
            position: GridPosition::new(x, 0),
            parent,
            g: 0,
            h: 0,
        }
    }

    #[test]
    fn reconstruct_excludes_start() {
        let nodes = vec![node(0, None), node(1, Some(0)), node(2, Some(1))];
        let path = reconstruct(&nodes, 2, 1000).unwrap();
        assert_eq!(path, vec![GridPosition::new(1, 0), GridPosition::new(2, 0)]);
    }

    #[test]
    fn cyclic_parent_chain_is_reported() {
        let nodes = vec![node(0, None), node(1, Some(2)), node(2, Some(1))];
        let err = reconstruct(&nodes, 2, 1000).unwrap_err();
        assert!(matches!(err, PathError::CorruptParentChain { steps: 1000, .. }));
    }
}
