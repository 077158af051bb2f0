//! Breadth-first search over a [`Grid`]
//!
//! The start node is enqueued first and neighbors are expanded in a fixed
//! right, down, left, up order, so the same grid always animates the same way.
//! Every dequeued node other than the start is tagged `visited` with the short
//! [`Pace::Visit`] delay. When the end node is dequeued the path is rebuilt from
//! the parent map and tagged `path` from the start side towards the end.
//!
//! An unreachable end is not an error: the queue drains and the run completes
//! with `visited` marks only.

use super::Adapter;
use crate::engine::scheduler::{Pace, StepContext, StepResult};
use crate::model::grid::{Coord, Grid, NodeType};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, Default)]
pub struct GridBfs;

impl Adapter<Grid> for GridBfs {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn run(&self, ctx: &mut StepContext<'_, Grid>) -> StepResult {
        ctx.model_mut().clear_search();

        let start = ctx.model().start();
        let end = ctx.model().end();

        let mut queue = VecDeque::from([start]);
        let mut seen: FxHashSet<Coord> = FxHashSet::default();
        seen.insert(start);
        let mut parents: FxHashMap<Coord, Coord> = FxHashMap::default();

        while let Some(current) = queue.pop_front() {
            ctx.checkpoint()?;

            if current == end {
                return mark_path(ctx, &parents, start, end);
            }

            if current != start {
                ctx.model_mut().retag(current, NodeType::Visited);
                ctx.pause(Pace::Visit)?;
            }

            let grid = ctx.model();
            for next in grid.neighbors(current) {
                if grid.kind(next) != NodeType::Wall && seen.insert(next) {
                    parents.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        Ok(())
    }
}

/// Walk the parent chain back from `end` and tag the nodes between start and end
fn mark_path(
    ctx: &mut StepContext<'_, Grid>,
    parents: &FxHashMap<Coord, Coord>,
    start: Coord,
    end: Coord,
) -> StepResult {
    let mut path = Vec::new();
    let mut cursor = end;
    while let Some(&parent) = parents.get(&cursor) {
        if parent == start {
            break;
        }
        path.push(parent);
        cursor = parent;
    }
    path.reverse();

    for coord in path {
        ctx.checkpoint()?;
        ctx.model_mut().retag(coord, NodeType::Path);
        ctx.step()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scheduler::{Run, RunOptions, RunState};

    #[test]
    fn test_straight_corridor() {
        let grid = Grid::new(1, 5, Coord::new(0, 0), Coord::new(0, 4)).unwrap();
        let mut run = Run::new(grid, Box::new(GridBfs), RunOptions::immediate());
        let (outcome, snapshots) = run.collect_snapshots().unwrap();

        assert_eq!(outcome.state, RunState::Completed);
        // three visits, then three path marks
        assert_eq!(snapshots.len(), 6);

        let last = snapshots.last().unwrap();
        assert_eq!(last.count(NodeType::Path), 3);
        assert_eq!(last.kind(Coord::new(0, 0)), NodeType::Start);
        assert_eq!(last.kind(Coord::new(0, 4)), NodeType::End);

        // path is tagged from the start side forward
        assert_eq!(snapshots[3].kind(Coord::new(0, 1)), NodeType::Path);
        assert_eq!(snapshots[3].kind(Coord::new(0, 3)), NodeType::Visited);
    }

    #[test]
    fn test_adjacent_start_and_end() {
        let grid = Grid::new(3, 3, Coord::new(1, 1), Coord::new(1, 2)).unwrap();
        let mut run = Run::new(grid, Box::new(GridBfs), RunOptions::immediate());
        let (outcome, snapshots) = run.collect_snapshots().unwrap();

        assert_eq!(outcome.state, RunState::Completed);
        assert!(snapshots.is_empty());
        assert_eq!(run.model().count(NodeType::Path), 0);
    }

    #[test]
    fn test_visit_order_is_right_down_left_up() {
        let grid = Grid::new(3, 3, Coord::new(1, 1), Coord::new(2, 2)).unwrap();
        let mut visits = Vec::new();
        let mut previous = grid.clone();
        let mut run = Run::new(grid, Box::new(GridBfs), RunOptions::immediate());
        let mut observe = |_step: usize, snapshot: &Grid| {
            for node in snapshot.nodes() {
                if node.kind == NodeType::Visited && previous.kind(node.coord) != NodeType::Visited {
                    visits.push(node.coord);
                }
            }
            previous = snapshot.clone();
        };
        run.drive(&mut observe).unwrap();

        assert_eq!(
            &visits[..4],
            &[
                Coord::new(1, 2),
                Coord::new(2, 1),
                Coord::new(1, 0),
                Coord::new(0, 1),
            ]
        );
    }
}
