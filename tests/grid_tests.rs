// Integration tests for breadth-first search over a grid

use algotty::config::Config;
use algotty::engine::adapters::GridBfs;
use algotty::engine::scheduler::{Run, RunOptions, RunState};
use algotty::model::grid::{Coord, Grid, NodeType};

fn default_grid() -> Grid {
    Config::default().build_grid().expect("default grid is valid")
}

fn run_bfs(grid: Grid) -> (Run<Grid>, Vec<Grid>) {
    let mut run = Run::new(grid, Box::new(GridBfs), RunOptions::immediate());
    let (outcome, snapshots) = run.collect_snapshots().unwrap();
    assert_eq!(outcome.state, RunState::Completed);
    (run, snapshots)
}

/// Nodes reachable from `from` without crossing walls, excluding `from` itself
fn reachable(grid: &Grid, from: Coord) -> usize {
    let mut seen = vec![from];
    let mut frontier = vec![from];
    while let Some(coord) = frontier.pop() {
        for next in grid.neighbors(coord) {
            if grid.kind(next) != NodeType::Wall && !seen.contains(&next) {
                seen.push(next);
                frontier.push(next);
            }
        }
    }
    seen.len() - 1
}

#[test]
fn test_walled_off_end_completes_without_path() {
    let mut grid = default_grid();
    assert_eq!(grid.start(), Coord::new(2, 2));
    assert_eq!(grid.end(), Coord::new(12, 22));

    // a full column of walls between start and end
    for row in 0..grid.rows() {
        grid.set_wall(Coord::new(row, 10), true).unwrap();
    }
    let expected_visits = reachable(&grid, grid.start());

    let (run, snapshots) = run_bfs(grid);
    let last = run.model();

    assert_eq!(last.count(NodeType::Path), 0);
    assert_eq!(last.count(NodeType::Visited), expected_visits);
    assert_eq!(snapshots.len(), expected_visits);
    // only the left of the wall is explored
    for node in last.nodes() {
        if node.kind == NodeType::Visited {
            assert!(node.coord.col < 10);
        }
    }
    assert_eq!(last.kind(Coord::new(12, 22)), NodeType::End);
}

#[test]
fn test_open_grid_finds_shortest_path() {
    let (run, snapshots) = run_bfs(default_grid());
    let last = run.model();

    // Manhattan distance 10 + 20, minus the start and end themselves
    assert_eq!(last.count(NodeType::Path), 29);
    assert_eq!(last.kind(Coord::new(2, 2)), NodeType::Start);
    assert_eq!(last.kind(Coord::new(12, 22)), NodeType::End);
    assert_eq!(snapshots.last(), Some(last));
}

#[test]
fn test_path_detours_around_walls() {
    let mut grid = Grid::new(5, 5, Coord::new(2, 0), Coord::new(2, 4)).unwrap();
    // wall the middle column except the top row
    for row in 1..5 {
        grid.set_wall(Coord::new(row, 2), true).unwrap();
    }

    let (run, _) = run_bfs(grid);
    let last = run.model();

    assert_eq!(last.kind(Coord::new(0, 2)), NodeType::Path);
    // up two, across four, down two: eight moves, seven interior nodes
    assert_eq!(last.count(NodeType::Path), 7);
}

#[test]
fn test_path_marks_appear_from_start_side() {
    let grid = Grid::new(1, 6, Coord::new(0, 0), Coord::new(0, 5)).unwrap();
    let (_, snapshots) = run_bfs(grid);

    let first_path_snapshot = snapshots
        .iter()
        .find(|s| s.count(NodeType::Path) == 1)
        .unwrap();
    assert_eq!(first_path_snapshot.kind(Coord::new(0, 1)), NodeType::Path);
}

#[test]
fn test_rerun_clears_previous_search() {
    let (run, _) = run_bfs(default_grid());
    let searched = run.model().clone();

    // a grid that still carries old marks searches the same way
    let (rerun, _) = run_bfs(searched);
    let (fresh, _) = run_bfs(default_grid());
    assert_eq!(rerun.model(), fresh.model());
}

#[test]
fn test_repeated_searches_emit_identical_traces() {
    let mut grid = default_grid();
    for col in 5..30 {
        grid.set_wall(Coord::new(7, col), true).unwrap();
    }

    let (_, first) = run_bfs(grid.clone());
    let (_, second) = run_bfs(grid);
    assert_eq!(first, second);
}

#[test]
fn test_cancelled_search_keeps_walls_and_endpoints() {
    let mut grid = default_grid();
    grid.set_wall(Coord::new(0, 0), true).unwrap();

    let mut run = Run::new(grid, Box::new(GridBfs), RunOptions::immediate());
    let flag = run.cancel_flag();
    let mut stop_early = |step: usize, _grid: &Grid| {
        if step == 5 {
            flag.cancel();
        }
    };
    let outcome = run.drive(&mut stop_early).unwrap();

    assert_eq!(outcome.state, RunState::Cancelled);
    assert_eq!(outcome.steps, 5);
    let model = run.model();
    assert_eq!(model.count(NodeType::Visited), 5);
    assert_eq!(model.kind(Coord::new(0, 0)), NodeType::Wall);
    assert_eq!(model.kind(model.start()), NodeType::Start);
    assert_eq!(model.kind(model.end()), NodeType::End);
}
