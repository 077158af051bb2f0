//! Grid model for path search
//!
//! A [`Grid`] is a fixed `rows x cols` field of [`GridNode`]s stored row-major.
//! Each node carries exactly one [`NodeType`]. The start and end nodes are
//! placed when the grid is built and cannot be retyped afterwards; walls are
//! toggled by the caller between runs, and `visited`/`path` marks are written
//! by the search adapter.

use crate::engine::errors::EngineError;
use crate::model::Model;
use std::fmt;

/// Position of a node in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Neighbor expansion order: right, down, left, up
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Type tag of a grid node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeType {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    Visited,
    Path,
}

impl NodeType {
    pub fn label(self) -> &'static str {
        match self {
            NodeType::Empty => "empty",
            NodeType::Wall => "wall",
            NodeType::Start => "start",
            NodeType::End => "end",
            NodeType::Visited => "visited",
            NodeType::Path => "path",
        }
    }

    /// Start and end are fixed once placed
    pub fn is_fixed(self) -> bool {
        matches!(self, NodeType::Start | NodeType::End)
    }
}

/// One cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridNode {
    pub coord: Coord,
    pub kind: NodeType,
}

/// Row-major grid of typed nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    nodes: Vec<GridNode>,
    start: Coord,
    end: Coord,
}

impl Grid {
    /// Build an empty grid with `start` and `end` placed
    pub fn new(rows: usize, cols: usize, start: Coord, end: Coord) -> Result<Self, EngineError> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::InvalidGrid(format!(
                "grid must have at least one row and column, got {}x{}",
                rows, cols
            )));
        }
        for coord in [start, end] {
            if coord.row >= rows || coord.col >= cols {
                return Err(EngineError::CoordinateOutOfBounds { coord, rows, cols });
            }
        }
        if start == end {
            return Err(EngineError::InvalidGrid(format!(
                "start and end must differ, both are {}",
                start
            )));
        }

        let mut nodes = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                nodes.push(GridNode {
                    coord: Coord::new(row, col),
                    kind: NodeType::Empty,
                });
            }
        }

        let mut grid = Grid {
            rows,
            cols,
            nodes,
            start,
            end,
        };
        let start_index = grid.index(start);
        let end_index = grid.index(end);
        grid.nodes[start_index].kind = NodeType::Start;
        grid.nodes[end_index].kind = NodeType::End;
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn end(&self) -> Coord {
        self.end
    }

    pub fn nodes(&self) -> &[GridNode] {
        &self.nodes
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row * self.cols + coord.col
    }

    fn check_bounds(&self, coord: Coord) -> Result<(), EngineError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(EngineError::CoordinateOutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Type of the node at `coord`; must be in bounds
    pub fn kind(&self, coord: Coord) -> NodeType {
        self.nodes[self.index(coord)].kind
    }

    /// Place or remove a wall
    pub fn set_wall(&mut self, coord: Coord, wall: bool) -> Result<(), EngineError> {
        self.check_bounds(coord)?;
        let index = self.index(coord);
        if self.nodes[index].kind.is_fixed() {
            return Err(EngineError::ImmutableNode(coord));
        }
        self.nodes[index].kind = if wall { NodeType::Wall } else { NodeType::Empty };
        Ok(())
    }

    /// Flip a node between wall and empty, returning whether it is now a wall
    pub fn toggle_wall(&mut self, coord: Coord) -> Result<bool, EngineError> {
        self.check_bounds(coord)?;
        let wall = self.kind(coord) != NodeType::Wall;
        self.set_wall(coord, wall)?;
        Ok(wall)
    }

    /// Remove every wall and search mark
    pub fn clear_walls(&mut self) {
        for node in &mut self.nodes {
            if !node.kind.is_fixed() {
                node.kind = NodeType::Empty;
            }
        }
    }

    /// Remove `visited` and `path` marks, keeping walls
    pub fn clear_search(&mut self) {
        for node in &mut self.nodes {
            if matches!(node.kind, NodeType::Visited | NodeType::Path) {
                node.kind = NodeType::Empty;
            }
        }
    }

    /// Mark a node as part of the search trace. Start and end are never retyped.
    pub fn retag(&mut self, coord: Coord, kind: NodeType) {
        let index = self.index(coord);
        if self.nodes[index].kind.is_fixed() || kind.is_fixed() {
            return;
        }
        self.nodes[index].kind = kind;
    }

    /// In-bounds neighbors of `coord` in right, down, left, up order
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            let row = coord.row.checked_add_signed(dr)?;
            let col = coord.col.checked_add_signed(dc)?;
            let next = Coord::new(row, col);
            self.contains(next).then_some(next)
        })
    }

    pub fn count(&self, kind: NodeType) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }
}

impl Model for Grid {
    type Snapshot = Grid;

    fn snapshot(&self) -> Grid {
        self.clone()
    }
}
