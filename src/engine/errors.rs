//! Error types for the visualization engine
//!
//! This module defines [`EngineError`], which covers everything that can go wrong
//! around a run: loading configuration, building inputs, and misusing a [`Run`].
//!
//! Algorithm adapters never produce an `EngineError`. Their only abnormal exit is
//! cancellation, which is a terminal state ([`RunState::Cancelled`]) rather than a
//! fault.
//!
//! [`Run`]: crate::engine::scheduler::Run
//! [`RunState::Cancelled`]: crate::engine::scheduler::RunState::Cancelled

use crate::engine::scheduler::RunState;
use crate::model::grid::Coord;
use std::fmt;

/// Errors raised outside of algorithm execution
#[derive(Debug)]
pub enum EngineError {
    /// Reading or writing a file failed
    Io(std::io::Error),

    /// The TOML configuration could not be parsed or serialized
    ConfigParse(String),

    /// The configuration parsed but holds unusable values
    InvalidConfig(String),

    /// No adapter is registered under this name
    UnknownAlgorithm(String),

    /// A grid coordinate lies outside the grid
    CoordinateOutOfBounds {
        coord: Coord,
        rows: usize,
        cols: usize,
    },

    /// Attempted to retype the start or end node
    ImmutableNode(Coord),

    /// The grid layout itself is unusable
    InvalidGrid(String),

    /// A run can only be driven once, from the idle state
    RunNotIdle(RunState),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Io(e) => write!(f, "I/O error: {}", e),
            EngineError::ConfigParse(message) => {
                write!(f, "Config parse error: {}", message)
            }
            EngineError::InvalidConfig(message) => {
                write!(f, "Invalid config: {}", message)
            }
            EngineError::UnknownAlgorithm(name) => {
                write!(
                    f,
                    "Unknown algorithm '{}' (expected one of: bubble, selection, insertion, merge, quick, bfs)",
                    name
                )
            }
            EngineError::CoordinateOutOfBounds { coord, rows, cols } => {
                write!(
                    f,
                    "Coordinate {} is outside the {}x{} grid",
                    coord, rows, cols
                )
            }
            EngineError::ImmutableNode(coord) => {
                write!(f, "Node at {} is a start or end node and cannot change", coord)
            }
            EngineError::InvalidGrid(message) => write!(f, "Invalid grid: {}", message),
            EngineError::RunNotIdle(state) => {
                write!(f, "Run cannot be driven again: it is already {}", state)
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e)
    }
}
