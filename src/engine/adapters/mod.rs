//! Algorithm adapters
//!
//! Each adapter is one algorithm written against a [`StepContext`]. Adapters
//! differ only in how they compare and mutate; all of them follow the same
//! suspend/cancel contract:
//!
//! - call [`StepContext::checkpoint`] before starting a new mutation,
//! - call [`StepContext::step`] (or [`StepContext::pause`]) after each visible
//!   change, and propagate its result with `?`,
//! - on normal completion, leave the model in its terminal tagging
//!   (`sorted` for arrays, `path`/`visited` for grids) before the final step.
//!
//! # Adapters
//!
//! - [`bubble`], [`selection`], [`insertion`], [`merge`], [`quick`]: sorting over
//!   an [`ArrayModel`]
//! - [`bfs`]: breadth-first search over a [`Grid`](crate::model::grid::Grid)

pub mod bfs;
pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

use crate::engine::errors::EngineError;
use crate::engine::scheduler::{StepContext, StepResult};
use crate::model::element::ArrayModel;
use crate::model::Model;
use std::fmt;
use std::str::FromStr;

pub use bfs::GridBfs;
pub use bubble::BubbleSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use selection::SelectionSort;

/// A pluggable algorithm that drives visible mutations of a model
pub trait Adapter<M: Model> {
    /// Short display name
    fn name(&self) -> &'static str;

    /// Run to completion, or return `Err(Cancelled)` as soon as cancellation is observed
    fn run(&self, ctx: &mut StepContext<'_, M>) -> StepResult;
}

/// The sorting adapters available over an [`ArrayModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Quick => "quick",
        }
    }

    pub fn adapter(self) -> Box<dyn Adapter<ArrayModel>> {
        match self {
            SortAlgorithm::Bubble => Box::new(BubbleSort),
            SortAlgorithm::Selection => Box::new(SelectionSort),
            SortAlgorithm::Insertion => Box::new(InsertionSort),
            SortAlgorithm::Merge => Box::new(MergeSort),
            SortAlgorithm::Quick => Box::new(QuickSort),
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any adapter the front end can select by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sort(SortAlgorithm),
    GridBfs,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Sort(sort) => sort.name(),
            Algorithm::GridBfs => "bfs",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name == "bfs" || name == "grid" {
            return Ok(Algorithm::GridBfs);
        }
        SortAlgorithm::ALL
            .into_iter()
            .find(|sort| sort.name() == name || format!("{}sort", sort.name()) == name)
            .map(Algorithm::Sort)
            .ok_or_else(|| EngineError::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm_names() {
        assert_eq!("bubble".parse::<Algorithm>().unwrap(), Algorithm::Sort(SortAlgorithm::Bubble));
        assert_eq!("QuickSort".parse::<Algorithm>().unwrap(), Algorithm::Sort(SortAlgorithm::Quick));
        assert_eq!(" bfs ".parse::<Algorithm>().unwrap(), Algorithm::GridBfs);
        assert!(matches!(
            "bogo".parse::<Algorithm>(),
            Err(EngineError::UnknownAlgorithm(ref name)) if name == "bogo"
        ));
    }

    #[test]
    fn test_adapter_names_match_registry() {
        for sort in SortAlgorithm::ALL {
            assert_eq!(sort.adapter().name(), sort.name());
        }
        assert_eq!(GridBfs.name(), Algorithm::GridBfs.name());
    }
}
