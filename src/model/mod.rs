//! Visual models driven by the algorithm adapters
//!
//! This module provides the two models a run can mutate:
//! - [`element`]: a sequence of [`element::Element`]s (value + display tag) for the sorting adapters
//! - [`grid`]: a fixed-size [`grid::Grid`] of typed cells for path search
//!
//! # Snapshots
//!
//! Every model can materialize a [`Model::Snapshot`], an owned copy of its
//! current state. Snapshots never alias the model, so a caller may keep one
//! across renders and it will not change when the run continues.
//!
//! # Tags
//!
//! Tags ([`element::ElementState`], [`grid::NodeType`]) exist for rendering.
//! Algorithms decide on values and walls only, never on a tag they set.

pub mod element;
pub mod grid;

use crate::snapshot::Snapshot;

/// A mutable visual model owned by one run at a time
pub trait Model: Clone {
    /// The owned, point-in-time copy handed to observers
    type Snapshot: Snapshot;

    /// Materialize the current state as an owned copy
    fn snapshot(&self) -> Self::Snapshot;
}
