//! Array elements and the sequence model used by the sorting adapters
//!
//! An [`Element`] pairs an integer value with a single [`ElementState`] tag.
//! [`ArrayModel`] owns the sequence for the duration of a run. Mutations are
//! index-addressed and in-bounds by construction: adapters only ever address
//! the fixed-size sequence their run was started with.
//!
//! # Conservation
//!
//! No mutation here creates or destroys a value except [`ArrayModel::replace`],
//! and adapters only use `replace` in ways that keep the multiset of values
//! intact between two snapshots. [`ArrayModel::swap`] exchanges two values in
//! one step so no snapshot can observe a half-finished swap.

use crate::engine::errors::EngineError;
use crate::model::Model;
use rand::Rng;
use std::fmt;
use std::ops::{Bound, RangeBounds, RangeInclusive};

/// Semantic display tag of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementState {
    #[default]
    Default,
    Comparing,
    Swapping,
    Current,
    Pivot,
    Sorted,
}

impl ElementState {
    pub const ALL: [ElementState; 6] = [
        ElementState::Default,
        ElementState::Comparing,
        ElementState::Swapping,
        ElementState::Current,
        ElementState::Pivot,
        ElementState::Sorted,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ElementState::Default => "default",
            ElementState::Comparing => "comparing",
            ElementState::Swapping => "swapping",
            ElementState::Current => "current",
            ElementState::Pivot => "pivot",
            ElementState::Sorted => "sorted",
        }
    }
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One visualized array slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element {
    pub value: i32,
    pub state: ElementState,
}

impl Element {
    pub fn new(value: i32) -> Self {
        Element {
            value,
            state: ElementState::Default,
        }
    }
}

/// The sequence of elements a sorting run mutates
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrayModel {
    elements: Vec<Element>,
}

impl ArrayModel {
    /// Build a model with every element tagged `default`
    pub fn from_values<I: IntoIterator<Item = i32>>(values: I) -> Self {
        ArrayModel {
            elements: values.into_iter().map(Element::new).collect(),
        }
    }

    /// Generate `len` values uniformly drawn from `range`
    pub fn random<R: Rng + ?Sized>(
        len: usize,
        range: RangeInclusive<i32>,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        if range.is_empty() {
            return Err(EngineError::InvalidConfig(format!(
                "value range {}..={} is empty",
                range.start(),
                range.end()
            )));
        }
        let values = (0..len).map(|_| rng.random_range(range.clone()));
        Ok(Self::from_values(values))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn value(&self, index: usize) -> i32 {
        self.elements[index].value
    }

    pub fn state(&self, index: usize) -> ElementState {
        self.elements[index].state
    }

    /// Current values in slot order
    pub fn values(&self) -> Vec<i32> {
        self.elements.iter().map(|e| e.value).collect()
    }

    /// Overwrite the value at `index`, keeping its tag
    pub fn replace(&mut self, index: usize, value: i32) {
        self.elements[index].value = value;
    }

    /// Set the tag at `index`
    pub fn retag(&mut self, index: usize, state: ElementState) {
        self.elements[index].state = state;
    }

    /// Set the tag of every element in `range`
    pub fn retag_all<R: RangeBounds<usize>>(&mut self, range: R, state: ElementState) {
        let bounds: (Bound<usize>, Bound<usize>) =
            (range.start_bound().cloned(), range.end_bound().cloned());
        for element in &mut self.elements[bounds] {
            element.state = state;
        }
    }

    /// Exchange the values at `a` and `b`; tags stay with their slots
    pub fn swap(&mut self, a: usize, b: usize) {
        let value_a = self.elements[a].value;
        self.elements[a].value = self.elements[b].value;
        self.elements[b].value = value_a;
    }
}

impl Model for ArrayModel {
    type Snapshot = Vec<Element>;

    fn snapshot(&self) -> Vec<Element> {
        self.elements.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_snapshot_is_detached() {
        let mut model = ArrayModel::from_values([3, 1, 2]);
        let before = model.snapshot();

        model.swap(0, 1);
        model.retag(2, ElementState::Pivot);

        assert_eq!(before.iter().map(|e| e.value).collect::<Vec<_>>(), vec![3, 1, 2]);
        assert!(before.iter().all(|e| e.state == ElementState::Default));
        assert_eq!(model.values(), vec![1, 3, 2]);
    }

    #[test]
    fn test_swap_keeps_tags_in_place() {
        let mut model = ArrayModel::from_values([5, 9]);
        model.retag(0, ElementState::Swapping);
        model.swap(0, 1);

        assert_eq!(model.value(0), 9);
        assert_eq!(model.state(0), ElementState::Swapping);
        assert_eq!(model.state(1), ElementState::Default);
    }

    #[test]
    fn test_retag_all_ranges() {
        let mut model = ArrayModel::from_values([1, 2, 3, 4, 5]);
        model.retag_all(3.., ElementState::Sorted);
        model.retag_all(..1, ElementState::Current);

        let states: Vec<_> = model.elements().iter().map(|e| e.state).collect();
        assert_eq!(
            states,
            vec![
                ElementState::Current,
                ElementState::Default,
                ElementState::Default,
                ElementState::Sorted,
                ElementState::Sorted,
            ]
        );

        model.retag_all(.., ElementState::Default);
        assert!(model.elements().iter().all(|e| e.state == ElementState::Default));
    }

    #[test]
    fn test_random_respects_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let model = ArrayModel::random(200, 1..=100, &mut rng).unwrap();

        assert_eq!(model.len(), 200);
        assert!(model.values().iter().all(|v| (1..=100).contains(v)));
    }

    #[test]
    fn test_random_rejects_empty_range() {
        let mut rng = StdRng::seed_from_u64(7);
        #[allow(clippy::reversed_empty_ranges)]
        let result = ArrayModel::random(10, 50..=10, &mut rng);
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }
}
