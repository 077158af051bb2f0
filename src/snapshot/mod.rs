// Snapshot history for inspecting a finished run

use crate::engine::scheduler::Observer;
use crate::model::element::Element;
use crate::model::grid::{Grid, GridNode};
use std::collections::VecDeque;
use std::mem;

/// An owned, point-in-time copy of a model
pub trait Snapshot: Clone {
    /// Estimate the memory usage of this snapshot in bytes
    fn estimated_size(&self) -> usize;
}

impl Snapshot for Vec<Element> {
    fn estimated_size(&self) -> usize {
        mem::size_of::<Self>() + self.len() * mem::size_of::<Element>()
    }
}

impl Snapshot for Grid {
    fn estimated_size(&self) -> usize {
        mem::size_of::<Self>() + self.nodes().len() * mem::size_of::<GridNode>()
    }
}

/// Bounded history of snapshots, indexed by absolute step number
///
/// Step 0 is whatever the caller pushes first (normally the pre-run model).
/// When a push would exceed the memory budget, the oldest snapshots are evicted
/// and [`Trace::first_step`] moves forward.
#[derive(Debug, Clone)]
pub struct Trace<S: Snapshot> {
    snapshots: VecDeque<S>,
    max_memory: usize,
    current_memory: usize,
    dropped: usize,
}

impl<S: Snapshot> Trace<S> {
    pub fn new(max_memory: usize) -> Self {
        Trace {
            snapshots: VecDeque::new(),
            max_memory,
            current_memory: 0,
            dropped: 0,
        }
    }

    /// Add a snapshot to history, evicting the oldest ones if needed
    pub fn push(&mut self, snapshot: S) {
        let snapshot_size = snapshot.estimated_size();

        while !self.snapshots.is_empty() && self.current_memory + snapshot_size > self.max_memory {
            if let Some(oldest) = self.snapshots.pop_front() {
                self.current_memory -= oldest.estimated_size();
                self.dropped += 1;
            }
        }

        self.current_memory += snapshot_size;
        self.snapshots.push_back(snapshot);
    }

    /// Get the snapshot recorded at `step`, if it is still retained
    pub fn get(&self, step: usize) -> Option<&S> {
        step.checked_sub(self.dropped)
            .and_then(|index| self.snapshots.get(index))
    }

    pub fn latest(&self) -> Option<&S> {
        self.snapshots.back()
    }

    /// Oldest step still retained
    pub fn first_step(&self) -> usize {
        self.dropped
    }

    /// Newest step recorded, or `None` when empty
    pub fn last_step(&self) -> Option<usize> {
        (!self.snapshots.is_empty()).then(|| self.dropped + self.snapshots.len() - 1)
    }

    /// Number of retained snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Number of snapshots evicted to stay under the budget
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current_memory = 0;
        self.dropped = 0;
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

/// Observer that records every emitted snapshot into a [`Trace`]
#[derive(Debug)]
pub struct Recorder<S: Snapshot> {
    trace: Trace<S>,
}

impl<S: Snapshot> Recorder<S> {
    /// Start a recording whose step 0 is `initial`
    pub fn new(initial: S, max_memory: usize) -> Self {
        let mut trace = Trace::new(max_memory);
        trace.push(initial);
        Recorder { trace }
    }

    pub fn trace(&self) -> &Trace<S> {
        &self.trace
    }

    pub fn into_trace(self) -> Trace<S> {
        self.trace
    }
}

impl<S: Snapshot> Observer<S> for Recorder<S> {
    fn on_snapshot(&mut self, _step: usize, snapshot: &S) {
        self.trace.push(snapshot.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::adapters::BubbleSort;
    use crate::engine::scheduler::{Run, RunOptions};
    use crate::model::element::ArrayModel;
    use crate::model::Model;

    fn snapshot(values: &[i32]) -> Vec<Element> {
        ArrayModel::from_values(values.iter().copied()).snapshot()
    }

    #[test]
    fn test_push_and_get() {
        let mut trace = Trace::new(usize::MAX);
        trace.push(snapshot(&[1]));
        trace.push(snapshot(&[2]));

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.first_step(), 0);
        assert_eq!(trace.last_step(), Some(1));
        assert_eq!(trace.get(1).unwrap()[0].value, 2);
        assert!(trace.get(2).is_none());
    }

    #[test]
    fn test_eviction_keeps_absolute_steps() {
        let size = snapshot(&[0, 0, 0]).estimated_size();
        let mut trace = Trace::new(size * 2);
        for v in 0..5 {
            trace.push(snapshot(&[v, v, v]));
        }

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.dropped(), 3);
        assert_eq!(trace.first_step(), 3);
        assert_eq!(trace.last_step(), Some(4));
        assert!(trace.get(2).is_none());
        assert_eq!(trace.get(3).unwrap()[0].value, 3);
        assert!(trace.memory_usage() <= trace.memory_limit());
    }

    #[test]
    fn test_oversized_snapshot_is_still_kept() {
        let mut trace = Trace::new(1);
        trace.push(snapshot(&[1, 2, 3]));
        trace.push(snapshot(&[4, 5, 6]));

        assert_eq!(trace.len(), 1);
        assert_eq!(trace.latest().unwrap()[0].value, 4);
    }

    #[test]
    fn test_recorder_captures_whole_run() {
        let model = ArrayModel::from_values([3, 2, 1]);
        let mut recorder = Recorder::new(model.snapshot(), usize::MAX);
        let mut run = Run::new(model, Box::new(BubbleSort), RunOptions::immediate());

        let outcome = run.drive(&mut recorder).unwrap();
        let trace = recorder.into_trace();

        assert_eq!(trace.last_step(), Some(outcome.steps));
        assert_eq!(trace.get(0).unwrap()[0].value, 3);
        assert_eq!(trace.latest().unwrap(), &run.snapshot());
    }
}
