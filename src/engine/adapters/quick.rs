//! Quick sort with Lomuto partitioning
//!
//! The last element of each partition is the `pivot`. Elements smaller than the
//! pivot are swapped down to the partition index (`swapping`), and the pivot's
//! final slot is tagged `sorted` as soon as it lands. A one-element partition is
//! the base case and is marked `sorted` directly; every other element stays
//! `default` until its own partition resolves it.

use super::Adapter;
use crate::engine::scheduler::{Cancelled, StepContext, StepResult};
use crate::model::element::{ArrayModel, ElementState};

#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

impl Adapter<ArrayModel> for QuickSort {
    fn name(&self) -> &'static str {
        "quick"
    }

    fn run(&self, ctx: &mut StepContext<'_, ArrayModel>) -> StepResult {
        let n = ctx.model().len();
        sort(ctx, 0, n)
    }
}

/// Sort the half-open range `low..high`
fn sort(ctx: &mut StepContext<'_, ArrayModel>, low: usize, high: usize) -> StepResult {
    if high <= low {
        return Ok(());
    }

    if high - low == 1 {
        ctx.checkpoint()?;
        ctx.model_mut().retag(low, ElementState::Sorted);
        return ctx.step();
    }

    let pivot_index = partition(ctx, low, high - 1)?;
    sort(ctx, low, pivot_index)?;
    sort(ctx, pivot_index + 1, high)
}

/// Partition `low..=high` around the value at `high`, returning the pivot's final index
fn partition(
    ctx: &mut StepContext<'_, ArrayModel>,
    low: usize,
    high: usize,
) -> Result<usize, Cancelled> {
    ctx.checkpoint()?;
    let pivot = ctx.model().value(high);
    ctx.model_mut().retag(high, ElementState::Pivot);
    ctx.step()?;

    let mut i = low;
    for j in low..high {
        ctx.checkpoint()?;
        ctx.model_mut().retag(j, ElementState::Comparing);
        ctx.step()?;

        if ctx.model().value(j) < pivot {
            if i != j {
                let model = ctx.model_mut();
                model.retag(i, ElementState::Swapping);
                model.retag(j, ElementState::Swapping);
                model.swap(i, j);
                ctx.step()?;
                ctx.model_mut().retag(i, ElementState::Default);
            }
            i += 1;
        }

        ctx.model_mut().retag(j, ElementState::Default);
    }

    ctx.checkpoint()?;
    let model = ctx.model_mut();
    if i != high {
        model.swap(i, high);
        model.retag(high, ElementState::Default);
    }
    model.retag(i, ElementState::Sorted);
    ctx.step()?;

    Ok(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scheduler::{Run, RunOptions, RunState};

    #[test]
    fn test_pivot_lands_sorted() {
        let mut run = Run::new(
            ArrayModel::from_values([3, 1, 2]),
            Box::new(QuickSort),
            RunOptions::immediate(),
        );
        let (outcome, snapshots) = run.collect_snapshots().unwrap();
        assert_eq!(outcome.state, RunState::Completed);

        assert_eq!(snapshots[0][2].state, ElementState::Pivot);

        // first partition: pivot 2 ends at index 1
        let landed = snapshots
            .iter()
            .find(|s| s[1].state == ElementState::Sorted)
            .unwrap();
        assert_eq!(landed[1].value, 2);
        assert_eq!(landed[0].state, ElementState::Default);
        assert_eq!(landed[2].state, ElementState::Default);
    }

    #[test]
    fn test_every_element_ends_sorted() {
        let mut run = Run::new(
            ArrayModel::from_values([9, 8, 7, 6, 5, 4, 3, 2, 1]),
            Box::new(QuickSort),
            RunOptions::immediate(),
        );
        let (_, snapshots) = run.collect_snapshots().unwrap();
        let last = snapshots.last().unwrap();

        assert!(last.iter().all(|e| e.state == ElementState::Sorted));
        assert_eq!(
            last.iter().map(|e| e.value).collect::<Vec<_>>(),
            (1..=9).collect::<Vec<_>>()
        );
    }
}
