//! Merge sort
//!
//! Top-down recursion. Each merge first tags its whole `[left, right]` span
//! `comparing` in one step, then writes the merged values one slot at a time,
//! each write tagged `swapping` and then left `current`. Only when the
//! outermost call returns is the whole array retagged `sorted`.
//!
//! The not-yet-merged values stay laid out behind the write cursor (remaining
//! left half, then remaining right half), so each write is a stable rotation of
//! the span and every snapshot holds exactly the input values.

use super::Adapter;
use crate::engine::scheduler::{StepContext, StepResult};
use crate::model::element::{ArrayModel, ElementState};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl Adapter<ArrayModel> for MergeSort {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn run(&self, ctx: &mut StepContext<'_, ArrayModel>) -> StepResult {
        let n = ctx.model().len();
        if n == 0 {
            return Ok(());
        }

        sort(ctx, 0, n - 1)?;

        ctx.checkpoint()?;
        ctx.model_mut().retag_all(.., ElementState::Sorted);
        ctx.step()
    }
}

fn sort(ctx: &mut StepContext<'_, ArrayModel>, left: usize, right: usize) -> StepResult {
    if left >= right {
        return Ok(());
    }

    let mid = left + (right - left) / 2;
    sort(ctx, left, mid)?;
    sort(ctx, mid + 1, right)?;
    merge(ctx, left, mid, right)
}

fn merge(
    ctx: &mut StepContext<'_, ArrayModel>,
    left: usize,
    mid: usize,
    right: usize,
) -> StepResult {
    ctx.checkpoint()?;
    ctx.model_mut().retag_all(left..=right, ElementState::Comparing);
    ctx.step()?;

    let mut pending_left: VecDeque<i32> = (left..=mid).map(|i| ctx.model().value(i)).collect();
    let mut pending_right: VecDeque<i32> =
        (mid + 1..=right).map(|i| ctx.model().value(i)).collect();

    for k in left..=right {
        ctx.checkpoint()?;

        // ties take from the left half to keep the merge stable
        let take_right = match (pending_left.front(), pending_right.front()) {
            (Some(a), Some(b)) => b < a,
            (Some(_), None) => false,
            (None, _) => true,
        };
        let next = if take_right {
            pending_right.pop_front()
        } else {
            pending_left.pop_front()
        };
        let Some(value) = next else {
            break;
        };

        let model = ctx.model_mut();
        model.replace(k, value);
        for (offset, &rest) in pending_left.iter().chain(pending_right.iter()).enumerate() {
            model.replace(k + 1 + offset, rest);
        }
        model.retag(k, ElementState::Swapping);
        ctx.step()?;

        ctx.model_mut().retag(k, ElementState::Current);
    }

    Ok(())
}
