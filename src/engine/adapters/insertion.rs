//! Insertion sort
//!
//! Slot 0 starts as the sorted prefix. Each new key is tagged `current`, then
//! shifted left by assignment: the larger neighbor is copied one slot right
//! (`swapping` on the shifted-to slot) and the key is parked in the vacated
//! slot (`comparing` on the shifted-from slot). Parking the key keeps every
//! snapshot a permutation of the input, so a cancelled run never shows a
//! duplicated or missing value.

use super::Adapter;
use crate::engine::scheduler::{StepContext, StepResult};
use crate::model::element::{ArrayModel, ElementState};

#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl Adapter<ArrayModel> for InsertionSort {
    fn name(&self) -> &'static str {
        "insertion"
    }

    fn run(&self, ctx: &mut StepContext<'_, ArrayModel>) -> StepResult {
        let n = ctx.model().len();
        if n == 0 {
            return Ok(());
        }

        for i in 1..n {
            ctx.checkpoint()?;
            ctx.model_mut().retag(i, ElementState::Current);
            ctx.step()?;

            let key = ctx.model().value(i);
            let mut j = i;
            while j > 0 && ctx.model().value(j - 1) > key {
                ctx.checkpoint()?;
                let model = ctx.model_mut();
                let shifted = model.value(j - 1);
                model.replace(j, shifted);
                model.replace(j - 1, key);
                model.retag(j - 1, ElementState::Comparing);
                model.retag(j, ElementState::Swapping);
                ctx.step()?;

                let model = ctx.model_mut();
                model.retag(j, ElementState::Default);
                model.retag(j - 1, ElementState::Default);
                j -= 1;
            }

            ctx.model_mut().retag(i, ElementState::Default);
        }

        ctx.checkpoint()?;
        ctx.model_mut().retag_all(.., ElementState::Sorted);
        ctx.step()
    }
}
