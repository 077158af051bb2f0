//! Bubble sort
//!
//! Compares each adjacent pair (`comparing`), swaps it when out of order
//! (`swapping`), and after every outer pass marks the element that bubbled to
//! the end of the unsorted region as `sorted`.

use super::Adapter;
use crate::engine::scheduler::{StepContext, StepResult};
use crate::model::element::{ArrayModel, ElementState};

#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl Adapter<ArrayModel> for BubbleSort {
    fn name(&self) -> &'static str {
        "bubble"
    }

    fn run(&self, ctx: &mut StepContext<'_, ArrayModel>) -> StepResult {
        let n = ctx.model().len();

        for pass in 0..n {
            let unsorted_end = n - pass - 1;

            for j in 0..unsorted_end {
                ctx.checkpoint()?;
                let model = ctx.model_mut();
                model.retag(j, ElementState::Comparing);
                model.retag(j + 1, ElementState::Comparing);
                ctx.step()?;

                if ctx.model().value(j) > ctx.model().value(j + 1) {
                    let model = ctx.model_mut();
                    model.retag(j, ElementState::Swapping);
                    model.retag(j + 1, ElementState::Swapping);
                    model.swap(j, j + 1);
                    ctx.step()?;
                }

                let model = ctx.model_mut();
                model.retag(j, ElementState::Default);
                model.retag(j + 1, ElementState::Default);
            }

            ctx.checkpoint()?;
            ctx.model_mut().retag(unsorted_end, ElementState::Sorted);
            ctx.step()?;
        }

        Ok(())
    }
}
