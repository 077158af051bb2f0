//! Selection sort
//!
//! The running minimum candidate is tagged `pivot` while the scan tags each
//! candidate `comparing`. Only one swap is shown per outer iteration: the slot
//! being filled (`current` once a smaller value is found) with the final minimum.

use super::Adapter;
use crate::engine::scheduler::{StepContext, StepResult};
use crate::model::element::{ArrayModel, ElementState};

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl Adapter<ArrayModel> for SelectionSort {
    fn name(&self) -> &'static str {
        "selection"
    }

    fn run(&self, ctx: &mut StepContext<'_, ArrayModel>) -> StepResult {
        let n = ctx.model().len();

        for i in 0..n {
            ctx.checkpoint()?;
            if i + 1 == n {
                // nothing left to scan; the last slot already holds the maximum
                ctx.model_mut().retag(i, ElementState::Sorted);
                return ctx.step();
            }

            let mut min = i;
            ctx.model_mut().retag(i, ElementState::Pivot);
            ctx.step()?;

            for j in i + 1..n {
                ctx.checkpoint()?;
                ctx.model_mut().retag(j, ElementState::Comparing);
                ctx.step()?;

                if ctx.model().value(j) < ctx.model().value(min) {
                    let model = ctx.model_mut();
                    if min == i {
                        model.retag(i, ElementState::Current);
                    } else {
                        model.retag(min, ElementState::Default);
                    }
                    min = j;
                    model.retag(j, ElementState::Pivot);
                    ctx.step()?;
                } else {
                    ctx.model_mut().retag(j, ElementState::Default);
                }
            }

            if min != i {
                ctx.checkpoint()?;
                let model = ctx.model_mut();
                model.retag(i, ElementState::Swapping);
                model.retag(min, ElementState::Swapping);
                model.swap(i, min);
                ctx.step()?;
                ctx.model_mut().retag(min, ElementState::Default);
            }

            ctx.model_mut().retag(i, ElementState::Sorted);
            ctx.step()?;
        }

        Ok(())
    }
}
