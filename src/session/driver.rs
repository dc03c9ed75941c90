use crate::remote::{Adjustment, ApplyRequest, ImageService, SquareCheckRequest};

use super::{Completion, CompositeDispatch, Pending, Result, Session};

/// Blocking drivers that answer a session's pending requests right away.
/// Interactive front ends issue and complete on their own schedule instead.
impl Session {
    pub fn run_square_check<S: ImageService + ?Sized>(
        &mut self,
        service: &S,
        pending: Pending<SquareCheckRequest>,
    ) -> Result<Completion> {
        let outcome = service.is_square(&pending.request);
        self.complete_square_check(pending, outcome)
    }

    pub fn run_apply<S: ImageService + ?Sized>(
        &mut self,
        service: &S,
        pending: Pending<ApplyRequest>,
    ) -> Result<Completion> {
        let outcome = service.apply(&pending.request);
        self.complete_apply(pending, outcome)
    }

    pub fn run_adjustment<S: ImageService + ?Sized>(
        &mut self,
        service: &S,
        adjustment: Adjustment,
    ) -> Result<Completion> {
        match self.request_adjustment(adjustment)? {
            Some(pending) => self.run_apply(service, pending),
            None => Ok(Completion::Applied),
        }
    }

    pub fn run_grayscale_toggle<S: ImageService + ?Sized>(
        &mut self,
        service: &S,
    ) -> Result<Completion> {
        let Some(dispatch) = self.toggle_grayscale() else {
            return Ok(Completion::Applied);
        };
        let completion = self.run_apply(service, dispatch.source)?;
        match dispatch.result {
            Some(pending) => self.run_apply(service, pending),
            None => Ok(completion),
        }
    }

    pub fn run_composite<S: ImageService + ?Sized>(
        &mut self,
        service: &S,
        dispatch: CompositeDispatch,
    ) -> Result<Completion> {
        match dispatch {
            CompositeDispatch::Request(pending) => {
                let outcome = service.composite(&pending.request);
                self.complete_composite(pending, outcome)
            }
            CompositeDispatch::Unchanged
            | CompositeDispatch::Cleared
            | CompositeDispatch::Deferred => Ok(Completion::Applied),
        }
    }

    /// Renders a filter layer, adds it to the stack and recomposes.
    pub fn run_filter_layer<S: ImageService + ?Sized>(
        &mut self,
        service: &S,
        adjustment: Adjustment,
    ) -> Result<Completion> {
        let pending = self.request_filter_layer(adjustment)?;
        let outcome = service.apply(&pending.request);
        match self.complete_filter_layer(pending, outcome)? {
            Some(dispatch) => self.run_composite(service, dispatch),
            None => Ok(Completion::Stale),
        }
    }
}
