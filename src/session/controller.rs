use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::formats::Upload;
use crate::layers::{LayerId, LayerSpec, LayerStack, MoveDirection};
use crate::model::{Dimensions, PixelBuffer, Point};
use crate::remote::{
    Adjustment, ApplyRequest, CompositeRequest, RemoteError, RenderedImage, SquareCheckRequest,
};
use crate::ui::interaction::{
    CursorState, Inspection, Region, RegionSelector, ViewportRect, inspect, map_point,
    viewport_to_image,
};

use super::{
    Completion, Notice, Pending, RequestSequencer, Result, SessionError, ViewTarget,
    plan_composite,
};

/// The three concurrently held views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Source,
    Result,
    Layer,
}

/// What a layer-stack change asks of the compositing service.
#[derive(Debug, Clone)]
pub enum CompositeDispatch {
    /// The rendered composite is unaffected.
    Unchanged,
    /// Nothing is visible; the composite view was cleared locally.
    Cleared,
    /// No base image yet, so there is nothing to composite onto.
    Deferred,
    Request(Pending<CompositeRequest>),
}

impl CompositeDispatch {
    pub fn into_pending(self) -> Option<Pending<CompositeRequest>> {
        match self {
            Self::Request(pending) => Some(pending),
            Self::Unchanged | Self::Cleared | Self::Deferred => None,
        }
    }
}

/// Requests issued by a grayscale toggle.
#[derive(Debug, Clone)]
pub struct GrayscaleDispatch {
    /// Refreshes the source view in the new mode.
    pub source: Pending<ApplyRequest>,
    /// Re-runs the last adjustment in the new mode, if there was one.
    pub result: Option<Pending<ApplyRequest>>,
}

/// Single owner of the editing session: base image, the three views, the
/// layer stack, and cursor/selection state.
///
/// Requests are issued as [`Pending`] values and their responses handed back
/// through the matching `complete_*` method. Views are only ever replaced,
/// never edited in place, and a failed or superseded response leaves every
/// view as it was.
#[derive(Debug, Clone)]
pub struct Session {
    upload: Option<Upload>,
    source: Option<Arc<PixelBuffer>>,
    result: Option<RenderedImage>,
    composite: Option<RenderedImage>,
    layers: LayerStack,
    draft: Option<LayerSpec>,
    cursor: CursorState,
    selector: RegionSelector,
    grayscale: bool,
    zoom: f64,
    last_adjustment: Option<Adjustment>,
    is_square: Option<bool>,
    sequencer: RequestSequencer,
    notice: Option<Notice>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            upload: None,
            source: None,
            result: None,
            composite: None,
            layers: LayerStack::new(),
            draft: None,
            cursor: CursorState::default(),
            selector: RegionSelector::default(),
            grayscale: false,
            zoom: 1.0,
            last_adjustment: None,
            is_square: None,
            sequencer: RequestSequencer::default(),
            notice: None,
        }
    }

    pub fn upload(&self) -> Option<&Upload> {
        self.upload.as_ref()
    }

    pub fn source(&self) -> Option<&Arc<PixelBuffer>> {
        self.source.as_ref()
    }

    pub fn result(&self) -> Option<&RenderedImage> {
        self.result.as_ref()
    }

    pub fn composite(&self) -> Option<&RenderedImage> {
        self.composite.as_ref()
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn draft(&self) -> Option<&LayerSpec> {
        self.draft.as_ref()
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn selector(&self) -> &RegionSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut RegionSelector {
        &mut self.selector
    }

    pub fn selection(&self) -> Region {
        self.selector.region()
    }

    pub fn is_grayscale(&self) -> bool {
        self.grayscale
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn is_square(&self) -> Option<bool> {
        self.is_square
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    fn base(&self) -> Result<Upload> {
        self.upload.clone().ok_or(SessionError::NoImage)
    }

    fn reset_tools(&mut self) {
        self.grayscale = false;
        self.zoom = 1.0;
        self.last_adjustment = None;
        self.selector.reset();
        self.cursor.unlock();
    }

    /// Replaces the base image and returns the square-aspect check for it.
    pub fn load_upload(&mut self, upload: Upload) -> Pending<SquareCheckRequest> {
        info!(
            file = upload.file_name(),
            width = upload.dimensions().width,
            height = upload.dimensions().height,
            "loading upload"
        );
        self.sequencer.new_epoch();
        self.source = Some(upload.pixels().clone());
        self.result = None;
        self.composite = None;
        self.layers = self.layers.cleared();
        self.is_square = None;
        self.notice = None;
        self.selector = RegionSelector::new(upload.dimensions());
        self.reset_tools();
        self.upload = Some(upload.clone());
        self.sequencer
            .issue(ViewTarget::Analysis, SquareCheckRequest { image: upload })
    }

    /// Re-checks the square aspect of the current base image.
    pub fn request_square_check(&mut self) -> Result<Pending<SquareCheckRequest>> {
        let image = self.base()?;
        Ok(self
            .sequencer
            .issue(ViewTarget::Analysis, SquareCheckRequest { image }))
    }

    pub fn complete_square_check(
        &mut self,
        pending: Pending<SquareCheckRequest>,
        outcome: std::result::Result<bool, RemoteError>,
    ) -> Result<Completion> {
        if !self.sequencer.is_current(&pending) {
            return Ok(self.discard(pending.target, pending.sequence));
        }
        self.is_square = Some(self.accept(outcome)?);
        Ok(Completion::Applied)
    }

    /// Back to the unedited upload. Layers are kept.
    pub fn reset_all(&mut self) {
        let Some(upload) = &self.upload else {
            return;
        };
        info!("resetting session to original upload");
        self.source = Some(upload.pixels().clone());
        self.result = None;
        self.sequencer.invalidate(ViewTarget::Result);
        self.sequencer.invalidate(ViewTarget::Source);
        self.reset_tools();
    }

    fn apply_request(&self, image: Upload, adjustment: Adjustment) -> ApplyRequest {
        ApplyRequest {
            image,
            grayscale: self.grayscale,
            scale: (self.zoom != 1.0 && !adjustment.is_zoom()).then_some(self.zoom),
            adjustment,
        }
    }

    fn validate(&mut self, adjustment: &Adjustment) -> Result<Upload> {
        let image = self.base()?;
        if let Adjustment::Crop(region) = adjustment {
            if region.is_empty() {
                self.notice = Some(Notice::warning(SessionError::EmptyRegion.to_string()));
                return Err(SessionError::EmptyRegion);
            }
        }
        Ok(image)
    }

    /// Issues a single-adjustment preview for the result view.
    ///
    /// Returns `None` when the adjustment resolves locally: a zero-strength
    /// blur or sharpen in colour mode at zoom 1 just clears the result view.
    pub fn request_adjustment(
        &mut self,
        adjustment: Adjustment,
    ) -> Result<Option<Pending<ApplyRequest>>> {
        let image = self.validate(&adjustment)?;
        if adjustment.is_noop_filter() && !self.grayscale && self.zoom == 1.0 {
            debug!(op = adjustment.name(), "clearing result locally");
            self.sequencer.invalidate(ViewTarget::Result);
            self.result = None;
            self.last_adjustment = None;
            return Ok(None);
        }
        if let Adjustment::Zoom { scale } = adjustment {
            self.zoom = scale;
        }
        self.last_adjustment = Some(adjustment.clone());
        let request = self.apply_request(image, adjustment);
        let pending = self.sequencer.issue(ViewTarget::Result, request);
        debug!(
            sequence = pending.sequence,
            op = %pending.request.adjustment,
            "issued adjustment"
        );
        Ok(Some(pending))
    }

    /// Flips grayscale mode and re-requests the source view and, if one was
    /// shown, the last adjustment in the new mode.
    pub fn toggle_grayscale(&mut self) -> Option<GrayscaleDispatch> {
        self.grayscale = !self.grayscale;
        let image = self.upload.clone()?;
        let refresh = ApplyRequest {
            grayscale: self.grayscale,
            ..ApplyRequest::new(image.clone(), Adjustment::Brightness { level: 0 })
        };
        let source = self.sequencer.issue(ViewTarget::Source, refresh);
        let result = match self.last_adjustment.clone() {
            Some(adjustment) => {
                let request = self.apply_request(image, adjustment);
                Some(self.sequencer.issue(ViewTarget::Result, request))
            }
            None => None,
        };
        Some(GrayscaleDispatch { source, result })
    }

    /// Hands back the response to a source refresh or result request.
    pub fn complete_apply(
        &mut self,
        pending: Pending<ApplyRequest>,
        outcome: std::result::Result<RenderedImage, RemoteError>,
    ) -> Result<Completion> {
        if !self.sequencer.is_current(&pending) {
            return Ok(self.discard(pending.target, pending.sequence));
        }
        let rendered = self.accept(outcome)?;
        match pending.target {
            ViewTarget::Source => {
                debug!(sequence = pending.sequence, "source view refreshed");
                self.selector.set_bounds(rendered.dimensions());
                self.source = Some(rendered.pixels);
            }
            _ => {
                let dimensions = rendered.dimensions();
                debug!(
                    sequence = pending.sequence,
                    width = dimensions.width,
                    height = dimensions.height,
                    "result view published"
                );
                self.result = Some(rendered);
                if matches!(pending.request.adjustment, Adjustment::Crop(_)) {
                    self.selector.reset();
                }
            }
        }
        Ok(Completion::Applied)
    }

    fn accept<T>(&mut self, outcome: std::result::Result<T, RemoteError>) -> Result<T> {
        outcome.map_err(|error| {
            warn!(%error, "remote call failed; keeping previous views");
            self.notice = Some(Notice::error(error.to_string()));
            SessionError::Remote(error)
        })
    }

    fn discard(&self, target: ViewTarget, sequence: u64) -> Completion {
        debug!(?target, sequence, "discarding stale response");
        Completion::Stale
    }

    pub fn dimensions(&self, view: View) -> Dimensions {
        self.buffer(view)
            .map(|buffer| buffer.dimensions())
            .unwrap_or(Dimensions::EMPTY)
    }

    /// Buffer behind a view. The result view falls back to the source until
    /// an adjustment has been applied.
    pub fn buffer(&self, view: View) -> Option<&PixelBuffer> {
        match view {
            View::Source => self.source.as_deref(),
            View::Result => self
                .result
                .as_ref()
                .map(|result| result.pixels.as_ref())
                .or(self.source.as_deref()),
            View::Layer => self.composite.as_ref().map(|layer| layer.pixels.as_ref()),
        }
    }

    pub fn hover(&mut self, at: Point) {
        self.cursor.hover(at);
    }

    /// Pointer at `screen` over `view` drawn into `viewport`. The position is
    /// stored in source space; leaving the viewport clears the hover.
    pub fn hover_viewport(&mut self, view: View, viewport: ViewportRect, screen: Point) {
        match viewport_to_image(viewport, self.dimensions(view), screen) {
            Some(at) => {
                let source = map_point(at, self.dimensions(view), self.dimensions(View::Source));
                self.cursor.hover(source);
            }
            None => self.cursor.leave(),
        }
    }

    pub fn toggle_lock(&mut self) -> bool {
        self.cursor.toggle_lock()
    }

    pub fn unlock(&mut self) {
        self.cursor.unlock();
    }

    /// Focus point translated from source space into `view`'s pixel space.
    pub fn focus_in(&self, view: View) -> Option<Point> {
        let focus = self.cursor.focus()?;
        Some(map_point(
            focus,
            self.dimensions(View::Source),
            self.dimensions(view),
        ))
    }

    pub fn inspect(&self, view: View) -> Inspection {
        inspect(self.buffer(view), self.focus_in(view))
    }

    fn update_stack(&mut self, next: LayerStack) -> Result<CompositeDispatch> {
        let changed = next.revision() != self.layers.revision();
        self.layers = next;
        if !changed {
            return Ok(CompositeDispatch::Unchanged);
        }
        self.sync_composite()
    }

    /// Plans a composite of the current stack, clearing the view locally
    /// when nothing is visible.
    pub fn sync_composite(&mut self) -> Result<CompositeDispatch> {
        let Some(base) = &self.upload else {
            return Ok(CompositeDispatch::Deferred);
        };
        match plan_composite(base, &self.layers)? {
            Some(request) => {
                let pending = self.sequencer.issue(ViewTarget::Layer, request);
                debug!(
                    sequence = pending.sequence,
                    layers = pending.request.layer_count,
                    "issued composite"
                );
                Ok(CompositeDispatch::Request(pending))
            }
            None => {
                self.sequencer.invalidate(ViewTarget::Layer);
                self.composite = None;
                Ok(CompositeDispatch::Cleared)
            }
        }
    }

    pub fn complete_composite(
        &mut self,
        pending: Pending<CompositeRequest>,
        outcome: std::result::Result<RenderedImage, RemoteError>,
    ) -> Result<Completion> {
        if !self.sequencer.is_current(&pending) {
            return Ok(self.discard(pending.target, pending.sequence));
        }
        let rendered = self.accept(outcome)?;
        debug!(sequence = pending.sequence, "composite view published");
        self.composite = Some(rendered);
        Ok(Completion::Applied)
    }

    pub fn create_layer(&mut self, spec: LayerSpec) -> Result<CompositeDispatch> {
        let next = self.layers.create(spec);
        self.update_stack(next)
    }

    pub fn toggle_layer_visibility(&mut self, id: LayerId) -> Result<CompositeDispatch> {
        let next = self.layers.toggle_visibility(id);
        self.update_stack(next)
    }

    pub fn set_layer_opacity(&mut self, id: LayerId, opacity: f32) -> Result<CompositeDispatch> {
        let next = self.layers.set_opacity(id, opacity);
        self.update_stack(next)
    }

    pub fn delete_layer(&mut self, id: LayerId) -> Result<CompositeDispatch> {
        let next = self.layers.delete(id);
        self.update_stack(next)
    }

    pub fn duplicate_layer(&mut self, id: LayerId) -> Result<CompositeDispatch> {
        let next = self.layers.duplicate(id);
        self.update_stack(next)
    }

    pub fn move_layer(&mut self, index: usize, direction: MoveDirection) -> Result<CompositeDispatch> {
        let next = self.layers.move_layer(index, direction);
        self.update_stack(next)
    }

    /// Names are not part of the rendered composite, so renaming never
    /// triggers a recompose.
    pub fn rename_layer(&mut self, id: LayerId, name: impl Into<String>) {
        self.layers = self.layers.rename(id, name);
    }

    /// Edits the in-progress layer without touching the stack.
    pub fn set_draft(&mut self, spec: LayerSpec) {
        self.draft = Some(spec);
    }

    pub fn discard_draft(&mut self) {
        self.draft = None;
    }

    pub fn commit_draft(&mut self) -> Result<CompositeDispatch> {
        match self.draft.take() {
            Some(spec) => self.create_layer(spec),
            None => Ok(CompositeDispatch::Unchanged),
        }
    }

    /// Renders `adjustment` for a new filter layer. Layers are always built
    /// from colour data at the base image's scale.
    pub fn request_filter_layer(&mut self, adjustment: Adjustment) -> Result<Pending<ApplyRequest>> {
        let image = self.validate(&adjustment)?;
        let request = ApplyRequest::new(image, adjustment);
        Ok(self.sequencer.issue(ViewTarget::LayerContent, request))
    }

    /// Creates the filter layer from a finished render. Returns `None` if the
    /// base image changed while the render was in flight.
    pub fn complete_filter_layer(
        &mut self,
        pending: Pending<ApplyRequest>,
        outcome: std::result::Result<RenderedImage, RemoteError>,
    ) -> Result<Option<CompositeDispatch>> {
        if !self.sequencer.is_current(&pending) {
            self.discard(pending.target, pending.sequence);
            return Ok(None);
        }
        let rendered = self.accept(outcome)?;
        let spec = LayerSpec::filter(pending.request.adjustment, rendered);
        self.create_layer(spec).map(Some)
    }
}
