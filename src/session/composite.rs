use tracing::debug;

use crate::formats::Upload;
use crate::layers::{LayerStack, descriptors_json};
use crate::remote::{CompositeRequest, ImageService, RenderedImage};

use super::Result;

/// Builds the composite request for the visible part of `layers`, bottom to
/// top. `None` means nothing is visible and the composite view should be
/// cleared without calling the service.
pub fn plan_composite(base: &Upload, layers: &LayerStack) -> Result<Option<CompositeRequest>> {
    let visible = layers.visible().map(|layer| layer.as_ref()).collect::<Vec<_>>();
    if visible.is_empty() {
        debug!(total = layers.len(), "no visible layers");
        return Ok(None);
    }
    Ok(Some(CompositeRequest {
        image: base.clone(),
        layers_json: descriptors_json(visible.iter().copied())?,
        layer_count: visible.len(),
    }))
}

/// Plans and, if anything is visible, performs one composite call.
pub fn recompose<S: ImageService + ?Sized>(
    service: &S,
    base: &Upload,
    layers: &LayerStack,
) -> Result<Option<RenderedImage>> {
    let Some(request) = plan_composite(base, layers)? else {
        return Ok(None);
    };
    Ok(Some(service.composite(&request)?))
}
