use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::formats::PreviewImage;
use crate::model::{Dimensions, PixelBuffer, RawSample};

use super::Result;

/// Image response body as it arrives from the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireImage {
    /// Base64 PNG.
    pub image: String,
    pub linear: Vec<RawSample>,
    pub width: usize,
    pub height: usize,
}

impl WireImage {
    pub fn decode(self) -> Result<RenderedImage> {
        let dimensions = Dimensions::new(self.width, self.height);
        let pixels = PixelBuffer::from_raw(dimensions, self.linear)?;
        let preview = PreviewImage::from_base64(&self.image)?;
        Ok(RenderedImage::new(preview, pixels))
    }
}

/// Displayable preview plus the raw pixels the inspector reads.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    pub preview: PreviewImage,
    pub pixels: Arc<PixelBuffer>,
}

impl RenderedImage {
    pub fn new(preview: PreviewImage, pixels: PixelBuffer) -> Self {
        Self {
            preview,
            pixels: Arc::new(pixels),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.pixels.dimensions()
    }
}
