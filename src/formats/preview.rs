use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use image::{ImageFormat, Rgb as ImageRgb, RgbImage};

use crate::model::PixelBuffer;

use super::Result;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A rendered PNG returned by the remote service, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    png: Arc<[u8]>,
}

impl PreviewImage {
    pub fn from_png(png: impl Into<Arc<[u8]>>) -> Self {
        Self { png: png.into() }
    }

    pub fn from_base64(encoded: &str) -> Result<Self> {
        let encoded = encoded
            .strip_prefix(PNG_DATA_URL_PREFIX)
            .unwrap_or(encoded)
            .trim();
        Ok(Self::from_png(BASE64_STANDARD.decode(encoded)?))
    }

    /// Encodes a local buffer as PNG, for views that never went through the
    /// remote service.
    pub fn encode(buffer: &PixelBuffer) -> Result<Self> {
        let image = RgbImage::from_fn(buffer.width() as u32, buffer.height() as u32, |x, y| {
            let rgb = buffer.get(i64::from(x), i64::from(y)).unwrap_or_default();
            ImageRgb([rgb.r, rgb.g, rgb.b])
        });
        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(Self::from_png(png))
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn to_data_url(&self) -> String {
        format!("{PNG_DATA_URL_PREFIX}{}", BASE64_STANDARD.encode(&self.png))
    }
}

pub fn write_preview(path: impl AsRef<Path>, preview: &PreviewImage) -> Result<()> {
    fs::write(path, preview.png())?;
    Ok(())
}
