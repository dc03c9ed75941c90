use std::fs;
use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use image::ImageFormat;

use crate::model::{Dimensions, PixelBuffer};

use super::{IoError, Result};

/// An uploaded image: the original encoded bytes, which are what the remote
/// service receives, and the locally decoded pixels used for the source view.
#[derive(Debug, Clone)]
pub struct Upload {
    bytes: Arc<[u8]>,
    file_name: String,
    format: ImageFormat,
    pixels: Arc<PixelBuffer>,
}

impl Upload {
    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn pixels(&self) -> &Arc<PixelBuffer> {
        &self.pixels
    }

    pub fn dimensions(&self) -> Dimensions {
        self.pixels.dimensions()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            BASE64_STANDARD.encode(&self.bytes)
        )
    }
}

pub fn supported_formats() -> &'static [&'static str] {
    &["png", "jpg", "jpeg", "bmp", "gif", "webp", "tif", "tiff"]
}

pub fn read_upload(path: impl AsRef<Path>) -> Result<Upload> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();
    let bytes = fs::read(path)?;
    decode_upload(bytes, file_name)
}

pub fn decode_upload(bytes: impl Into<Arc<[u8]>>, file_name: impl Into<String>) -> Result<Upload> {
    let bytes = bytes.into();
    let format = image::guess_format(&bytes)?;
    let extension = format
        .extensions_str()
        .first()
        .copied()
        .unwrap_or_default();
    if !supported_formats().contains(&extension) {
        return Err(IoError::UnsupportedFormat(format!("{format:?}")));
    }
    let decoded = image::load_from_memory_with_format(&bytes, format)?;
    let pixels = PixelBuffer::from_rgb_image(&decoded.to_rgb8());
    Ok(Upload {
        bytes,
        file_name: file_name.into(),
        format,
        pixels: Arc::new(pixels),
    })
}
