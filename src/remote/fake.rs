use std::sync::Mutex;

use image::{ImageBuffer, Rgb as ImageRgb};

use crate::formats::{PreviewImage, Upload, decode_upload};
use crate::model::{Dimensions, PixelBuffer, Rgb};

use super::{
    Adjustment, ApplyRequest, CompositeRequest, ImageService, MultipartForm, RemoteError,
    RenderedImage, Result, SquareCheckRequest,
};

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub endpoint: String,
    pub form: MultipartForm,
}

/// In-process stand-in for the remote service. Each response is a solid
/// buffer whose red channel is the 1-based call number.
#[derive(Debug, Default)]
pub(crate) struct FakeImageService {
    calls: Mutex<Vec<RecordedCall>>,
    failing: bool,
    resize: Option<Dimensions>,
}

impl FakeImageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Answers every apply call with a buffer of `dimensions`.
    pub fn resizing(dimensions: Dimensions) -> Self {
        Self {
            resize: Some(dimensions),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.endpoint).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    fn record(&self, endpoint: &str, form: MultipartForm) -> Result<u8> {
        if self.failing {
            return Err(RemoteError::Transport {
                endpoint: endpoint.to_string(),
                message: "timeout of 10000ms exceeded".to_string(),
            });
        }
        let mut calls = self.calls.lock().expect("fake call log");
        calls.push(RecordedCall {
            endpoint: endpoint.to_string(),
            form,
        });
        Ok(calls.len() as u8)
    }
}

impl ImageService for FakeImageService {
    fn apply(&self, request: &ApplyRequest) -> Result<RenderedImage> {
        let tag = self.record(request.endpoint(), request.form())?;
        let base = request.image.dimensions();
        let dimensions = match (&request.adjustment, self.resize) {
            (_, Some(resize)) => resize,
            (Adjustment::Crop(region), None) => Dimensions::new(region.w, region.h),
            (Adjustment::Zoom { scale }, None) => Dimensions::new(
                (base.width as f64 * scale).round() as usize,
                (base.height as f64 * scale).round() as usize,
            ),
            _ => base,
        };
        Ok(solid(dimensions, Rgb::new(tag, 0, 0)))
    }

    fn is_square(&self, request: &SquareCheckRequest) -> Result<bool> {
        self.record(request.endpoint(), request.form())?;
        Ok(request.image.dimensions().is_square())
    }

    fn composite(&self, request: &CompositeRequest) -> Result<RenderedImage> {
        let tag = self.record(request.endpoint(), request.form())?;
        Ok(solid(request.image.dimensions(), Rgb::new(tag, 0, 0)))
    }
}

pub(crate) fn solid(dimensions: Dimensions, color: Rgb) -> RenderedImage {
    let pixels = PixelBuffer::new(dimensions, vec![color; dimensions.sample_count()])
        .expect("solid buffer");
    RenderedImage::new(PreviewImage::from_png(vec![color.r]), pixels)
}

pub(crate) fn sample_upload(width: u32, height: u32) -> Upload {
    let image = ImageBuffer::from_fn(width, height, |x, y| ImageRgb([x as u8, y as u8, 7]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode png");
    decode_upload(bytes, "sample.png").expect("decode sample")
}
