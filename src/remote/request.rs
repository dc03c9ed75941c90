use crate::formats::Upload;

use super::{Adjustment, MultipartForm};

pub(crate) const SQUARE_CHECK_ENDPOINT: &str = "is-square";
pub(crate) const COMPOSITE_ENDPOINT: &str = "composite-layers";

fn image_part(form: MultipartForm, image: &Upload) -> MultipartForm {
    form.file(
        "image",
        image.file_name(),
        image.mime_type(),
        image.bytes().clone(),
    )
}

/// One single-adjustment request against the uploaded base image.
#[derive(Debug, Clone)]
pub struct ApplyRequest {
    pub image: Upload,
    pub adjustment: Adjustment,
    pub grayscale: bool,
    /// Zoom factor kept in effect for non-zoom adjustments.
    pub scale: Option<f64>,
}

impl ApplyRequest {
    pub fn new(image: Upload, adjustment: Adjustment) -> Self {
        Self {
            image,
            adjustment,
            grayscale: false,
            scale: None,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        self.adjustment.endpoint()
    }

    pub fn form(&self) -> MultipartForm {
        let mut form = image_part(MultipartForm::new(), &self.image)
            .text("grayscale", self.grayscale.to_string());
        if let Some(scale) = self.scale.filter(|_| !self.adjustment.is_zoom()) {
            form = form.text("scale", scale.to_string());
        }
        self.adjustment
            .fields()
            .into_iter()
            .fold(form, |form, (key, value)| form.text(key, value))
    }
}

/// Square-aspect analysis of the uploaded image.
#[derive(Debug, Clone)]
pub struct SquareCheckRequest {
    pub image: Upload,
}

impl SquareCheckRequest {
    pub fn endpoint(&self) -> &'static str {
        SQUARE_CHECK_ENDPOINT
    }

    pub fn form(&self) -> MultipartForm {
        image_part(MultipartForm::new(), &self.image)
    }
}

/// Composite of the base image with a serialized visible-layer stack.
#[derive(Debug, Clone)]
pub struct CompositeRequest {
    pub image: Upload,
    pub layers_json: String,
    pub layer_count: usize,
}

impl CompositeRequest {
    pub fn endpoint(&self) -> &'static str {
        COMPOSITE_ENDPOINT
    }

    pub fn form(&self) -> MultipartForm {
        image_part(MultipartForm::new(), &self.image).text("layers", self.layers_json.clone())
    }
}
