use std::fmt;

use serde::{Deserialize, Serialize};

use crate::formats::Upload;
use crate::model::Rgb;
use crate::remote::{Adjustment, RenderedImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Filter,
    Color,
    Gradient,
    Image,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filter => "filter",
            Self::Color => "color",
            Self::Gradient => "gradient",
            Self::Image => "image",
        }
    }

    /// Image layers mix at half strength; everything else covers fully.
    pub fn default_opacity(&self) -> f32 {
        match self {
            Self::Image => 0.5,
            Self::Filter | Self::Color | Self::Gradient => 1.0,
        }
    }
}

/// Kind-specific layer payload.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerContent {
    /// The base image rendered through one adjustment, always in colour.
    Filter {
        adjustment: Adjustment,
        rendered: RenderedImage,
    },
    Color {
        color: Rgb,
    },
    Gradient {
        start: Rgb,
        end: Rgb,
        angle_degrees: i32,
    },
    Image {
        data_url: String,
        file_name: String,
    },
}

impl LayerContent {
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Filter { .. } => LayerKind::Filter,
            Self::Color { .. } => LayerKind::Color,
            Self::Gradient { .. } => LayerKind::Gradient,
            Self::Image { .. } => LayerKind::Image,
        }
    }

    pub fn image(upload: &Upload) -> Self {
        Self::Image {
            data_url: upload.to_data_url(),
            file_name: upload.file_name().to_string(),
        }
    }

    fn default_name(&self) -> String {
        match self {
            Self::Filter { adjustment, .. } => format!("Filter: {}", adjustment.name()),
            Self::Color { color } => format!("Color {}", color.to_hex()),
            Self::Gradient { .. } => "Gradient".to_string(),
            Self::Image { file_name, .. } => format!("Image: {file_name}"),
        }
    }
}

/// Everything needed to create a layer except its id.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub name: String,
    pub opacity: f32,
    pub content: LayerContent,
}

impl LayerSpec {
    /// Spec with the kind's default opacity and a generated name.
    pub fn new(content: LayerContent) -> Self {
        Self {
            name: content.default_name(),
            opacity: content.kind().default_opacity(),
            content,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        if opacity.is_finite() {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn color(color: Rgb) -> Self {
        Self::new(LayerContent::Color { color })
    }

    pub fn gradient(start: Rgb, end: Rgb, angle_degrees: i32) -> Self {
        Self::new(LayerContent::Gradient {
            start,
            end,
            angle_degrees,
        })
    }

    pub fn filter(adjustment: Adjustment, rendered: RenderedImage) -> Self {
        Self::new(LayerContent::Filter {
            adjustment,
            rendered,
        })
    }

    pub fn image(upload: &Upload) -> Self {
        Self::new(LayerContent::image(upload))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    pub opacity: f32,
    pub content: LayerContent,
}

impl Layer {
    pub fn kind(&self) -> LayerKind {
        self.content.kind()
    }
}
