use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ui::interaction::Region;

/// Single-filter operations the remote service applies to the base image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Adjustment {
    Brightness { level: i32 },
    Contrast { level: i32 },
    Blur { intensity: u32 },
    Sharpen { intensity: u32 },
    Rotate { angle: f64 },
    FlipHorizontal,
    FlipVertical,
    Crop(Region),
    Zoom { scale: f64 },
    Grayscale,
}

impl Adjustment {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Brightness { .. } => "brightness",
            Self::Contrast { .. } => "contrast",
            Self::Blur { .. } => "blur",
            Self::Sharpen { .. } => "sharpen",
            Self::Rotate { .. } => "rotate",
            Self::FlipHorizontal => "flip_horizontal",
            Self::FlipVertical => "flip_vertical",
            Self::Crop(_) => "crop",
            Self::Zoom { .. } => "zoom",
            Self::Grayscale => "grayscale",
        }
    }

    /// Endpoint path relative to the service base url.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::FlipHorizontal => "flip/horizontal",
            Self::FlipVertical => "flip/vertical",
            other => other.name(),
        }
    }

    /// Operation-specific form fields.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Brightness { level } | Self::Contrast { level } => {
                vec![("level", level.to_string())]
            }
            Self::Blur { intensity } | Self::Sharpen { intensity } => {
                vec![("intensity", intensity.to_string())]
            }
            Self::Rotate { angle } => vec![("angle", angle.to_string())],
            Self::Zoom { scale } => vec![("scale", scale.to_string())],
            Self::Crop(region) => vec![
                ("x", region.x.to_string()),
                ("y", region.y.to_string()),
                ("w", region.w.to_string()),
                ("h", region.h.to_string()),
            ],
            Self::FlipHorizontal | Self::FlipVertical | Self::Grayscale => Vec::new(),
        }
    }

    /// Blur or sharpen at intensity zero leaves the image untouched.
    pub fn is_noop_filter(&self) -> bool {
        matches!(
            self,
            Self::Blur { intensity: 0 } | Self::Sharpen { intensity: 0 }
        )
    }

    pub fn is_zoom(&self) -> bool {
        matches!(self, Self::Zoom { .. })
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())?;
        for (key, value) in self.fields() {
            write!(formatter, " {key}={value}")?;
        }
        Ok(())
    }
}
