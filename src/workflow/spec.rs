use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::Rgb;
use crate::remote::Adjustment;

use super::{RecipeError, Result};

/// A scripted editing session: adjustments previewed in order, then layers
/// stacked bottom to top.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub name: Option<String>,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
    #[serde(default)]
    pub layers: Vec<RecipeLayer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecipeLayer {
    Color {
        #[serde(with = "crate::model::hex")]
        color: Rgb,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        opacity: Option<f32>,
    },
    Gradient {
        #[serde(with = "crate::model::hex")]
        start: Rgb,
        #[serde(with = "crate::model::hex")]
        end: Rgb,
        #[serde(default)]
        angle: i32,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        opacity: Option<f32>,
    },
    /// Relative paths resolve against the recipe file's directory.
    Image {
        path: PathBuf,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        opacity: Option<f32>,
    },
    Filter {
        adjustment: Adjustment,
        #[serde(default)]
        opacity: Option<f32>,
    },
}

impl RecipeLayer {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Color { .. } => "color",
            Self::Gradient { .. } => "gradient",
            Self::Image { .. } => "image",
            Self::Filter { .. } => "filter",
        }
    }

    pub fn opacity(&self) -> Option<f32> {
        match self {
            Self::Color { opacity, .. }
            | Self::Gradient { opacity, .. }
            | Self::Image { opacity, .. }
            | Self::Filter { opacity, .. } => *opacity,
        }
    }
}

impl Recipe {
    pub fn validate(&self) -> Result<()> {
        if self.adjustments.is_empty() && self.layers.is_empty() {
            return Err(RecipeError::Parse(
                "recipe must include at least one adjustment or layer".to_string(),
            ));
        }
        for (index, layer) in self.layers.iter().enumerate() {
            if let Some(opacity) = layer.opacity() {
                if !(0.0..=1.0).contains(&opacity) {
                    return Err(RecipeError::Parse(format!(
                        "layer at index {index} has opacity {opacity} outside 0..1"
                    )));
                }
            }
            if let RecipeLayer::Image { path, .. } = layer {
                if path.as_os_str().is_empty() {
                    return Err(RecipeError::Parse(format!(
                        "image layer at index {index} has an empty path"
                    )));
                }
            }
        }
        Ok(())
    }
}
