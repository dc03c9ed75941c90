use serde::{Deserialize, Serialize};

use crate::model::Dimensions;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepReport {
    /// `adjustment` or `layer`.
    pub stage: String,
    pub op: String,
    pub duration_ms: u128,
    pub applied: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewSummary {
    pub width: usize,
    pub height: usize,
}

impl From<Dimensions> for ViewSummary {
    fn from(dimensions: Dimensions) -> Self {
        Self {
            width: dimensions.width,
            height: dimensions.height,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeReport {
    pub recipe_name: Option<String>,
    pub is_square: Option<bool>,
    pub steps: Vec<StepReport>,
    pub layer_count: usize,
    pub result: Option<ViewSummary>,
    pub composite: Option<ViewSummary>,
}
