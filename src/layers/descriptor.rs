use serde::{Deserialize, Serialize};

use super::{Layer, LayerContent, LayerKind};

/// Layer as the compositing endpoint reads it. Keys that do not apply to the
/// layer's kind are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDescriptor {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub name: String,
    pub visible: bool,
    pub opacity: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_angle: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl From<&Layer> for LayerDescriptor {
    fn from(layer: &Layer) -> Self {
        let mut descriptor = Self {
            id: layer.id.0,
            kind: layer.kind(),
            name: layer.name.clone(),
            visible: layer.visible,
            opacity: layer.opacity,
            color: None,
            gradient_start: None,
            gradient_end: None,
            gradient_angle: None,
            image_data: None,
            filter_type: None,
            file_name: None,
        };
        match &layer.content {
            LayerContent::Filter {
                adjustment,
                rendered,
            } => {
                descriptor.filter_type = Some(adjustment.name().to_string());
                descriptor.image_data = Some(rendered.preview.to_data_url());
            }
            LayerContent::Color { color } => descriptor.color = Some(color.to_hex()),
            LayerContent::Gradient {
                start,
                end,
                angle_degrees,
            } => {
                descriptor.gradient_start = Some(start.to_hex());
                descriptor.gradient_end = Some(end.to_hex());
                descriptor.gradient_angle = Some(*angle_degrees);
            }
            LayerContent::Image {
                data_url,
                file_name,
            } => {
                descriptor.image_data = Some(data_url.clone());
                descriptor.file_name = Some(file_name.clone());
            }
        }
        descriptor
    }
}

/// Serializes layers, in order, into the JSON array the service expects.
pub fn descriptors_json<'a>(
    layers: impl IntoIterator<Item = &'a Layer>,
) -> serde_json::Result<String> {
    let descriptors = layers
        .into_iter()
        .map(LayerDescriptor::from)
        .collect::<Vec<_>>();
    serde_json::to_string(&descriptors)
}
