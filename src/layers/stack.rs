use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Layer, LayerId, LayerSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Toward the top of the stack (end of the list).
    Up,
    /// Toward the bottom of the stack (start of the list).
    Down,
}

/// Ordered layer stack, bottom first.
///
/// Every operation returns a new stack and leaves `self` untouched. Layers are
/// shared between versions, so copies stay cheap even for filter layers that
/// carry rendered buffers. Ids are never reused, even after deletion.
#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    layers: Vec<Arc<Layer>>,
    next_id: u64,
    revision: u64,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> &[Arc<Layer>] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, id: LayerId) -> Option<&Arc<Layer>> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn position(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id == id)
    }

    pub fn visible(&self) -> impl Iterator<Item = &Arc<Layer>> {
        self.layers.iter().filter(|layer| layer.visible)
    }

    pub fn top(&self) -> Option<&Arc<Layer>> {
        self.layers.last()
    }

    /// Bumped by every operation that changed the stack; no-ops keep it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn next(&self, layers: Vec<Arc<Layer>>, next_id: u64) -> Self {
        Self {
            layers,
            next_id,
            revision: self.revision + 1,
        }
    }

    fn replace(&self, id: LayerId, edit: impl FnOnce(&Layer) -> Option<Layer>) -> Self {
        let Some(index) = self.position(id) else {
            return self.clone();
        };
        let Some(edited) = edit(&self.layers[index]) else {
            return self.clone();
        };
        let mut layers = self.layers.clone();
        layers[index] = Arc::new(edited);
        self.next(layers, self.next_id)
    }

    pub fn create(&self, spec: LayerSpec) -> Self {
        let id = LayerId(self.next_id + 1);
        let mut layers = self.layers.clone();
        layers.push(Arc::new(Layer {
            id,
            name: spec.name,
            visible: true,
            opacity: spec.opacity,
            content: spec.content,
        }));
        self.next(layers, id.0)
    }

    /// Empty stack that keeps allocating ids after the ones already used.
    pub fn cleared(&self) -> Self {
        if self.layers.is_empty() {
            return self.clone();
        }
        self.next(Vec::new(), self.next_id)
    }

    pub fn toggle_visibility(&self, id: LayerId) -> Self {
        self.replace(id, |layer| {
            Some(Layer {
                visible: !layer.visible,
                ..layer.clone()
            })
        })
    }

    pub fn set_opacity(&self, id: LayerId, opacity: f32) -> Self {
        if !opacity.is_finite() {
            return self.clone();
        }
        let opacity = opacity.clamp(0.0, 1.0);
        self.replace(id, |layer| {
            (layer.opacity != opacity).then(|| Layer {
                opacity,
                ..layer.clone()
            })
        })
    }

    pub fn rename(&self, id: LayerId, name: impl Into<String>) -> Self {
        let name = name.into();
        self.replace(id, |layer| {
            (layer.name != name).then(|| Layer {
                name,
                ..layer.clone()
            })
        })
    }

    pub fn delete(&self, id: LayerId) -> Self {
        let Some(index) = self.position(id) else {
            return self.clone();
        };
        let mut layers = self.layers.clone();
        layers.remove(index);
        self.next(layers, self.next_id)
    }

    /// Appends a copy of `id` at the top of the stack under a fresh id.
    pub fn duplicate(&self, id: LayerId) -> Self {
        let Some(original) = self.get(id) else {
            return self.clone();
        };
        let copy = LayerId(self.next_id + 1);
        let mut layers = self.layers.clone();
        layers.push(Arc::new(Layer {
            id: copy,
            name: format!("{} copy", original.name),
            ..Layer::clone(original)
        }));
        self.next(layers, copy.0)
    }

    /// Swaps the layer at `index` with its neighbour; no-op at either end.
    pub fn move_layer(&self, index: usize, direction: MoveDirection) -> Self {
        let target = match direction {
            MoveDirection::Up => index.checked_add(1),
            MoveDirection::Down => index.checked_sub(1),
        };
        match target {
            Some(target) if index < self.layers.len() && target < self.layers.len() => {
                let mut layers = self.layers.clone();
                layers.swap(index, target);
                self.next(layers, self.next_id)
            }
            _ => self.clone(),
        }
    }
}
