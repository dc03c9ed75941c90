mod descriptor;
mod layer;
mod stack;


pub use descriptor::{LayerDescriptor, descriptors_json};
pub use layer::{Layer, LayerContent, LayerId, LayerKind, LayerSpec};
pub use stack::{LayerStack, MoveDirection};
