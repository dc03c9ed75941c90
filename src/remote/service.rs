use super::{ApplyRequest, CompositeRequest, RenderedImage, Result, SquareCheckRequest};

/// The remote image-processing collaborator. Every call is one request and
/// one response; nothing is retried.
pub trait ImageService {
    fn apply(&self, request: &ApplyRequest) -> Result<RenderedImage>;
    fn is_square(&self, request: &SquareCheckRequest) -> Result<bool>;
    fn composite(&self, request: &CompositeRequest) -> Result<RenderedImage>;
}
