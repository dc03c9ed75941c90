mod adjustment;
mod error;
mod http;
mod multipart;
mod request;
mod response;
mod service;

#[cfg(test)]
pub(crate) mod fake;

pub use adjustment::Adjustment;
pub use error::{RemoteError, Result};
pub use http::HttpImageService;
pub use multipart::MultipartForm;
pub use request::{ApplyRequest, CompositeRequest, SquareCheckRequest};
pub use response::{RenderedImage, WireImage};
pub use service::ImageService;
