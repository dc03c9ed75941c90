mod error;
mod geometry;
mod pixel;


pub use error::{CoreError, Result};
pub use geometry::{Dimensions, Point};
pub use pixel::{PixelBuffer, RawSample, Rgb};
pub(crate) use pixel::hex;
