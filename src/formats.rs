mod error;
mod preview;
mod upload;


pub use error::{IoError, Result};
pub use preview::{PreviewImage, write_preview};
pub use upload::{Upload, decode_upload, read_upload, supported_formats};
