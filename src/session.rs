mod composite;
mod controller;
mod driver;
mod error;
mod notice;
mod sequence;


pub use composite::{plan_composite, recompose};
pub use controller::{CompositeDispatch, GrayscaleDispatch, Session, View};
pub use error::{Result, SessionError};
pub use notice::{Notice, NoticeLevel};
pub use sequence::{Completion, Pending, RequestSequencer, ViewTarget};
