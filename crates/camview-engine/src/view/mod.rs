//! Display view: owns one render backend plus the state it renders.

mod image_view;
mod mailbox;

pub use image_view::{DisplayState, ImageView, ViewConfig};
pub use mailbox::FrameMailbox;
