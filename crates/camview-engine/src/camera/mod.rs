//! Camera-facing types and the orientation policy.
//!
//! Session setup and frame delivery belong to the capture collaborator; this
//! module only defines what it hands over.

mod facing;
mod frame;

pub use facing::{orientation_transform, CameraFacing};
pub use frame::CameraFrame;
