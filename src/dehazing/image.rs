//! Image containers module
//!
//! Single-channel planes, the three-plane BGR image the stages operate on,
//! and the color-space collaborators (saturation, grayscale) they consume.

pub mod types;
pub mod color;

pub use types::{BgrImage, Plane, BLUE, GREEN, RED};
pub use color::{grayscale_plane, saturation_plane};
