//! Checkerboard image compositor.
//!
//! A source bitmap is uploaded as a texture, drawn through a full-surface quad, and blended over
//! an 8-pixel checkerboard into an offscreen surface that is read back as a [`RenderedImage`].

pub(crate) mod program;
pub(crate) mod render;
pub(crate) mod source;
pub(crate) mod surface;
pub(crate) mod texture;

pub use program::{OpacityMode, ProgramDesc};
pub use render::{Compositor, ResourceState};
pub use source::{MagFilter, SourceImage};
pub use surface::RenderedImage;
