//! glinspect is a client for a GL debug server: it steps playback, browses GL objects and shows
//! framebuffer and texture snapshots composited over a checkerboard.
//!
//! The public API is model-oriented:
//!
//! - Connect through a [`DebugServer`] (usually [`HttpDebugServer`])
//! - Drive a [`Dashboard`] with [`UiEvent`]s
//! - Or composite a [`SourceImage`] directly with a [`Compositor`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod client;
pub(crate) mod compositor;
/// TOML configuration.
pub mod config;
pub(crate) mod dashboard;
pub(crate) mod inspect;
pub(crate) mod view;

pub use crate::foundation::core::{Size, SizeEnvelope};
pub use crate::foundation::error::{InspectError, InspectResult};

pub use crate::client::{DebugAction, DebugServer, HttpDebugServer, LogTail, ObjectKind};
pub use crate::compositor::{
    Compositor, MagFilter, OpacityMode, ProgramDesc, RenderedImage, ResourceState, SourceImage,
};
pub use crate::config::{InspectConfig, ServerConfig, ViewConfig};
pub use crate::dashboard::{
    COLOR0_VIEW, Dashboard, Handled, ObjectDetail, Panel, PanelContent, TEXTURE_VIEW, UiEvent,
};
pub use crate::inspect::{PropertyTree, PropertyView};
pub use crate::view::{Debouncer, ImageView};
