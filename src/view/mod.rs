//! Image views: per-panel viewport state driven by load, slider and resize events.

pub(crate) mod debounce;
pub(crate) mod image_view;

pub use debounce::Debouncer;
pub use image_view::ImageView;
