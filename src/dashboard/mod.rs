//! Dashboard model: tabs, image views, property dumps and the debug toolbar.

pub(crate) mod events;
pub(crate) mod panel;
pub(crate) mod session;

pub use events::{Handled, UiEvent};
pub use panel::{ObjectDetail, Panel, PanelContent};
pub use session::{COLOR0_VIEW, Dashboard, TEXTURE_VIEW};
