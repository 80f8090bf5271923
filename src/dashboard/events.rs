use std::time::Instant;

use crate::client::{DebugAction, ObjectKind};
use crate::dashboard::panel::Panel;
use crate::foundation::core::Size;

/// Named UI events the dashboard reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// A toolbar button was clicked.
    DebugButton(DebugAction),
    /// A view's opacity slider moved (`0..=100`).
    OpacityChanged {
        /// View name.
        view: String,
        /// Slider position.
        value: u8,
    },
    /// A view's container was resized by the user.
    ContainerResized {
        /// View name.
        view: String,
        /// New container size.
        size: Size,
    },
    /// The window was resized; views re-render once resizing settles.
    WindowResized(Instant),
    /// Clock tick used to flush debounced work.
    Tick(Instant),
    /// A tab is about to be shown.
    ActivatePanel(Panel),
    /// An object name was clicked in a list panel.
    Select {
        /// Object kind.
        kind: ObjectKind,
        /// Object name.
        name: String,
    },
    /// A nested property key was clicked in the selected object's dump.
    ToggleProperty {
        /// Object kind whose selection is affected.
        kind: ObjectKind,
        /// Key path of the mapping.
        path: Vec<String>,
    },
    /// A view was removed from its panel.
    RemoveView(String),
}

/// Result of handling one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handled {
    /// Visible state changed.
    Updated,
    /// Nothing to do (unknown target, pending debounce, already loaded).
    Unchanged,
    /// A server request failed; affected views keep their previous contents.
    Stale,
}
