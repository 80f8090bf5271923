use crate::client::ObjectKind;
use crate::inspect::PropertyView;

/// Top-level dashboard tabs, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Panel {
    /// Playback toolbar, framebuffer view and log tail.
    Debug,
    /// Program objects.
    Programs,
    /// Shader objects.
    Shaders,
    /// Texture objects with an image view.
    Textures,
    /// Buffer objects; no dedicated loader.
    Buffers,
}

impl Panel {
    /// All panels in tab order.
    pub const ALL: [Panel; 5] = [
        Self::Debug,
        Self::Programs,
        Self::Shaders,
        Self::Textures,
        Self::Buffers,
    ];

    /// Tab id.
    pub fn id(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Programs => "programs",
            Self::Shaders => "shaders",
            Self::Textures => "textures",
            Self::Buffers => "buffers",
        }
    }

    /// Object kind listed by this panel, if it is a list panel.
    pub fn object_kind(self) -> Option<ObjectKind> {
        match self {
            Self::Programs => Some(ObjectKind::Program),
            Self::Shaders => Some(ObjectKind::Shader),
            Self::Textures => Some(ObjectKind::Texture),
            Self::Debug | Self::Buffers => None,
        }
    }

    /// List panel showing objects of `kind`.
    pub fn for_kind(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Program => Self::Programs,
            ObjectKind::Shader => Self::Shaders,
            ObjectKind::Texture => Self::Textures,
        }
    }
}

/// One selected object and its property dump.
#[derive(Clone, Debug)]
pub struct ObjectDetail {
    /// Object name as listed by the server.
    pub name: String,
    /// Collapsible property dump.
    pub props: PropertyView,
}

/// What a panel currently shows.
#[derive(Clone, Debug, Default)]
pub enum PanelContent {
    /// Never activated, or its first load failed.
    #[default]
    Empty,
    /// The debug panel; its state lives in the dashboard's views and log.
    Debug,
    /// A list of object names with an optional selection.
    Objects {
        /// Object kind.
        kind: ObjectKind,
        /// Names in server order.
        names: Vec<String>,
        /// Currently selected object.
        selected: Option<ObjectDetail>,
    },
    /// Placeholder panel labelled with its id.
    Generic(String),
}

impl PanelContent {
    /// Whether the panel has been populated.
    pub fn is_loaded(&self) -> bool {
        !matches!(self, Self::Empty)
    }

    /// Listed object names, for list panels.
    pub fn names(&self) -> &[String] {
        match self {
            Self::Objects { names, .. } => names,
            _ => &[],
        }
    }

    /// Selected object, for list panels.
    pub fn selected(&self) -> Option<&ObjectDetail> {
        match self {
            Self::Objects { selected, .. } => selected.as_ref(),
            _ => None,
        }
    }
}
