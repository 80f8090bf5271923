use crate::foundation::error::{InspectError, InspectResult};

/// Playback control understood by `/debug/{action}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DebugAction {
    /// Resume free-running playback.
    Play,
    /// Stop at the next frame boundary.
    NextFrame,
    /// Stop at the next debug group.
    NextGroup,
    /// Stop at the next framebuffer bind.
    NextFbo,
    /// Stop at the next draw call.
    NextDraw,
    /// Stop at the next call.
    Next,
}

impl DebugAction {
    /// All actions in toolbar order.
    pub const ALL: [DebugAction; 6] = [
        Self::Play,
        Self::NextFrame,
        Self::NextGroup,
        Self::NextFbo,
        Self::NextDraw,
        Self::Next,
    ];

    /// Path segment sent to the server.
    pub fn id(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::NextFrame => "nextFrame",
            Self::NextGroup => "nextGroup",
            Self::NextFbo => "nextFbo",
            Self::NextDraw => "nextDraw",
            Self::Next => "next",
        }
    }

    /// Toolbar button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::NextFrame => "next frame",
            Self::NextGroup => "next group",
            Self::NextFbo => "next fbo",
            Self::NextDraw => "next draw",
            Self::Next => "next",
        }
    }

    /// Stepping actions stop on a new framebuffer state worth reloading; `play` does not.
    pub fn reloads_framebuffer(self) -> bool {
        self != Self::Play
    }
}

impl std::str::FromStr for DebugAction {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| InspectError::validation(format!("unknown debug action '{s}'")))
    }
}

/// Object families the server can list and describe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Texture objects (`/texture`).
    Texture,
    /// Program objects (`/program`).
    Program,
    /// Shader objects (`/shader`).
    Shader,
}

impl ObjectKind {
    /// Path segment for list and detail requests.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Texture => "texture",
            Self::Program => "program",
            Self::Shader => "shader",
        }
    }
}

pub(crate) fn begin_path() -> String {
    "/debug/begin".to_string()
}

pub(crate) fn step_path(action: DebugAction) -> String {
    format!("/debug/{}", action.id())
}

pub(crate) fn log_path(lines: u32) -> String {
    format!("/log/-{lines}")
}

pub(crate) fn framebuffer_color_path(fbo: u32, attachment: u32) -> String {
    format!("/fbo/{fbo}/color{attachment}")
}

pub(crate) fn list_path(kind: ObjectKind) -> String {
    format!("/{}", kind.segment())
}

pub(crate) fn detail_path(kind: ObjectKind, name: &str) -> InspectResult<String> {
    Ok(format!("/{}/{}", kind.segment(), checked_name(name)?))
}

pub(crate) fn texture_image_path(name: &str) -> InspectResult<String> {
    Ok(format!("/texture/{}/image", checked_name(name)?))
}

fn checked_name(name: &str) -> InspectResult<&str> {
    let name = name.trim();
    if name.is_empty() || name.contains(['/', '?', '#']) {
        return Err(InspectError::validation(format!(
            "object name '{name}' is not a valid path segment"
        )));
    }
    Ok(name)
}

/// Body of `/log/-N`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LogTail {
    /// Most recent entries, oldest first.
    #[serde(default)]
    pub log: Vec<String>,
}

#[cfg(test)]
#[path = "../../tests/unit/client/endpoints.rs"]
mod tests;
