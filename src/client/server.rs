use crate::client::endpoints::{DebugAction, ObjectKind};
use crate::compositor::SourceImage;
use crate::foundation::error::InspectResult;

/// Contract of the GL debug server as consumed by the dashboard.
///
/// Each call is one request; there are no retries. Implementations report transport and
/// protocol failures as errors and leave recovery to the caller.
pub trait DebugServer {
    /// Start a debug session (`/debug/begin`).
    fn begin(&mut self) -> InspectResult<()>;

    /// Advance playback (`/debug/{action}`).
    fn step(&mut self, action: DebugAction) -> InspectResult<()>;

    /// Most recent `lines` log entries (`/log/-N`).
    fn log_tail(&mut self, lines: u32) -> InspectResult<Vec<String>>;

    /// Snapshot of a framebuffer color attachment (`/fbo/{fbo}/color{attachment}`).
    fn framebuffer_color(&mut self, fbo: u32, attachment: u32) -> InspectResult<SourceImage>;

    /// Object names of one kind, in server order.
    fn list(&mut self, kind: ObjectKind) -> InspectResult<Vec<String>>;

    /// Detail object for one named object.
    fn detail(&mut self, kind: ObjectKind, name: &str) -> InspectResult<serde_json::Value>;

    /// Image contents of a texture (`/texture/{name}/image`).
    fn texture_image(&mut self, name: &str) -> InspectResult<SourceImage>;
}
