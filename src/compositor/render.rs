use crate::compositor::program::{self, CheckerProgram, ProgramDesc, QuadBuffer, clamp_opacity};
use crate::compositor::source::SourceImage;
use crate::compositor::surface::{RenderedImage, Surface};
use crate::compositor::texture::Texture;
use crate::foundation::core::Size;
use crate::foundation::error::InspectResult;

/// Lifecycle of a compositor's resource bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing allocated yet; the first valid render creates the bundle.
    Uninitialized,
    /// Texture, quad buffer, program and surface exist and are reused.
    Ready,
}

/// Resources owned by one view: program, quad vertex buffer, texture and offscreen surface.
///
/// Released exactly once, when the owning [`Compositor`] is dropped or explicitly released.
#[derive(Debug)]
pub(crate) struct RenderResources {
    program: CheckerProgram,
    quad: QuadBuffer,
    texture: Texture,
    surface: Surface,
}

impl RenderResources {
    fn create(desc: &ProgramDesc) -> InspectResult<Self> {
        let program = CheckerProgram::compile(desc)?;
        tracing::debug!(checker_size = desc.checker_size, "render resources created");
        Ok(Self {
            program,
            quad: QuadBuffer::full_surface(),
            texture: Texture::new(),
            surface: Surface::new(),
        })
    }
}

impl Drop for RenderResources {
    fn drop(&mut self) {
        tracing::debug!(
            uploads = self.texture.uploads(),
            allocations = self.surface.allocations(),
            "render resources released"
        );
    }
}

/// Composites a source bitmap over a checkerboard into a view-owned offscreen surface.
#[derive(Debug)]
pub struct Compositor {
    desc: ProgramDesc,
    resources: Option<RenderResources>,
}

impl Compositor {
    /// Create a compositor; no resources are allocated until the first render.
    pub fn new(desc: ProgramDesc) -> Self {
        Self {
            desc,
            resources: None,
        }
    }

    /// Program parameters this compositor builds its resources from.
    pub fn desc(&self) -> &ProgramDesc {
        &self.desc
    }

    /// Current resource lifecycle state.
    pub fn state(&self) -> ResourceState {
        if self.resources.is_some() {
            ResourceState::Ready
        } else {
            ResourceState::Uninitialized
        }
    }

    /// Render `source` at `width x height` with the given slider `opacity`.
    ///
    /// Returns `Ok(None)` without touching the surface when either dimension is zero. The
    /// texture is re-uploaded on every call; the surface is reallocated only when the size
    /// changes.
    #[tracing::instrument(level = "debug", skip(self, source), fields(src = ?source.dimensions()))]
    pub fn render(
        &mut self,
        source: &SourceImage,
        opacity: f32,
        width: u32,
        height: u32,
    ) -> InspectResult<Option<RenderedImage>> {
        let size = Size::new(width, height);
        if size.is_empty() {
            tracing::trace!("skipping render with empty target");
            return Ok(None);
        }

        let bundle = match self.resources.take() {
            Some(existing) => existing,
            None => RenderResources::create(&self.desc).inspect_err(|e| {
                tracing::error!(error = %e, "checker program construction failed");
            })?,
        };
        let res = self.resources.insert(bundle);

        if res.surface.ensure_size(size) {
            tracing::debug!(
                ?size,
                allocations = res.surface.allocations(),
                "surface reallocated"
            );
        }
        res.texture.upload(source);
        res.program.set_opacity(clamp_opacity(opacity));
        let quad = res.quad.transform(width, height);
        program::draw(&res.program, &quad, &res.texture, &mut res.surface);

        Ok(Some(res.surface.snapshot()))
    }

    /// Current surface contents, if resources exist.
    pub fn surface_snapshot(&self) -> Option<RenderedImage> {
        self.resources.as_ref().map(|r| r.surface.snapshot())
    }

    /// Number of texture uploads performed by the current resource bundle.
    pub fn texture_uploads(&self) -> u64 {
        self.resources.as_ref().map_or(0, |r| r.texture.uploads())
    }

    /// Drop the resource bundle; the next render recreates it.
    pub fn release(&mut self) {
        self.resources = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/render.rs"]
mod tests;
