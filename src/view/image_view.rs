use crate::compositor::{Compositor, ProgramDesc, RenderedImage, ResourceState, SourceImage};
use crate::config::ViewConfig;
use crate::foundation::core::{Size, SizeEnvelope};
use crate::foundation::error::InspectResult;

/// A named panel showing one source image composited over a checkerboard.
///
/// The view owns its compositor resources; they are created on the first render and released
/// when the view is dropped.
#[derive(Debug)]
pub struct ImageView {
    name: String,
    url: String,
    envelope: SizeEnvelope,
    compositor: Compositor,
    source: Option<SourceImage>,
    prev_dims: Option<(u32, u32)>,
    container: Size,
    slider: u8,
    last_output: Option<RenderedImage>,
    renders: u64,
}

impl ImageView {
    /// Create a view for the image at `url`. The container starts as a minimum-size square.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        cfg: &ViewConfig,
        program: ProgramDesc,
    ) -> InspectResult<Self> {
        let envelope = cfg.envelope()?;
        Ok(Self {
            name: name.into(),
            url: url.into(),
            envelope,
            compositor: Compositor::new(program),
            source: None,
            prev_dims: None,
            container: envelope.initial(),
            slider: cfg.default_opacity.min(100),
            last_output: None,
            renders: 0,
        })
    }

    /// A new source bitmap finished loading.
    ///
    /// When its dimensions differ from the previous source, the container adopts the source's
    /// aspect ratio within the size envelope before rendering.
    pub fn on_image_loaded(&mut self, source: SourceImage) -> InspectResult<Option<&RenderedImage>> {
        let dims = source.dimensions();
        if self.prev_dims != Some(dims) {
            self.prev_dims = Some(dims);
            self.container = self.envelope.fit_aspect(dims.0, dims.1);
            tracing::debug!(
                view = %self.name,
                src = ?dims,
                container = ?self.container,
                "container adopted source aspect ratio"
            );
        }
        self.source = Some(source);
        self.render_at(self.container)
    }

    /// The opacity slider moved to `value` (`0..=100`).
    pub fn on_opacity_changed(&mut self, value: u8) -> InspectResult<Option<&RenderedImage>> {
        self.slider = value.min(100);
        self.render_at(self.container)
    }

    /// The container was resized by the user. The size is clamped into the view's envelope.
    pub fn on_container_resized(&mut self, size: Size) -> InspectResult<Option<&RenderedImage>> {
        let size = self.envelope.clamp(size);
        self.container = size;
        self.render_at(size)
    }

    /// Render again at the current container size.
    pub fn rerender(&mut self) -> InspectResult<Option<&RenderedImage>> {
        self.render_at(self.container)
    }

    fn render_at(&mut self, size: Size) -> InspectResult<Option<&RenderedImage>> {
        let Some(source) = &self.source else {
            return Ok(None);
        };
        let opacity = f32::from(self.slider) / 100.0;
        match self
            .compositor
            .render(source, opacity, size.width, size.height)?
        {
            Some(img) => {
                self.renders = self.renders.saturating_add(1);
                self.last_output = Some(img);
                Ok(self.last_output.as_ref())
            }
            None => Ok(None),
        }
    }

    /// Release compositor resources; the next render recreates them.
    pub fn release(&mut self) {
        self.compositor.release();
    }

    /// View name, unique within a dashboard.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source URL path on the debug server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resource lifecycle state.
    pub fn state(&self) -> ResourceState {
        self.compositor.state()
    }

    /// Current container size.
    pub fn container(&self) -> Size {
        self.container
    }

    /// Slider position, `0..=100`.
    pub fn slider(&self) -> u8 {
        self.slider
    }

    /// Opacity in `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        f32::from(self.slider) / 100.0
    }

    /// Most recently loaded source bitmap.
    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Most recent composited output.
    pub fn last_output(&self) -> Option<&RenderedImage> {
        self.last_output.as_ref()
    }

    /// Number of renders that produced output.
    pub fn render_count(&self) -> u64 {
        self.renders
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/image_view.rs"]
mod tests;
