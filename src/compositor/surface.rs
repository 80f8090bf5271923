use std::path::Path;

use anyhow::Context;
use base64::Engine as _;
use image::ImageEncoder as _;

use crate::foundation::core::Size;
use crate::foundation::error::{InspectError, InspectResult};

/// Offscreen RGBA8 render target, rows top to bottom.
#[derive(Debug, Default)]
pub(crate) struct Surface {
    size: Size,
    data: Vec<u8>,
    allocations: u64,
}

impl Surface {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reallocate when `size` differs from the current size. Returns `true` on reallocation.
    pub(crate) fn ensure_size(&mut self, size: Size) -> bool {
        if self.size == size && self.data.len() == size.rgba8_len() {
            return false;
        }
        self.size = size;
        self.data = vec![0; size.rgba8_len()];
        self.allocations = self.allocations.saturating_add(1);
        true
    }

    pub(crate) fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn allocations(&self) -> u64 {
        self.allocations
    }

    pub(crate) fn pixels(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Read back the current contents.
    pub(crate) fn snapshot(&self) -> RenderedImage {
        RenderedImage {
            width: self.size.width,
            height: self.size.height,
            rgba8: self.pixels().to_vec(),
        }
    }
}

/// A composited image read back from a view's surface.
///
/// Pixels are opaque RGBA8, rows top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub rgba8: Vec<u8>,
}

impl RenderedImage {
    /// Pixel at `(x, y)`, `y` counted from the top row.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba8.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> InspectResult<Vec<u8>> {
        let mut buf = Vec::new();
        image::codecs::png::PngEncoder::new(&mut buf)
            .write_image(
                &self.rgba8,
                self.width,
                self.height,
                image::ExtendedColorType::Rgba8,
            )
            .context("encode png")
            .map_err(|e| InspectError::decode(format!("{e:#}")))?;
        Ok(buf)
    }

    /// Encode as a `data:image/png;base64,...` URI suitable for an `<img src>`.
    pub fn to_data_uri(&self) -> InspectResult<String> {
        let png = self.to_png()?;
        let b64 = base64::engine::general_purpose::STANDARD.encode(png);
        Ok(format!("data:image/png;base64,{b64}"))
    }

    /// Write a PNG file, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> InspectResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let png = self.to_png()?;
        std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/surface.rs"]
mod tests;
