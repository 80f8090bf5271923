use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Size;
use crate::foundation::error::{InspectError, InspectResult};

/// Texture magnification filter used when a source is drawn larger than its native size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagFilter {
    /// Pick the closest texel. Preferred for pixel-exact inspection of small textures.
    Nearest,
    /// Bilinear interpolation between the four closest texels.
    #[default]
    Linear,
}

impl MagFilter {
    /// Interpret the `GL_TEXTURE_MAG_FILTER` value reported in texture metadata.
    ///
    /// Only `GL_NEAREST` selects [`MagFilter::Nearest`]; anything else keeps the linear default.
    pub fn from_gl_enum(value: &str) -> Self {
        if value.trim() == "GL_NEAREST" {
            Self::Nearest
        } else {
            Self::Linear
        }
    }

    /// Filter hint carried by a texture's metadata object, if it names one.
    pub fn from_texture_metadata(meta: &serde_json::Value) -> Self {
        meta.get("GL_TEXTURE_MAG_FILTER")
            .and_then(serde_json::Value::as_str)
            .map(Self::from_gl_enum)
            .unwrap_or_default()
    }
}

impl std::str::FromStr for MagFilter {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "linear" => Ok(Self::Linear),
            other => Err(InspectError::validation(format!(
                "unknown filter '{other}' (expected 'nearest' or 'linear')"
            ))),
        }
    }
}

/// A decoded bitmap with straight (non-premultiplied) RGBA8 pixels, rows top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
    filter: MagFilter,
}

impl SourceImage {
    /// Wrap tightly packed RGBA8 pixels. Dimensions must be positive and match the buffer.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> InspectResult<Self> {
        if width == 0 || height == 0 {
            return Err(InspectError::validation(format!(
                "source image must have positive dimensions, got {width}x{height}"
            )));
        }
        let expected = Size::new(width, height).rgba8_len();
        if rgba8.len() != expected {
            return Err(InspectError::validation(format!(
                "source image buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
            filter: MagFilter::default(),
        })
    }

    /// A uniformly colored image.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> InspectResult<Self> {
        let px = Size::new(width, height).area();
        Self::from_rgba8(width, height, rgba.repeat(px))
    }

    /// Decode encoded image bytes (PNG, JPEG, ...) into straight RGBA8.
    pub fn decode(bytes: &[u8]) -> InspectResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .context("decode image from memory")
            .map_err(|e| InspectError::decode(format!("{e:#}")))?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    /// Return a copy carrying a different magnification filter hint.
    pub fn with_filter(mut self, filter: MagFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel bytes, rows top to bottom.
    pub fn rgba8(&self) -> &[u8] {
        &self.rgba8
    }

    /// Magnification filter hint.
    pub fn filter(&self) -> MagFilter {
        self.filter
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/source.rs"]
mod tests;
