use crate::foundation::error::{InspectError, InspectResult};

/// Pixel dimensions of a render target or container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a size without validation. Zero extents are allowed and mean "nothing to draw".
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return `true` when either extent is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    pub fn area(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> usize {
        self.area().saturating_mul(4)
    }
}

/// Min/max width envelope applied when a container adopts a source image's aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SizeEnvelope {
    /// Smallest container width in pixels.
    pub min: u32,
    /// Largest container width in pixels.
    pub max: u32,
}

impl Default for SizeEnvelope {
    fn default() -> Self {
        Self { min: 128, max: 512 }
    }
}

impl SizeEnvelope {
    /// Create a validated envelope with `0 < min <= max`.
    pub fn new(min: u32, max: u32) -> InspectResult<Self> {
        if min == 0 {
            return Err(InspectError::validation("size envelope min must be > 0"));
        }
        if min > max {
            return Err(InspectError::validation("size envelope min must be <= max"));
        }
        Ok(Self { min, max })
    }

    /// Square container at the minimum size; the initial size of a fresh view.
    pub fn initial(self) -> Size {
        Size::new(self.min, self.min)
    }

    /// Container size matching the aspect ratio of a `width x height` source.
    ///
    /// The width is clamped into `[min, max]`; portrait sources shrink the width by the aspect
    /// ratio so the height stays inside the envelope. Both extents are at least one pixel.
    pub fn fit_aspect(self, width: u32, height: u32) -> Size {
        if width == 0 || height == 0 {
            return self.initial();
        }
        let aspect = f64::from(width) / f64::from(height);
        let mut w = f64::from(width).clamp(f64::from(self.min), f64::from(self.max));
        if aspect < 1.0 {
            w *= aspect;
        }
        let h = w / aspect;
        Size::new(round_px(w), round_px(h))
    }

    /// Clamp a user-requested container size into `[min, max]` on both axes.
    ///
    /// Zero extents are kept so an empty request stays a no-op render.
    pub fn clamp(self, size: Size) -> Size {
        let axis = |v: u32| if v == 0 { 0 } else { v.clamp(self.min, self.max) };
        Size::new(axis(size.width), axis(size.height))
    }
}

fn round_px(v: f64) -> u32 {
    v.round().clamp(1.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
