use crate::compositor::source::{MagFilter, SourceImage};
use crate::foundation::math::{lerp, u8_to_unit};

/// Filter applied to a single draw, after choosing between magnification and minification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SampleFilter {
    Nearest,
    Linear,
}

/// 2D texture with clamp-to-edge wrapping.
///
/// Rows are stored bottom to top (the source is flipped on upload), so `v = 0` addresses the
/// bottom edge of the image like a GL texture coordinate.
#[derive(Debug, Default)]
pub(crate) struct Texture {
    width: u32,
    height: u32,
    texels: Vec<u8>,
    mag_filter: MagFilter,
    uploads: u64,
}

impl Texture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replace the texture contents with `source`, reusing the allocation when possible.
    pub(crate) fn upload(&mut self, source: &SourceImage) {
        let (w, h) = source.dimensions();
        let row = w as usize * 4;
        self.texels.clear();
        self.texels.reserve(row * h as usize);
        for src_row in source.rgba8().chunks_exact(row).rev() {
            self.texels.extend_from_slice(src_row);
        }
        self.width = w;
        self.height = h;
        self.mag_filter = source.filter();
        self.uploads = self.uploads.saturating_add(1);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub(crate) fn uploads(&self) -> u64 {
        self.uploads
    }

    /// Pick the filter for drawing into a `target_w x target_h` area.
    ///
    /// More than one texel per pixel on either axis minifies, which is always linear.
    pub(crate) fn filter_for(&self, target_w: u32, target_h: u32) -> SampleFilter {
        let (w, h) = self.dimensions();
        let rho_x = w as f32 / target_w.max(1) as f32;
        let rho_y = h as f32 / target_h.max(1) as f32;
        if rho_x.max(rho_y) > 1.0 {
            return SampleFilter::Linear;
        }
        match self.mag_filter {
            MagFilter::Nearest => SampleFilter::Nearest,
            MagFilter::Linear => SampleFilter::Linear,
        }
    }

    /// Sample normalized RGBA at texture coordinate `(u, v)`.
    pub(crate) fn sample(&self, u: f32, v: f32, filter: SampleFilter) -> [f32; 4] {
        if self.is_empty() {
            return [0.0; 4];
        }
        match filter {
            SampleFilter::Nearest => {
                let x = nearest_index(u, self.width);
                let y = nearest_index(v, self.height);
                self.fetch(x, y)
            }
            SampleFilter::Linear => {
                let fx = u * self.width as f32 - 0.5;
                let fy = v * self.height as f32 - 0.5;
                let x0 = fx.floor();
                let y0 = fy.floor();
                let tx = fx - x0;
                let ty = fy - y0;
                let (x0, x1) = (clamp_index(x0, self.width), clamp_index(x0 + 1.0, self.width));
                let (y0, y1) = (clamp_index(y0, self.height), clamp_index(y0 + 1.0, self.height));

                let a = self.fetch(x0, y0);
                let b = self.fetch(x1, y0);
                let c = self.fetch(x0, y1);
                let d = self.fetch(x1, y1);
                let mut out = [0.0; 4];
                for i in 0..4 {
                    out[i] = lerp(lerp(a[i], b[i], tx), lerp(c[i], d[i], tx), ty);
                }
                out
            }
        }
    }

    fn fetch(&self, x: u32, y: u32) -> [f32; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.texels[idx..idx + 4];
        [
            u8_to_unit(px[0]),
            u8_to_unit(px[1]),
            u8_to_unit(px[2]),
            u8_to_unit(px[3]),
        ]
    }
}

fn nearest_index(t: f32, extent: u32) -> u32 {
    clamp_index((t * extent as f32).floor(), extent)
}

fn clamp_index(i: f32, extent: u32) -> u32 {
    if !i.is_finite() || i <= 0.0 {
        return 0;
    }
    (i as u32).min(extent - 1)
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/texture.rs"]
mod tests;
