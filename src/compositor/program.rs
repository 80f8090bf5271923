//! Two-stage pixel pipeline: a vertex stage over a full-surface quad and a fragment stage that
//! blends the sampled texture over a checkerboard.

use rayon::prelude::*;

use crate::compositor::surface::Surface;
use crate::compositor::texture::Texture;
use crate::foundation::error::{InspectError, InspectResult};
use crate::foundation::math::unit_to_u8;

/// How the opacity slider combines with the source alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpacityMode {
    /// `a = src_a + (1 - src_a) * opacity`: at 0 the true alpha shows through to the checker,
    /// at 1 the raw RGB is shown regardless of alpha.
    #[default]
    RevealAlpha,
    /// `a = src_a * opacity`: at 0 only the checker is visible.
    Fade,
}

impl OpacityMode {
    fn blend_alpha(self, src_alpha: f32, opacity: f32) -> f32 {
        match self {
            Self::RevealAlpha => src_alpha + (1.0 - src_alpha) * opacity,
            Self::Fade => src_alpha * opacity,
        }
    }
}

impl std::str::FromStr for OpacityMode {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reveal-alpha" => Ok(Self::RevealAlpha),
            "fade" => Ok(Self::Fade),
            other => Err(InspectError::validation(format!(
                "unknown opacity mode '{other}' (expected 'reveal-alpha' or 'fade')"
            ))),
        }
    }
}

/// Parameters the checker program is built from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProgramDesc {
    /// Edge length of one checker cell in pixels.
    pub checker_size: u32,
    /// Gray level of even cells, in `[0, 1]`.
    pub checker_dark: f32,
    /// Gray level of odd cells, in `[0, 1]`.
    pub checker_light: f32,
    /// Opacity blend mode.
    pub mode: OpacityMode,
}

impl Default for ProgramDesc {
    fn default() -> Self {
        Self {
            checker_size: 8,
            checker_dark: 0.75,
            checker_light: 1.0,
            mode: OpacityMode::RevealAlpha,
        }
    }
}

/// Validated, ready-to-run checker program with its `opacity` uniform.
#[derive(Clone, Debug)]
pub(crate) struct CheckerProgram {
    cell: f32,
    dark: f32,
    light: f32,
    mode: OpacityMode,
    opacity: f32,
}

impl CheckerProgram {
    pub(crate) fn compile(desc: &ProgramDesc) -> InspectResult<Self> {
        if desc.checker_size == 0 {
            return Err(InspectError::shader("checker cell size must be > 0"));
        }
        for (name, v) in [("dark", desc.checker_dark), ("light", desc.checker_light)] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(InspectError::shader(format!(
                    "checker {name} shade must be within [0, 1], got {v}"
                )));
            }
        }
        Ok(Self {
            cell: desc.checker_size as f32,
            dark: desc.checker_dark,
            light: desc.checker_light,
            mode: desc.mode,
            opacity: 0.0,
        })
    }

    pub(crate) fn set_opacity(&mut self, opacity: f32) {
        self.opacity = clamp_opacity(opacity);
    }

    /// Background gray at window coordinate `frag` (origin bottom-left, pixel centers at `.5`).
    pub(crate) fn checker(&self, frag: [f32; 2]) -> f32 {
        let cells = (frag[0] / self.cell).floor() + (frag[1] / self.cell).floor();
        let parity = cells.rem_euclid(2.0);
        self.dark + parity * (self.light - self.dark)
    }

    /// Fragment stage: opaque output color for one pixel.
    pub(crate) fn shade(&self, frag: [f32; 2], texel: [f32; 4]) -> [u8; 4] {
        let c = self.checker(frag);
        let a = self.mode.blend_alpha(texel[3], self.opacity);
        [
            unit_to_u8(c * (1.0 - a) + texel[0] * a),
            unit_to_u8(c * (1.0 - a) + texel[1] * a),
            unit_to_u8(c * (1.0 - a) + texel[2] * a),
            255,
        ]
    }
}

/// Clamp a slider opacity into `[0, 1]`; non-finite input counts as fully transparent.
pub(crate) fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Vertex buffer of two triangles covering clip space.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct QuadBuffer {
    vertices: [[f32; 2]; 6],
}

impl QuadBuffer {
    pub(crate) fn full_surface() -> Self {
        Self {
            vertices: [
                [-1.0, -1.0],
                [1.0, -1.0],
                [1.0, 1.0],
                [-1.0, -1.0],
                [1.0, 1.0],
                [-1.0, 1.0],
            ],
        }
    }

    /// Vertex stage: window-space rectangle and texture coordinates (`tc = p * 0.5 + 0.5`).
    pub(crate) fn transform(&self, width: u32, height: u32) -> ScreenQuad {
        let mut lo = [f32::INFINITY; 2];
        let mut hi = [f32::NEG_INFINITY; 2];
        for p in &self.vertices {
            for axis in 0..2 {
                lo[axis] = lo[axis].min(p[axis]);
                hi[axis] = hi[axis].max(p[axis]);
            }
        }
        let tc = |p: f32| p * 0.5 + 0.5;
        ScreenQuad {
            x0: tc(lo[0]) * width as f32,
            y0: tc(lo[1]) * height as f32,
            x1: tc(hi[0]) * width as f32,
            y1: tc(hi[1]) * height as f32,
            tc0: [tc(lo[0]), tc(lo[1])],
            tc1: [tc(hi[0]), tc(hi[1])],
        }
    }
}

/// Output of the vertex stage: an axis-aligned window rectangle with interpolated coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ScreenQuad {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    tc0: [f32; 2],
    tc1: [f32; 2],
}

impl ScreenQuad {
    fn covers(&self, frag: [f32; 2]) -> bool {
        frag[0] >= self.x0 && frag[0] < self.x1 && frag[1] >= self.y0 && frag[1] < self.y1
    }

    fn tex_coord(&self, frag: [f32; 2]) -> [f32; 2] {
        let interp = |f: f32, lo: f32, hi: f32, t0: f32, t1: f32| {
            if hi > lo {
                t0 + (f - lo) / (hi - lo) * (t1 - t0)
            } else {
                t0
            }
        };
        [
            interp(frag[0], self.x0, self.x1, self.tc0[0], self.tc1[0]),
            interp(frag[1], self.y0, self.y1, self.tc0[1], self.tc1[1]),
        ]
    }
}

/// Run the fragment stage for every covered pixel of `target`.
///
/// `target` rows are stored top to bottom; window coordinates count from the bottom row.
pub(crate) fn draw(
    program: &CheckerProgram,
    quad: &ScreenQuad,
    texture: &Texture,
    target: &mut Surface,
) {
    let size = target.size();
    if size.is_empty() {
        return;
    }
    let filter = texture.filter_for(size.width, size.height);
    let row_bytes = size.width as usize * 4;
    let height = size.height;

    target
        .pixels_mut()
        .par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(row, out)| {
            let fy = (height - 1 - row as u32) as f32 + 0.5;
            for (x, px) in out.chunks_exact_mut(4).enumerate() {
                let frag = [x as f32 + 0.5, fy];
                if !quad.covers(frag) {
                    continue;
                }
                let [u, v] = quad.tex_coord(frag);
                let texel = texture.sample(u, v, filter);
                px.copy_from_slice(&program.shade(frag, texel));
            }
        });
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/program.rs"]
mod tests;
