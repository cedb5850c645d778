//! Triangle rasterization
//!
//! Edge-function coverage over a clipped bounding box, with an ownership rule
//! for pixels lying exactly on an edge.

use log::trace;

use super::math::{edge_covers, edge_function, ndc_to_screen, Vec4};
use super::types::{Color, RenderTarget};
use crate::gl::{process_vertex, PipelineState, MAX_VARYINGS};

/// Color written when the current program has no fragment shader body (0xAARRGGBB)
pub const UNSHADED_FILL: u32 = 0xFF00_FFFF;

/// A covered pixel and its barycentric weights (sum to 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub x: usize,
    pub y: usize,
    pub weights: [f32; 3],
}

/// Walk the pixels of a `width` x `height` target covered by the screen-space
/// triangle `v`, calling `plot` once per covered pixel. Returns the number of
/// pixels plotted.
///
/// Triangles with signed area <= 0 (degenerate or back-facing) plot nothing.
pub fn rasterize_triangle(width: usize, height: usize, v: [Vec4; 3], mut plot: impl FnMut(Fragment)) -> usize {
    let [v0, v1, v2] = v;

    let area = edge_function(v0, v1, v2);
    // Also rejects NaN areas
    if !(area > 0.0) {
        trace!("triangle culled: area {}", area);
        return 0;
    }

    // Round to nearest, half up
    let round = |f: f32| (f + 0.5).floor() as i64;
    let min_x = round(v0.x.min(v1.x).min(v2.x));
    let min_y = round(v0.y.min(v1.y).min(v2.y));
    let max_x = round(v0.x.max(v1.x).max(v2.x));
    let max_y = round(v0.y.max(v1.y).max(v2.y));

    let (w, h) = (width as i64, height as i64);
    if min_x >= w || min_y >= h || max_x < 0 || max_y < 0 {
        trace!("triangle culled: outside target");
        return 0;
    }

    let x_start = min_x.max(0) as usize;
    let x_end = max_x.min(w) as usize;
    let y_start = min_y.max(0) as usize;
    let y_end = max_y.min(h) as usize;

    let mut covered = 0;
    for j in y_start..y_end {
        for i in x_start..x_end {
            let p = Vec4::new(i as f32 + 0.5, j as f32 + 0.5, 0.0, 0.0);
            let e0 = edge_function(v1, v2, p);
            let e1 = edge_function(v2, v0, p);
            let e2 = edge_function(v0, v1, p);

            if edge_covers(v1, v2, e0) && edge_covers(v2, v0, e1) && edge_covers(v0, v1, e2) {
                plot(Fragment {
                    x: i,
                    y: j,
                    weights: [e0 / area, e1 / area, e2 / area],
                });
                covered += 1;
            }
        }
    }
    covered
}

/// Draw the triangle made of vertices `i0`, `i1`, `i2` into `target`.
///
/// Each covered pixel gets the current fragment shader's output 0, fed with the
/// fragment coordinate in input 0 and the linearly interpolated vertex outputs
/// 1..16. Without a fragment shader the pixel gets [`UNSHADED_FILL`].
/// No depth test is performed.
pub fn draw_triangle(state: &PipelineState, target: &mut RenderTarget, i0: u32, i1: u32, i2: u32) -> usize {
    let va = process_vertex(state, i0);
    let vb = process_vertex(state, i1);
    let vc = process_vertex(state, i2);

    let (width, height) = (target.width, target.height);
    let screen = [
        ndc_to_screen(va[0], width, height),
        ndc_to_screen(vb[0], width, height),
        ndc_to_screen(vc[0], width, height),
    ];

    let fragment_stage = state.fragment_stage();

    rasterize_triangle(width, height, screen, |frag| {
        let color = match fragment_stage {
            Some((shader, uniforms)) => {
                let [b0, b1, b2] = frag.weights;
                let mut inputs = [Vec4::ZERO; MAX_VARYINGS];
                let depth = Vec4::blend(screen[0], screen[1], screen[2], b0, b1, b2);
                inputs[0] = Vec4::new(frag.x as f32 + 0.5, frag.y as f32 + 0.5, depth.z, depth.w);
                for k in 1..MAX_VARYINGS {
                    inputs[k] = Vec4::blend(va[k], vb[k], vc[k], b0, b1, b2);
                }

                let mut outputs = [Vec4::ZERO; MAX_VARYINGS];
                shader.invoke(uniforms, &inputs, &mut outputs, state);
                Color::from_vec4(outputs[0]).to_argb()
            }
            None => UNSHADED_FILL,
        };
        target.set_pixel(frag.x, frag.y, color);
    })
}
