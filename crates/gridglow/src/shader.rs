//! WGSL sources for the grid effect plus a CPU mirror of the fragment stage.
//!
//! The fragment shader is assembled from a generated prelude carrying the
//! effect constants and the fixed [`FRAGMENT_BODY`]. [`shade_pixel`] evaluates
//! the same math on the CPU so the visual policy can be exercised without a
//! GPU; keep the two in lockstep.

use crate::types::{
    BORDER_WIDTH, CORNER_RADIUS, GRID_GAP, GRID_SIZE, HIGHLIGHT_COLOR, HOVER_RADIUS, TRAIL_MAX,
};
use crate::uniforms::UniformBuffer;

/// Clip-space corners of the fullscreen quad, two counter-clockwise triangles.
pub const QUAD_VERTICES: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [-1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [1.0, 1.0],
];

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Pass-through vertex stage; positions come straight from the vertex buffer.
pub const VERTEX_SHADER_WGSL: &str = r"@vertex
fn vs_main(@location(0) corner: vec2<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(corner, 0.0, 1.0);
}
";

/// Fragment stage body. Expects the constants emitted by [`fragment_prelude`].
///
/// `trail.points[i]` is `(x, y, influence, 0)`; a zero influence marks an
/// unused slot. The uniform layout must match `GpuTrailBlock` in
/// `gpu/uniforms.rs`.
pub const FRAGMENT_BODY: &str = r"struct TrailBlock {
    resolution: vec4<f32>,
    points: array<vec4<f32>, TRAIL_SLOTS>,
};

@group(0) @binding(0) var<uniform> trail: TrailBlock;

fn rounded_rect_sdf(p: vec2<f32>, half_size: vec2<f32>, radius: f32) -> f32 {
    let q = abs(p) - half_size + vec2<f32>(radius);
    return length(max(q, vec2<f32>(0.0))) + min(max(q.x, q.y), 0.0) - radius;
}

@fragment
fn fs_main(@builtin(position) frag: vec4<f32>) -> @location(0) vec4<f32> {
    // Surface coordinates grow upwards, matching recorded trail points.
    let p = vec2<f32>(frag.x, trail.resolution.y - frag.y);
    let cell = floor(p / GRID_SIZE);
    let cell_center = (cell + vec2<f32>(0.5)) * GRID_SIZE;
    let offset = p - cell_center;
    let half_size = GRID_SIZE * 0.5 - GRID_GAP;
    let d = rounded_rect_sdf(offset, vec2<f32>(half_size), CORNER_RADIUS);
    if (d > 0.0 || d <= -BORDER_WIDTH) {
        return vec4<f32>(0.0);
    }

    var glow = 0.0;
    for (var i = 0u; i < TRAIL_MAX; i = i + 1u) {
        let slot = trail.points[i];
        if (slot.z <= 0.0) {
            continue;
        }
        let falloff = 1.0 - smoothstep(0.0, HOVER_RADIUS, distance(cell_center, slot.xy));
        glow = max(glow, falloff * slot.z);
    }

    return mix(vec4<f32>(0.0), HIGHLIGHT, glow);
}
";

/// WGSL `const` declarations generated from the Rust-side constants.
pub fn fragment_prelude() -> String {
    let [r, g, b, a] = HIGHLIGHT_COLOR;
    format!(
        "const TRAIL_MAX: u32 = {TRAIL_MAX}u;\n\
         const GRID_SIZE: f32 = {GRID_SIZE:?};\n\
         const GRID_GAP: f32 = {GRID_GAP:?};\n\
         const CORNER_RADIUS: f32 = {CORNER_RADIUS:?};\n\
         const BORDER_WIDTH: f32 = {BORDER_WIDTH:?};\n\
         const HOVER_RADIUS: f32 = {HOVER_RADIUS:?};\n\
         const HIGHLIGHT: vec4<f32> = vec4<f32>({r:?}, {g:?}, {b:?}, {a:?});\n"
    )
}

/// Complete fragment shader source.
pub fn fragment_source() -> String {
    let body = FRAGMENT_BODY.replace("TRAIL_SLOTS", &TRAIL_MAX.to_string());
    format!("{}\n{body}", fragment_prelude())
}

pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Signed distance to a rounded rectangle centred on the origin.
/// Negative inside, positive outside.
pub fn rounded_rect_sdf(p: [f32; 2], half_size: f32, radius: f32) -> f32 {
    let qx = p[0].abs() - half_size + radius;
    let qy = p[1].abs() - half_size + radius;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - radius
}

/// Spatial glow weight of a trail point `distance` pixels from a cell centre.
pub fn hover_falloff(distance: f32) -> f32 {
    1.0 - smoothstep(0.0, HOVER_RADIUS, distance)
}

/// Cell containing `p` and its centre, both in surface pixels.
pub fn cell_center(p: [f32; 2]) -> [f32; 2] {
    [
        ((p[0] / GRID_SIZE).floor() + 0.5) * GRID_SIZE,
        ((p[1] / GRID_SIZE).floor() + 0.5) * GRID_SIZE,
    ]
}

/// Strongest time-and-distance weighted influence acting on a cell.
pub fn cell_glow(center: [f32; 2], uniforms: &UniformBuffer) -> f32 {
    uniforms
        .slots()
        .filter(|slot| slot[2] > 0.0)
        .map(|slot| {
            let dx = center[0] - slot[0];
            let dy = center[1] - slot[1];
            hover_falloff((dx * dx + dy * dy).sqrt()) * slot[2]
        })
        .fold(0.0, f32::max)
}

/// CPU evaluation of the fragment stage for surface pixel `p` (`y` up).
pub fn shade_pixel(p: [f32; 2], uniforms: &UniformBuffer) -> [f32; 4] {
    let center = cell_center(p);
    let offset = [p[0] - center[0], p[1] - center[1]];
    let half_size = GRID_SIZE * 0.5 - GRID_GAP;
    let d = rounded_rect_sdf(offset, half_size, CORNER_RADIUS);
    if d > 0.0 || d <= -BORDER_WIDTH {
        return [0.0; 4];
    }

    let glow = cell_glow(center, uniforms);
    HIGHLIGHT_COLOR.map(|channel| channel * glow)
}
