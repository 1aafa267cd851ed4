//! Flat-color software rasterizer.
//!
//! Walls and billboards are projected with a pinhole camera: the
//! projection-plane distance comes from the vertical FOV, a ray's
//! perpendicular distance sets the on-screen wall height, and the
//! lateral-offset / half-frustum-width ratio sets the column. Colors are
//! a fixed material palette scaled by each ray's depth value.

use crate::engine::Ray;
use crate::renderer::{Renderer, Rgba, ViewParams};
use crate::sim::Marker;

/// World height of the projection plane for walls.
const WALL_PLANE_H: f32 = 50.0;
/// World height of the projection plane for billboards.
const MARKER_PLANE_H: f32 = 100.0;

const SKY: (f32, f32, f32) = (0.259, 0.286, 0.286);
const GROUND: (f32, f32, f32) = (0.380, 0.416, 0.419);

/// Flat wall colors by material code (code 0 never reaches the renderer).
const MATERIALS: [(f32, f32, f32); 8] = [
    (0.0, 0.0, 0.0), // 1 black
    (1.0, 0.0, 0.0), // 2 red
    (0.0, 1.0, 0.0), // 3 green
    (0.0, 0.0, 1.0), // 4 blue
    (1.0, 1.0, 0.0), // 5 yellow
    (1.0, 0.0, 1.0), // 6 purple
    (0.0, 1.0, 1.0), // 7 cyan
    (1.0, 1.0, 1.0), // 8 white
];

/// Billboard stand-in colors, picked by asset id.
const ASSET_PALETTE: [(f32, f32, f32); 6] = [
    (0.95, 0.55, 0.20),
    (0.35, 0.75, 0.95),
    (0.80, 0.30, 0.60),
    (0.55, 0.90, 0.40),
    (0.90, 0.85, 0.30),
    (0.70, 0.50, 0.95),
];

#[inline]
fn pack(r: f32, g: f32, b: f32) -> Rgba {
    let c = |x: f32| (x.clamp(0.0, 1.0) * 255.0) as u32;
    (c(r) << 16) | (c(g) << 8) | c(b)
}

#[inline]
fn shade((r, g, b): (f32, f32, f32), depth: f32) -> Rgba {
    let d = depth.clamp(0.0, 1.0);
    pack(r * d, g * d, b * d)
}

/// Screen row of the horizon for the current vertical look.
#[inline]
fn horizon_row(look_y: f32, fov_y: f32, h: usize) -> f32 {
    let relative = look_y / fov_y * 0.5;
    h as f32 * (0.5 + relative)
}

/// Distance from the eye to the projection plane.
#[inline]
fn projection_dist(plane_h: f32, fov_y: f32) -> f32 {
    plane_h / (fov_y * 0.5).tan() * 0.5
}

/// Screen column for a point `lateral` to the side at `depth` forward.
#[inline]
fn screen_x(lateral: f32, depth: f32, fov_x: f32, w: usize) -> f32 {
    let half_frustum = (depth * (fov_x * 0.5).tan()).max(1e-6);
    let half_w = w as f32 * 0.5;
    half_w - lateral / half_frustum * half_w
}

#[derive(Default)]
pub struct Software {
    fb: Vec<Rgba>,
    w: usize,
    h: usize,
}

impl Software {
    fn fill_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
        // Clamping both edges into the buffer keeps xa <= xb even for rects
        // entirely off-screen.
        let xa = x0.min(x1).clamp(0.0, self.w as f32) as usize;
        let xb = x0.max(x1).clamp(0.0, self.w as f32) as usize;
        let ya = y0.min(y1).clamp(0.0, self.h as f32) as usize;
        let yb = y0.max(y1).clamp(0.0, self.h as f32) as usize;
        for y in ya..yb {
            let row = &mut self.fb[y * self.w..(y + 1) * self.w];
            row[xa..xb].fill(color);
        }
    }

    /// Camera-space position of one wall ray: lateral offset and
    /// perpendicular (fisheye-corrected) depth.
    fn wall_cam_space(ray: &Ray, view: &ViewParams) -> (f32, f32) {
        let step = view.fov.x / view.ray_count as f32;
        let fov_adjusted = view.fov.x * 0.5 - ray.index as f32 * step;
        let mag = ray.pos.length();
        (mag * fov_adjusted.sin(), mag * fov_adjusted.cos())
    }
}

impl Renderer for Software {
    fn begin_frame(&mut self, width: usize, height: usize) {
        self.w = width;
        self.h = height;
        self.fb.clear();
        self.fb.resize(width * height, 0);
    }

    fn draw_backdrop(&mut self, view: &ViewParams) {
        let horizon = horizon_row(view.look.y, view.fov.y, self.h);
        self.fill_rect(0.0, 0.0, self.w as f32, horizon, pack(SKY.0, SKY.1, SKY.2));
        self.fill_rect(
            0.0,
            horizon,
            self.w as f32,
            self.h as f32,
            pack(GROUND.0, GROUND.1, GROUND.2),
        );
    }

    fn draw_wall_strip(&mut self, rays: &[Ray], view: &ViewParams) {
        let horizon = horizon_row(view.look.y, view.fov.y, self.h);
        let proj = projection_dist(WALL_PLANE_H, view.fov.y);

        for (i, ray) in rays.iter().enumerate() {
            if ray.material == 0 {
                continue; // capped ray, nothing to draw
            }
            let (adj_x, adj_y) = Self::wall_cam_space(ray, view);
            if adj_y <= 0.0 {
                continue;
            }
            let column_h = self.h as f32 * (proj / adj_y);
            let x = screen_x(adj_x, adj_y, view.fov.x, self.w);

            // Right edge of this ray's column comes from its neighbor; the
            // last ray in the strip reuses its own distance one step over.
            let next = rays.get(i + 1).copied().unwrap_or_else(|| {
                let mut fudge = *ray;
                fudge.index = ray.index + 1;
                fudge
            });
            let (nx, ny) = Self::wall_cam_space(&next, view);
            let x_next = if ny > 0.0 {
                screen_x(nx, ny, view.fov.x, self.w)
            } else {
                x + 1.0
            };

            let palette = MATERIALS[((ray.material - 1) as usize) % MATERIALS.len()];
            self.fill_rect(
                x,
                horizon - column_h * 0.5,
                x_next.max(x + 1.0),
                horizon + column_h * 0.5,
                shade(palette, ray.depth),
            );
        }
    }

    fn draw_billboard(&mut self, marker: &Marker, view: &ViewParams) {
        let to_marker = marker.pos - view.eye;
        let dist = to_marker.length();
        let theta = to_marker.y.atan2(to_marker.x);

        let d = view.look.x - theta;
        let adj_x = dist * d.sin();
        let adj_y = dist * d.abs().cos();
        if adj_y <= f32::EPSILON {
            return; // beside or behind the eye
        }

        let horizon = horizon_row(view.look.y, view.fov.y, self.h);
        let scale = projection_dist(MARKER_PLANE_H, view.fov.y) / adj_y;
        let x = screen_x(adj_x, adj_y, view.fov.x, self.w);

        let x0 = x - marker.w * scale * 0.5;
        let y0 = horizon - marker.z * scale - marker.h * scale * 0.5;

        let depth = 1.0 - dist / view.max_distance;
        let palette = ASSET_PALETTE[marker.asset.0 as usize % ASSET_PALETTE.len()];
        self.fill_rect(
            x0,
            y0,
            x0 + marker.w * scale,
            y0 + marker.h * scale,
            shade(palette, depth),
        );
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.fb, self.w, self.h);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
