//! Grid-line DDA ray casting.
//!
//! Rays step from one grid-line crossing directly to the next instead of
//! marching in fixed increments, so a one-tile-thin wall can never be
//! skipped. A cast is a pure function of the grid and the query; the fan is
//! rebuilt from scratch every frame.

use glam::{Vec2, vec2};

use crate::sim::Player;
use crate::world::{Grid, NO_TILE};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FanError {
    #[error("ray count must be nonzero")]
    ZeroRayCount,

    #[error("max distance {0} must be positive and finite")]
    BadMaxDistance(f32),

    #[error("field of view {0} must be non-negative and finite")]
    BadFov(f32),
}

/// Validated parameters for one ray fan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanConfig {
    fov: f32,
    ray_count: usize,
    max_distance: f32,
}

impl FanConfig {
    pub fn new(fov: f32, ray_count: usize, max_distance: f32) -> Result<Self, FanError> {
        if ray_count == 0 {
            return Err(FanError::ZeroRayCount);
        }
        if !(max_distance > 0.0 && max_distance.is_finite()) {
            return Err(FanError::BadMaxDistance(max_distance));
        }
        if !(fov >= 0.0 && fov.is_finite()) {
            return Err(FanError::BadFov(fov));
        }
        Ok(Self {
            fov,
            ray_count,
            max_distance,
        })
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    #[inline]
    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    #[inline]
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Angular spacing between adjacent rays.
    #[inline]
    pub fn ray_step(&self) -> f32 {
        self.fov / self.ray_count as f32
    }
}

/// One cast result. Recomputed fully every frame, never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Hit point relative to the cast origin (`length()` = travelled dist).
    pub pos: Vec2,
    /// Flat index of the struck tile, or [`NO_TILE`] for a capped ray.
    pub tile: i32,
    /// Material code of the struck tile (0 for a capped ray).
    pub material: u8,
    /// Fraction along the struck wall face, in `[0, 1]`; addresses the
    /// texture horizontally.
    pub dist_to_axis: f32,
    /// Position of this ray within its fan; consecutive indices form one
    /// wall strip in the compositor.
    pub index: usize,
    /// `1 - dist / max_distance`, for shading falloff.
    pub depth: f32,
}

/// Cast a single ray from `origin` at `angle` (radians, 0 = +X).
///
/// Returns either the first solid tile crossing within `max_distance` or a
/// capped sentinel ray at exactly `max_distance`.
pub fn cast(grid: &Grid, origin: Vec2, angle: f32, max_distance: f32) -> Ray {
    let (sin, cos) = angle.sin_cos();
    let dir = vec2(cos, sin);
    let cell = grid.cell_size();

    // Step signs; an exactly axis-aligned component counts as positive.
    let h: i64 = if dir.x < 0.0 { -1 } else { 1 };
    let v: i64 = if dir.y < 0.0 { -1 } else { 1 };

    let (col, row) = grid.locate(origin);

    // Indices of the next vertical / horizontal grid line in step direction.
    let mut line_x = if h > 0 { col + 1 } else { col };
    let mut line_y = if v > 0 { row + 1 } else { row };

    // Worst case crosses every line once in each direction.
    let step_limit = 4 * grid.side() + 4;
    let mut steps = 0usize;

    loop {
        // Distance along the ray to each candidate boundary. A zero
        // direction component never reaches its line: the candidate is
        // pushed past the cap instead of dividing by zero.
        let tx = if dir.x == 0.0 {
            f32::INFINITY
        } else {
            (line_x as f32 * cell - origin.x) / dir.x
        };
        let ty = if dir.y == 0.0 {
            f32::INFINITY
        } else {
            (line_y as f32 * cell - origin.y) / dir.y
        };

        if tx > max_distance && ty > max_distance {
            return Ray {
                pos: dir * max_distance,
                tile: NO_TILE,
                material: 0,
                dist_to_axis: 0.0,
                index: 0,
                depth: 0.0,
            };
        }

        let (t, crossed_vertical) = if tx <= ty { (tx, true) } else { (ty, false) };
        let hit = origin + dir * t;

        // Tile beyond the crossed line, not before it.
        let (ncol, nrow) = if crossed_vertical {
            let c = if h > 0 { line_x } else { line_x - 1 };
            (c, (hit.y / cell).floor() as i64)
        } else {
            let r = if v > 0 { line_y } else { line_y - 1 };
            ((hit.x / cell).floor() as i64, r)
        };

        if grid.is_solid(ncol, nrow) {
            // Fractional position along the struck face, orthogonal to the
            // crossing axis; flipped for negative step so texture
            // orientation is independent of approach direction.
            let mut frac = if crossed_vertical {
                (hit.y.rem_euclid(cell)) / cell
            } else {
                (hit.x.rem_euclid(cell)) / cell
            };
            let flip = if crossed_vertical { h < 0 } else { v < 0 };
            if flip {
                frac = 1.0 - frac;
            }

            return Ray {
                pos: dir * t,
                tile: grid.flat_index(ncol, nrow),
                material: grid.tile(ncol, nrow),
                dist_to_axis: frac,
                index: 0,
                depth: 1.0 - t / max_distance,
            };
        }

        if crossed_vertical {
            line_x += h;
        } else {
            line_y += v;
        }

        steps += 1;
        debug_assert!(steps <= step_limit, "DDA failed to terminate");
        if steps > step_limit {
            // Everything past the layout is solid, so this is unreachable
            // with a valid grid; cap the ray anyway.
            return Ray {
                pos: dir * max_distance,
                tile: NO_TILE,
                material: 0,
                dist_to_axis: 0.0,
                index: 0,
                depth: 0.0,
            };
        }
    }
}

/// Cast `ray_count` rays spread over `[-fov/2, +fov/2]` around the player's
/// look yaw, each stamped with its fan index.
pub fn cast_fan(grid: &Grid, player: &Player, cfg: &FanConfig) -> Vec<Ray> {
    let step = cfg.ray_step();
    let start = player.look.x - cfg.fov * 0.5;

    (0..cfg.ray_count)
        .map(|i| {
            let mut ray = cast(grid, player.pos, start + i as f32 * step, cfg.max_distance);
            ray.index = i;
            ray
        })
        .collect()
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Player;
    use glam::vec2;
    use std::f32::consts::TAU;

    /// 5x5 layout: solid ring of material 1 around an empty interior.
    fn ring_grid() -> Grid {
        let n = 5usize;
        let mut cells = vec![0u8; n * n];
        for i in 0..n {
            cells[i] = 1;
            cells[(n - 1) * n + i] = 1;
            cells[i * n] = 1;
            cells[i * n + n - 1] = 1;
        }
        Grid::new(cells, 100.0).unwrap()
    }

    #[test]
    fn config_rejects_invalid_parameters() {
        assert_eq!(FanConfig::new(1.0, 8, 100.0), FanConfig::new(1.0, 8, 100.0));
        assert_eq!(FanConfig::new(1.0, 0, 100.0), Err(FanError::ZeroRayCount));
        assert_eq!(
            FanConfig::new(1.0, 64, 0.0),
            Err(FanError::BadMaxDistance(0.0))
        );
        assert!(matches!(
            FanConfig::new(1.0, 64, f32::INFINITY),
            Err(FanError::BadMaxDistance(_))
        ));
        assert!(matches!(
            FanConfig::new(-0.1, 64, 100.0),
            Err(FanError::BadFov(_))
        ));
    }

    #[test]
    fn east_ray_hits_border_face_center() {
        // Player at grid center facing +X must strike the east border tile
        // dead center of its face.
        let g = ring_grid();
        let ray = cast(&g, vec2(250.0, 250.0), 0.0, g.extent());

        assert_eq!(ray.tile, 14); // col 4, row 2
        assert_eq!(ray.material, 1);
        assert!((ray.dist_to_axis - 0.5).abs() < 1e-6);
        assert!((ray.pos - vec2(150.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn fov_zero_single_ray_fan() {
        let g = ring_grid();
        let cfg = FanConfig::new(0.0, 1, g.extent()).unwrap();
        let player = Player::new(vec2(250.0, 250.0), 0.0, 15.0);

        let fan = cast_fan(&g, &player, &cfg);
        assert_eq!(fan.len(), 1);
        assert_eq!(fan[0].index, 0);
        assert!((fan[0].dist_to_axis - 0.5).abs() < 1e-6);
    }

    #[test]
    fn every_angle_terminates_with_unit_face_fraction() {
        let g = ring_grid();
        for i in 0..720 {
            let angle = i as f32 / 720.0 * TAU;
            let ray = cast(&g, vec2(250.0, 250.0), angle, 10_000.0);
            assert_ne!(ray.tile, NO_TILE, "enclosed grid must stop every ray");
            assert!((0.0..=1.0).contains(&ray.dist_to_axis));
            assert!((0.0..=1.0).contains(&ray.depth));
        }
    }

    #[test]
    fn short_ray_caps_with_sentinel() {
        let g = ring_grid();
        let ray = cast(&g, vec2(250.0, 250.0), 0.0, 20.0);
        assert_eq!(ray.tile, NO_TILE);
        assert_eq!(ray.material, 0);
        assert!((ray.pos.length() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn axis_aligned_directions_are_safe() {
        let g = ring_grid();
        for angle in [
            0.0,
            std::f32::consts::FRAC_PI_2,
            std::f32::consts::PI,
            3.0 * std::f32::consts::FRAC_PI_2,
        ] {
            let ray = cast(&g, vec2(250.0, 250.0), angle, 10_000.0);
            assert_ne!(ray.tile, NO_TILE);
        }
    }

    #[test]
    fn negative_step_flips_face_fraction() {
        // Walking west from just north of the face midpoint: the eastbound
        // ray and the westbound ray must address opposite texture ends.
        let g = ring_grid();
        let origin = vec2(250.0, 230.0);
        let east = cast(&g, origin, 0.0, g.extent());
        let west = cast(&g, origin, std::f32::consts::PI, g.extent());
        assert!((east.dist_to_axis - (1.0 - west.dist_to_axis)).abs() < 1e-4);
    }

    #[test]
    fn fan_is_deterministic() {
        let g = ring_grid();
        let cfg = FanConfig::new(1.2, 97, 420.0).unwrap();
        let player = Player::new(vec2(213.7, 251.3), 0.83, 15.0);

        let a = cast_fan(&g, &player, &cfg);
        let b = cast_fan(&g, &player, &cfg);
        assert_eq!(a, b);
    }
}
