//! Post-movement correction keeping the player's circle out of solid tiles.
//!
//! Two stages per frame: clamp to the world bounds, then a single pass over
//! the player's tile neighborhood pushing out of penetrated tiles. The pass
//! is deliberately not iterated to a fixed point; correcting against one
//! neighbor can leave a sliver of penetration against another until the
//! next frame.

use glam::Vec2;
use smallvec::SmallVec;

use crate::sim::Player;
use crate::world::Grid;

/// Neighborhood visit order as `(dcol, drow)`, y growing downward.
///
/// Axis-aligned neighbors resolve before diagonals; reordering this causes
/// corner-snagging when sliding along a wall made of several tiles.
const NEIGHBOR_ORDER: [(i64, i64); 9] = [
    (0, -1),  // top
    (-1, 0),  // left
    (0, 0),   // center
    (1, 0),   // right
    (0, 1),   // bottom
    (-1, -1), // top-left
    (1, -1),  // top-right
    (-1, 1),  // bottom-left
    (1, 1),   // bottom-right
];

/// Stage 1: keep the whole circle inside the layout.
///
/// Callers guarantee `radius <= extent / 2` (checked by `Simulation::new`).
pub fn clamp_to_world(player: &mut Player, grid: &Grid) {
    let r = player.radius;
    let ext = grid.extent();
    player.pos.x = player.pos.x.clamp(r, ext - r);
    player.pos.y = player.pos.y.clamp(r, ext - r);
}

/// Stage 2: push the player's bounding box out of solid neighbor tiles.
///
/// A tile counts as penetrated only when the box crosses at least two of its
/// faces; crossing a single face means the box is merely adjacent, resting
/// against the wall. The correction is applied on whichever axis needs the
/// smaller push, leaving the other axis untouched so wall-sliding works.
pub fn resolve_tile_overlaps(player: &mut Player, grid: &Grid) {
    let (col, row) = grid.locate(player.pos);

    let solid: SmallVec<[(i64, i64); 9]> = NEIGHBOR_ORDER
        .iter()
        .map(|&(dc, dr)| (col + dc, row + dr))
        .filter(|&(c, r)| grid.is_solid(c, r))
        .collect();

    for (c, r) in solid {
        let (t_min, t_max) = grid.tile_box(c, r);
        let p_min = player.pos - Vec2::splat(player.radius);
        let p_max = player.pos + Vec2::splat(player.radius);

        let cross_left = p_min.x < t_min.x && p_max.x > t_min.x;
        let cross_right = p_min.x < t_max.x && p_max.x > t_max.x;
        let cross_top = p_min.y < t_min.y && p_max.y > t_min.y;
        let cross_bottom = p_min.y < t_max.y && p_max.y > t_max.y;

        let ctr = cross_left as u8 + cross_right as u8 + cross_top as u8 + cross_bottom as u8;
        if ctr < 2 {
            continue;
        }

        // Signed push-out per axis; an axis with no crossed face never wins.
        let push_x = if cross_left {
            t_min.x - p_max.x
        } else if cross_right {
            t_max.x - p_min.x
        } else {
            f32::INFINITY
        };
        let push_y = if cross_top {
            t_min.y - p_max.y
        } else if cross_bottom {
            t_max.y - p_min.y
        } else {
            f32::INFINITY
        };

        if push_x.abs() <= push_y.abs() {
            player.pos.x += push_x;
        } else {
            player.pos.y += push_y;
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    /// 5x5, cell 100, single solid tile at (3, 3).
    fn one_block_grid() -> Grid {
        let mut cells = vec![0u8; 25];
        cells[3 + 3 * 5] = 4;
        Grid::new(cells, 100.0).unwrap()
    }

    #[test]
    fn clamp_keeps_circle_inside_bounds() {
        let g = Grid::new(vec![0u8; 25], 100.0).unwrap();
        let mut p = Player::new(vec2(-40.0, 510.0), 0.0, 15.0);
        clamp_to_world(&mut p, &g);
        assert_eq!(p.pos, vec2(15.0, 485.0));
    }

    #[test]
    fn empty_neighborhood_never_moves_player() {
        let g = Grid::new(vec![0u8; 25], 100.0).unwrap();
        let mut p = Player::new(vec2(250.0, 250.0), 0.0, 15.0);
        let before = p.pos;
        resolve_tile_overlaps(&mut p, &g);
        assert_eq!(p.pos, before);
    }

    #[test]
    fn single_face_overlap_is_adjacency_not_penetration() {
        // Radius 10, right edge 5 units past the block's left face at
        // x = 300, vertical extent strictly inside the tile's: only one
        // face qualifies, so the resolver must not move the player.
        let g = one_block_grid();
        let mut p = Player::new(vec2(295.0, 350.0), 0.0, 10.0);
        let before = p.pos;
        resolve_tile_overlaps(&mut p, &g);
        assert_eq!(p.pos, before);
    }

    #[test]
    fn corner_penetration_pushes_smaller_axis_only() {
        // Box [270,310]x[275,315] against tile [300,400]x[300,400]:
        // crosses left (10 deep) and top (15 deep) -> push x by -10.
        let g = one_block_grid();
        let mut p = Player::new(vec2(290.0, 295.0), 0.0, 20.0);
        resolve_tile_overlaps(&mut p, &g);

        assert!((p.pos.x - 280.0).abs() < 1e-4);
        assert!((p.pos.y - 295.0).abs() < 1e-4);

        // After the push the two-face condition no longer holds.
        let before = p.pos;
        resolve_tile_overlaps(&mut p, &g);
        assert_eq!(p.pos, before);
    }

    #[test]
    fn deeper_vertical_overlap_pushes_vertically() {
        // Mirror of the corner case: x overlap 15, y overlap 10.
        let g = one_block_grid();
        let mut p = Player::new(vec2(295.0, 290.0), 0.0, 20.0);
        resolve_tile_overlaps(&mut p, &g);
        assert!((p.pos.y - 280.0).abs() < 1e-4);
        assert!((p.pos.x - 295.0).abs() < 1e-4);
    }
}
