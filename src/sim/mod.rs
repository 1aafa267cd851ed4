mod collision;
mod marker;
mod player;

pub use collision::{clamp_to_world, resolve_tile_overlaps};
pub use marker::{AssetId, BOB_RATE, BOB_SPAN, Marker, MarkerSet};
pub use player::{InputCmd, MAX_PITCH, MOVE_SPEED, Player, TURN_RATE};

use crate::engine::{DrawInstruction, FanConfig, cast_fan, order};
use crate::world::Grid;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SimError {
    #[error("player radius {radius} does not fit a world of extent {extent}")]
    PlayerTooLarge { radius: f32, extent: f32 },
}

/// Owns the whole per-session simulation state and drives one frame at a
/// time, strictly in order: input, movement, collision, ray fan, marker
/// tick, composition.
///
/// Everything here is synchronous and single-threaded; the caller is
/// expected to sanitize `dt` (non-negative, finite, clamped after pauses).
#[derive(Debug)]
pub struct Simulation {
    grid: Grid,
    fan: FanConfig,
    player: Player,
    markers: MarkerSet,
}

impl Simulation {
    /// Rejects a player circle wider than the world; the per-frame bounds
    /// clamp relies on `radius <= extent / 2`.
    pub fn new(
        grid: Grid,
        fan: FanConfig,
        player: Player,
        markers: MarkerSet,
    ) -> Result<Self, SimError> {
        if player.radius * 2.0 > grid.extent() {
            return Err(SimError::PlayerTooLarge {
                radius: player.radius,
                extent: grid.extent(),
            });
        }
        Ok(Self {
            grid,
            fan,
            player,
            markers,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn fan(&self) -> &FanConfig {
        &self.fan
    }

    /// Player state for camera setup.
    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn markers(&self) -> &[Marker] {
        self.markers.as_slice()
    }

    /// Advance one frame and return the ordered draw instructions.
    pub fn frame(&mut self, dt: f32, cmd: &InputCmd) -> Vec<DrawInstruction> {
        self.player.apply_input(cmd, dt);
        clamp_to_world(&mut self.player, &self.grid);
        resolve_tile_overlaps(&mut self.player, &self.grid);

        let fan = cast_fan(&self.grid, &self.player, &self.fan);

        self.markers.tick(dt);

        order(self.player.pos, fan, self.markers.as_slice())
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn ring_sim(markers: Vec<Marker>) -> Simulation {
        let n = 7usize;
        let mut cells = vec![0u8; n * n];
        for i in 0..n {
            cells[i] = 1;
            cells[(n - 1) * n + i] = 1;
            cells[i * n] = 1;
            cells[i * n + n - 1] = 1;
        }
        let grid = Grid::new(cells, 100.0).unwrap();
        let fan = FanConfig::new(1.0, 64, grid.extent()).unwrap();
        let player = Player::new(vec2(350.0, 350.0), 0.0, 15.0);
        Simulation::new(grid, fan, player, MarkerSet::new(markers)).unwrap()
    }

    #[test]
    fn oversized_player_is_rejected() {
        // A 1x1 world of extent 10 cannot hold a radius-15 circle; letting
        // it through would invert the bounds clamp.
        let grid = Grid::new(vec![0u8; 1], 10.0).unwrap();
        let fan = FanConfig::new(1.0, 8, grid.extent()).unwrap();
        let player = Player::new(vec2(5.0, 5.0), 0.0, 15.0);

        assert_eq!(
            Simulation::new(grid, fan, player, MarkerSet::default()).unwrap_err(),
            SimError::PlayerTooLarge {
                radius: 15.0,
                extent: 10.0
            }
        );
    }

    #[test]
    fn frame_emits_every_ray() {
        let mut sim = ring_sim(vec![Marker::new(
            vec2(450.0, 350.0),
            0.0,
            40.0,
            40.0,
            AssetId(3),
            true,
        )]);

        let out = sim.frame(0.016, &InputCmd::default());
        let rays: usize = out
            .iter()
            .map(|ins| match ins {
                DrawInstruction::WallStrip(r) => r.len(),
                DrawInstruction::Billboard(_) => 0,
            })
            .sum();
        assert_eq!(rays, sim.fan().ray_count());
        assert_eq!(
            out.iter()
                .filter(|i| matches!(i, DrawInstruction::Billboard(_)))
                .count(),
            1
        );
    }

    #[test]
    fn player_never_leaves_world_bounds() {
        let mut sim = ring_sim(Vec::new());
        let cmd = InputCmd {
            forward: 1.0,
            ..Default::default()
        };

        // Drive east far longer than it takes to cross the whole layout.
        for _ in 0..600 {
            sim.frame(0.05, &cmd);
        }

        let p = sim.player().pos;
        let r = sim.player().radius;
        assert!(p.x <= sim.grid().extent() - r);
        assert!(p.y >= r && p.y <= sim.grid().extent() - r);
    }

    #[test]
    fn identical_state_yields_identical_fans() {
        let mut a = ring_sim(Vec::new());
        let mut b = ring_sim(Vec::new());
        let out_a = a.frame(0.02, &InputCmd::default());
        let out_b = b.frame(0.02, &InputCmd::default());
        assert_eq!(out_a, out_b);
    }
}
