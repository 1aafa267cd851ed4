//! First-person demo viewer for the grid ray caster.
//!
//! ```bash
//! cargo run --release -- --rays 480 --fov 75
//! ```
//!
//! W/S walk, Q/E strafe, A/D turn, Up/Down adjust the vertical look.

use clap::Parser;
use glam::vec2;
use minifb::{Key, Window, WindowOptions};
use std::time::Instant;

use raygrid_rs::{
    engine::FanConfig,
    renderer::{RendererExt, Software, ViewParams},
    sim::{AssetId, InputCmd, Marker, MarkerSet, Player, Simulation},
    world::Grid,
};

/// Ignore frame gaps longer than this (paused window, debugger).
const MAX_DT: f32 = 0.05;

#[derive(Parser)]
#[command(about = "Software-rendered grid ray-casting demo")]
struct Args {
    /// Window width in pixels
    #[arg(long, default_value_t = 1024)]
    width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = 768)]
    height: usize,

    /// Rays in the view fan
    #[arg(long, default_value_t = 512)]
    rays: usize,

    /// Horizontal field of view, degrees
    #[arg(long, default_value_t = 75.0)]
    fov: f32,
}

/// 12x12 demo layout: ring wall plus a few colored pillars and nooks.
#[rustfmt::skip]
const DEMO_CELLS: [u8; 144] = [
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8,
    8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 8,
    8, 0, 2, 2, 0, 0, 0, 0, 5, 0, 0, 8,
    8, 0, 2, 0, 0, 0, 0, 0, 5, 0, 0, 8,
    8, 0, 0, 0, 0, 3, 0, 0, 5, 5, 0, 8,
    8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 8,
    8, 0, 0, 4, 0, 0, 0, 6, 0, 0, 0, 8,
    8, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 8,
    8, 0, 0, 4, 4, 0, 0, 0, 0, 7, 7, 8,
    8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 7, 8,
    8, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 8,
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8,
];

fn demo_markers(cell: f32) -> Vec<Marker> {
    let at = |col: f32, row: f32| vec2(col * cell, row * cell);
    vec![
        Marker::new(at(6.0, 3.0), 30.0, 60.0, 60.0, AssetId(0), true),
        Marker::new(at(2.5, 6.5), 10.0, 45.0, 45.0, AssetId(1), true),
        Marker::new(at(9.5, 5.5), 20.0, 45.0, 45.0, AssetId(2), true),
        Marker::new(at(6.5, 9.0), 0.0, 80.0, 30.0, AssetId(3), false),
        Marker::new(at(4.5, 4.5), 40.0, 30.0, 30.0, AssetId(4), true),
    ]
}

fn sample_input(win: &Window) -> InputCmd {
    let mut cmd = InputCmd::default();

    if win.is_key_down(Key::W) {
        cmd.forward += 1.0;
    }
    if win.is_key_down(Key::S) {
        cmd.forward -= 1.0;
    }
    if win.is_key_down(Key::Q) {
        cmd.strafe -= 1.0;
    }
    if win.is_key_down(Key::E) {
        cmd.strafe += 1.0;
    }
    if win.is_key_down(Key::A) {
        cmd.turn -= 1.0;
    }
    if win.is_key_down(Key::D) {
        cmd.turn += 1.0;
    }
    if win.is_key_down(Key::Up) {
        cmd.pitch += 1.0;
    }
    if win.is_key_down(Key::Down) {
        cmd.pitch -= 1.0;
    }

    cmd
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let side = (DEMO_CELLS.len() as f32).sqrt() as usize;
    let cell = args.height as f32 / side as f32;
    let grid = Grid::new(DEMO_CELLS.to_vec(), cell)?;

    let fov_x = args.fov.to_radians();
    let fov_y = fov_x * args.height as f32 / args.width as f32;
    let fan = FanConfig::new(fov_x, args.rays, grid.extent())?;

    let player = Player::new(vec2(grid.extent() * 0.5, grid.extent() * 0.5), 0.0, 15.0);
    let markers = MarkerSet::new(demo_markers(cell));
    let mut sim = Simulation::new(grid, fan, player, markers)?;

    let mut renderer = Software::default();
    let mut win = Window::new(
        "raygrid software view",
        args.width,
        args.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(60);

    let mut last = Instant::now();
    while win.is_open() && !win.is_key_down(Key::Escape) {
        let dt = last.elapsed().as_secs_f32().min(MAX_DT);
        last = Instant::now();

        let cmd = sample_input(&win);
        let instructions = sim.frame(dt, &cmd);

        let view = ViewParams {
            fov: vec2(fov_x, fov_y),
            ray_count: sim.fan().ray_count(),
            max_distance: sim.fan().max_distance(),
            eye: sim.player().pos,
            look: sim.player().look,
        };

        let mut result = Ok(());
        renderer.draw_frame(args.width, args.height, &view, &instructions, |fb, w, h| {
            result = win.update_with_buffer(fb, w, h);
        });
        result?;
    }

    Ok(())
}
