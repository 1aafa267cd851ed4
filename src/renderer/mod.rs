//! Rendering abstraction layer.
//!
//! The core never touches a pixel: it emits [`DrawInstruction`]s
//! (back-to-front) and hands them to a type implementing [`Renderer`].
//! The bundled software backend draws flat-shaded walls and billboards;
//! texture decoding and GPU setup are out of scope by design.

use glam::Vec2;

use crate::engine::{DrawInstruction, Ray};
use crate::sim::Marker;

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Per-frame view state every raster unit needs.
#[derive(Clone, Copy, Debug)]
pub struct ViewParams {
    /// Horizontal and vertical field of view, radians.
    pub fov: Vec2,
    /// Rays in the fan the instructions were built from.
    pub ray_count: usize,
    /// Cast cap; also the far end of the shading falloff.
    pub max_distance: f32,
    /// Player position (distance origin for billboards).
    pub eye: Vec2,
    /// Look yaw and pitch.
    pub look: Vec2,
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` loans the finished buffer to a user closure exactly once;
/// software callers typically forward it to their window manager.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Fill sky and ground around the pitch-shifted horizon.
    fn draw_backdrop(&mut self, view: &ViewParams);

    /// Rasterise one contiguous run of wall rays.
    fn draw_wall_strip(&mut self, rays: &[Ray], view: &ViewParams);

    /// Rasterise one billboard marker.
    fn draw_billboard(&mut self, marker: &Marker, view: &ViewParams);

    /// Finish the frame and hand the buffer to `submit`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience adaptor: play back one frame's instruction sequence.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(
        &mut self,
        width: usize,
        height: usize,
        view: &ViewParams,
        instructions: &[DrawInstruction],
        submit: F,
    ) where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height);
        self.draw_backdrop(view);
        for ins in instructions {
            match ins {
                DrawInstruction::WallStrip(rays) => self.draw_wall_strip(rays, view),
                DrawInstruction::Billboard(m) => self.draw_billboard(m, view),
            }
        }
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;

pub use software::Software;
