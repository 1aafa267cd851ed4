use glam::Vec2;

/// World-units per second of vertical bob.
pub const BOB_RATE: f32 = 15.0;
/// Excursion from the anchor at which the bob reverses.
pub const BOB_SPAN: f32 = 5.0;

/// Numeric handle for the texture/image a billboard shows; the renderer
/// owns the mapping to actual pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub u16);

/// A floating billboard placed in the world at scene setup.
///
/// Only `z` and `z_dir` ever change after creation, and only for mobile
/// markers, once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub pos: Vec2,
    /// Height offset of the billboard center above the horizon plane.
    pub z: f32,
    pub z_anchor: f32,
    /// Bob direction, +1 rising or -1 falling.
    pub z_dir: f32,
    pub w: f32,
    pub h: f32,
    pub asset: AssetId,
    pub mobile: bool,
}

impl Marker {
    pub fn new(pos: Vec2, z: f32, w: f32, h: f32, asset: AssetId, mobile: bool) -> Self {
        Self {
            pos,
            z,
            z_anchor: z,
            z_dir: 1.0,
            w,
            h,
            asset,
            mobile,
        }
    }

    /// Advance the bob oscillator by `dt` seconds. Immobile markers never
    /// move; mobile ones drift until `BOB_SPAN` past the anchor in the
    /// current direction, then reverse.
    pub fn bob(&mut self, dt: f32) {
        if !self.mobile {
            return;
        }

        self.z += BOB_RATE * dt * self.z_dir;
        if self.z_dir > 0.0 && self.z - self.z_anchor > BOB_SPAN {
            self.z_dir = -1.0;
        } else if self.z_dir < 0.0 && self.z_anchor - self.z > BOB_SPAN {
            self.z_dir = 1.0;
        }
    }
}

/// All markers of one scene, created once at setup.
#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn new(markers: Vec<Marker>) -> Self {
        Self { markers }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Marker] {
        &self.markers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// One animation tick for the whole set.
    pub fn tick(&mut self, dt: f32) {
        for m in &mut self.markers {
            m.bob(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn marker(z: f32, mobile: bool) -> Marker {
        Marker::new(vec2(100.0, 100.0), z, 50.0, 50.0, AssetId(0), mobile)
    }

    #[test]
    fn bob_flips_direction_on_crossing_frame() {
        let mut m = marker(100.0, true);
        assert_eq!(m.z_dir, 1.0);

        // 15 wu/s * 0.3 s = 4.5: still inside the span, still rising.
        m.bob(0.3);
        assert_eq!(m.z_dir, 1.0);
        assert!((m.z - 104.5).abs() < 1e-4);

        // crosses 105 this frame -> direction flips immediately
        m.bob(0.1);
        assert_eq!(m.z_dir, -1.0);
        assert!(m.z > 105.0);
    }

    #[test]
    fn bob_flips_back_below_anchor() {
        let mut m = marker(100.0, true);
        m.z = 94.0;
        m.z_dir = -1.0;
        m.bob(0.1); // 92.5, past anchor - 5
        assert_eq!(m.z_dir, 1.0);
    }

    #[test]
    fn immobile_markers_never_tick() {
        let mut m = marker(100.0, false);
        m.bob(10.0);
        assert_eq!(m.z, 100.0);
        assert_eq!(m.z_dir, 1.0);
    }

    #[test]
    fn set_ticks_every_mobile_marker() {
        let mut set = MarkerSet::new(vec![marker(0.0, true), marker(0.0, false)]);
        set.tick(0.1);
        assert!((set.as_slice()[0].z - 1.5).abs() < 1e-5);
        assert_eq!(set.as_slice()[1].z, 0.0);
    }
}
