use glam::{Vec2, vec2};

/// World-units per second of linear movement.
pub const MOVE_SPEED: f32 = 75.0;
/// Radians per second of turning.
pub const TURN_RATE: f32 = 3.0;
/// Radians per second of vertical look adjustment.
pub const PITCH_RATE: f32 = 1.5;
/// Vertical look is clamped to this excursion either way.
pub const MAX_PITCH: f32 = 0.6;

/// Per-frame snapshot of movement intent.
///
/// The simulation owns input state for exactly one frame; there is no
/// ambient key map anywhere in the core.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputCmd {
    pub forward: f32, // –1 … +1
    pub strafe: f32,  // –1 … +1  (left / right)
    pub turn: f32,    // –1 … +1
    pub pitch: f32,   // –1 … +1  (look down / up)
}

/// The player's circular body and view-point.
///
/// `heading` drives movement; `look` (yaw, pitch) drives the ray fan and the
/// horizon, and is adjustable independently of the movement heading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub heading: f32,
    pub look: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub turn_rate: f32,
}

impl Player {
    pub fn new(pos: Vec2, heading: f32, radius: f32) -> Self {
        Self {
            pos,
            heading,
            look: vec2(heading, 0.0),
            radius,
            speed: MOVE_SPEED,
            turn_rate: TURN_RATE,
        }
    }

    /// Unit vector along the movement heading.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        let (s, c) = self.heading.sin_cos();
        vec2(c, s)
    }

    /// Apply one frame of movement intent. Turning carries the look yaw
    /// along with the heading; pitch only moves the horizon.
    pub fn apply_input(&mut self, cmd: &InputCmd, dt: f32) {
        if cmd.turn != 0.0 {
            let delta = cmd.turn * self.turn_rate * dt;
            self.heading += delta;
            self.look.x += delta;
        }
        if cmd.pitch != 0.0 {
            self.look.y = (self.look.y + cmd.pitch * PITCH_RATE * dt).clamp(-MAX_PITCH, MAX_PITCH);
        }

        if cmd.forward != 0.0 || cmd.strafe != 0.0 {
            let fwd = self.forward();
            let step = fwd * cmd.forward + fwd.perp() * cmd.strafe;
            self.pos += step * self.speed * dt;
        }
    }
}
