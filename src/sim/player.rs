use glam::Vec2;

use super::collision::try_move;
use crate::world::{Camera, Grid, normalize_angle};

/// One discrete input axis: –1, 0 or +1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Axis {
    Neg = -1,
    #[default]
    Zero = 0,
    Pos = 1,
}

impl Axis {
    /// Collapse any integer to its sign.
    #[inline]
    pub fn from_sign(v: i32) -> Self {
        match v.signum() {
            -1 => Axis::Neg,
            1 => Axis::Pos,
            _ => Axis::Zero,
        }
    }

    #[inline]
    pub fn as_f32(self) -> f32 {
        self as i8 as f32
    }
}

impl From<i8> for Axis {
    fn from(v: i8) -> Self {
        Axis::from_sign(v as i32)
    }
}

/// Movement intent held between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputCmd {
    pub turn: Axis, // +1 = clockwise on the map (turn right)
    pub walk: Axis, // +1 = forward
}

/// Player pose and the constants that drive it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,        // world units
    pub angle: f32,       // radians, [0, 2π)
    pub cmd: InputCmd,
    pub walk_speed: f32,  // world units / second
    pub turn_speed: f32,  // radians / second
}

impl Player {
    pub fn new(pos: Vec2, angle: f32, walk_speed: f32, turn_speed: f32) -> Self {
        Self {
            pos,
            angle: normalize_angle(angle),
            cmd: InputCmd::default(),
            walk_speed,
            turn_speed,
        }
    }

    pub fn set_intent(&mut self, turn: Axis, walk: Axis) {
        self.cmd = InputCmd { turn, walk };
    }

    /// Advance one tick of `dt` seconds.
    ///
    /// Turning is applied first, then a single forward/backward step along
    /// the *new* heading. The step is kept only if its end point is open.
    #[must_use]
    pub fn integrate(&self, grid: &Grid, dt: f32) -> Player {
        let mut next = *self;

        if self.cmd.turn != Axis::Zero {
            next.angle =
                normalize_angle(self.angle + self.cmd.turn.as_f32() * self.turn_speed * dt);
        }

        if self.cmd.walk != Axis::Zero {
            let step = self.cmd.walk.as_f32() * self.walk_speed * dt;
            next.pos = try_move(grid, self.pos, Vec2::from_angle(next.angle) * step).pos;
        }

        next
    }

    /// View for this frame.
    pub fn camera(&self, fov: f32) -> Camera {
        Camera::new(self.pos, self.angle, fov)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
