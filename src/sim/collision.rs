//! All-or-nothing move test against the tile grid.
//!
//! ✔ one probe at the destination point, no radius
//! ✔ no sliding: a blocked move leaves the actor where it was
//!
//! Moving diagonally into a corner therefore sticks; callers that want
//! wall-sliding must split the delta themselves.

use glam::Vec2;

use crate::world::Grid;

/// What the caller gets back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveResult {
    pub pos: Vec2,      // final XY
    pub hit_wall: bool, // destination was solid
}

/// Try to move from `pos` by `delta`.
pub fn try_move(grid: &Grid, pos: Vec2, delta: Vec2) -> MoveResult {
    if delta == Vec2::ZERO {
        return MoveResult {
            pos,
            hit_wall: false,
        };
    }

    let target = pos + delta;
    if !target.is_finite() || grid.is_wall_at(target) {
        return MoveResult {
            pos,
            hit_wall: true,
        };
    }

    MoveResult {
        pos: target,
        hit_wall: false,
    }
}
