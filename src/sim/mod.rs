mod collision;
mod player;
mod tic;

pub use collision::{MoveResult, try_move};
pub use player::{Axis, InputCmd, Player};
pub use tic::{DEFAULT_FPS, FrameClock, MAX_DT, clamp_dt};
