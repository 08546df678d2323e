//! Per-frame pipeline: player pose → rays → projected strips → pixels.

mod caster;
#[allow(clippy::module_inception)]
mod engine;
mod minimap;
mod projection;

pub use caster::{
    BOUNDARY_MATERIAL, Crossing, Facing, NO_HIT, Ray, Surface, cast_all, cast_column, cast_ray,
    scan_horizontal, scan_vertical,
};
pub use engine::{Engine, EngineError};
pub use minimap::Minimap;
pub use projection::{
    Projector, column_range, corrected_distance, strip_height, strip_span, texel_u,
};
