//! Grid-line ray caster.
//!
//! Every ray is marched twice: once across the *horizontal* grid lines
//! (`y = k·tile`) and once across the *vertical* ones (`x = k·tile`). Each
//! scan jumps straight from one line crossing to the next, so the cost is
//! bounded by the grid size rather than by the ray length. The nearer of the
//! two crossings is the wall that is seen.

use bitflags::bitflags;
use glam::{Vec2, vec2};
use std::f32::consts::{FRAC_PI_2, PI};

use crate::world::{Camera, EMPTY, Grid, Material, normalize_angle};

/// Distance reported when a scan finds nothing.
pub const NO_HIT: f32 = f32::MAX;

/// Material reported for the solid space outside the world box.
pub const BOUNDARY_MATERIAL: Material = 1;

/// `|sin|` / `|cos|` below this means the ray runs parallel to that family
/// of grid lines and never crosses it.
const AXIS_EPS: f32 = 1e-6;

/// Probe offset past a grid line, as a fraction of the tile size. Picks the
/// cell on the far side of the line when the ray faces up or left.
const EDGE_NUDGE: f32 = 1e-4;

bitflags! {
    /// Which way a ray points on the map (+y = down).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Facing: u8 {
        const UP    = 0b0001;
        const DOWN  = 0b0010;
        const LEFT  = 0b0100;
        const RIGHT = 0b1000;
    }
}

impl Facing {
    /// Quadrant flags for an angle already wrapped to `[0, 2π)`.
    ///
    /// Exactly one of UP/DOWN and one of LEFT/RIGHT is always set.
    pub fn from_angle(a: f32) -> Self {
        let mut f = if a > 0.0 && a < PI {
            Facing::DOWN
        } else {
            Facing::UP
        };
        f |= if a < FRAC_PI_2 || a > 1.5 * PI {
            Facing::RIGHT
        } else {
            Facing::LEFT
        };
        f
    }
}

/// Which family of grid lines the hit lies on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Surface {
    /// `y = k·tile`, a north/south face.
    #[default]
    Horizontal,
    /// `x = k·tile`, an east/west face.
    Vertical,
}

/// Result for one screen column. Rebuilt from scratch every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub angle: f32, // [0, 2π)
    pub facing: Facing,
    pub hit: Vec2,
    pub distance: f32, // Euclidean, eye → hit, not fisheye-corrected
    pub surface: Surface,
    pub material: Material,
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            angle: 0.0,
            facing: Facing::from_angle(0.0),
            hit: Vec2::ZERO,
            distance: NO_HIT,
            surface: Surface::Horizontal,
            material: EMPTY,
        }
    }
}

impl Ray {
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance < NO_HIT
    }
}

/// One scan's nearest wall crossing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossing {
    pub point: Vec2,
    pub distance: f32,
    pub material: Material,
}

/*──────────────────────────── public entry points ────────────────────*/

/// Fill `rays` (one slot per screen column) for the current view.
pub fn cast_all(grid: &Grid, camera: &Camera, rays: &mut [Ray]) {
    let columns = rays.len();
    for (column, ray) in rays.iter_mut().enumerate() {
        *ray = cast_column(grid, camera, column, columns);
    }
}

/// Cast the ray belonging to `column` out of `columns`.
#[inline]
pub fn cast_column(grid: &Grid, camera: &Camera, column: usize, columns: usize) -> Ray {
    cast_ray(grid, camera.pos(), camera.column_angle(column, columns))
}

/// Cast one ray from `origin` at `angle` (any finite value).
pub fn cast_ray(grid: &Grid, origin: Vec2, angle: f32) -> Ray {
    let angle = normalize_angle(angle);
    let facing = Facing::from_angle(angle);

    let horz = scan_horizontal(grid, origin, angle, facing);
    let vert = scan_vertical(grid, origin, angle, facing);

    let horz_dist = horz.map_or(NO_HIT, |c| c.distance);
    let vert_dist = vert.map_or(NO_HIT, |c| c.distance);

    // strict: equal distances keep the horizontal crossing
    let (best, surface) = if vert_dist < horz_dist {
        (vert, Surface::Vertical)
    } else {
        (horz, Surface::Horizontal)
    };

    match best {
        Some(c) => Ray {
            angle,
            facing,
            hit: c.point,
            distance: c.distance,
            surface,
            material: c.material,
        },
        None => Ray {
            angle,
            facing,
            hit: origin,
            ..Ray::default()
        },
    }
}

/*──────────────────────────── the two scans ──────────────────────────*/

/// Walk the crossings with horizontal grid lines (`y = k·tile`).
pub fn scan_horizontal(grid: &Grid, origin: Vec2, angle: f32, facing: Facing) -> Option<Crossing> {
    let (sin, cos) = angle.sin_cos();
    if sin.abs() < AXIS_EPS {
        return None;
    }
    let tile = grid.tile_size();

    let mut y = (origin.y / tile).floor() * tile;
    if facing.contains(Facing::DOWN) {
        y += tile;
    }
    let step_y = if facing.contains(Facing::UP) {
        -tile
    } else {
        tile
    };

    // dx per unit dy; carries the ray's own left/right sign
    let run = cos / sin;
    let x = origin.x + (y - origin.y) * run;
    let step_x = step_y * run;

    let probe_dy = if facing.contains(Facing::UP) {
        -tile * EDGE_NUDGE
    } else {
        0.0
    };

    march(grid, origin, vec2(x, y), vec2(step_x, step_y), vec2(0.0, probe_dy), grid.rows())
}

/// Walk the crossings with vertical grid lines (`x = k·tile`).
pub fn scan_vertical(grid: &Grid, origin: Vec2, angle: f32, facing: Facing) -> Option<Crossing> {
    let (sin, cos) = angle.sin_cos();
    if cos.abs() < AXIS_EPS {
        return None;
    }
    let tile = grid.tile_size();

    let mut x = (origin.x / tile).floor() * tile;
    if facing.contains(Facing::RIGHT) {
        x += tile;
    }
    let step_x = if facing.contains(Facing::LEFT) { -tile } else { tile };

    // dy per unit dx; its sign comes from this ray, not from the other scan
    let rise = sin / cos;
    let y = origin.y + (x - origin.x) * rise;
    let step_y = step_x * rise;

    let probe_dx = if facing.contains(Facing::LEFT) {
        -tile * EDGE_NUDGE
    } else {
        0.0
    };

    march(grid, origin, vec2(x, y), vec2(step_x, step_y), vec2(probe_dx, 0.0), grid.cols())
}

/// Step from `start` by `step` until a probe lands in a solid cell or the
/// cursor leaves the (closed) world box. `lines` bounds the walk.
fn march(
    grid: &Grid,
    origin: Vec2,
    start: Vec2,
    step: Vec2,
    probe: Vec2,
    lines: usize,
) -> Option<Crossing> {
    let (w, h) = (grid.width(), grid.height());
    let mut p = start;

    for _ in 0..lines + 2 {
        if !(p.x >= 0.0 && p.x <= w && p.y >= 0.0 && p.y <= h) {
            return None;
        }
        let at = p + probe;
        if grid.is_wall_at(at) {
            return Some(Crossing {
                point: p,
                distance: origin.distance(p),
                material: grid.material_at(at).unwrap_or(BOUNDARY_MATERIAL),
            });
        }
        p += step;
    }
    None
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
