use crate::{
    engine::caster::Ray,
    renderer::{Renderer, Rgba},
    sim::Player,
    world::{EMPTY, Grid},
};

const WALL: Rgba = 0x00_FFFFFF;
const FLOOR: Rgba = 0x00_000000;
const RAY: Rgba = 0x00_FF0000;
const MARKER: Rgba = 0x00_FFFFFF;

/// Player marker side, world units.
const MARKER_SIZE: f32 = 5.0;
/// Heading line length, world units.
const HEADING_LEN: f32 = 40.0;

/// Top-down overlay in the top-left corner: tiles, rays, player.
#[derive(Clone, Copy, Debug)]
pub struct Minimap {
    pub scale: f32, // screen px per world unit
    pub enabled: bool,
}

impl Minimap {
    pub fn draw<R: Renderer>(&self, r: &mut R, grid: &Grid, player: &Player, rays: &[Ray]) {
        if !self.enabled {
            return;
        }
        let s = self.scale;
        let px = |v: f32| (v * s) as i32;

        let tile = grid.tile_size();
        let tile_px = (tile * s).ceil() as i32;
        for (row, col, m) in grid.iter_cells() {
            let colour = if m == EMPTY { FLOOR } else { WALL };
            r.fill_rect(px(col as f32 * tile), px(row as f32 * tile), tile_px, tile_px, colour);
        }

        let eye = player.pos;
        for ray in rays.iter().filter(|ray| ray.is_hit()) {
            r.draw_line(px(eye.x), px(eye.y), px(ray.hit.x), px(ray.hit.y), RAY);
        }

        let side = (MARKER_SIZE * s).ceil().max(1.0) as i32;
        r.fill_rect(px(eye.x), px(eye.y), side, side, MARKER);
        let nose = eye + glam::Vec2::from_angle(player.angle) * HEADING_LEN;
        r.draw_line(px(eye.x), px(eye.y), px(nose.x), px(nose.y), MARKER);
    }
}
