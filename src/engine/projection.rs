use crate::{
    engine::caster::{Ray, Surface},
    renderer::{Renderer, Rgba, WallStrip},
    world::TextureBank,
};

/// Corrected distances are clamped to this so a wall touching the eye
/// projects to a huge but finite strip.
const MIN_DISTANCE: f32 = 1e-3;

/// Turns the ray arena into screen strips.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    pub screen_w: usize,
    pub screen_h: usize,
    pub focal: f32, // eye → projection plane, in pixels
    pub tile_size: f32,
    pub ceiling: Rgba,
    pub floor: Rgba,
}

impl Projector {
    /// Draw one strip per ray, left to right, covering the whole screen.
    pub fn project<R: Renderer>(
        &self,
        rays: &[Ray],
        view_angle: f32,
        renderer: &mut R,
        bank: &TextureBank,
    ) {
        for (i, ray) in rays.iter().enumerate() {
            let strip = self.strip(i, rays.len(), ray, view_angle, bank);
            renderer.draw_strip(&strip, bank);
        }
    }

    /// Build the strip for ray `i` of `n`.
    pub fn strip(
        &self,
        i: usize,
        n: usize,
        ray: &Ray,
        view_angle: f32,
        bank: &TextureBank,
    ) -> WallStrip {
        let (x_start, x_end) = column_range(i, n, self.screen_w);

        let dist = corrected_distance(ray, view_angle);
        let wall_h = strip_height(self.tile_size, dist, self.focal);
        let (wall_top, y_top, y_bot) = strip_span(wall_h, self.screen_h);

        let tex_id = bank.id_or_missing(ray.material);
        let tex_w = bank.texture_or_missing(tex_id).w;

        WallStrip {
            x_start,
            x_end,
            y_top,
            y_bot,
            wall_top,
            wall_h,
            tex_id,
            tex_u: texel_u(ray, self.tile_size, tex_w),
            ceiling: self.ceiling,
            floor: self.floor,
        }
    }
}

/// Planar (perpendicular) distance: radial distance times
/// `cos(ray − view)`. Removes the fisheye bulge.
#[inline]
pub fn corrected_distance(ray: &Ray, view_angle: f32) -> f32 {
    ray.distance * (ray.angle - view_angle).cos()
}

/// Projected wall height in pixels.
///
/// ```text
/// h = tile / dist · focal
/// ```
#[inline]
pub fn strip_height(tile_size: f32, dist: f32, focal: f32) -> f32 {
    if dist.is_nan() {
        return 0.0;
    }
    let h = tile_size / dist.max(MIN_DISTANCE) * focal;
    if h.is_finite() { h } else { 0.0 }
}

/// Centre a wall of height `h` on a screen `screen_h` tall.
///
/// Returns the unclipped top edge and the clipped pixel rows
/// `y_top .. y_bot`.
#[inline]
pub fn strip_span(h: f32, screen_h: usize) -> (f32, usize, usize) {
    let half = screen_h as f32 * 0.5;
    let top = half - h * 0.5;
    let bot = half + h * 0.5;
    let y_top = top.clamp(0.0, screen_h as f32) as usize;
    let y_bot = bot.clamp(0.0, screen_h as f32) as usize;
    (top, y_top, y_bot.max(y_top))
}

/// Texture column for a hit: the coordinate running *along* the wall face
/// (y on vertical faces, x on horizontal ones), wrapped per tile.
#[inline]
pub fn texel_u(ray: &Ray, tile_size: f32, tex_w: usize) -> usize {
    let along = match ray.surface {
        Surface::Vertical => ray.hit.y,
        Surface::Horizontal => ray.hit.x,
    };
    let frac = along.rem_euclid(tile_size) / tile_size;
    ((frac * tex_w as f32) as usize).min(tex_w.saturating_sub(1))
}

/// Screen columns `[start, end)` owned by ray `i` of `n` on a `w`-wide
/// screen. The ranges of all rays partition `0..w`.
#[inline]
pub fn column_range(i: usize, n: usize, w: usize) -> (usize, usize) {
    let n = n.max(1);
    (i * w / n, (i + 1) * w / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::caster::Facing;
    use crate::renderer::Software;
    use glam::vec2;
    use std::f32::consts::FRAC_PI_2;

    fn ray(distance: f32, angle: f32) -> Ray {
        Ray {
            angle,
            facing: Facing::from_angle(angle),
            hit: vec2(100.0, 100.0),
            distance,
            surface: Surface::Horizontal,
            material: 1,
        }
    }

    fn projector(w: usize, h: usize) -> Projector {
        Projector {
            screen_w: w,
            screen_h: h,
            focal: w as f32 * 0.5 / (FRAC_PI_2 * 0.5).tan(),
            tile_size: 64.0,
            ceiling: 0x00_111111,
            floor: 0x00_222222,
        }
    }

    #[test]
    fn distance_equal_to_focal_gives_one_tile() {
        let p = projector(640, 400);
        // centre ray: no fisheye factor
        let r = ray(p.focal, 1.0);
        let d = corrected_distance(&r, 1.0);
        assert_eq!(d, p.focal);
        assert!((strip_height(p.tile_size, d, p.focal) - 64.0).abs() < 1e-4);

        // off-centre ray whose *corrected* distance equals focal
        let off = 0.4_f32;
        let r = ray(p.focal / off.cos(), 1.0 + off);
        let d = corrected_distance(&r, 1.0);
        assert!((strip_height(p.tile_size, d, p.focal) - 64.0).abs() < 1e-2);
    }

    #[test]
    fn fisheye_correction_flattens_a_wall() {
        // flat wall 100 units in front: radial distance grows off-centre
        for off in [-0.6_f32, -0.2, 0.0, 0.3, 0.7] {
            let r = ray(100.0 / off.cos(), 2.0 + off);
            assert!((corrected_distance(&r, 2.0) - 100.0).abs() < 1e-3);
        }
    }

    #[test]
    fn span_is_centred_and_clipped() {
        assert_eq!(strip_span(100.0, 400), (150.0, 150, 250));
        let (top, y_top, y_bot) = strip_span(1000.0, 400);
        assert_eq!(top, -300.0);
        assert_eq!((y_top, y_bot), (0, 400));
        assert_eq!(strip_span(0.0, 400), (200.0, 200, 200));
    }

    #[test]
    fn degenerate_distances_stay_finite() {
        assert!(strip_height(64.0, 0.0, 320.0).is_finite());
        assert!(strip_height(64.0, -5.0, 320.0).is_finite());
        assert!(strip_height(64.0, f32::MAX, 320.0) < 1e-6);
        assert_eq!(strip_height(64.0, f32::NAN, 320.0), 0.0);
    }

    #[test]
    fn texel_column_follows_the_face() {
        let mut r = ray(10.0, 0.0);
        r.hit = vec2(64.0 * 3.0 + 10.0, 64.0 * 2.0 + 40.0);
        r.surface = Surface::Horizontal;
        assert_eq!(texel_u(&r, 64.0, 64), 10);
        r.surface = Surface::Vertical;
        assert_eq!(texel_u(&r, 64.0, 64), 40);
        // smaller texture, same relative position
        assert_eq!(texel_u(&r, 64.0, 16), 10);
    }

    #[test]
    fn column_ranges_partition_the_screen() {
        for (n, w) in [(320, 320), (100, 320), (7, 50), (1, 9)] {
            let mut next = 0;
            for i in 0..n {
                let (a, b) = column_range(i, n, w);
                assert_eq!(a, next);
                assert!(b > a);
                next = b;
            }
            assert_eq!(next, w);
        }
    }

    #[test]
    fn project_covers_every_pixel() {
        let p = projector(40, 30);
        let bank = TextureBank::procedural(64);
        let rays: Vec<Ray> = (0..13)
            .map(|i| ray(20.0 + i as f32 * 30.0, 1.0))
            .collect();
        let mut sw = Software::new(40, 30);
        sw.clear(0xDEAD_BEEF);
        p.project(&rays, 1.0, &mut sw, &bank);
        assert!(sw.pixels().iter().all(|&px| px != 0xDEAD_BEEF));
    }
}
