//! ---------------------------------------------------------------------------
//! Classic software (CPU) column renderer
//!
//! * Fills a `Vec<u32>` frame-buffer in **0x00RRGGBB** format, row-major.
//! * The frame is never cleared: the strips of one frame cover every
//!   column from top to bottom, so nothing from the previous frame survives.
//! ---------------------------------------------------------------------------

use crate::{
    renderer::{Renderer, Rgba, WallStrip},
    world::TextureBank,
};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Wolfenstein-style column renderer.
#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Software {
    pub fn new(width: usize, height: usize) -> Self {
        let mut sw = Self::default();
        sw.begin_frame(width, height);
        sw
    }

    /// The last finished (or in-progress) frame.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.scratch
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Flood the whole buffer with one colour.
    pub fn clear(&mut self, colour: Rgba) {
        self.scratch.fill(colour);
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, colour: Rgba) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.scratch[y as usize * self.width + x as usize] = colour;
        }
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.clear();
            self.scratch.resize(w * h, 0);
        }
    }

    fn draw_strip(&mut self, strip: &WallStrip, bank: &TextureBank) {
        let tex = bank.texture_or_missing(strip.tex_id);

        let x_end = strip.x_end.min(self.width);
        let y_top = strip.y_top.min(self.height);
        let y_bot = strip.y_bot.clamp(y_top, self.height);

        /* texture rows per screen pixel ------------------------------------*/
        let step_v = if strip.wall_h > 0.0 {
            tex.h as f32 / strip.wall_h
        } else {
            0.0
        };

        for x in strip.x_start..x_end {
            for y in 0..y_top {
                self.scratch[y * self.width + x] = strip.ceiling;
            }

            for y in y_top..y_bot {
                let v = ((y as f32 - strip.wall_top) * step_v).max(0.0) as usize;
                self.scratch[y * self.width + x] = tex.texel(strip.tex_u, v);
            }

            for y in y_bot..self.height {
                self.scratch[y * self.width + x] = strip.floor;
            }
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, colour: Rgba) {
        let x0 = x.clamp(0, self.width as i32) as usize;
        let y0 = y.clamp(0, self.height as i32) as usize;
        let x1 = (x.saturating_add(w).clamp(0, self.width as i32) as usize).max(x0);
        let y1 = (y.saturating_add(h).clamp(0, self.height as i32) as usize).max(y0);
        for row in y0..y1 {
            self.scratch[row * self.width + x0..row * self.width + x1].fill(colour);
        }
    }

    /// Integer Bresenham line‑drawing algorithm.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, col: Rgba) {
        let mut x0 = x0;
        let mut y0 = y0;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, col);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Texture, TextureBank};

    const SKY: Rgba = 0x00_0000AA;
    const DIRT: Rgba = 0x00_553300;
    const BLUE: Rgba = 0x00_0000FF;

    /* tiny helpers ---------------------------------------------------*/
    fn tiny_bank() -> (TextureBank, u16) {
        let mut bank = TextureBank::default_with_checker();
        let id = bank
            .insert(1, Texture::new(4, 4, vec![BLUE; 16]).unwrap())
            .unwrap();
        (bank, id)
    }

    fn blue_strip(tex_id: u16) -> WallStrip {
        WallStrip {
            x_start: 1,
            x_end: 3,
            y_top: 2,
            y_bot: 6,
            wall_top: 2.0,
            wall_h: 4.0,
            tex_id,
            tex_u: 0,
            ceiling: SKY,
            floor: DIRT,
        }
    }

    #[test]
    fn strip_writes_ceiling_wall_floor() {
        let (bank, id) = tiny_bank();
        let mut sw = Software::new(8, 8);
        sw.clear(0xDEAD);
        sw.draw_strip(&blue_strip(id), &bank);

        for x in 1..3 {
            for y in 0..8 {
                let want = match y {
                    0..2 => SKY,
                    2..6 => BLUE,
                    _ => DIRT,
                };
                assert_eq!(sw.pixels()[y * 8 + x], want, "pixel ({x},{y})");
            }
        }
        // neighbouring columns untouched
        assert!(sw.pixels().iter().step_by(8).all(|&p| p == 0xDEAD));
    }

    #[test]
    fn texture_rows_follow_unclipped_wall() {
        let mut bank = TextureBank::default_with_checker();
        // 1 texel wide, 4 rows: 0,1,2,3
        let id = bank.insert(1, Texture::new(1, 4, vec![0, 1, 2, 3]).unwrap()).unwrap();
        let mut sw = Software::new(1, 4);
        // wall is 8 px tall starting 2 px above the screen
        sw.draw_strip(
            &WallStrip {
                x_start: 0,
                x_end: 1,
                y_top: 0,
                y_bot: 4,
                wall_top: -2.0,
                wall_h: 8.0,
                tex_id: id,
                tex_u: 0,
                ceiling: SKY,
                floor: DIRT,
            },
            &bank,
        );
        assert_eq!(sw.pixels(), &[1, 1, 2, 2]);
    }

    #[test]
    fn out_of_range_strip_is_clipped() {
        let (bank, id) = tiny_bank();
        let mut sw = Software::new(4, 4);
        let mut strip = blue_strip(id);
        strip.x_end = 99;
        strip.y_bot = 99;
        sw.draw_strip(&strip, &bank);
        assert_eq!(sw.pixels().len(), 16);
    }

    #[test]
    fn lines_and_rects_clip() {
        let mut sw = Software::new(4, 4);
        sw.clear(0);
        sw.fill_rect(-2, -2, 4, 4, 7);
        assert_eq!(&sw.pixels()[0..4], &[7, 7, 0, 0]);
        sw.draw_line(-5, 3, 10, 3, 9);
        assert_eq!(&sw.pixels()[12..16], &[9, 9, 9, 9]);
    }

    #[test]
    fn end_frame_loans_buffer() {
        let mut sw = Software::new(3, 2);
        let mut seen = (0, 0, 0);
        sw.end_frame(|fb, w, h| seen = (fb.len(), w, h));
        assert_eq!(seen, (6, 3, 2));
    }
}
