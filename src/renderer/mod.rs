//! Rendering abstraction layer.
//!
//! *The engine never touches a pixel buffer directly.*
//! It produces one [`WallStrip`] per ray (left-to-right) and hands them to
//! a type that implements [`Renderer`], then draws the minimap overlay
//! through the same trait.
//!
//! * Backends only need to know how to fill a column, a rectangle and a
//!   line; all ray/projection maths stays in `engine`.
//! * The software backend ([`Software`]) owns a row-major `u32` buffer that
//!   the binary blits straight into a window.

use crate::world::TextureId;

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// One textured screen strip: ceiling above, wall in the middle, floor below.
///
/// `x_start .. x_end` are the screen columns it covers (normally exactly
/// one). `y_top .. y_bot` is the wall span already clipped to the screen;
/// `wall_top`/`wall_h` describe the *unclipped* wall so texture rows stay
/// anchored when the wall is taller than the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct WallStrip {
    pub x_start: usize,
    pub x_end: usize,

    pub y_top: usize,
    pub y_bot: usize,

    pub wall_top: f32,
    pub wall_h: f32,

    pub tex_id: TextureId,
    pub tex_u: usize,

    pub ceiling: Rgba,
    pub floor: Rgba,
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Write every pixel of the columns covered by `strip`.
    fn draw_strip(&mut self, strip: &WallStrip, bank: &crate::world::TextureBank);

    /// Solid axis-aligned rectangle, clipped to the frame.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, colour: Rgba);

    /// One-pixel line, clipped to the frame.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, colour: Rgba);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

mod software;

pub use software::Software;
