use glam::Vec2;
use std::f32::consts::TAU;

/// View-point for one frame, derived from the player pose.
///
/// * Map convention: +x = east, +y = south (rows grow downwards).
/// * `yaw` 0 looks east; increasing yaw turns *clockwise* on the map.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pos: Vec2, // world units
    yaw: f32,  // radians
    fov: f32,  // horizontal FoV (radians)
}

impl Camera {
    /// Create a new camera at `pos`, facing `yaw`, with horizontal FoV `fov`.
    pub fn new(pos: Vec2, yaw: f32, fov: f32) -> Self {
        Self { pos, yaw, fov }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Angle of the ray for `column` out of `columns`, wrapped to `[0, 2π)`.
    ///
    /// ```text
    /// yaw - fov/2 + column · fov/columns
    /// ```
    #[inline]
    pub fn column_angle(self, column: usize, columns: usize) -> f32 {
        let a = self.yaw - self.fov * 0.5 + column as f32 * (self.fov / columns as f32);
        normalize_angle(a)
    }

    /// Distance from the eye to the projection plane for viewport width `w`.
    ///
    /// ```text
    /// focal = (w/2) / tan(fov/2)
    /// ```
    #[inline]
    pub fn screen_scale(self, w: usize) -> f32 {
        (w as f32) * 0.5 / (self.fov * 0.5).tan()
    }
}

/// Wrap any finite angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(a: f32) -> f32 {
    let a = a.rem_euclid(TAU);
    // rem_euclid may round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
