//! Start-up constants. Nothing here changes once the engine is built.

use glam::Vec2;
use std::f32::consts::PI;
use thiserror::Error;

use crate::renderer::Rgba;
use crate::sim::DEFAULT_FPS;
use crate::world::{DEFAULT_TILE_SIZE, Grid};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tile size must be positive and finite, got {0}")]
    TileSize(f32),

    #[error("screen must be at least 1x1, got {w}x{h}")]
    Screen { w: usize, h: usize },

    #[error("ray count {rays} must be between 1 and the screen width {width}")]
    RayCount { rays: usize, width: usize },

    #[error("field of view must be inside (0, 180) degrees, got {0:.1}")]
    Fov(f32),

    #[error("frame rate must be at least 1")]
    Fps,

    #[error("texture size must be at least 1")]
    TextureSize,

    #[error("{0} must be finite and not negative, got {1}")]
    Speed(&'static str, f32),

    #[error("minimap scale must be inside (0, 1], got {0}")]
    MinimapScale(f32),

    #[error("player start and angle must be finite")]
    Pose,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// World units per grid cell; the engine refuses a grid built with
    /// any other size.
    pub tile_size: f32,
    pub screen_width: usize,
    pub screen_height: usize,
    /// Horizontal field of view, radians.
    pub fov: f32,
    /// One ray per strip; normally equal to `screen_width`.
    pub num_rays: usize,
    pub fps: u32,
    /// World units per second.
    pub walk_speed: f32,
    /// Radians per second.
    pub turn_speed: f32,
    pub texture_size: usize,
    pub minimap: bool,
    pub minimap_scale: f32,
    pub ceiling: Rgba,
    pub floor: Rgba,
    /// `None` = centre of the map.
    pub player_start: Option<Vec2>,
    pub player_angle: f32,
}

impl Default for Config {
    fn default() -> Self {
        let w = 20 * DEFAULT_TILE_SIZE as usize;
        let h = 13 * DEFAULT_TILE_SIZE as usize;
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            screen_width: w,
            screen_height: h,
            fov: 90_f32.to_radians(),
            num_rays: w,
            fps: DEFAULT_FPS,
            walk_speed: 100.0,
            turn_speed: 45_f32.to_radians(),
            texture_size: 64,
            minimap: true,
            minimap_scale: 0.3,
            ceiling: 0x00_333333,
            floor: 0x00_777777,
            player_start: None,
            player_angle: PI / 2.0,
        }
    }
}

impl Config {
    /// Defaults with the window sized to the map, one ray per column.
    pub fn for_grid(grid: &Grid) -> Self {
        let screen_width = grid.width().round().max(1.0) as usize;
        let screen_height = grid.height().round().max(1.0) as usize;
        Self {
            tile_size: grid.tile_size(),
            screen_width,
            screen_height,
            num_rays: screen_width,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(ConfigError::TileSize(self.tile_size));
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::Screen {
                w: self.screen_width,
                h: self.screen_height,
            });
        }
        if self.num_rays == 0 || self.num_rays > self.screen_width {
            return Err(ConfigError::RayCount {
                rays: self.num_rays,
                width: self.screen_width,
            });
        }
        if !(self.fov > 0.0 && self.fov < PI) {
            return Err(ConfigError::Fov(self.fov.to_degrees()));
        }
        if self.fps == 0 {
            return Err(ConfigError::Fps);
        }
        if self.texture_size == 0 {
            return Err(ConfigError::TextureSize);
        }
        for (name, v) in [
            ("walk speed", self.walk_speed),
            ("turn speed", self.turn_speed),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(ConfigError::Speed(name, v));
            }
        }
        if !(self.minimap_scale > 0.0 && self.minimap_scale <= 1.0) {
            return Err(ConfigError::MinimapScale(self.minimap_scale));
        }
        if !self.player_angle.is_finite() || !self.player_start.is_none_or(|p| p.is_finite()) {
            return Err(ConfigError::Pose);
        }
        Ok(())
    }
}
