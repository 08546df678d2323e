use log::{debug, info};
use thiserror::Error;

use crate::{
    config::{Config, ConfigError},
    engine::{
        caster::{Ray, cast_all},
        minimap::Minimap,
        projection::Projector,
    },
    renderer::{Renderer, Rgba, Software},
    sim::{Axis, Player},
    world::{Grid, GridError, TextureBank, TextureError},
};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error("player start ({x:.1}, {y:.1}) is inside a wall")]
    SpawnInWall { x: f32, y: f32 },

    #[error("config tile size {config} does not match the grid's {grid}")]
    TileMismatch { config: f32, grid: f32 },
}

/// Owns every piece of run-time state: map, player, the per-column ray
/// arena, textures and the pixel sink.
///
/// Per frame the caller does `set_intent` → `update(dt)` → `render_frame`.
pub struct Engine<R: Renderer = Software> {
    pub renderer: R,
    grid: Grid,
    player: Player,
    rays: Vec<Ray>,
    textures: TextureBank,
    projector: Projector,
    minimap: Minimap,
    fov: f32,
}

impl Engine<Software> {
    /// Software engine with procedural textures.
    pub fn new(config: &Config, grid: Grid) -> Result<Self, EngineError> {
        let textures = TextureBank::procedural(config.texture_size);
        let renderer = Software::new(config.screen_width, config.screen_height);
        Self::with_parts(config, grid, textures, renderer)
    }

    /// Draw a frame and return the finished pixels (row-major).
    pub fn render(&mut self) -> &[Rgba] {
        self.render_frame(|_, _, _| ());
        self.renderer.pixels()
    }
}

impl<R: Renderer> Engine<R> {
    pub fn with_parts(
        config: &Config,
        grid: Grid,
        textures: TextureBank,
        renderer: R,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if config.tile_size != grid.tile_size() {
            return Err(EngineError::TileMismatch {
                config: config.tile_size,
                grid: grid.tile_size(),
            });
        }

        let start = config.player_start.unwrap_or_else(|| grid.centre());
        if grid.is_wall_at(start) {
            return Err(EngineError::SpawnInWall {
                x: start.x,
                y: start.y,
            });
        }

        let player = Player::new(
            start,
            config.player_angle,
            config.walk_speed,
            config.turn_speed,
        );

        let projector = Projector {
            screen_w: config.screen_width,
            screen_h: config.screen_height,
            focal: player.camera(config.fov).screen_scale(config.screen_width),
            tile_size: config.tile_size,
            ceiling: config.ceiling,
            floor: config.floor,
        };

        info!(
            "engine: {}x{} grid, {} rays, {:.0}° fov, {}x{} screen",
            grid.cols(),
            grid.rows(),
            config.num_rays,
            config.fov.to_degrees(),
            config.screen_width,
            config.screen_height
        );

        let mut engine = Self {
            renderer,
            grid,
            player,
            rays: vec![Ray::default(); config.num_rays],
            textures,
            projector,
            minimap: Minimap {
                scale: config.minimap_scale,
                enabled: config.minimap,
            },
            fov: config.fov,
        };
        engine.cast_rays();
        Ok(engine)
    }

    /*──────────────────────── frame boundary ─────────────────────────*/

    /// Latch the movement intent used by the next `update`.
    pub fn set_intent(&mut self, turn: Axis, walk: Axis) {
        self.player.set_intent(turn, walk);
    }

    /// Integrate the player by `dt` seconds and recast every column.
    pub fn update(&mut self, dt: f32) {
        let next = self.player.integrate(&self.grid, dt);
        if next.pos != self.player.pos {
            debug!("player at ({:.1}, {:.1})", next.pos.x, next.pos.y);
        }
        self.player = next;
        self.cast_rays();
    }

    /// Project the current rays, draw the overlay and loan the frame to
    /// `submit`.
    pub fn render_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.renderer
            .begin_frame(self.projector.screen_w, self.projector.screen_h);
        self.projector.project(
            &self.rays,
            self.player.angle,
            &mut self.renderer,
            &self.textures,
        );
        self.minimap
            .draw(&mut self.renderer, &self.grid, &self.player, &self.rays);
        self.renderer.end_frame(submit);
    }

    /*──────────────────────── accessors ──────────────────────────────*/

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    #[inline]
    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn toggle_minimap(&mut self) {
        self.minimap.enabled = !self.minimap.enabled;
    }

    fn cast_rays(&mut self) {
        let camera = self.player.camera(self.fov);
        cast_all(&self.grid, &camera, &mut self.rays);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::caster::{Facing, Surface};
    use crate::world::EMPTY;
    use glam::vec2;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn small_config() -> Config {
        Config {
            screen_width: 160,
            screen_height: 104,
            num_rays: 160,
            minimap: false,
            ..Config::default()
        }
    }

    #[test]
    fn spawn_inside_wall_is_refused() {
        let cfg = Config {
            player_start: Some(vec2(10.0, 10.0)),
            ..small_config()
        };
        let err = Engine::new(&cfg, Grid::default_map()).err();
        assert!(matches!(err, Some(EngineError::SpawnInWall { .. })));
    }

    #[test]
    fn invalid_config_is_refused() {
        let cfg = Config {
            num_rays: 0,
            ..small_config()
        };
        assert!(matches!(
            Engine::new(&cfg, Grid::default_map()),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn tile_size_must_match_the_grid() {
        let cfg = Config {
            tile_size: 10.0,
            ..small_config()
        };
        let err = Engine::new(&cfg, Grid::default_map()).err();
        match err {
            Some(EngineError::TileMismatch { config, grid }) => {
                assert_eq!((config, grid), (10.0, 64.0));
            }
            other => panic!("expected a tile mismatch, got {other:?}"),
        }
    }

    #[test]
    fn projector_takes_tile_and_focal_from_config() {
        let e = Engine::new(&Config::default(), Grid::default_map()).unwrap();
        assert_eq!(e.projector().tile_size, 64.0);
        // 1280 px wide at 90°: (1280/2) / tan(45°)
        assert!((e.projector().focal - 640.0).abs() < 1e-2);
    }

    #[test]
    fn non_finite_pose_is_refused() {
        let cfg = Config {
            player_angle: f32::NAN,
            ..small_config()
        };
        assert!(matches!(
            Engine::new(&cfg, Grid::default_map()),
            Err(EngineError::Config(ConfigError::Pose))
        ));
    }

    #[test]
    fn one_ray_per_column_after_construction() {
        let e = Engine::new(&small_config(), Grid::default_map()).unwrap();
        assert_eq!(e.rays().len(), 160);
        assert!(e.rays().iter().all(Ray::is_hit));
    }

    #[test]
    fn every_pixel_is_rewritten_each_frame() {
        let mut e = Engine::new(&small_config(), Grid::default_map()).unwrap();
        for turn in [Axis::Zero, Axis::Pos, Axis::Neg] {
            e.renderer.clear(0xDEAD_BEEF);
            e.set_intent(turn, Axis::Pos);
            e.update(0.1);
            let frame = e.render();
            assert_eq!(frame.len(), 160 * 104);
            assert!(frame.iter().all(|&px| px != 0xDEAD_BEEF));
        }
    }

    #[test]
    fn render_frame_submits_full_buffer() {
        let mut e = Engine::new(&small_config(), Grid::default_map()).unwrap();
        let mut dims = (0, 0, 0);
        e.render_frame(|fb, w, h| dims = (fb.len(), w, h));
        assert_eq!(dims, (160 * 104, 160, 104));
    }

    #[test]
    fn centre_column_looks_straight_ahead() {
        // 20×13 map, eye at the centre facing south, 90° fov
        let cfg = Config {
            minimap: false,
            ..Config::default()
        };
        let e = Engine::new(&cfg, Grid::default_map()).unwrap();
        assert_eq!(e.player().pos, vec2(640.0, 416.0));
        assert_eq!(e.player().angle, FRAC_PI_2);

        let mid = e.rays()[e.rays().len() / 2];
        assert!((mid.angle - FRAC_PI_2).abs() < 1e-4);
        assert!(mid.facing.contains(Facing::DOWN));
        assert_eq!(mid.surface, Surface::Horizontal);
        assert!((mid.distance - 352.0).abs() < 1e-2);
        assert!((mid.hit.y - 768.0).abs() < 1e-3);
    }

    #[test]
    fn big_step_cannot_cross_the_border() {
        let cfg = Config {
            minimap: false,
            ..small_config()
        };
        let mut e = Engine::new(&cfg, Grid::default_map()).unwrap();
        let before = e.player().pos;
        e.set_intent(Axis::Zero, Axis::Pos);
        // 100 u/s · 5 s = 500 units south, clearance is 352
        e.update(5.0);
        assert_eq!(e.player().pos, before);
        assert!(e.player().pos.y < e.grid().height());
    }

    #[test]
    fn small_step_moves_and_rays_follow() {
        let mut e = Engine::new(&small_config(), Grid::default_map()).unwrap();
        let d0 = e.rays()[80].distance;
        e.set_intent(Axis::Zero, Axis::Pos);
        e.update(1.0);
        assert!((e.player().pos - vec2(640.0, 516.0)).length() < 1e-3);
        assert!((e.rays()[80].distance - (d0 - 100.0)).abs() < 1e-2);
    }

    #[test]
    fn turning_rotates_the_view() {
        let cfg = Config {
            turn_speed: PI,
            ..small_config()
        };
        let mut e = Engine::new(&cfg, Grid::default_map()).unwrap();
        e.set_intent(Axis::Pos, Axis::Zero);
        e.update(0.5);
        assert!((e.player().angle - PI).abs() < 1e-5);
        // now facing west: centre ray meets the west border's inner face
        let mid = e.rays()[80];
        assert_eq!(mid.surface, Surface::Vertical);
        assert!((mid.hit.x - 64.0).abs() < 1e-2);
    }

    #[test]
    fn custom_grid_and_renderer() {
        let grid = Grid::new(3, 3, 10.0, vec![1, 1, 1, 1, EMPTY, 1, 1, 1, 1]).unwrap();
        let cfg = Config {
            tile_size: 10.0,
            screen_width: 30,
            screen_height: 30,
            num_rays: 10,
            ..Config::default()
        };
        let mut e = Engine::with_parts(
            &cfg,
            grid,
            TextureBank::default_with_checker(),
            Software::default(),
        )
        .unwrap();
        e.toggle_minimap();
        assert!(e.render().len() == 900);
    }
}
