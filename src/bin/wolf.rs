//! First-person raycaster in a window.
//!
//! Controls  ↑/W = forward  ↓/S = back  ←/A, →/D = turn  M = minimap  Esc = quit
//!
//! ```bash
//! cargo run --release -- [--map level.txt] [--fov 75] [--rays 320] [--scale 0.2]
//! ```

use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use log::info;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use wolf_rs::{
    Config, Engine,
    sim::{Axis, FrameClock},
    world::{DEFAULT_MAP, DEFAULT_TILE_SIZE, Grid},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Plain-text map, one digit per cell (built-in map if omitted)
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// World units per map cell
    #[arg(long, value_name = "UNITS")]
    tile: Option<f32>,

    /// Horizontal field of view in degrees
    #[arg(long, value_name = "DEGREES")]
    fov: Option<f32>,

    /// Number of rays (defaults to one per screen column)
    #[arg(long, value_name = "COUNT")]
    rays: Option<usize>,

    /// Target frame rate
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
    fps: Option<u32>,

    /// Walking speed in world units per second
    #[arg(long, value_name = "UNITS")]
    walk_speed: Option<f32>,

    /// Turning speed in degrees per second
    #[arg(long, value_name = "DEGREES")]
    turn_speed: Option<f32>,

    /// Minimap size relative to the world, in (0, 1]
    #[arg(long, value_name = "FACTOR")]
    scale: Option<f32>,

    /// Start with the minimap hidden
    #[arg(long)]
    no_minimap: bool,
}

impl Opts {
    /// Load the map and fold the overrides into a `Config`.
    fn build(&self) -> anyhow::Result<(Config, Grid)> {
        let tile = self.tile.unwrap_or(DEFAULT_TILE_SIZE);
        let grid = match &self.map {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading map {}", path.display()))?;
                let grid = Grid::parse(&text, tile)
                    .with_context(|| format!("parsing map {}", path.display()))?;
                info!("loaded {}: {}x{}", path.display(), grid.cols(), grid.rows());
                grid
            }
            None => Grid::from_rows(&DEFAULT_MAP, tile)?,
        };

        // window size and tile size follow the grid
        let mut cfg = Config::for_grid(&grid);
        if let Some(fov) = self.fov {
            cfg.fov = fov.to_radians();
        }
        if let Some(rays) = self.rays {
            cfg.num_rays = rays;
        }
        if let Some(fps) = self.fps {
            cfg.fps = fps;
        }
        if let Some(speed) = self.walk_speed {
            cfg.walk_speed = speed;
        }
        if let Some(speed) = self.turn_speed {
            cfg.turn_speed = speed.to_radians();
        }
        if let Some(scale) = self.scale {
            cfg.minimap_scale = scale;
        }
        cfg.minimap = !self.no_minimap;
        cfg.validate()?;

        Ok((cfg, grid))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    let (cfg, grid) = opts.build()?;
    let (w, h) = (cfg.screen_width, cfg.screen_height);

    let mut engine = Engine::new(&cfg, grid)?;
    let mut win = Window::new("Wolf3D", w, h, WindowOptions::default())
        .context("creating window")?;

    let mut clock = FrameClock::new(cfg.fps);
    clock.reset();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        /* --------------- input → intent (level-triggered) ----------------- */
        let turn = axis(&win, &[Key::Left, Key::A], &[Key::Right, Key::D]);
        let walk = axis(&win, &[Key::Down, Key::S], &[Key::Up, Key::W]);
        engine.set_intent(turn, walk);

        if win.is_key_pressed(Key::M, KeyRepeat::No) {
            engine.toggle_minimap();
        }

        /* --------------- simulate, draw, present ------------------------- */
        let dt = clock.tick();
        engine.update(dt);

        let mut presented = Ok(());
        engine.render_frame(|fb, w, h| presented = win.update_with_buffer(fb, w, h));
        presented?;
    }
    Ok(())
}

/// −1 if any `neg` key is held, +1 for `pos`, 0 for both or neither.
fn axis(win: &Window, neg: &[Key], pos: &[Key]) -> Axis {
    let held = |keys: &[Key]| keys.iter().any(|&k| win.is_key_down(k)) as i32;
    Axis::from_sign(held(pos) - held(neg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(args: &[&str]) -> anyhow::Result<(Config, Grid)> {
        let argv = std::iter::once("wolf").chain(args.iter().copied());
        Opts::try_parse_from(argv)?.build()
    }

    #[test]
    fn scale_flag_reaches_the_config() {
        let (cfg, _) = build(&["--scale", "0.2"]).unwrap();
        assert_eq!(cfg.minimap_scale, 0.2);
        assert!(cfg.minimap);
        assert!(build(&["--scale", "1.5"]).is_err());
    }

    #[test]
    fn tile_flag_sizes_grid_and_window() {
        let (cfg, grid) = build(&["--tile", "32", "--no-minimap"]).unwrap();
        assert_eq!(grid.tile_size(), 32.0);
        assert_eq!(cfg.tile_size, 32.0);
        assert_eq!((cfg.screen_width, cfg.screen_height), (640, 416));
        assert!(!cfg.minimap);
        assert!(Engine::new(&cfg, grid).is_ok());
    }
}
