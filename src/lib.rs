//! Wolfenstein-style grid raycaster.
//!
//! * [`world`]    – tile grid, camera, textures (immutable after start-up)
//! * [`sim`]      – player state, collision, frame clock
//! * [`engine`]   – ray casting + projection, owns all per-frame state
//! * [`renderer`] – pixel sinks; the software backend fills a `u32` buffer

pub mod config;
pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;

pub use config::{Config, ConfigError};
pub use engine::{Engine, EngineError};
