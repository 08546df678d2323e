mod camera;
mod grid;
mod map;
mod texture;

pub use grid::{EMPTY, Grid, GridError, Material};

pub use map::{DEFAULT_MAP, DEFAULT_TILE_SIZE};

pub use camera::{Camera, normalize_angle};

pub use texture::{NO_TEXTURE, Texture, TextureBank, TextureError, TextureId};
