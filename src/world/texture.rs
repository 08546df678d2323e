// Material-indexed texture store.
// The renderer and the engine talk to it through `TextureId` only.

use std::collections::HashMap;

use super::grid::Material;
use crate::renderer::Rgba;

/// Runtime handle for a texture in this bank.
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` whose pixels are the checkerboard fallback.
/// Always = 0 because `TextureBank::new()` inserts it first.
pub const NO_TEXTURE: TextureId = 0;

/// Side of one checker square, in texels.
const CHECKER_CELL: usize = 8;

/// CPU-side storage: packed **0x00RRGGBB** texels in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Rgba>,
}

impl Texture {
    /// Wrap a pixel vector, checking that it matches `w × h`.
    pub fn new(w: usize, h: usize, pixels: Vec<Rgba>) -> Result<Self, TextureError> {
        if w == 0 || h == 0 || pixels.len() != w * h {
            return Err(TextureError::Size {
                w,
                h,
                found: pixels.len(),
            });
        }
        Ok(Self { w, h, pixels })
    }

    /// Square checkerboard; `cell` texels per square.
    pub fn checker(size: usize, cell: usize, light: Rgba, dark: Rgba) -> Self {
        let size = size.max(1);
        let cell = cell.max(1);
        let mut pixels = vec![0; size * size];
        for y in 0..size {
            for x in 0..size {
                pixels[y * size + x] = if ((x / cell) ^ (y / cell)) & 1 == 0 {
                    light
                } else {
                    dark
                };
            }
        }
        Texture {
            w: size,
            h: size,
            pixels,
        }
    }

    /// Texel at `(u, v)`, both clamped into the texture.
    #[inline]
    pub fn texel(&self, u: usize, v: usize) -> Rgba {
        let u = u.min(self.w - 1);
        let v = v.min(self.h - 1);
        self.pixels[v * self.w + u]
    }
}

/// Convenience checkerboard 8×8 (dark/light grey).
impl Default for Texture {
    fn default() -> Self {
        Texture::checker(8, 1, 0x00_A0A0A0, 0x00_404040)
    }
}

/// Things that can go wrong when using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to register a second texture for the same material.
    #[error("material {0} already has a texture")]
    Duplicate(Material),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    /// Pixel vector does not match the declared dimensions.
    #[error("texture is {w}x{h} but {found} pixels were supplied")]
    Size { w: usize, h: usize, found: usize },
}

/// A cache of wall textures keyed by grid material.
///
/// * Does **not** know about image files: textures are generated or
///   handed in fully decoded.
/// * Stores at most one texture per material.
/// * ID **0** is always the “missing” checkerboard.
pub struct TextureBank {
    by_material: HashMap<Material, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Create an empty bank with a mandatory *missing* texture used as
    /// fallback. It obtains the handle **0**.
    pub fn new(missing_tex: Texture) -> Self {
        Self {
            by_material: HashMap::new(),
            data: vec![missing_tex],
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    /// Bank with a tinted `size`×`size` checkerboard for materials 1‥=4.
    /// Unregistered materials fall back to a grey checker of the same size.
    pub fn procedural(size: usize) -> Self {
        const TINTS: [(Material, Rgba, Rgba); 4] = [
            (1, 0x00_3050C8, 0x00_101838), // blue stone
            (2, 0x00_B04030, 0x00_401410), // red brick
            (3, 0x00_40A040, 0x00_103010), // mossy
            (4, 0x00_C0A050, 0x00_403418), // wood
        ];
        let mut bank = Self::new(Texture::checker(
            size,
            CHECKER_CELL,
            0x00_A0A0A0,
            0x00_404040,
        ));
        for (material, light, dark) in TINTS {
            // materials in TINTS are distinct
            let _ = bank.insert(material, Texture::checker(size, CHECKER_CELL, light, dark));
        }
        bank
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of textures stored (including the “missing” one), so never 0.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Texture registered for `material`, if any.
    pub fn id(&self, material: Material) -> Option<TextureId> {
        self.by_material.get(&material).copied()
    }

    /// Fallback-safe query: unknown materials resolve to the checkerboard id.
    pub fn id_or_missing(&self, material: Material) -> TextureId {
        self.id(material).unwrap_or(NO_TEXTURE)
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Borrow by id, falling back to the checkerboard on a bad id.
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        self.data
            .get(id as usize)
            .unwrap_or(&self.data[NO_TEXTURE as usize])
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Register `tex` for `material`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the material already has one (`Duplicate`).
    pub fn insert(&mut self, material: Material, tex: Texture) -> Result<TextureId, TextureError> {
        if self.by_material.contains_key(&material) {
            return Err(TextureError::Duplicate(material));
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_material.insert(material, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
