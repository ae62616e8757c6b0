use std::collections::HashMap;
use std::path::Path;

use glam::IVec2;

use crate::assets::manifest::FrameEntry;
use crate::assets::AssetError;
use crate::core::color::Color;
use crate::core::rect::Rect;

/// Handle into the texture registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Id of the built-in fallback texture (loud pink), always present.
pub const FALLBACK_TEXTURE: TextureId = TextureId(0);

const FALLBACK_SIZE: i32 = 100;

/// CPU-side texture metadata. Pixel data stays with the host; the engine
/// keeps only what layout and hover testing need.
#[derive(Debug, Clone)]
pub struct Texture {
    pub name: String,
    pub size: IVec2,
    /// Tight box around the opaque pixels.
    pub bounding_box: Rect,
    /// Solid-color textures carry no file; the host fills the dst rect.
    pub solid: Option<Color>,
    pub path: Option<String>,
    hit_mask: Option<Vec<bool>>,
}

impl Texture {
    /// Per-pixel hit test in texture-local coordinates. Textures without a
    /// mask count every pixel inside their size as a hit.
    pub fn hit_test(&self, local: IVec2) -> bool {
        if local.x < 0 || local.y < 0 || local.x >= self.size.x || local.y >= self.size.y {
            return false;
        }
        match &self.hit_mask {
            Some(mask) => mask[(local.y * self.size.x + local.x) as usize],
            None => true,
        }
    }

    pub fn has_hit_mask(&self) -> bool {
        self.hit_mask.is_some()
    }
}

/// Registry of texture metadata, sheet frames and memoized solid colors.
pub struct TextureRegistry {
    textures: Vec<Texture>,
    by_name: HashMap<String, TextureId>,
    frames: HashMap<String, (TextureId, Rect)>,
    solids: HashMap<u32, TextureId>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            textures: Vec::new(),
            by_name: HashMap::new(),
            frames: HashMap::new(),
            solids: HashMap::new(),
        };
        // Index 0 is the fallback for every missing lookup.
        registry.push(Texture {
            name: "__fallback".to_string(),
            size: IVec2::splat(FALLBACK_SIZE),
            bounding_box: Rect::new(0, 0, FALLBACK_SIZE, FALLBACK_SIZE),
            solid: Some(Color::PINK),
            path: None,
            hit_mask: None,
        });
        registry
    }

    fn push(&mut self, texture: Texture) -> TextureId {
        let id = TextureId(self.textures.len() as u32);
        self.by_name.insert(texture.name.clone(), id);
        self.textures.push(texture);
        id
    }

    /// Load a PNG and register its metadata. The decoded pixels are only
    /// used to derive the size, tight bounding box and optional hit mask.
    pub fn load_file(
        &mut self,
        name: &str,
        path: &str,
        with_hit_mask: bool,
    ) -> Result<TextureId, AssetError> {
        let img = image::open(Path::new(path))
            .map_err(|source| AssetError::Image {
                path: path.to_string(),
                source,
            })?
            .to_rgba8();
        let size = IVec2::new(img.width() as i32, img.height() as i32);
        let (bounding_box, hit_mask) = scan_alpha(size, img.as_raw(), with_hit_mask);
        log::debug!("texture '{}' loaded from {} ({}x{})", name, path, size.x, size.y);
        Ok(self.push(Texture {
            name: name.to_string(),
            size,
            bounding_box,
            solid: None,
            path: Some(path.to_string()),
            hit_mask,
        }))
    }

    /// Register texture metadata from raw RGBA pixels (row-major, 4 bytes
    /// per pixel).
    pub fn register_rgba(
        &mut self,
        name: &str,
        size: IVec2,
        rgba: &[u8],
        with_hit_mask: bool,
    ) -> TextureId {
        let (bounding_box, hit_mask) = scan_alpha(size, rgba, with_hit_mask);
        self.push(Texture {
            name: name.to_string(),
            size,
            bounding_box,
            solid: None,
            path: None,
            hit_mask,
        })
    }

    /// Register a fully-opaque texture by size alone (no pixel data).
    pub fn register_blank(&mut self, name: &str, size: IVec2) -> TextureId {
        self.push(Texture {
            name: name.to_string(),
            size,
            bounding_box: Rect::from_pos_size(IVec2::ZERO, size),
            solid: None,
            path: None,
            hit_mask: None,
        })
    }

    /// Get (or create) a solid-color texture. Memoized per color.
    pub fn solid(&mut self, color: Color) -> TextureId {
        if let Some(&id) = self.solids.get(&color.packed()) {
            return id;
        }
        let id = self.push(Texture {
            name: format!("__solid_{:08x}", color.packed()),
            size: IVec2::ONE,
            bounding_box: Rect::new(0, 0, 1, 1),
            solid: Some(color),
            path: None,
            hit_mask: None,
        });
        self.solids.insert(color.packed(), id);
        id
    }

    /// Register sheet frames cut out of an existing texture.
    pub fn add_sheet(&mut self, texture: &str, frames: &[FrameEntry]) -> Result<(), AssetError> {
        let id = self
            .by_name
            .get(texture)
            .copied()
            .ok_or_else(|| AssetError::UnknownTexture(texture.to_string()))?;
        for frame in frames {
            self.frames.insert(
                frame.name.clone(),
                (id, Rect::new(frame.x, frame.y, frame.w, frame.h)),
            );
        }
        Ok(())
    }

    /// Resolve a name to a texture plus optional sheet-frame source rect.
    /// Unknown names resolve to the fallback texture with a warning.
    pub fn resolve(&self, name: &str) -> (TextureId, Option<Rect>) {
        if let Some(&(id, rect)) = self.frames.get(name) {
            return (id, Some(rect));
        }
        if let Some(&id) = self.by_name.get(name) {
            return (id, None);
        }
        log::warn!("unknown texture '{}', using fallback", name);
        (FALLBACK_TEXTURE, None)
    }

    pub fn get(&self, id: TextureId) -> &Texture {
        self.textures
            .get(id.0 as usize)
            .unwrap_or(&self.textures[0])
    }

    /// Draw size of a name: the frame size for sheet frames, else the
    /// texture size.
    pub fn natural_size(&self, name: &str) -> IVec2 {
        let (id, frame) = self.resolve(name);
        match frame {
            Some(rect) => rect.size,
            None => self.get(id).size,
        }
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the tight bounding box of opaque pixels and, optionally, a
/// boolean hit mask from RGBA data.
fn scan_alpha(size: IVec2, rgba: &[u8], with_hit_mask: bool) -> (Rect, Option<Vec<bool>>) {
    let (w, h) = (size.x, size.y);
    let mut mask = if with_hit_mask {
        Some(vec![false; (w * h) as usize])
    } else {
        None
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (w, h, -1, -1);
    for y in 0..h {
        for x in 0..w {
            let idx = ((y * w + x) * 4 + 3) as usize;
            let opaque = rgba.get(idx).copied().unwrap_or(0) > 0;
            if opaque {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
                if let Some(mask) = mask.as_mut() {
                    mask[(y * w + x) as usize] = true;
                }
            }
        }
    }
    let bounding_box = if max_x < 0 {
        Rect::new(0, 0, 0, 0)
    } else {
        Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    };
    (bounding_box, mask)
}
