use glam::{IVec2, Vec2};

use crate::assets::textures::TextureId;
use crate::core::color::Color;
use crate::core::rect::Rect;

/// Unique identifier of a game object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Which coordinate space and lifetime an object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectLayer {
    /// Screen-space, owned by the current scene.
    #[default]
    Ui,
    /// World-space, scrolled by the world camera, owned by the current scene.
    World,
    /// Screen-space, survives scene switches and draws on top.
    PersistentUi,
}

/// Deferred-loading state. Objects are created `Wanted` when they still
/// need engine-side work (text measurement); updates are suspended until
/// they reach `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Wanted,
    Done,
    Abandoned,
}

/// Fat game object — identity, draw ordering and one kind of drawable payload.
/// Position and size live in the transform graph under the same id.
#[derive(Debug, Clone)]
pub struct GameObject {
    pub id: ObjectId,
    pub layer: ObjectLayer,
    /// Draw order; higher z draws on top.
    pub z: i32,
    pub shown: bool,
    pub load_state: LoadState,
    /// Deferred destruction — honored at the start of the next frame.
    pub destruction_wanted: bool,
    pub kind: ObjectKind,
}

#[derive(Debug, Clone)]
pub enum ObjectKind {
    Sprite(SpriteData),
    Text(TextData),
    LineStrip(LineData),
}

/// Textured quad. Plain sprites draw the whole texture (or a sheet frame)
/// into the transform rect; nine-slice sprites stretch only the middle.
#[derive(Debug, Clone)]
pub struct SpriteData {
    pub texture: TextureId,
    /// Source rect inside the texture for sprite-sheet frames.
    pub frame: Option<Rect>,
    /// Corner size for nine-slice drawing (box sprites).
    pub nine_slice: Option<i32>,
    pub alpha: f32,
    pub tint: Option<Color>,
    /// Rotation around the center, in degrees.
    pub rotation: f32,
}

impl SpriteData {
    pub fn new(texture: TextureId) -> Self {
        Self {
            texture,
            frame: None,
            nine_slice: None,
            alpha: 1.0,
            tint: None,
            rotation: 0.0,
        }
    }
}

/// A run of text in one font and size. `measured` is filled in by the
/// load pass; edits reset the load state so it gets measured again.
#[derive(Debug, Clone)]
pub struct TextData {
    pub font: String,
    pub font_size: u32,
    pub content: String,
    pub color: Color,
    pub measured: IVec2,
}

/// Polyline in coordinates local to the object's center position.
#[derive(Debug, Clone)]
pub struct LineData {
    pub points: Vec<Vec2>,
    pub color: Color,
}

impl GameObject {
    pub fn new(id: ObjectId, kind: ObjectKind) -> Self {
        Self {
            id,
            layer: ObjectLayer::Ui,
            z: 0,
            shown: true,
            load_state: LoadState::Wanted,
            destruction_wanted: false,
            kind,
        }
    }

    // -- Builder pattern --

    pub fn with_layer(mut self, layer: ObjectLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn with_shown(mut self, shown: bool) -> Self {
        self.shown = shown;
        self
    }

    /// Sprite payload, if this object is a sprite.
    pub fn sprite(&self) -> Option<&SpriteData> {
        match &self.kind {
            ObjectKind::Sprite(s) => Some(s),
            _ => None,
        }
    }

    pub fn sprite_mut(&mut self) -> Option<&mut SpriteData> {
        match &mut self.kind {
            ObjectKind::Sprite(s) => Some(s),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&TextData> {
        match &self.kind {
            ObjectKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut TextData> {
        match &mut self.kind {
            ObjectKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn lines(&self) -> Option<&LineData> {
        match &self.kind {
            ObjectKind::LineStrip(l) => Some(l),
            _ => None,
        }
    }

    pub fn lines_mut(&mut self) -> Option<&mut LineData> {
        match &mut self.kind {
            ObjectKind::LineStrip(l) => Some(l),
            _ => None,
        }
    }
}
