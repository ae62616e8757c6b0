//! Creation parameters for the primitive object kinds.

use glam::{IVec2, Vec2};

use crate::assets::fonts::DEFAULT_FONT;
use crate::core::color::Color;
use crate::core::object::ObjectLayer;

/// Parameters for [`crate::Engine::create_sprite`].
#[derive(Debug, Clone)]
pub struct SpriteParams {
    /// Texture or sheet-frame name.
    pub texture: String,
    pub position: IVec2,
    /// Draw size; `None` uses the texture's natural size.
    pub size: Option<IVec2>,
    pub z: i32,
    pub layer: ObjectLayer,
    pub shown: bool,
    pub alpha: f32,
    pub tint: Option<Color>,
    /// Rotation around the center, degrees clockwise.
    pub rotation: f32,
}

impl Default for SpriteParams {
    fn default() -> Self {
        Self {
            texture: String::new(),
            position: IVec2::ZERO,
            size: None,
            z: 0,
            layer: ObjectLayer::Ui,
            shown: true,
            alpha: 1.0,
            tint: None,
            rotation: 0.0,
        }
    }
}

/// Parameters for [`crate::Engine::create_box_sprite`] (nine-slice).
#[derive(Debug, Clone)]
pub struct BoxSpriteParams {
    pub texture: String,
    /// Corner size kept unstretched on all four sides.
    pub corner: i32,
    pub position: IVec2,
    pub size: IVec2,
    pub z: i32,
    pub layer: ObjectLayer,
    pub shown: bool,
    pub alpha: f32,
}

impl Default for BoxSpriteParams {
    fn default() -> Self {
        Self {
            texture: String::new(),
            corner: 8,
            position: IVec2::ZERO,
            size: IVec2::new(100, 40),
            z: 0,
            layer: ObjectLayer::Ui,
            shown: true,
            alpha: 1.0,
        }
    }
}

/// Parameters for [`crate::Engine::create_text`].
#[derive(Debug, Clone)]
pub struct TextParams {
    pub font: String,
    pub font_size: u32,
    pub text: String,
    pub color: Color,
    pub position: IVec2,
    pub z: i32,
    pub layer: ObjectLayer,
    pub shown: bool,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
            font_size: 20,
            text: String::new(),
            color: Color::WHITE,
            position: IVec2::ZERO,
            z: 0,
            layer: ObjectLayer::Ui,
            shown: true,
        }
    }
}

/// Parameters for [`crate::Engine::create_line_strip`]. Points are local
/// to the strip's center position.
#[derive(Debug, Clone)]
pub struct LineStripParams {
    pub points: Vec<Vec2>,
    pub color: Color,
    pub center: IVec2,
    pub z: i32,
    pub layer: ObjectLayer,
    pub shown: bool,
}

impl Default for LineStripParams {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            color: Color::WHITE,
            center: IVec2::ZERO,
            z: 0,
            layer: ObjectLayer::Ui,
            shown: true,
        }
    }
}
