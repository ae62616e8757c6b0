use glam::IVec2;

use crate::api::engine::Engine;
use crate::api::params::BoxSpriteParams;
use crate::assets::fonts::DEFAULT_FONT;
use crate::core::color::Color;
use crate::core::object::{ObjectId, ObjectLayer};
use crate::widgets::text_box::{TextBox, TextBoxParams};

#[derive(Debug, Clone)]
pub struct TooltipParams {
    pub box_texture: String,
    pub corner: i32,
    /// Space between the box edge and the text.
    pub padding: i32,
    /// Wrap limit for the text, padding excluded.
    pub max_width: i32,
    pub z: i32,
    pub layer: ObjectLayer,
    pub font: String,
    pub font_size: u32,
    pub text_color: Color,
}

impl Default for TooltipParams {
    fn default() -> Self {
        Self {
            box_texture: "tooltip_box".to_string(),
            corner: 6,
            padding: 8,
            max_width: 260,
            z: i32::MAX - 1,
            layer: ObjectLayer::Ui,
            font: DEFAULT_FONT.to_string(),
            font_size: 14,
            text_color: Color::WHITE,
        }
    }
}

/// Hover hint: a nine-slice box sized around a wrapped text block, hidden
/// until shown at a position.
pub struct Tooltip {
    box_sprite: ObjectId,
    text_box: TextBox,
    padding: i32,
    visible: bool,
}

impl Tooltip {
    pub fn new(engine: &mut Engine, params: TooltipParams) -> Self {
        let box_sprite = engine.create_box_sprite(BoxSpriteParams {
            texture: params.box_texture,
            corner: params.corner,
            z: params.z,
            layer: params.layer,
            shown: false,
            ..Default::default()
        });
        let text_box = TextBox::new(
            engine,
            TextBoxParams {
                max_width: params.max_width,
                z: params.z + 1,
                layer: params.layer,
                font: params.font,
                font_size: params.font_size,
                color: params.text_color,
                shown: false,
                ..Default::default()
            },
        );
        Self {
            box_sprite,
            text_box,
            padding: params.padding,
            visible: false,
        }
    }

    /// Show the tooltip with its top-left at `position`.
    pub fn show_at(&mut self, engine: &mut Engine, position: IVec2, text: &str) {
        self.text_box.set_text(engine, text);
        self.text_box
            .set_position(engine, position + IVec2::splat(self.padding));
        let size = self.text_box.size() + IVec2::splat(2 * self.padding);
        engine.transforms_mut().set_position(self.box_sprite, position);
        engine.transforms_mut().set_size(self.box_sprite, size);
        engine.set_shown(self.box_sprite, true);
        self.text_box.show(engine, true);
        self.visible = true;
    }

    pub fn hide(&mut self, engine: &mut Engine) {
        engine.set_shown(self.box_sprite, false);
        self.text_box.show(engine, false);
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn root(&self) -> ObjectId {
        self.box_sprite
    }
}
