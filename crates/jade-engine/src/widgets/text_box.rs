use glam::IVec2;

use crate::api::engine::Engine;
use crate::api::params::TextParams;
use crate::assets::fonts::DEFAULT_FONT;
use crate::core::color::Color;
use crate::core::object::{ObjectId, ObjectLayer};
use crate::core::transform::Anchor;

#[derive(Debug, Clone)]
pub struct TextBoxParams {
    pub position: IVec2,
    /// Wrap limit in pixels.
    pub max_width: i32,
    pub z: i32,
    pub layer: ObjectLayer,
    pub font: String,
    pub font_size: u32,
    pub text: String,
    pub color: Color,
    pub shown: bool,
}

impl Default for TextBoxParams {
    fn default() -> Self {
        Self {
            position: IVec2::ZERO,
            max_width: 300,
            z: 0,
            layer: ObjectLayer::Ui,
            font: DEFAULT_FONT.to_string(),
            font_size: 16,
            text: String::new(),
            color: Color::WHITE,
            shown: true,
        }
    }
}

/// Word-wrapped paragraph: one text object per line, stacked under the
/// first line at the font's line advance.
pub struct TextBox {
    lines: Vec<ObjectId>,
    position: IVec2,
    max_width: i32,
    z: i32,
    layer: ObjectLayer,
    font: String,
    font_size: u32,
    color: Color,
    shown: bool,
    size: IVec2,
}

impl TextBox {
    pub fn new(engine: &mut Engine, params: TextBoxParams) -> Self {
        let mut text_box = Self {
            lines: Vec::new(),
            position: params.position,
            max_width: params.max_width.max(1),
            z: params.z,
            layer: params.layer,
            font: params.font,
            font_size: params.font_size,
            color: params.color,
            shown: params.shown,
            size: IVec2::ZERO,
        };
        text_box.set_text(engine, &params.text);
        text_box
    }

    /// Re-wrap and rebuild the line objects.
    pub fn set_text(&mut self, engine: &mut Engine, text: &str) {
        for &line in &self.lines {
            engine.destroy(line);
        }
        self.lines.clear();

        let wrapped = engine
            .fonts()
            .wrap(&self.font, self.font_size, text, self.max_width);
        let advance = engine.fonts().line_advance(&self.font, self.font_size);

        let mut width = 0;
        let mut first = None;
        for (i, line) in wrapped.iter().enumerate() {
            width = width.max(engine.fonts().measure(&self.font, self.font_size, line).x);
            let id = engine.create_text(TextParams {
                font: self.font.clone(),
                font_size: self.font_size,
                text: line.clone(),
                color: self.color,
                position: self.position,
                z: self.z,
                layer: self.layer,
                shown: self.shown,
            });
            match first {
                None => first = Some(id),
                Some(root) => {
                    engine.transforms_mut().attach(
                        root,
                        id,
                        IVec2::new(0, i as i32 * advance),
                        Anchor::TopLeft,
                        Anchor::TopLeft,
                    );
                }
            }
            self.lines.push(id);
        }
        self.size = IVec2::new(width, wrapped.len() as i32 * advance);
    }

    /// Tight extent of the wrapped block.
    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn root(&self) -> Option<ObjectId> {
        self.lines.first().copied()
    }

    pub fn set_position(&mut self, engine: &mut Engine, position: IVec2) {
        self.position = position;
        if let Some(&root) = self.lines.first() {
            engine.transforms_mut().set_position(root, position);
        }
    }

    pub fn set_color(&mut self, engine: &mut Engine, color: Color) {
        self.color = color;
        for &line in &self.lines {
            engine.set_text_color(line, color);
        }
    }

    pub fn show(&mut self, engine: &mut Engine, visible: bool) {
        self.shown = visible;
        for &line in &self.lines {
            engine.set_shown(line, visible);
        }
    }

    pub fn destroy(&mut self, engine: &mut Engine) {
        for &line in &self.lines {
            engine.destroy(line);
        }
        self.lines.clear();
        self.size = IVec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::engine::EngineConfig;
    use crate::api::scene::{Scene, SceneId};

    struct NullScene;
    impl Scene for NullScene {
        fn start(&mut self, _engine: &mut Engine) {}
        fn update(&mut self, _engine: &mut Engine) {}
    }

    fn engine() -> Engine {
        let mut engine = Engine::new(EngineConfig {
            render_resolution: IVec2::new(800, 600),
            window_size: IVec2::new(800, 600),
            ..Default::default()
        });
        engine.add_scene(SceneId(1), NullScene);
        engine
    }

    #[test]
    fn wraps_into_stacked_lines() {
        let mut engine = engine();
        let limit = engine.fonts().measure(DEFAULT_FONT, 16, "aaaa bbbb").x;
        let text_box = TextBox::new(
            &mut engine,
            TextBoxParams {
                position: IVec2::new(10, 10),
                max_width: limit,
                text: "aaaa bbbb cccc dddd".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(text_box.lines.len(), 2);

        engine.tick(0.016);
        let advance = engine.fonts().line_advance(DEFAULT_FONT, 16);
        let first = engine.transforms().position(text_box.lines[0]);
        let second = engine.transforms().position(text_box.lines[1]);
        assert_eq!(first, IVec2::new(10, 10));
        assert_eq!(second, IVec2::new(10, 10 + advance));
        assert_eq!(text_box.size().y, 2 * advance);
    }

    #[test]
    fn set_text_replaces_lines() {
        let mut engine = engine();
        let mut text_box = TextBox::new(
            &mut engine,
            TextBoxParams {
                max_width: 10_000,
                text: "one line".to_string(),
                ..Default::default()
            },
        );
        let old_root = text_box.root().unwrap();
        text_box.set_text(&mut engine, "another line");
        engine.tick(0.016);
        assert_eq!(text_box.lines.len(), 1);
        assert!(engine.object(old_root).is_none());
        assert_eq!(
            engine.text_content(text_box.lines[0]).unwrap(),
            "another line"
        );
    }

    #[test]
    fn moving_the_box_carries_all_lines() {
        let mut engine = engine();
        let mut text_box = TextBox::new(
            &mut engine,
            TextBoxParams {
                max_width: 30,
                text: "aa bb".to_string(),
                ..Default::default()
            },
        );
        assert!(text_box.lines.len() >= 2);
        text_box.set_position(&mut engine, IVec2::new(100, 100));
        let advance = engine.fonts().line_advance(DEFAULT_FONT, 16);
        assert_eq!(
            engine.transforms().position(text_box.lines[1]),
            IVec2::new(100, 100 + advance)
        );
    }
}
