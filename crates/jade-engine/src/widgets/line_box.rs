use glam::{IVec2, Vec2};

use crate::api::engine::Engine;
use crate::api::params::LineStripParams;
use crate::core::color::Color;
use crate::core::object::{ObjectId, ObjectLayer};
use crate::core::rect::Rect;

#[derive(Debug, Clone)]
pub struct LineBoxParams {
    pub rect: Rect,
    pub color: Color,
    pub z: i32,
    pub layer: ObjectLayer,
    pub shown: bool,
}

impl Default for LineBoxParams {
    fn default() -> Self {
        Self {
            rect: Rect::new(0, 0, 100, 100),
            color: Color::WHITE,
            z: 0,
            layer: ObjectLayer::Ui,
            shown: true,
        }
    }
}

/// Rectangle outline drawn as a closed five-point line strip. Useful for
/// selection boxes dragged out with the mouse.
pub struct LineBox {
    strip: ObjectId,
    rect: Rect,
    shown: bool,
}

impl LineBox {
    pub fn new(engine: &mut Engine, params: LineBoxParams) -> Self {
        let strip = engine.create_line_strip(LineStripParams {
            points: outline_points(params.rect.size),
            color: params.color,
            center: params.rect.center(),
            z: params.z,
            layer: params.layer,
            shown: params.shown && !degenerate(params.rect),
        });
        Self {
            strip,
            rect: params.rect,
            shown: params.shown,
        }
    }

    pub fn set_rect(&mut self, engine: &mut Engine, rect: Rect) {
        self.rect = rect;
        if degenerate(rect) {
            engine.set_shown(self.strip, false);
            return;
        }
        engine.set_line_points(self.strip, outline_points(rect.size));
        engine
            .transforms_mut()
            .set_center_position(self.strip, rect.center());
        engine.set_shown(self.strip, self.shown);
    }

    /// Set from two drag corners, in any order.
    pub fn set_start_end(&mut self, engine: &mut Engine, start: IVec2, end: IVec2) {
        let min = start.min(end);
        let max = start.max(end);
        self.set_rect(engine, Rect::new(min.x, min.y, max.x - min.x, max.y - min.y));
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_color(&self, engine: &mut Engine, color: Color) {
        engine.set_line_color(self.strip, color);
    }

    pub fn show(&mut self, engine: &mut Engine, visible: bool) {
        self.shown = visible;
        engine.set_shown(self.strip, visible && !degenerate(self.rect));
    }

    pub fn root(&self) -> ObjectId {
        self.strip
    }
}

fn degenerate(rect: Rect) -> bool {
    rect.width() < 2 || rect.height() < 2
}

fn outline_points(size: IVec2) -> Vec<Vec2> {
    let half = size.as_vec2() / 2.0;
    vec![
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
        Vec2::new(-half.x, -half.y),
    ]
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
    fn corners_normalize() {
        let mut engine = engine();
        let mut line_box = LineBox::new(&mut engine, LineBoxParams::default());
        line_box.set_start_end(&mut engine, IVec2::new(200, 180), IVec2::new(120, 60));
        assert_eq!(line_box.rect(), Rect::new(120, 60, 80, 120));
        assert!(engine.is_shown(line_box.root()));
    }

    #[test]
    fn thin_boxes_hide() {
        let mut engine = engine();
        let mut line_box = LineBox::new(&mut engine, LineBoxParams::default());
        line_box.set_start_end(&mut engine, IVec2::new(100, 100), IVec2::new(101, 180));
        assert!(!engine.is_shown(line_box.root()));

        // Growing past the threshold shows it again.
        line_box.set_start_end(&mut engine, IVec2::new(100, 100), IVec2::new(140, 180));
        assert!(engine.is_shown(line_box.root()));
    }

    #[test]
    fn outline_is_closed() {
        let points = outline_points(IVec2::new(10, 10));
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], points[4]);
    }
}
