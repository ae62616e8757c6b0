use crate::api::engine::Engine;
use crate::api::params::TextParams;
use crate::api::scene::{Scene, SceneId, MAIN_MENU_SCENE};
use crate::core::color::Color;
use crate::core::object::ObjectId;

const FADE_IN_SECONDS: f32 = 1.5;
const SPLASH_SECONDS: f32 = 3.5;

/// Splash screen: the engine credit fades in, then the next scene starts.
/// Any click or key skips ahead.
pub struct PoweredByScene {
    next: SceneId,
    text: Option<ObjectId>,
    timer: f32,
}

impl PoweredByScene {
    pub fn new() -> Self {
        Self::with_next(MAIN_MENU_SCENE)
    }

    pub fn with_next(next: SceneId) -> Self {
        Self {
            next,
            text: None,
            timer: 0.0,
        }
    }
}

impl Default for PoweredByScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for PoweredByScene {
    fn start(&mut self, engine: &mut Engine) {
        let resolution = engine.config().render_resolution;
        let text = engine.create_text(TextParams {
            text: "Powered by Jade Engine".to_string(),
            font_size: 36,
            color: Color::JADE.with_alpha(0),
            ..Default::default()
        });
        engine
            .transforms_mut()
            .set_center_position(text, resolution / 2);
        self.text = Some(text);
    }

    fn update(&mut self, engine: &mut Engine) {
        self.timer += engine.delta_time();

        if let Some(text) = self.text {
            let fade = (self.timer / FADE_IN_SECONDS).clamp(0.0, 1.0);
            engine.set_text_color(text, Color::JADE.with_alpha((fade * 255.0) as u8));
            // Text centers once measured; keep it centered as the size lands.
            let resolution = engine.config().render_resolution;
            engine
                .transforms_mut()
                .set_center_position(text, resolution / 2);
        }

        let skipped = engine.input().first_key_pressed().is_some()
            || engine.input().button_pressed(crate::input::queue::MouseButton::Left);
        if self.timer >= SPLASH_SECONDS || skipped {
            if let Some(text) = self.text.take() {
                engine.destroy(text);
            }
            engine.play_scene(self.next);
        }
    }
}
