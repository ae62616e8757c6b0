use glam::IVec2;

use crate::api::engine::Engine;
use crate::api::params::TextParams;
use crate::api::scene::{Scene, SceneId, FIRST_GAME_SCENE, OPTIONS_MENU_SCENE};
use crate::core::color::Color;
use crate::core::rect::Rect;
use crate::widgets::button::{Button, ButtonParams};
use crate::widgets::group::{layout_group, GroupLayout};

const BUTTON_WIDTH: i32 = 260;
const BUTTON_SPACING: i32 = 30;

/// Textures and sounds the menu buttons are dressed with.
#[derive(Debug, Clone)]
pub struct MainMenuStyle {
    pub button_texture: String,
    pub button_pressed_texture: String,
    pub click_sound: Option<String>,
    pub title: Option<String>,
}

impl Default for MainMenuStyle {
    fn default() -> Self {
        Self {
            button_texture: "button".to_string(),
            button_pressed_texture: "button_pressed".to_string(),
            click_sound: None,
            title: None,
        }
    }
}

/// Stock main menu: PLAY, OPTIONS and EXIT stacked in the middle, the
/// title above them and the copyright line in the bottom-right corner.
pub struct MainMenuScene {
    style: MainMenuStyle,
    play_target: SceneId,
    play: Option<Button>,
    options: Option<Button>,
    exit: Option<Button>,
}

impl MainMenuScene {
    pub fn new(style: MainMenuStyle) -> Self {
        Self::with_play_target(style, FIRST_GAME_SCENE)
    }

    pub fn with_play_target(style: MainMenuStyle, play_target: SceneId) -> Self {
        Self {
            style,
            play_target,
            play: None,
            options: None,
            exit: None,
        }
    }

    fn button(&self, engine: &mut Engine, label: &str, height: i32) -> Button {
        Button::new(
            engine,
            ButtonParams {
                size: IVec2::new(BUTTON_WIDTH, height),
                normal_texture: self.style.button_texture.clone(),
                pressed_texture: self.style.button_pressed_texture.clone(),
                text: label.to_string(),
                font_size: if height >= 70 { 28 } else { 22 },
                click_sound: self.style.click_sound.clone(),
                ..Default::default()
            },
        )
    }
}

impl Scene for MainMenuScene {
    fn start(&mut self, engine: &mut Engine) {
        // The window reflects whatever display settings were persisted.
        engine.apply_display_settings();

        let resolution = engine.config().render_resolution;

        let play = self.button(engine, "PLAY", 70);
        let options = self.button(engine, "OPTIONS", 50);
        let exit = self.button(engine, "EXIT", 50);
        layout_group(
            engine,
            Rect::new(0, 0, resolution.x, resolution.y),
            GroupLayout {
                spacing: BUTTON_SPACING,
                ..Default::default()
            },
            &[play.root(), options.root(), exit.root()],
        );

        if let Some(title) = &self.style.title {
            let text = engine.create_text(TextParams {
                text: title.clone(),
                font_size: 48,
                color: Color::JADE,
                ..Default::default()
            });
            let width = engine.fonts().measure("default", 48, title).x;
            engine
                .transforms_mut()
                .set_position(text, IVec2::new((resolution.x - width) / 2, 60));
        }

        let copyright = engine.config().copyright.clone();
        if !copyright.is_empty() {
            let text = engine.create_text(TextParams {
                text: copyright.clone(),
                font_size: 14,
                color: Color::LIGHT_GREY,
                ..Default::default()
            });
            let size = engine.fonts().measure("default", 14, &copyright);
            engine.transforms_mut().set_position(
                text,
                IVec2::new(resolution.x - size.x - 10, resolution.y - size.y - 10),
            );
        }

        self.play = Some(play);
        self.options = Some(options);
        self.exit = Some(exit);
    }

    fn update(&mut self, engine: &mut Engine) {
        let (Some(play), Some(options), Some(exit)) =
            (self.play.as_mut(), self.options.as_mut(), self.exit.as_mut())
        else {
            return;
        };
        play.update(engine);
        options.update(engine);
        exit.update(engine);

        if play.released() {
            engine.play_scene(self.play_target);
        } else if options.released() {
            engine.play_scene(OPTIONS_MENU_SCENE);
        } else if exit.released() {
            engine.end();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::engine::EngineConfig;
    use crate::api::scene::MAIN_MENU_SCENE;
    use crate::input::queue::{InputEvent, MouseButton};

    struct Landing;
    impl Scene for Landing {
        fn start(&mut self, _engine: &mut Engine) {}
        fn update(&mut self, _engine: &mut Engine) {}
    }

    fn engine() -> Engine {
        let mut engine = Engine::new(EngineConfig {
            render_resolution: IVec2::new(800, 600),
            window_size: IVec2::new(800, 600),
            ..Default::default()
        });
        engine.add_scene(MAIN_MENU_SCENE, MainMenuScene::new(MainMenuStyle::default()));
        engine.add_scene(FIRST_GAME_SCENE, Landing);
        engine.tick(0.016);
        engine
    }

    fn click(engine: &mut Engine, x: i32, y: i32) {
        engine.push_event(InputEvent::PointerDown {
            button: MouseButton::Left,
            x,
            y,
        });
        engine.tick(0.016);
        engine.push_event(InputEvent::PointerUp {
            button: MouseButton::Left,
            x,
            y,
        });
        engine.tick(0.016);
        engine.tick(0.016);
    }

    #[test]
    fn play_button_switches_scene() {
        let mut engine = engine();
        // Stack: 70 + 50 + 50 + 60 spacing = 230; PLAY spans y 185..255.
        click(&mut engine, 400, 220);
        assert_eq!(engine.current_scene(), FIRST_GAME_SCENE);
    }

    #[test]
    fn exit_button_ends_the_game() {
        let mut engine = engine();
        // EXIT spans y 365..415.
        click(&mut engine, 400, 390);
        assert!(engine.should_quit());
    }

    #[test]
    fn idle_menu_neither_quits_nor_switches() {
        let mut engine = engine();
        click(&mut engine, 20, 20);
        assert_eq!(engine.current_scene(), MAIN_MENU_SCENE);
        assert!(!engine.should_quit());
    }
}
