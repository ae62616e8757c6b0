use glam::IVec2;

use crate::api::engine::Engine;
use crate::api::params::{BoxSpriteParams, TextParams};
use crate::assets::fonts::DEFAULT_FONT;
use crate::core::color::Color;
use crate::core::object::{ObjectId, ObjectLayer};
use crate::core::transform::Anchor;
use crate::input::queue::MouseButton;

#[derive(Debug, Clone)]
pub struct ButtonParams {
    pub position: IVec2,
    pub size: IVec2,
    pub z: i32,
    pub layer: ObjectLayer,
    pub normal_texture: String,
    pub pressed_texture: String,
    pub disabled_texture: Option<String>,
    pub corner: i32,
    pub text: String,
    pub font: String,
    pub font_size: u32,
    pub text_color: Color,
    pub disabled_text_color: Color,
    /// Label shift while the button is held down.
    pub pressed_offset: IVec2,
    pub click_sound: Option<String>,
}

impl Default for ButtonParams {
    fn default() -> Self {
        Self {
            position: IVec2::ZERO,
            size: IVec2::new(200, 50),
            z: 0,
            layer: ObjectLayer::Ui,
            normal_texture: "button_normal".to_string(),
            pressed_texture: "button_pressed".to_string(),
            disabled_texture: None,
            corner: 8,
            text: String::new(),
            font: DEFAULT_FONT.to_string(),
            font_size: 20,
            text_color: Color::WHITE,
            disabled_text_color: Color::DARK_GREY,
            pressed_offset: IVec2::new(0, 2),
            click_sound: None,
        }
    }
}

/// Push button: a nine-slice body in normal/pressed/disabled states with a
/// centered label. `released()` is the click signal.
pub struct Button {
    normal: ObjectId,
    pressed_sprite: ObjectId,
    disabled_sprite: Option<ObjectId>,
    label: ObjectId,
    text_color: Color,
    disabled_text_color: Color,
    pressed_offset: IVec2,
    click_sound: Option<String>,
    pressed: bool,
    released: bool,
    disabled: bool,
    visible: bool,
}

impl Button {
    pub fn new(engine: &mut Engine, params: ButtonParams) -> Self {
        let normal = engine.create_box_sprite(BoxSpriteParams {
            texture: params.normal_texture,
            corner: params.corner,
            position: params.position,
            size: params.size,
            z: params.z,
            layer: params.layer,
            ..Default::default()
        });
        let pressed_sprite = engine.create_box_sprite(BoxSpriteParams {
            texture: params.pressed_texture,
            corner: params.corner,
            position: params.position,
            size: params.size,
            z: params.z,
            layer: params.layer,
            shown: false,
            ..Default::default()
        });
        let disabled_sprite = params.disabled_texture.map(|texture| {
            engine.create_box_sprite(BoxSpriteParams {
                texture,
                corner: params.corner,
                position: params.position,
                size: params.size,
                z: params.z,
                layer: params.layer,
                shown: false,
                ..Default::default()
            })
        });
        let label = engine.create_text(TextParams {
            font: params.font,
            font_size: params.font_size,
            text: params.text,
            color: params.text_color,
            z: params.z + 1,
            layer: params.layer,
            ..Default::default()
        });

        // Everything hangs off the normal sprite so the button moves as one.
        let transforms = engine.transforms_mut();
        transforms.attach(normal, pressed_sprite, IVec2::ZERO, Anchor::Center, Anchor::Center);
        if let Some(disabled) = disabled_sprite {
            transforms.attach(normal, disabled, IVec2::ZERO, Anchor::Center, Anchor::Center);
        }
        transforms.attach(normal, label, IVec2::ZERO, Anchor::Center, Anchor::Center);

        Self {
            normal,
            pressed_sprite,
            disabled_sprite,
            label,
            text_color: params.text_color,
            disabled_text_color: params.disabled_text_color,
            pressed_offset: params.pressed_offset,
            click_sound: params.click_sound,
            pressed: false,
            released: false,
            disabled: false,
            visible: true,
        }
    }

    pub fn update(&mut self, engine: &mut Engine) {
        self.released = false;
        if self.disabled || !self.visible {
            return;
        }

        let hovered = engine.hovered_in(&[self.normal, self.pressed_sprite]);

        if hovered && engine.input().button_pressed(MouseButton::Left) && !self.pressed {
            self.pressed = true;
            engine.set_shown(self.normal, false);
            engine.set_shown(self.pressed_sprite, true);
            engine.transforms_mut().attach(
                self.normal,
                self.label,
                self.pressed_offset,
                Anchor::Center,
                Anchor::Center,
            );
            if let Some(sound) = self.click_sound.clone() {
                engine.audio_mut().play_sound(&sound);
            }
        }

        if self.pressed && !engine.input().button_down(MouseButton::Left) {
            self.pressed = false;
            engine.set_shown(self.normal, true);
            engine.set_shown(self.pressed_sprite, false);
            engine.transforms_mut().attach(
                self.normal,
                self.label,
                IVec2::ZERO,
                Anchor::Center,
                Anchor::Center,
            );
            // Only a release over the button counts as a click.
            if hovered {
                self.released = true;
            }
        }
    }

    /// Click edge: pressed and released on the button this frame.
    pub fn released(&self) -> bool {
        self.released
    }

    /// Currently held down.
    pub fn down(&self) -> bool {
        self.pressed
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, engine: &mut Engine, disabled: bool) {
        if self.disabled == disabled {
            return;
        }
        self.disabled = disabled;
        self.pressed = false;
        if self.visible {
            self.apply_visibility(engine);
        }
        let color = if disabled {
            self.disabled_text_color
        } else {
            self.text_color
        };
        engine.set_text_color(self.label, color);
    }

    pub fn show(&mut self, engine: &mut Engine, visible: bool) {
        self.visible = visible;
        self.pressed = false;
        if visible {
            self.apply_visibility(engine);
            engine.set_shown(self.label, true);
        } else {
            for id in [self.normal, self.pressed_sprite, self.label] {
                engine.set_shown(id, false);
            }
            if let Some(disabled) = self.disabled_sprite {
                engine.set_shown(disabled, false);
            }
        }
    }

    fn apply_visibility(&self, engine: &mut Engine) {
        let show_disabled = self.disabled && self.disabled_sprite.is_some();
        engine.set_shown(self.normal, !show_disabled);
        engine.set_shown(self.pressed_sprite, false);
        if let Some(disabled) = self.disabled_sprite {
            engine.set_shown(disabled, show_disabled);
        }
    }

    /// Root object, for layout and attachment.
    pub fn root(&self) -> ObjectId {
        self.normal
    }

    pub fn set_position(&self, engine: &mut Engine, position: IVec2) {
        engine.transforms_mut().set_position(self.normal, position);
    }

    pub fn set_center_position(&self, engine: &mut Engine, center: IVec2) {
        engine
            .transforms_mut()
            .set_center_position(self.normal, center);
    }

    pub fn size(&self, engine: &Engine) -> IVec2 {
        engine.transforms().size(self.normal)
    }

    pub fn set_text(&self, engine: &mut Engine, text: &str) {
        engine.set_text(self.label, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::engine::EngineConfig;
    use crate::api::scene::{Scene, SceneId};
    use crate::input::queue::InputEvent;

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

    fn button_at_origin(engine: &mut Engine) -> Button {
        Button::new(
            engine,
            ButtonParams {
                position: IVec2::new(100, 100),
                size: IVec2::new(200, 50),
                text: "PLAY".to_string(),
                ..Default::default()
            },
        )
    }

    fn click(engine: &mut Engine, button: &mut Button, x: i32, y: i32) {
        engine.push_event(InputEvent::PointerMove { x, y });
        engine.tick(0.016);
        button.update(engine);
        engine.push_event(InputEvent::PointerDown {
            button: MouseButton::Left,
            x,
            y,
        });
        engine.tick(0.016);
        button.update(engine);
        engine.push_event(InputEvent::PointerUp {
            button: MouseButton::Left,
            x,
            y,
        });
        engine.tick(0.016);
        button.update(engine);
    }

    #[test]
    fn click_fires_released_once() {
        let mut engine = engine();
        let mut button = button_at_origin(&mut engine);
        click(&mut engine, &mut button, 150, 120);
        assert!(button.released());

        engine.tick(0.016);
        button.update(&mut engine);
        assert!(!button.released());
    }

    #[test]
    fn release_off_button_is_not_a_click() {
        let mut engine = engine();
        let mut button = button_at_origin(&mut engine);

        engine.push_event(InputEvent::PointerDown {
            button: MouseButton::Left,
            x: 150,
            y: 120,
        });
        engine.tick(0.016);
        button.update(&mut engine);
        assert!(button.down());

        // Drag off, then release.
        engine.push_event(InputEvent::PointerMove { x: 500, y: 500 });
        engine.push_event(InputEvent::PointerUp {
            button: MouseButton::Left,
            x: 500,
            y: 500,
        });
        engine.tick(0.016);
        button.update(&mut engine);
        assert!(!button.released());
        assert!(!button.down());
    }

    #[test]
    fn disabled_button_ignores_clicks() {
        let mut engine = engine();
        let mut button = button_at_origin(&mut engine);
        button.set_disabled(&mut engine, true);
        click(&mut engine, &mut button, 150, 120);
        assert!(!button.released());
    }

    #[test]
    fn clicks_outside_do_nothing() {
        let mut engine = engine();
        let mut button = button_at_origin(&mut engine);
        click(&mut engine, &mut button, 10, 10);
        assert!(!button.released());
    }
}
