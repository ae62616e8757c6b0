use glam::IVec2;

use crate::api::engine::Engine;
use crate::api::params::SpriteParams;
use crate::core::object::{ObjectId, ObjectLayer};
use crate::input::queue::MouseButton;

#[derive(Debug, Clone)]
pub struct CheckboxParams {
    pub position: IVec2,
    pub size: Option<IVec2>,
    pub z: i32,
    pub layer: ObjectLayer,
    pub checked_texture: String,
    pub unchecked_texture: String,
    pub checked: bool,
    pub click_sound: Option<String>,
}

impl Default for CheckboxParams {
    fn default() -> Self {
        Self {
            position: IVec2::ZERO,
            size: None,
            z: 0,
            layer: ObjectLayer::Ui,
            checked_texture: "checkbox_checked".to_string(),
            unchecked_texture: "checkbox_empty".to_string(),
            checked: false,
            click_sound: None,
        }
    }
}

/// Two-state toggle: one sprite per state, clicking the hovered one flips.
pub struct Checkbox {
    checked_sprite: ObjectId,
    unchecked_sprite: ObjectId,
    checked: bool,
    changed: bool,
    click_sound: Option<String>,
}

impl Checkbox {
    pub fn new(engine: &mut Engine, params: CheckboxParams) -> Self {
        let checked_sprite = engine.create_sprite(SpriteParams {
            texture: params.checked_texture,
            position: params.position,
            size: params.size,
            z: params.z,
            layer: params.layer,
            shown: params.checked,
            ..Default::default()
        });
        let unchecked_sprite = engine.create_sprite(SpriteParams {
            texture: params.unchecked_texture,
            position: params.position,
            size: params.size,
            z: params.z,
            layer: params.layer,
            shown: !params.checked,
            ..Default::default()
        });
        Self {
            checked_sprite,
            unchecked_sprite,
            checked: params.checked,
            changed: false,
            click_sound: params.click_sound,
        }
    }

    pub fn update(&mut self, engine: &mut Engine) {
        self.changed = false;
        if engine.hovered_in(&[self.checked_sprite, self.unchecked_sprite])
            && engine.input().button_pressed(MouseButton::Left)
        {
            self.set_checked(engine, !self.checked);
            self.changed = true;
            if let Some(sound) = self.click_sound.clone() {
                engine.audio_mut().play_sound(&sound);
            }
        }
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Toggled this frame.
    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn set_checked(&mut self, engine: &mut Engine, checked: bool) {
        self.checked = checked;
        engine.set_shown(self.checked_sprite, checked);
        engine.set_shown(self.unchecked_sprite, !checked);
    }

    pub fn root(&self) -> ObjectId {
        self.unchecked_sprite
    }

    pub fn set_position(&self, engine: &mut Engine, position: IVec2) {
        engine
            .transforms_mut()
            .set_position(self.checked_sprite, position);
        engine
            .transforms_mut()
            .set_position(self.unchecked_sprite, position);
    }

    pub fn show(&self, engine: &mut Engine, visible: bool) {
        engine.set_shown(self.checked_sprite, visible && self.checked);
        engine.set_shown(self.unchecked_sprite, visible && !self.checked);
    }
}
