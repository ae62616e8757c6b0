use std::collections::HashMap;

use glam::IVec2;

use crate::input::queue::{InputEvent, MouseButton};
use crate::render::camera::UiCamera;

/// Edge-aware key state. `Pressed` lasts exactly one frame, then demotes
/// to `Down` until the key is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    #[default]
    Up,
    Pressed,
    Down,
}

impl KeyState {
    pub fn is_down(self) -> bool {
        !matches!(self, KeyState::Up)
    }

    pub fn is_pressed(self) -> bool {
        matches!(self, KeyState::Pressed)
    }
}

/// A rebindable action: a settings-backed id mapped to a key code.
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub description: String,
    pub key_code: u32,
}

/// Per-frame input snapshot built from the event queue.
///
/// Mouse coordinates are kept in render space (mapped through the UI
/// camera), matching the space objects are laid out in.
pub struct InputState {
    keys: HashMap<u32, KeyState>,
    buttons: HashMap<MouseButton, KeyState>,
    mouse: IVec2,
    last_mouse: IVec2,
    wheel_y: i32,
    first_key_pressed: Option<u32>,
    quit_requested: bool,
    keybindings: HashMap<u32, Keybinding>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
            buttons: HashMap::new(),
            mouse: IVec2::ZERO,
            last_mouse: IVec2::ZERO,
            wheel_y: 0,
            first_key_pressed: None,
            quit_requested: false,
            keybindings: HashMap::new(),
        }
    }

    /// Apply one frame's worth of events. Called at the top of the engine tick.
    pub fn begin_frame(&mut self, events: &[InputEvent], camera: &UiCamera) {
        self.first_key_pressed = None;
        for event in events {
            match *event {
                InputEvent::PointerMove { x, y } => {
                    self.mouse = camera.window_to_render(IVec2::new(x, y));
                }
                InputEvent::PointerDown { button, x, y } => {
                    self.mouse = camera.window_to_render(IVec2::new(x, y));
                    let state = self.buttons.entry(button).or_default();
                    if !state.is_down() {
                        *state = KeyState::Pressed;
                    }
                }
                InputEvent::PointerUp { button, x, y } => {
                    self.mouse = camera.window_to_render(IVec2::new(x, y));
                    self.buttons.insert(button, KeyState::Up);
                }
                InputEvent::Wheel { y } => {
                    self.wheel_y += y;
                }
                InputEvent::KeyDown { key_code } => {
                    let state = self.keys.entry(key_code).or_default();
                    if !state.is_down() {
                        *state = KeyState::Pressed;
                        if self.first_key_pressed.is_none() {
                            self.first_key_pressed = Some(key_code);
                        }
                    }
                }
                InputEvent::KeyUp { key_code } => {
                    self.keys.insert(key_code, KeyState::Up);
                }
                InputEvent::Quit => {
                    self.quit_requested = true;
                }
            }
        }
    }

    /// Demote one-frame edges and clear the wheel. The engine calls this at
    /// the start of the next tick, just before new events apply.
    pub fn after_frame(&mut self) {
        for state in self.keys.values_mut().chain(self.buttons.values_mut()) {
            if *state == KeyState::Pressed {
                *state = KeyState::Down;
            }
        }
        self.wheel_y = 0;
        self.last_mouse = self.mouse;
    }

    pub fn key(&self, key_code: u32) -> KeyState {
        self.keys.get(&key_code).copied().unwrap_or_default()
    }

    pub fn key_down(&self, key_code: u32) -> bool {
        self.key(key_code).is_down()
    }

    pub fn key_pressed(&self, key_code: u32) -> bool {
        self.key(key_code).is_pressed()
    }

    pub fn button(&self, button: MouseButton) -> KeyState {
        self.buttons.get(&button).copied().unwrap_or_default()
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.button(button).is_down()
    }

    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.button(button).is_pressed()
    }

    /// Mouse position in render coordinates.
    pub fn mouse_position(&self) -> IVec2 {
        self.mouse
    }

    pub fn mouse_moved(&self) -> bool {
        self.mouse != self.last_mouse
    }

    /// Wheel motion accumulated this frame.
    pub fn wheel_y(&self) -> i32 {
        self.wheel_y
    }

    /// The first key that went down this frame, for key-capture flows.
    pub fn first_key_pressed(&self) -> Option<u32> {
        self.first_key_pressed
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    // -- Keybindings --

    pub fn register_keybinding(&mut self, id: u32, description: &str, key_code: u32) {
        self.keybindings.insert(
            id,
            Keybinding {
                description: description.to_string(),
                key_code,
            },
        );
    }

    pub fn set_keybinding(&mut self, id: u32, key_code: u32) {
        if let Some(binding) = self.keybindings.get_mut(&id) {
            binding.key_code = key_code;
        } else {
            log::warn!("set_keybinding: unknown binding id {}", id);
        }
    }

    pub fn keybinding(&self, id: u32) -> Option<&Keybinding> {
        self.keybindings.get(&id)
    }

    pub fn keybindings(&self) -> impl Iterator<Item = (u32, &Keybinding)> {
        self.keybindings.iter().map(|(&id, b)| (id, b))
    }

    pub fn keybind_down(&self, id: u32) -> bool {
        self.keybindings
            .get(&id)
            .map(|b| self.key_down(b.key_code))
            .unwrap_or(false)
    }

    pub fn keybind_pressed(&self, id: u32) -> bool {
        self.keybindings
            .get(&id)
            .map(|b| self.key_pressed(b.key_code))
            .unwrap_or(false)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keys::KEY_SPACE;

    fn camera() -> UiCamera {
        // Window matches the render resolution: mapping is identity.
        let mut cam = UiCamera::new(IVec2::new(800, 600));
        cam.set_window(IVec2::new(800, 600), IVec2::new(800, 600), IVec2::ZERO);
        cam
    }

    #[test]
    fn pressed_lasts_one_frame() {
        let mut input = InputState::new();
        let cam = camera();
        input.begin_frame(&[InputEvent::KeyDown { key_code: KEY_SPACE }], &cam);
        assert!(input.key_pressed(KEY_SPACE));
        assert!(input.key_down(KEY_SPACE));
        input.after_frame();

        input.begin_frame(&[], &cam);
        assert!(!input.key_pressed(KEY_SPACE));
        assert!(input.key_down(KEY_SPACE));
        input.after_frame();

        input.begin_frame(&[InputEvent::KeyUp { key_code: KEY_SPACE }], &cam);
        assert!(!input.key_down(KEY_SPACE));
    }

    #[test]
    fn repeated_key_down_does_not_retrigger_pressed() {
        let mut input = InputState::new();
        let cam = camera();
        input.begin_frame(&[InputEvent::KeyDown { key_code: KEY_SPACE }], &cam);
        input.after_frame();
        // OS key repeat sends KeyDown again while the key is held.
        input.begin_frame(&[InputEvent::KeyDown { key_code: KEY_SPACE }], &cam);
        assert!(!input.key_pressed(KEY_SPACE));
        assert!(input.key_down(KEY_SPACE));
    }

    #[test]
    fn wheel_resets_after_frame() {
        let mut input = InputState::new();
        let cam = camera();
        input.begin_frame(&[InputEvent::Wheel { y: 2 }, InputEvent::Wheel { y: 1 }], &cam);
        assert_eq!(input.wheel_y(), 3);
        input.after_frame();
        assert_eq!(input.wheel_y(), 0);
    }

    #[test]
    fn first_key_pressed_captures_new_keys_only() {
        let mut input = InputState::new();
        let cam = camera();
        input.begin_frame(&[InputEvent::KeyDown { key_code: 10 }], &cam);
        assert_eq!(input.first_key_pressed(), Some(10));
        input.after_frame();
        input.begin_frame(
            &[
                InputEvent::KeyDown { key_code: 10 },
                InputEvent::KeyDown { key_code: 20 },
            ],
            &cam,
        );
        assert_eq!(input.first_key_pressed(), Some(20));
    }

    #[test]
    fn keybindings_route_to_keys() {
        let mut input = InputState::new();
        let cam = camera();
        input.register_keybinding(100, "Jump", KEY_SPACE);
        input.begin_frame(&[InputEvent::KeyDown { key_code: KEY_SPACE }], &cam);
        assert!(input.keybind_pressed(100));
        input.set_keybinding(100, 42);
        assert!(!input.keybind_down(100));
    }
}
