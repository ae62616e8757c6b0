//! Headless 2D game/UI engine.
//!
//! The engine owns scenes, objects, transforms, input state, audio intent
//! and settings; the host owns the window, the GPU and the speakers. Each
//! frame the host feeds events in with [`Engine::push_event`], calls
//! [`Engine::tick`], then drains the [`DrawList`], audio commands and
//! window commands and carries them out.

pub mod api;
pub mod assets;
pub mod audio;
pub mod core;
pub mod input;
pub mod render;
pub mod scenes;
pub mod settings;
pub mod widgets;

// Re-export key types at crate root for convenience
pub use api::display::{closest_display_mode, collect_display_modes, DisplayMode};
pub use api::engine::{Engine, EngineConfig, WindowCommand};
pub use api::params::{BoxSpriteParams, LineStripParams, SpriteParams, TextParams};
pub use api::scene::{
    Scene, SceneId, FIRST_GAME_SCENE, MAIN_MENU_SCENE, OPTIONS_MENU_SCENE, POWERED_BY_SCENE,
};
pub use assets::fonts::{FontMetrics, FontRegistry, DEFAULT_FONT};
pub use assets::manifest::AssetManifest;
pub use assets::textures::TextureRegistry;
pub use audio::{AudioCommand, AudioMixer};
pub use core::color::Color;
pub use core::object::{GameObject, LoadState, ObjectId, ObjectKind, ObjectLayer};
pub use core::rect::Rect;
pub use core::rng::Rng;
pub use core::transform::{Anchor, TransformGraph};
pub use input::keys;
pub use input::queue::{InputEvent, InputQueue, MouseButton};
pub use input::state::{InputState, KeyState, Keybinding};
pub use render::camera::{UiCamera, WorldCamera};
pub use render::draw::{DrawCommand, DrawList};
pub use settings::{
    BuildVersion, SettingValue, Settings, SettingsError, FIRST_GAME_SETTING, SETTING_FULLSCREEN,
    SETTING_MUSIC_VOLUME, SETTING_RESOLUTION_HEIGHT, SETTING_RESOLUTION_WIDTH,
    SETTING_SOUND_VOLUME,
};
