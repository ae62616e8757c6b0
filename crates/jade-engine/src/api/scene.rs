use crate::api::engine::Engine;
use crate::core::object::ObjectId;

/// Unique identifier of a registered scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(pub u32);

// Built-in scene ids. Games number theirs from FIRST_GAME_SCENE.
pub const POWERED_BY_SCENE: SceneId = SceneId(0);
pub const MAIN_MENU_SCENE: SceneId = SceneId(1);
pub const OPTIONS_MENU_SCENE: SceneId = SceneId(2);
pub const FIRST_GAME_SCENE: SceneId = SceneId(100);

/// The contract every scene fulfills.
///
/// Scenes own their widgets and drive them from `update`; the engine owns
/// the objects the widgets are made of.
pub trait Scene {
    /// One-time setup, called the first time the scene becomes current.
    fn start(&mut self, engine: &mut Engine);

    /// Per-frame logic while the scene is current.
    fn update(&mut self, engine: &mut Engine);

    /// Hover change notification: `old` lost the cursor, `new` has it.
    fn sprite_hovered(
        &mut self,
        _engine: &mut Engine,
        _old: Option<ObjectId>,
        _new: Option<ObjectId>,
    ) {
    }
}
