//! Built-in scenes: the splash, a main menu and an options menu.
//!
//! Games register these under the reserved ids in [`crate::api::scene`]
//! when they want the stock flow, or supply their own scenes instead.

pub mod main_menu;
pub mod options_menu;
pub mod powered_by;

pub use main_menu::{MainMenuScene, MainMenuStyle};
pub use options_menu::{OptionsMenuScene, OptionsMenuStyle};
pub use powered_by::PoweredByScene;
