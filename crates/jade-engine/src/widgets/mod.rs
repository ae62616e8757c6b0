//! Composite UI widgets built from primitive objects.
//!
//! Widgets are plain structs owning the [`crate::ObjectId`]s of their
//! parts plus interaction state. Scenes construct them from a params
//! struct and call `update(engine)` every frame while they are active.

pub mod button;
pub mod checkbox;
pub mod dropdown;
pub mod ftc;
pub mod group;
pub mod line_box;
pub mod line_grid;
pub mod progress_bar;
pub mod slider;
pub mod text_box;
pub mod tooltip;

pub use button::{Button, ButtonParams};
pub use checkbox::{Checkbox, CheckboxParams};
pub use dropdown::{Dropdown, DropdownParams};
pub use ftc::{Ftc, FtcParams};
pub use group::{layout_group, GroupDirection, GroupLayout, HorizontalAlignment, VerticalAlignment};
pub use line_box::{LineBox, LineBoxParams};
pub use line_grid::{GridAlignment, LineGrid, LineGridParams};
pub use progress_bar::{ProgressBar, ProgressBarParams};
pub use slider::{Slider, SliderParams};
pub use text_box::{TextBox, TextBoxParams};
pub use tooltip::{Tooltip, TooltipParams};
