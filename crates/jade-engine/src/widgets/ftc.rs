use glam::IVec2;

use crate::api::engine::Engine;
use crate::api::params::TextParams;
use crate::assets::fonts::DEFAULT_FONT;
use crate::core::color::Color;
use crate::core::object::{ObjectId, ObjectLayer};

#[derive(Debug, Clone)]
pub struct FtcParams {
    pub position: IVec2,
    pub z: i32,
    pub layer: ObjectLayer,
    pub font: String,
    pub font_size: u32,
    /// Layout string; each `#` marks a value slot.
    pub format: String,
    pub static_color: Color,
    /// Per-slot colors; slots beyond the list use `static_color`.
    pub value_colors: Vec<Color>,
    pub shown: bool,
}

impl Default for FtcParams {
    fn default() -> Self {
        Self {
            position: IVec2::ZERO,
            z: 0,
            layer: ObjectLayer::Ui,
            font: DEFAULT_FONT.to_string(),
            font_size: 20,
            format: String::new(),
            static_color: Color::WHITE,
            value_colors: Vec::new(),
            shown: true,
        }
    }
}

enum Run {
    Static(ObjectId),
    /// Slot index into the value list.
    Value(usize, ObjectId),
}

/// Formatted text: a line built from static runs and updatable value
/// slots, each its own text object so slots can restyle and resize
/// without rebuilding the line. `"Score: # / #"` has two slots.
pub struct Ftc {
    runs: Vec<Run>,
    values: Vec<ObjectId>,
    position: IVec2,
    font: String,
    font_size: u32,
}

impl Ftc {
    pub fn new(engine: &mut Engine, params: FtcParams) -> Self {
        let mut runs = Vec::new();
        let mut values = Vec::new();
        for (i, piece) in params.format.split('#').enumerate() {
            if i > 0 {
                let slot = values.len();
                let color = params
                    .value_colors
                    .get(slot)
                    .copied()
                    .unwrap_or(params.static_color);
                let id = engine.create_text(TextParams {
                    font: params.font.clone(),
                    font_size: params.font_size,
                    color,
                    z: params.z,
                    layer: params.layer,
                    shown: params.shown,
                    ..Default::default()
                });
                values.push(id);
                runs.push(Run::Value(slot, id));
            }
            if !piece.is_empty() {
                let id = engine.create_text(TextParams {
                    font: params.font.clone(),
                    font_size: params.font_size,
                    text: piece.to_string(),
                    color: params.static_color,
                    z: params.z,
                    layer: params.layer,
                    shown: params.shown,
                    ..Default::default()
                });
                runs.push(Run::Static(id));
            }
        }
        let mut ftc = Self {
            runs,
            values,
            position: params.position,
            font: params.font,
            font_size: params.font_size,
        };
        ftc.relayout(engine);
        ftc
    }

    pub fn set_string_value(&mut self, engine: &mut Engine, slot: usize, value: &str) {
        let Some(&id) = self.values.get(slot) else {
            log::warn!("formatted text has no value slot {}", slot);
            return;
        };
        engine.set_text(id, value);
        self.relayout(engine);
    }

    pub fn set_int_value(&mut self, engine: &mut Engine, slot: usize, value: i64) {
        self.set_string_value(engine, slot, &value.to_string());
    }

    pub fn set_float_value(&mut self, engine: &mut Engine, slot: usize, value: f64, decimals: usize) {
        self.set_string_value(engine, slot, &format!("{:.*}", decimals, value));
    }

    pub fn set_value_color(&self, engine: &mut Engine, slot: usize, color: Color) {
        if let Some(&id) = self.values.get(slot) {
            engine.set_text_color(id, color);
        }
    }

    pub fn set_position(&mut self, engine: &mut Engine, position: IVec2) {
        self.position = position;
        self.relayout(engine);
    }

    pub fn show(&self, engine: &mut Engine, visible: bool) {
        for run in &self.runs {
            let id = match run {
                Run::Static(id) | Run::Value(_, id) => *id,
            };
            engine.set_shown(id, visible);
        }
    }

    pub fn root(&self) -> Option<ObjectId> {
        self.runs.first().map(|run| match run {
            Run::Static(id) | Run::Value(_, id) => *id,
        })
    }

    /// Width of the whole line with current values.
    pub fn width(&self, engine: &Engine) -> i32 {
        self.runs
            .iter()
            .map(|run| {
                let id = match run {
                    Run::Static(id) | Run::Value(_, id) => *id,
                };
                let text = engine.text_content(id).unwrap_or_default();
                engine.fonts().measure(&self.font, self.font_size, &text).x
            })
            .sum()
    }

    /// Place each run after the previous one's measured width.
    fn relayout(&mut self, engine: &mut Engine) {
        let mut x = self.position.x;
        for run in &self.runs {
            let id = match run {
                Run::Static(id) | Run::Value(_, id) => *id,
            };
            engine
                .transforms_mut()
                .set_position(id, IVec2::new(x, self.position.y));
            let text = engine.text_content(id).unwrap_or_default();
            x += engine.fonts().measure(&self.font, self.font_size, &text).x;
        }
    }
}
