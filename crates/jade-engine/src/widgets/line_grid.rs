use glam::{IVec2, Vec2};

use crate::api::engine::Engine;
use crate::api::params::LineStripParams;
use crate::core::color::Color;
use crate::core::object::{ObjectId, ObjectLayer};
use crate::core::rect::Rect;

/// Where partial cells go when the area is not an exact multiple of the
/// cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridAlignment {
    /// Lines start at the top-left edge; the remainder sits at the far side.
    #[default]
    Start,
    /// The remainder splits evenly between both sides.
    Center,
    /// Lines end at the bottom-right edge; the remainder sits at the near side.
    End,
}

impl GridAlignment {
    fn offset(self, extent: i32, cell: i32) -> i32 {
        let remainder = extent % cell;
        match self {
            GridAlignment::Start => 0,
            GridAlignment::Center => remainder / 2,
            GridAlignment::End => (remainder - 1).max(0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineGridParams {
    pub rect: Rect,
    pub cell: IVec2,
    pub color: Color,
    pub horizontal_alignment: GridAlignment,
    pub vertical_alignment: GridAlignment,
    pub z: i32,
    pub layer: ObjectLayer,
    pub shown: bool,
}

impl Default for LineGridParams {
    fn default() -> Self {
        Self {
            rect: Rect::new(0, 0, 200, 200),
            cell: IVec2::new(32, 32),
            color: Color::WHITE,
            horizontal_alignment: GridAlignment::Start,
            vertical_alignment: GridAlignment::Start,
            z: 0,
            layer: ObjectLayer::Ui,
            shown: true,
        }
    }
}

/// Uniform grid of lines over a rectangle: one strip per row and column.
pub struct LineGrid {
    strips: Vec<ObjectId>,
}

impl LineGrid {
    pub fn new(engine: &mut Engine, params: LineGridParams) -> Self {
        let cell = params.cell.max(IVec2::ONE);
        let rect = params.rect;
        let x0 = rect.x() + params.horizontal_alignment.offset(rect.width(), cell.x);
        let y0 = rect.y() + params.vertical_alignment.offset(rect.height(), cell.y);

        let mut strips = Vec::new();
        let half_w = rect.width() as f32 / 2.0;
        let half_h = rect.height() as f32 / 2.0;

        let mut x = x0;
        while x <= rect.right() {
            let strip = engine.create_line_strip(LineStripParams {
                points: vec![Vec2::new(0.0, -half_h), Vec2::new(0.0, half_h)],
                color: params.color,
                center: IVec2::new(x, rect.center().y),
                z: params.z,
                layer: params.layer,
                shown: params.shown,
            });
            strips.push(strip);
            x += cell.x;
        }
        let mut y = y0;
        while y <= rect.bottom() {
            let strip = engine.create_line_strip(LineStripParams {
                points: vec![Vec2::new(-half_w, 0.0), Vec2::new(half_w, 0.0)],
                color: params.color,
                center: IVec2::new(rect.center().x, y),
                z: params.z,
                layer: params.layer,
                shown: params.shown,
            });
            strips.push(strip);
            y += cell.y;
        }
        Self { strips }
    }

    pub fn show(&self, engine: &mut Engine, visible: bool) {
        for &strip in &self.strips {
            engine.set_shown(strip, visible);
        }
    }

    pub fn set_color(&self, engine: &mut Engine, color: Color) {
        for &strip in &self.strips {
            engine.set_line_color(strip, color);
        }
    }

    pub fn destroy(&mut self, engine: &mut Engine) {
        for &strip in &self.strips {
            engine.destroy(strip);
        }
        self.strips.clear();
    }

    pub fn line_count(&self) -> usize {
        self.strips.len()
    }
}
