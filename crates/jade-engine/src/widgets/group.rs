use glam::IVec2;

use crate::api::engine::Engine;
use crate::core::object::ObjectId;
use crate::core::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupDirection {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GroupLayout {
    pub direction: GroupDirection,
    /// Pixels between consecutive items along the flow axis.
    pub spacing: i32,
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

/// Stack objects inside `area` along the layout's direction, aligning the
/// run and each item on the cross axis. Items move with their attached
/// children; sizes are read from their transforms, so lay out after any
/// resize.
pub fn layout_group(engine: &mut Engine, area: Rect, layout: GroupLayout, items: &[ObjectId]) {
    if items.is_empty() {
        return;
    }
    let sizes: Vec<IVec2> = items
        .iter()
        .map(|&id| engine.transforms().size(id))
        .collect();
    let gaps = layout.spacing * (items.len() as i32 - 1);

    match layout.direction {
        GroupDirection::Vertical => {
            let total = sizes.iter().map(|s| s.y).sum::<i32>() + gaps;
            let mut y = match layout.vertical {
                VerticalAlignment::Top => area.y(),
                VerticalAlignment::Center => area.y() + (area.height() - total) / 2,
                VerticalAlignment::Bottom => area.bottom() - total,
            };
            for (&id, size) in items.iter().zip(&sizes) {
                let x = match layout.horizontal {
                    HorizontalAlignment::Left => area.x(),
                    HorizontalAlignment::Center => area.x() + (area.width() - size.x) / 2,
                    HorizontalAlignment::Right => area.right() - size.x,
                };
                engine.transforms_mut().set_position(id, IVec2::new(x, y));
                y += size.y + layout.spacing;
            }
        }
        GroupDirection::Horizontal => {
            let total = sizes.iter().map(|s| s.x).sum::<i32>() + gaps;
            let mut x = match layout.horizontal {
                HorizontalAlignment::Left => area.x(),
                HorizontalAlignment::Center => area.x() + (area.width() - total) / 2,
                HorizontalAlignment::Right => area.right() - total,
            };
            for (&id, size) in items.iter().zip(&sizes) {
                let y = match layout.vertical {
                    VerticalAlignment::Top => area.y(),
                    VerticalAlignment::Center => area.y() + (area.height() - size.y) / 2,
                    VerticalAlignment::Bottom => area.bottom() - size.y,
                };
                engine.transforms_mut().set_position(id, IVec2::new(x, y));
                x += size.x + layout.spacing;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::engine::{Engine, EngineConfig};
    use crate::api::params::SpriteParams;
    use crate::api::scene::{Scene, SceneId};
    use crate::core::object::ObjectLayer;

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

    fn sprite(engine: &mut Engine, size: IVec2) -> ObjectId {
        engine.create_sprite(SpriteParams {
            texture: "item".to_string(),
            size: Some(size),
            layer: ObjectLayer::Ui,
            ..Default::default()
        })
    }

    #[test]
    fn vertical_centered_stack() {
        let mut engine = engine();
        let a = sprite(&mut engine, IVec2::new(200, 70));
        let b = sprite(&mut engine, IVec2::new(200, 50));
        let c = sprite(&mut engine, IVec2::new(200, 50));

        layout_group(
            &mut engine,
            Rect::new(0, 0, 800, 600),
            GroupLayout {
                spacing: 30,
                ..Default::default()
            },
            &[a, b, c],
        );

        // Total: 70 + 50 + 50 + 60 spacing = 230; top at (600 - 230) / 2.
        assert_eq!(engine.transforms().position(a), IVec2::new(300, 185));
        assert_eq!(engine.transforms().position(b), IVec2::new(300, 285));
        assert_eq!(engine.transforms().position(c), IVec2::new(300, 365));
    }

    #[test]
    fn horizontal_right_aligned_row() {
        let mut engine = engine();
        let a = sprite(&mut engine, IVec2::new(40, 40));
        let b = sprite(&mut engine, IVec2::new(60, 40));

        layout_group(
            &mut engine,
            Rect::new(0, 0, 800, 100),
            GroupLayout {
                direction: GroupDirection::Horizontal,
                spacing: 10,
                horizontal: HorizontalAlignment::Right,
                vertical: VerticalAlignment::Bottom,
            },
            &[a, b],
        );

        assert_eq!(engine.transforms().position(a), IVec2::new(690, 60));
        assert_eq!(engine.transforms().position(b), IVec2::new(740, 60));
    }
}
