use glam::Vec2;

use crate::assets::textures::{TextureId, TextureRegistry};
use crate::core::color::Color;
use crate::core::object::{LoadState, ObjectKind, ObjectLayer};
use crate::core::rect::Rect;
use crate::core::stage::Stage;
use crate::core::transform::TransformGraph;
use crate::render::camera::WorldCamera;

/// One host-side draw operation, already in screen space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        texture: TextureId,
        /// Source rect inside the texture; `None` means the whole texture.
        src: Option<Rect>,
        dst: Rect,
        /// Rotation around the dst center, degrees clockwise.
        rotation: f32,
        alpha: f32,
        tint: Option<Color>,
    },
    Text {
        font: String,
        font_size: u32,
        text: String,
        color: Color,
        dst: Rect,
    },
    Lines {
        color: Color,
        points: Vec<Vec2>,
    },
}

/// Per-frame list of draw commands in draw order.
pub struct DrawList {
    pub clear_color: Color,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(clear_color: Color) -> Self {
        Self {
            clear_color,
            commands: Vec::with_capacity(256),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Append one stage's shown objects to the draw list, in the stage's z
/// order. World-layer objects are shifted by the world camera.
pub fn append_stage(
    list: &mut DrawList,
    stage: &Stage,
    transforms: &TransformGraph,
    world: &WorldCamera,
    textures: &TextureRegistry,
) {
    for object in stage.iter() {
        if !object.shown || object.load_state != LoadState::Done {
            continue;
        }
        let mut dst = transforms.rect(object.id);
        if object.layer == ObjectLayer::World {
            dst = world.world_rect_to_screen(dst);
        }

        match &object.kind {
            ObjectKind::Sprite(sprite) => {
                let src = sprite.frame.or_else(|| {
                    let tex = textures.get(sprite.texture);
                    // Solid colors have no meaningful source rect.
                    tex.solid
                        .is_none()
                        .then(|| Rect::from_pos_size(glam::IVec2::ZERO, tex.size))
                });
                match sprite.nine_slice {
                    Some(corner) if src.is_some() => {
                        push_nine_slice(
                            list,
                            sprite.texture,
                            src.unwrap(),
                            dst,
                            corner,
                            sprite.alpha,
                            sprite.tint,
                        );
                    }
                    _ => list.commands.push(DrawCommand::Sprite {
                        texture: sprite.texture,
                        src,
                        dst,
                        rotation: sprite.rotation,
                        alpha: sprite.alpha,
                        tint: sprite.tint,
                    }),
                }
            }
            ObjectKind::Text(text) => {
                if text.content.is_empty() {
                    continue;
                }
                list.commands.push(DrawCommand::Text {
                    font: text.font.clone(),
                    font_size: text.font_size,
                    text: text.content.clone(),
                    color: text.color,
                    dst,
                });
            }
            ObjectKind::LineStrip(lines) => {
                if lines.points.len() < 2 {
                    continue;
                }
                let center = dst.center().as_vec2();
                let points = lines.points.iter().map(|p| center + *p).collect();
                list.commands.push(DrawCommand::Lines {
                    color: lines.color,
                    points,
                });
            }
        }
    }
}

/// Expand a nine-slice sprite into up to nine commands: fixed corners,
/// stretched edges and a stretched center.
fn push_nine_slice(
    list: &mut DrawList,
    texture: TextureId,
    src: Rect,
    dst: Rect,
    corner: i32,
    alpha: f32,
    tint: Option<Color>,
) {
    let c = corner
        .min(src.width() / 2)
        .min(src.height() / 2)
        .min(dst.width() / 2)
        .min(dst.height() / 2)
        .max(0);
    if c == 0 {
        list.commands.push(DrawCommand::Sprite {
            texture,
            src: Some(src),
            dst,
            rotation: 0.0,
            alpha,
            tint,
        });
        return;
    }

    // Column/row boundaries in source and destination space.
    let sx = [src.x(), src.x() + c, src.right() - c, src.right()];
    let sy = [src.y(), src.y() + c, src.bottom() - c, src.bottom()];
    let dx = [dst.x(), dst.x() + c, dst.right() - c, dst.right()];
    let dy = [dst.y(), dst.y() + c, dst.bottom() - c, dst.bottom()];

    for row in 0..3 {
        for col in 0..3 {
            let s = Rect::new(
                sx[col],
                sy[row],
                sx[col + 1] - sx[col],
                sy[row + 1] - sy[row],
            );
            let d = Rect::new(
                dx[col],
                dy[row],
                dx[col + 1] - dx[col],
                dy[row + 1] - dy[row],
            );
            if s.width() <= 0 || s.height() <= 0 || d.width() <= 0 || d.height() <= 0 {
                continue;
            }
            list.commands.push(DrawCommand::Sprite {
                texture,
                src: Some(s),
                dst: d,
                rotation: 0.0,
                alpha,
                tint,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::object::{GameObject, LineData, ObjectId, SpriteData, TextData};
    use glam::IVec2;

    fn setup() -> (Stage, TransformGraph, WorldCamera, TextureRegistry) {
        (
            Stage::new(),
            TransformGraph::new(),
            WorldCamera::new(),
            TextureRegistry::new(),
        )
    }

    fn done_sprite(id: u32, texture: TextureId) -> GameObject {
        let mut obj = GameObject::new(ObjectId(id), ObjectKind::Sprite(SpriteData::new(texture)));
        obj.load_state = LoadState::Done;
        obj
    }

    #[test]
    fn hidden_and_loading_objects_are_skipped() {
        let (mut stage, mut transforms, world, mut textures) = setup();
        let tex = textures.register_blank("a", IVec2::new(10, 10));

        transforms.register(ObjectId(1), IVec2::ZERO, IVec2::new(10, 10));
        stage.spawn(done_sprite(1, tex).with_shown(false));
        transforms.register(ObjectId(2), IVec2::ZERO, IVec2::new(10, 10));
        // Still Wanted.
        stage.spawn(GameObject::new(
            ObjectId(2),
            ObjectKind::Sprite(SpriteData::new(tex)),
        ));

        let mut list = DrawList::new(Color::BLACK);
        append_stage(&mut list, &stage, &transforms, &world, &textures);
        assert!(list.is_empty());
    }

    #[test]
    fn world_layer_is_camera_shifted() {
        let (mut stage, mut transforms, mut world, mut textures) = setup();
        let tex = textures.register_blank("a", IVec2::new(10, 10));
        world.set_offset(IVec2::new(100, 50));

        transforms.register(ObjectId(1), IVec2::new(120, 60), IVec2::new(10, 10));
        let mut obj = done_sprite(1, tex);
        obj.layer = ObjectLayer::World;
        stage.spawn(obj);

        let mut list = DrawList::new(Color::BLACK);
        append_stage(&mut list, &stage, &transforms, &world, &textures);
        match &list.commands[0] {
            DrawCommand::Sprite { dst, .. } => {
                assert_eq!(dst.position, IVec2::new(20, 10));
            }
            other => panic!("expected sprite, got {:?}", other),
        }
    }

    #[test]
    fn nine_slice_expands_to_nine_commands() {
        let (mut stage, mut transforms, world, mut textures) = setup();
        let tex = textures.register_blank("box", IVec2::new(30, 30));

        transforms.register(ObjectId(1), IVec2::ZERO, IVec2::new(100, 60));
        let mut obj = done_sprite(1, tex);
        obj.sprite_mut().unwrap().nine_slice = Some(8);
        stage.spawn(obj);

        let mut list = DrawList::new(Color::BLACK);
        append_stage(&mut list, &stage, &transforms, &world, &textures);
        assert_eq!(list.len(), 9);

        // Destination tiles cover the dst rect exactly.
        let total: i32 = list
            .commands
            .iter()
            .map(|c| match c {
                DrawCommand::Sprite { dst, .. } => dst.width() * dst.height(),
                _ => 0,
            })
            .sum();
        assert_eq!(total, 100 * 60);
    }

    #[test]
    fn line_strip_offsets_points_by_center() {
        let (mut stage, mut transforms, world, textures) = setup();
        transforms.register(ObjectId(1), IVec2::new(10, 10), IVec2::new(20, 20));
        let mut obj = GameObject::new(
            ObjectId(1),
            ObjectKind::LineStrip(LineData {
                points: vec![Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0)],
                color: Color::WHITE,
            }),
        );
        obj.load_state = LoadState::Done;
        stage.spawn(obj);

        let mut list = DrawList::new(Color::BLACK);
        append_stage(&mut list, &stage, &transforms, &world, &textures);
        match &list.commands[0] {
            DrawCommand::Lines { points, .. } => {
                assert_eq!(points[0], Vec2::new(15.0, 20.0));
                assert_eq!(points[1], Vec2::new(25.0, 20.0));
            }
            other => panic!("expected lines, got {:?}", other),
        }
    }

    #[test]
    fn empty_text_emits_nothing() {
        let (mut stage, mut transforms, world, textures) = setup();
        transforms.register(ObjectId(1), IVec2::ZERO, IVec2::ZERO);
        let mut obj = GameObject::new(
            ObjectId(1),
            ObjectKind::Text(TextData {
                font: "default".to_string(),
                font_size: 20,
                content: String::new(),
                color: Color::WHITE,
                measured: IVec2::ZERO,
            }),
        );
        obj.load_state = LoadState::Done;
        stage.spawn(obj);

        let mut list = DrawList::new(Color::BLACK);
        append_stage(&mut list, &stage, &transforms, &world, &textures);
        assert!(list.is_empty());
    }
}
