use glam::IVec2;

use crate::api::engine::Engine;
use crate::api::params::{SpriteParams, TextParams};
use crate::assets::fonts::DEFAULT_FONT;
use crate::core::color::Color;
use crate::core::object::{ObjectId, ObjectLayer};
use crate::core::transform::Anchor;
use crate::input::queue::MouseButton;

#[derive(Debug, Clone)]
pub struct SliderParams {
    /// Top-left of the track area.
    pub position: IVec2,
    /// Track length in pixels.
    pub length: i32,
    pub z: i32,
    pub layer: ObjectLayer,
    pub axis_texture: String,
    pub end_texture: String,
    pub pointer_texture: String,
    pub pointer_size: Option<IVec2>,
    /// Optional captions under the track ends.
    pub min_title: Option<String>,
    pub max_title: Option<String>,
    pub font: String,
    pub font_size: u32,
    pub text_color: Color,
    /// Initial value in [0, 1].
    pub value: f32,
}

impl Default for SliderParams {
    fn default() -> Self {
        Self {
            position: IVec2::ZERO,
            length: 200,
            z: 0,
            layer: ObjectLayer::Ui,
            axis_texture: "slider_axis".to_string(),
            end_texture: "slider_end".to_string(),
            pointer_texture: "slider_pointer".to_string(),
            pointer_size: None,
            min_title: None,
            max_title: None,
            font: DEFAULT_FONT.to_string(),
            font_size: 16,
            text_color: Color::LIGHT_GREY,
            value: 0.0,
        }
    }
}

/// Horizontal slider: an axis with end caps and a draggable pointer.
/// The value is the pointer's position along the track, in [0, 1].
pub struct Slider {
    axis: ObjectId,
    pointer: ObjectId,
    value: f32,
    sliding: bool,
    grab_offset: i32,
    changed: bool,
    released: bool,
    track_x: i32,
    track_w: i32,
}

impl Slider {
    pub fn new(engine: &mut Engine, params: SliderParams) -> Self {
        let axis_height = engine.textures().natural_size(&params.axis_texture).y;
        let axis = engine.create_sprite(SpriteParams {
            texture: params.axis_texture,
            position: params.position,
            size: Some(IVec2::new(params.length, axis_height)),
            z: params.z,
            layer: params.layer,
            ..Default::default()
        });

        let end_size = engine.textures().natural_size(&params.end_texture);
        for anchor in [Anchor::LeftCenter, Anchor::RightCenter] {
            let end = engine.create_sprite(SpriteParams {
                texture: params.end_texture.clone(),
                size: Some(end_size),
                z: params.z + 1,
                layer: params.layer,
                ..Default::default()
            });
            engine
                .transforms_mut()
                .attach(axis, end, IVec2::ZERO, anchor, Anchor::Center);
        }

        let pointer_size = params
            .pointer_size
            .unwrap_or_else(|| engine.textures().natural_size(&params.pointer_texture));
        let pointer = engine.create_sprite(SpriteParams {
            texture: params.pointer_texture,
            size: Some(pointer_size),
            z: params.z + 2,
            layer: params.layer,
            ..Default::default()
        });

        for (title, anchor) in [
            (params.min_title, Anchor::BottomLeft),
            (params.max_title, Anchor::BottomRight),
        ] {
            let Some(text) = title else { continue };
            let label = engine.create_text(TextParams {
                font: params.font.clone(),
                font_size: params.font_size,
                text,
                color: params.text_color,
                z: params.z + 1,
                layer: params.layer,
                ..Default::default()
            });
            engine
                .transforms_mut()
                .attach(axis, label, IVec2::new(0, 4), anchor, Anchor::TopCenter);
        }

        let track_x = params.position.x;
        let track_w = (params.length - pointer_size.x).max(1);
        let slider = Self {
            axis,
            pointer,
            value: params.value.clamp(0.0, 1.0),
            sliding: false,
            grab_offset: 0,
            changed: false,
            released: false,
            track_x,
            track_w,
        };
        slider.place_pointer(engine);
        slider
    }

    pub fn update(&mut self, engine: &mut Engine) {
        self.changed = false;
        self.released = false;

        if !self.sliding
            && engine.is_hovered(self.pointer)
            && engine.input().button_pressed(MouseButton::Left)
        {
            self.sliding = true;
            self.grab_offset =
                engine.input().mouse_position().x - engine.transforms().position(self.pointer).x;
        }

        if self.sliding {
            if engine.input().button_down(MouseButton::Left) {
                let x = (engine.input().mouse_position().x - self.grab_offset)
                    .clamp(self.track_x, self.track_x + self.track_w);
                let value = (x - self.track_x) as f32 / self.track_w as f32;
                if (value - self.value).abs() > f32::EPSILON {
                    self.value = value;
                    self.place_pointer(engine);
                    self.changed = true;
                }
            } else {
                self.sliding = false;
                self.released = true;
            }
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, engine: &mut Engine, value: f32) {
        self.value = value.clamp(0.0, 1.0);
        self.place_pointer(engine);
    }

    /// Value moved this frame (while dragging).
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Drag ended this frame.
    pub fn released(&self) -> bool {
        self.released
    }

    pub fn root(&self) -> ObjectId {
        self.axis
    }

    fn place_pointer(&self, engine: &mut Engine) {
        let x = self.track_x + (self.value * self.track_w as f32).round() as i32;
        let axis_center_y = engine.transforms().center_position(self.axis).y;
        let pointer_size = engine.transforms().size(self.pointer);
        engine
            .transforms_mut()
            .set_position(self.pointer, IVec2::new(x, axis_center_y - pointer_size.y / 2));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::engine::EngineConfig;
    use crate::api::scene::{Scene, SceneId};
    use crate::input::queue::InputEvent;

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

    fn slider(engine: &mut Engine) -> Slider {
        Slider::new(
            engine,
            SliderParams {
                position: IVec2::new(100, 100),
                length: 220,
                pointer_size: Some(IVec2::new(20, 20)),
                value: 0.0,
                ..Default::default()
            },
        )
    }

    #[test]
    fn drag_moves_value() {
        let mut engine = engine();
        let mut slider = slider(&mut engine);
        // Pointer sits at track start: rect (100, ~), 20x20.
        engine.push_event(InputEvent::PointerDown {
            button: MouseButton::Left,
            x: 105,
            y: 145,
        });
        engine.tick(0.016);
        slider.update(&mut engine);

        // Drag halfway: track is 200 wide, grab offset 5.
        engine.push_event(InputEvent::PointerMove { x: 205, y: 145 });
        engine.tick(0.016);
        slider.update(&mut engine);
        assert!(slider.changed());
        assert!((slider.value() - 0.5).abs() < 0.01, "value {}", slider.value());

        engine.push_event(InputEvent::PointerUp {
            button: MouseButton::Left,
            x: 205,
            y: 145,
        });
        engine.tick(0.016);
        slider.update(&mut engine);
        assert!(slider.released());
        assert!(!slider.changed());
    }

    #[test]
    fn drag_clamps_to_track() {
        let mut engine = engine();
        let mut slider = slider(&mut engine);
        engine.push_event(InputEvent::PointerDown {
            button: MouseButton::Left,
            x: 105,
            y: 145,
        });
        engine.tick(0.016);
        slider.update(&mut engine);

        engine.push_event(InputEvent::PointerMove { x: 700, y: 145 });
        engine.tick(0.016);
        slider.update(&mut engine);
        assert_eq!(slider.value(), 1.0);
    }

    #[test]
    fn set_value_moves_pointer() {
        let mut engine = engine();
        let mut slider = slider(&mut engine);
        slider.set_value(&mut engine, 0.5);
        assert_eq!(
            engine.transforms().position(slider.pointer).x,
            100 + 100
        );
    }
}
