use glam::IVec2;

use crate::api::engine::Engine;
use crate::api::params::SpriteParams;
use crate::core::object::{ObjectId, ObjectLayer};
use crate::core::transform::Anchor;

/// Left cap, stretchable middle, right cap.
pub type BarTextures = [String; 3];

#[derive(Debug, Clone)]
pub struct ProgressBarParams {
    pub position: IVec2,
    /// Total bar length in pixels.
    pub length: i32,
    pub z: i32,
    pub layer: ObjectLayer,
    pub back_textures: BarTextures,
    /// Fill texture sets by threshold: the entry with the highest
    /// threshold not above the current fraction is used. Must contain
    /// an entry at 0.0.
    pub front_textures: Vec<(f32, BarTextures)>,
    pub max_value: f32,
    pub value: f32,
    /// Seconds the displayed fill takes to sweep the whole bar.
    pub full_bar_duration: f32,
}

impl Default for ProgressBarParams {
    fn default() -> Self {
        Self {
            position: IVec2::ZERO,
            length: 200,
            z: 0,
            layer: ObjectLayer::Ui,
            back_textures: [
                "bar_back_left".to_string(),
                "bar_back_mid".to_string(),
                "bar_back_right".to_string(),
            ],
            front_textures: vec![(
                0.0,
                [
                    "bar_front_left".to_string(),
                    "bar_front_mid".to_string(),
                    "bar_front_right".to_string(),
                ],
            )],
            max_value: 1.0,
            value: 0.0,
            full_bar_duration: 0.5,
        }
    }
}

/// Capped horizontal bar whose fill eases toward the target value instead
/// of jumping, optionally changing texture as it crosses thresholds.
pub struct ProgressBar {
    back_mid: ObjectId,
    front: [ObjectId; 3],
    front_textures: Vec<(f32, BarTextures)>,
    front_set: usize,
    value: f32,
    displayed: f32,
    max_value: f32,
    /// Displayed-value change per second.
    rate: f32,
    cap_width: i32,
    inner_length: i32,
}

impl ProgressBar {
    pub fn new(engine: &mut Engine, params: ProgressBarParams) -> Self {
        let cap = engine.textures().natural_size(&params.back_textures[0]);
        let cap_width = cap.x;
        let inner_length = (params.length - 2 * cap_width).max(1);

        let back_mid = engine.create_sprite(SpriteParams {
            texture: params.back_textures[1].clone(),
            position: params.position + IVec2::new(cap_width, 0),
            size: Some(IVec2::new(inner_length, cap.y)),
            z: params.z,
            layer: params.layer,
            ..Default::default()
        });
        for (texture, parent_anchor, child_anchor) in [
            (&params.back_textures[0], Anchor::LeftCenter, Anchor::RightCenter),
            (&params.back_textures[2], Anchor::RightCenter, Anchor::LeftCenter),
        ] {
            let end = engine.create_sprite(SpriteParams {
                texture: texture.clone(),
                size: Some(cap),
                z: params.z,
                layer: params.layer,
                ..Default::default()
            });
            engine
                .transforms_mut()
                .attach(back_mid, end, IVec2::ZERO, parent_anchor, child_anchor);
        }

        let mut front_textures = params.front_textures;
        front_textures.sort_by(|a, b| a.0.total_cmp(&b.0));
        let set = &front_textures[0].1;
        let front_cap = engine.textures().natural_size(&set[0]);
        let front_mid = engine.create_sprite(SpriteParams {
            texture: set[1].clone(),
            position: params.position + IVec2::new(cap_width, 0),
            size: Some(IVec2::new(1, front_cap.y)),
            z: params.z + 1,
            layer: params.layer,
            ..Default::default()
        });
        let mut front = [front_mid; 3];
        for (i, (texture, parent_anchor, child_anchor)) in [
            (&set[0], Anchor::LeftCenter, Anchor::RightCenter),
            (&set[2], Anchor::RightCenter, Anchor::LeftCenter),
        ]
        .into_iter()
        .enumerate()
        {
            let end = engine.create_sprite(SpriteParams {
                texture: texture.clone(),
                size: Some(front_cap),
                z: params.z + 1,
                layer: params.layer,
                ..Default::default()
            });
            engine
                .transforms_mut()
                .attach(front_mid, end, IVec2::ZERO, parent_anchor, child_anchor);
            front[1 + i] = end;
        }
        front[0] = front_mid;

        let max_value = params.max_value.max(f32::EPSILON);
        let mut bar = Self {
            back_mid,
            front,
            front_textures,
            front_set: 0,
            value: params.value.clamp(0.0, max_value),
            displayed: params.value.clamp(0.0, max_value),
            max_value,
            rate: max_value / params.full_bar_duration.max(f32::EPSILON),
            cap_width,
            inner_length,
        };
        bar.apply_displayed(engine);
        bar
    }

    /// Ease the fill toward the target value.
    pub fn update(&mut self, engine: &mut Engine) {
        if self.displayed == self.value {
            return;
        }
        let step = self.rate * engine.delta_time();
        if (self.value - self.displayed).abs() <= step {
            self.displayed = self.value;
        } else if self.value > self.displayed {
            self.displayed += step;
        } else {
            self.displayed -= step;
        }
        self.apply_displayed(engine);
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(0.0, self.max_value);
    }

    /// Jump the display to the target without easing.
    pub fn snap(&mut self, engine: &mut Engine) {
        self.displayed = self.value;
        self.apply_displayed(engine);
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Displayed fill fraction in [0, 1].
    pub fn t(&self) -> f32 {
        self.displayed / self.max_value
    }

    pub fn root(&self) -> ObjectId {
        self.back_mid
    }

    pub fn show(&self, engine: &mut Engine, visible: bool) {
        engine.set_shown(self.back_mid, visible);
        let fraction = self.t();
        for &id in &self.front {
            engine.set_shown(id, visible && fraction > 0.0);
        }
    }

    fn apply_displayed(&mut self, engine: &mut Engine) {
        let fraction = self.t();
        let width = ((fraction * self.inner_length as f32).round() as i32).max(1);
        let height = engine.transforms().size(self.front[0]).y;
        engine
            .transforms_mut()
            .set_size(self.front[0], IVec2::new(width, height));
        for &id in &self.front {
            engine.set_shown(id, fraction > 0.0);
        }

        let set = self
            .front_textures
            .iter()
            .rposition(|(threshold, _)| *threshold <= fraction)
            .unwrap_or(0);
        if set != self.front_set {
            self.front_set = set;
            let textures = self.front_textures[set].1.clone();
            engine.set_sprite_texture(self.front[0], &textures[1]);
            engine.set_sprite_texture(self.front[1], &textures[0]);
            engine.set_sprite_texture(self.front[2], &textures[2]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::engine::EngineConfig;
    use crate::api::scene::{Scene, SceneId};

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

    #[test]
    fn fill_eases_toward_target() {
        let mut engine = engine();
        let mut bar = ProgressBar::new(
            &mut engine,
            ProgressBarParams {
                max_value: 100.0,
                full_bar_duration: 1.0,
                ..Default::default()
            },
        );
        bar.set_value(100.0);
        assert_eq!(bar.t(), 0.0);

        // Half a second at 100 units/sec covers half the bar.
        engine.tick(0.5);
        bar.update(&mut engine);
        assert!((bar.t() - 0.5).abs() < 0.01, "t {}", bar.t());

        engine.tick(0.5);
        bar.update(&mut engine);
        assert_eq!(bar.t(), 1.0);

        // Settled: further updates hold.
        engine.tick(0.5);
        bar.update(&mut engine);
        assert_eq!(bar.t(), 1.0);
    }

    #[test]
    fn threshold_switches_fill_textures() {
        let mut engine = engine();
        // Register the two mid textures so they resolve to distinct ids
        // instead of both collapsing onto the fallback.
        engine
            .textures_mut()
            .register_blank("red_mid", IVec2::new(8, 16));
        engine
            .textures_mut()
            .register_blank("green_mid", IVec2::new(8, 16));
        let red = engine.textures().resolve("red_mid").0;
        let green = engine.textures().resolve("green_mid").0;
        let mut bar = ProgressBar::new(
            &mut engine,
            ProgressBarParams {
                front_textures: vec![
                    (
                        0.0,
                        [
                            "red_left".to_string(),
                            "red_mid".to_string(),
                            "red_right".to_string(),
                        ],
                    ),
                    (
                        0.5,
                        [
                            "green_left".to_string(),
                            "green_mid".to_string(),
                            "green_right".to_string(),
                        ],
                    ),
                ],
                max_value: 1.0,
                full_bar_duration: 0.001,
                ..Default::default()
            },
        );
        bar.set_value(0.8);
        engine.tick(1.0);
        bar.update(&mut engine);
        let mid = bar.front[0];
        assert_eq!(engine.object(mid).unwrap().sprite().unwrap().texture, green);

        bar.set_value(0.2);
        engine.tick(1.0);
        bar.update(&mut engine);
        assert_eq!(engine.object(mid).unwrap().sprite().unwrap().texture, red);
    }

    #[test]
    fn snap_skips_easing() {
        let mut engine = engine();
        let mut bar = ProgressBar::new(&mut engine, ProgressBarParams::default());
        bar.set_value(1.0);
        bar.snap(&mut engine);
        assert_eq!(bar.t(), 1.0);
    }
}
