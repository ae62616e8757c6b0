use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::{IVec2, Vec2};

use crate::api::display::{closest_display_mode, collect_display_modes, DisplayMode};
use crate::api::params::{BoxSpriteParams, LineStripParams, SpriteParams, TextParams};
use crate::api::scene::{Scene, SceneId};
use crate::assets::fonts::{FontMetrics, FontRegistry};
use crate::assets::manifest::{AssetManifest, CursorEntry};
use crate::assets::textures::TextureRegistry;
use crate::assets::AssetError;
use crate::audio::AudioMixer;
use crate::core::color::Color;
use crate::core::object::{
    GameObject, LineData, LoadState, ObjectId, ObjectKind, ObjectLayer, SpriteData, TextData,
};
use crate::core::rect::Rect;
use crate::core::rng::Rng;
use crate::core::stage::Stage;
use crate::core::time::Clock;
use crate::core::transform::TransformGraph;
use crate::input::queue::{InputEvent, InputQueue};
use crate::input::state::InputState;
use crate::render::camera::{UiCamera, WorldCamera};
use crate::render::draw::{append_stage, DrawList};
use crate::settings::{
    BuildVersion, SettingValue, Settings, SETTING_FULLSCREEN, SETTING_MUSIC_VOLUME,
    SETTING_RESOLUTION_HEIGHT, SETTING_RESOLUTION_WIDTH, SETTING_SOUND_VOLUME,
};

/// Commands for the host window, drained once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowCommand {
    SetFullscreen(bool),
    SetWindowSize(IVec2),
    SetCursor(String),
}

/// Engine configuration, provided by the game at startup.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub app_name: String,
    pub author: String,
    pub copyright: String,
    pub version: BuildVersion,
    /// Fixed layout resolution; windows letterbox around it.
    pub render_resolution: IVec2,
    pub clear_color: Color,
    /// Desktop resolution reported by the host.
    pub window_size: IVec2,
    /// Window sizes supported by every attached display.
    pub display_modes: Vec<IVec2>,
    pub show_fps: bool,
    pub rng_seed: u64,
    /// Settings file location; `None` disables persistence.
    pub settings_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "jade-game".to_string(),
            author: String::new(),
            copyright: String::new(),
            version: BuildVersion(0, 1, 0),
            render_resolution: IVec2::new(1280, 720),
            clear_color: Color::BLACK,
            window_size: IVec2::new(1280, 720),
            display_modes: Vec::new(),
            show_fps: false,
            rng_seed: 42,
            settings_path: None,
        }
    }
}

struct SceneSlot {
    scene: Box<dyn Scene>,
    started: bool,
}

/// The engine orchestrator.
///
/// Owns every subsystem and runs the frame in a fixed order: pending
/// window changes, clock, input, destruction, scene start, loads, hover
/// picking, scene update, transform promotion and draw-list building.
/// The host calls [`Engine::push_event`] for each OS event, then
/// [`Engine::tick`], then drains the draw list and command batches.
pub struct Engine {
    config: EngineConfig,
    scenes: HashMap<SceneId, SceneSlot>,
    stages: HashMap<SceneId, Stage>,
    persistent: Stage,
    current: SceneId,
    transforms: TransformGraph,
    next_id: u32,
    input_queue: InputQueue,
    input: InputState,
    clock: Clock,
    ui_camera: UiCamera,
    world_camera: WorldCamera,
    textures: TextureRegistry,
    fonts: FontRegistry,
    audio: AudioMixer,
    settings: Settings,
    rng: Rng,
    cursors: Vec<CursorEntry>,
    hovered: Option<ObjectId>,
    display_modes: Vec<DisplayMode>,
    current_display_mode: usize,
    fullscreen: bool,
    pending_fullscreen: Option<bool>,
    window_commands: Vec<WindowCommand>,
    draw_list: DrawList,
    quit: bool,
    fps_text: Option<ObjectId>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let mut settings = Settings::new(config.version);
        settings.register(SETTING_MUSIC_VOLUME, "Music volume", SettingValue::Float(1.0));
        settings.register(SETTING_SOUND_VOLUME, "Sound volume", SettingValue::Float(1.0));
        settings.register(SETTING_FULLSCREEN, "Fullscreen", SettingValue::Bool(false));
        settings.register(
            SETTING_RESOLUTION_WIDTH,
            "Window width",
            SettingValue::Int(config.window_size.x),
        );
        settings.register(
            SETTING_RESOLUTION_HEIGHT,
            "Window height",
            SettingValue::Int(config.window_size.y),
        );
        if let Some(path) = &config.settings_path {
            settings.set_path(path.clone());
            match settings.load() {
                Ok(applied) => {
                    if !applied {
                        // First run or stale build: persist the defaults.
                        if let Err(e) = settings.save(&config.app_name) {
                            log::warn!("could not write default settings: {}", e);
                        }
                    }
                }
                Err(e) => log::warn!("could not read settings: {}", e),
            }
        }

        let display_modes = collect_display_modes(&config.display_modes, config.window_size);
        let current_display_mode = closest_display_mode(&display_modes, config.window_size);

        let mut ui_camera = UiCamera::new(config.render_resolution);
        ui_camera.fit_window(display_modes[current_display_mode].size);

        let mut audio = AudioMixer::new();
        audio.set_music_volume(settings.get_float(SETTING_MUSIC_VOLUME));
        audio.set_sound_volume(settings.get_float(SETTING_SOUND_VOLUME));

        let clear_color = config.clear_color;
        let rng_seed = config.rng_seed;
        let show_fps = config.show_fps;

        let mut engine = Self {
            config,
            scenes: HashMap::new(),
            stages: HashMap::new(),
            persistent: Stage::new(),
            current: SceneId(u32::MAX),
            transforms: TransformGraph::new(),
            next_id: 1,
            input_queue: InputQueue::new(),
            input: InputState::new(),
            clock: Clock::new(),
            ui_camera,
            world_camera: WorldCamera::new(),
            textures: TextureRegistry::new(),
            fonts: FontRegistry::new(),
            audio,
            settings,
            rng: Rng::new(rng_seed),
            cursors: Vec::new(),
            hovered: None,
            display_modes,
            current_display_mode,
            fullscreen: false,
            pending_fullscreen: None,
            window_commands: Vec::new(),
            draw_list: DrawList::new(clear_color),
            quit: false,
            fps_text: None,
        };

        if show_fps {
            let id = engine.create_text(TextParams {
                text: "FPS: 0".to_string(),
                color: Color::JADE,
                position: IVec2::new(4, 4),
                z: i32::MAX,
                layer: ObjectLayer::PersistentUi,
                ..Default::default()
            });
            engine.fps_text = Some(id);
        }
        engine
    }

    // -- Scene management --

    pub fn add_scene(&mut self, id: SceneId, scene: impl Scene + 'static) {
        if self.scenes.contains_key(&id) {
            log::warn!("scene {:?} registered twice, replacing", id);
        }
        self.scenes.insert(
            id,
            SceneSlot {
                scene: Box::new(scene),
                started: false,
            },
        );
        self.stages.entry(id).or_default();
        if self.current == SceneId(u32::MAX) {
            self.current = id;
        }
    }

    /// Switch to another registered scene. Its `start` runs on the next
    /// tick if it has not run yet.
    pub fn play_scene(&mut self, id: SceneId) {
        if !self.scenes.contains_key(&id) && self.current != id {
            log::error!("play_scene: scene {:?} is not registered", id);
            return;
        }
        log::info!("switching to scene {:?}", id);
        self.current = id;
        self.hovered = None;
    }

    pub fn current_scene(&self) -> SceneId {
        self.current
    }

    /// Request loop exit.
    pub fn end(&mut self) {
        self.quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Write settings out. Call once when the loop exits.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.settings.save(&self.config.app_name) {
            log::warn!("could not save settings: {}", e);
        }
    }

    // -- Host integration --

    pub fn push_event(&mut self, event: InputEvent) {
        self.input_queue.push(event);
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn drain_audio(&mut self) -> Vec<crate::audio::AudioCommand> {
        self.audio.drain()
    }

    pub fn drain_window_commands(&mut self) -> Vec<WindowCommand> {
        std::mem::take(&mut self.window_commands)
    }

    // -- Window state --

    /// Toggle fullscreen. Applied at the start of the next frame so the
    /// current frame finishes against stable window geometry.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.pending_fullscreen = Some(fullscreen);
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn display_modes(&self) -> &[DisplayMode] {
        &self.display_modes
    }

    pub fn current_display_mode(&self) -> usize {
        self.current_display_mode
    }

    /// Select a display mode by index into [`Engine::display_modes`].
    pub fn set_display_mode(&mut self, index: usize) {
        let Some(mode) = self.display_modes.get(index).copied() else {
            log::error!("set_display_mode: index {} out of range", index);
            return;
        };
        self.current_display_mode = index;
        self.ui_camera.fit_window(mode.size);
        self.settings.set_int(SETTING_RESOLUTION_WIDTH, mode.size.x);
        self.settings.set_int(SETTING_RESOLUTION_HEIGHT, mode.size.y);
        self.window_commands
            .push(WindowCommand::SetWindowSize(mode.size));
    }

    /// Apply the persisted fullscreen flag and window size.
    pub fn apply_display_settings(&mut self) {
        let wanted = IVec2::new(
            self.settings.get_int(SETTING_RESOLUTION_WIDTH),
            self.settings.get_int(SETTING_RESOLUTION_HEIGHT),
        );
        let index = closest_display_mode(&self.display_modes, wanted);
        if index != self.current_display_mode {
            self.set_display_mode(index);
        }
        let fullscreen = self.settings.get_bool(SETTING_FULLSCREEN);
        if fullscreen != self.fullscreen {
            self.set_fullscreen(fullscreen);
        }
    }

    pub fn set_cursor(&mut self, name: &str) {
        if !self.cursors.iter().any(|c| c.name == name) {
            log::warn!("set_cursor: cursor '{}' not in manifest", name);
        }
        self.window_commands
            .push(WindowCommand::SetCursor(name.to_string()));
    }

    // -- Assets --

    /// Load every asset a manifest lists. Texture paths resolve relative
    /// to `base_dir`.
    pub fn load_assets(
        &mut self,
        manifest: &AssetManifest,
        base_dir: &Path,
    ) -> Result<(), AssetError> {
        for entry in &manifest.textures {
            let path = base_dir.join(&entry.path);
            self.textures
                .load_file(&entry.name, &path.to_string_lossy(), entry.hit_mask)?;
        }
        for sheet in &manifest.sheets {
            self.textures.add_sheet(&sheet.texture, &sheet.frames)?;
        }
        for font in &manifest.fonts {
            self.fonts.register(
                &font.name,
                FontMetrics {
                    advance: font.advance,
                    line_height: font.line_height,
                },
            );
        }
        for (name, sound) in &manifest.sounds {
            self.audio.register_sound(name, sound.music);
        }
        self.cursors.extend(manifest.cursors.iter().cloned());
        Ok(())
    }

    pub fn cursors(&self) -> &[CursorEntry] {
        &self.cursors
    }

    // -- Keybindings --

    /// Register a rebindable action. The bound key persists as an `Int`
    /// setting under the same id.
    pub fn register_keybinding(&mut self, id: u32, description: &str, default_key: u32) {
        self.settings
            .register(id, description, SettingValue::Int(default_key as i32));
        let key = self.settings.get_int(id) as u32;
        self.input.register_keybinding(id, description, key);
    }

    /// Rebind an action and write the new key through to settings.
    pub fn set_keybinding(&mut self, id: u32, key_code: u32) {
        self.input.set_keybinding(id, key_code);
        self.settings.set_int(id, key_code as i32);
    }

    // -- Object creation --

    fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    fn stage_for(&mut self, layer: ObjectLayer) -> &mut Stage {
        match layer {
            ObjectLayer::PersistentUi => &mut self.persistent,
            _ => self.stages.entry(self.current).or_default(),
        }
    }

    pub fn create_sprite(&mut self, params: SpriteParams) -> ObjectId {
        let id = self.allocate_id();
        let (texture, frame) = self.textures.resolve(&params.texture);
        let natural = match frame {
            Some(rect) => rect.size,
            None => self.textures.get(texture).size,
        };
        let size = params.size.unwrap_or(natural);
        self.transforms.register(id, params.position, size);

        // Tight hover box from the texture's opaque area, scaled to the
        // draw size. Sheet frames and solids keep the full rect.
        let tex = self.textures.get(texture);
        if frame.is_none() && tex.solid.is_none() && natural.x > 0 && natural.y > 0 {
            let bb = tex.bounding_box;
            let scaled = Rect::new(
                bb.x() * size.x / natural.x,
                bb.y() * size.y / natural.y,
                bb.width() * size.x / natural.x,
                bb.height() * size.y / natural.y,
            );
            self.transforms.set_bounding_box(id, Some(scaled));
        }

        let mut sprite = SpriteData::new(texture);
        sprite.frame = frame;
        sprite.alpha = params.alpha;
        sprite.tint = params.tint;
        sprite.rotation = params.rotation;
        let mut object = GameObject::new(id, ObjectKind::Sprite(sprite))
            .with_layer(params.layer)
            .with_z(params.z)
            .with_shown(params.shown);
        object.load_state = LoadState::Done;
        self.stage_for(params.layer).spawn(object);
        id
    }

    pub fn create_box_sprite(&mut self, params: BoxSpriteParams) -> ObjectId {
        let id = self.create_sprite(SpriteParams {
            texture: params.texture,
            position: params.position,
            size: Some(params.size),
            z: params.z,
            layer: params.layer,
            shown: params.shown,
            alpha: params.alpha,
            ..Default::default()
        });
        if let Some(sprite) = self.object_mut(id).and_then(|o| o.sprite_mut()) {
            sprite.nine_slice = Some(params.corner);
        }
        // The stretched box is hover-tested over its full rect.
        self.transforms.set_bounding_box(id, None);
        id
    }

    /// Create a sprite filled with a single color (memoized texture).
    pub fn create_solid_sprite(
        &mut self,
        color: Color,
        rect: Rect,
        z: i32,
        layer: ObjectLayer,
    ) -> ObjectId {
        let texture = self.textures.solid(color);
        let name = self.textures.get(texture).name.clone();
        self.create_sprite(SpriteParams {
            texture: name,
            position: rect.position,
            size: Some(rect.size),
            z,
            layer,
            ..Default::default()
        })
    }

    pub fn create_text(&mut self, params: TextParams) -> ObjectId {
        let id = self.allocate_id();
        self.transforms.register(id, params.position, IVec2::ZERO);
        let object = GameObject::new(
            id,
            ObjectKind::Text(TextData {
                font: params.font,
                font_size: params.font_size,
                content: params.text,
                color: params.color,
                measured: IVec2::ZERO,
            }),
        )
        .with_layer(params.layer)
        .with_z(params.z)
        .with_shown(params.shown);
        self.stage_for(params.layer).spawn(object);
        id
    }

    pub fn create_line_strip(&mut self, params: LineStripParams) -> ObjectId {
        let id = self.allocate_id();
        let size = strip_extent(&params.points);
        self.transforms
            .register(id, params.center - size / 2, size);
        let mut object = GameObject::new(
            id,
            ObjectKind::LineStrip(LineData {
                points: params.points,
                color: params.color,
            }),
        )
        .with_layer(params.layer)
        .with_z(params.z)
        .with_shown(params.shown);
        object.load_state = LoadState::Done;
        self.stage_for(params.layer).spawn(object);
        id
    }

    /// Defer z-sorting while creating many objects; pairs with
    /// [`Engine::end_batch_create`].
    pub fn start_batch_create(&mut self) {
        self.persistent.start_batch();
        for stage in self.stages.values_mut() {
            stage.start_batch();
        }
    }

    pub fn end_batch_create(&mut self) {
        self.persistent.end_batch();
        for stage in self.stages.values_mut() {
            stage.end_batch();
        }
    }

    /// Flag an object for destruction at the start of the next frame.
    pub fn destroy(&mut self, id: ObjectId) {
        if let Some(object) = self.object_mut(id) {
            object.destruction_wanted = true;
        }
    }

    // -- Object access --

    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.persistent
            .get(id)
            .or_else(|| self.stages.values().find_map(|s| s.get(id)))
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        if self.persistent.contains(id) {
            return self.persistent.get_mut(id);
        }
        self.stages.values_mut().find_map(|s| s.get_mut(id))
    }

    pub fn set_shown(&mut self, id: ObjectId, shown: bool) {
        if let Some(object) = self.object_mut(id) {
            object.shown = shown;
        }
    }

    pub fn is_shown(&self, id: ObjectId) -> bool {
        self.object(id).map(|o| o.shown).unwrap_or(false)
    }

    /// Change draw order. Triggers a re-sort of the owning stage.
    pub fn set_z(&mut self, id: ObjectId, z: i32) {
        if self.persistent.contains(id) {
            if let Some(object) = self.persistent.get_mut(id) {
                object.z = z;
            }
            self.persistent.sort_by_z();
            return;
        }
        for stage in self.stages.values_mut() {
            if stage.contains(id) {
                if let Some(object) = stage.get_mut(id) {
                    object.z = z;
                }
                stage.sort_by_z();
                return;
            }
        }
    }

    pub fn set_alpha(&mut self, id: ObjectId, alpha: f32) {
        if let Some(sprite) = self.object_mut(id).and_then(|o| o.sprite_mut()) {
            sprite.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    /// Swap a sprite's texture (or sheet frame) by name.
    pub fn set_sprite_texture(&mut self, id: ObjectId, name: &str) {
        let (texture, frame) = self.textures.resolve(name);
        if let Some(sprite) = self.object_mut(id).and_then(|o| o.sprite_mut()) {
            sprite.texture = texture;
            sprite.frame = frame;
        }
    }

    /// Replace a text object's content. Re-measured on the next load pass.
    pub fn set_text(&mut self, id: ObjectId, text: &str) {
        if let Some(object) = self.object_mut(id) {
            if let Some(data) = object.text_mut() {
                if data.content != text {
                    data.content = text.to_string();
                    object.load_state = LoadState::Wanted;
                }
            }
        }
    }

    pub fn set_text_color(&mut self, id: ObjectId, color: Color) {
        if let Some(data) = self.object_mut(id).and_then(|o| o.text_mut()) {
            data.color = color;
        }
    }

    pub fn text_content(&self, id: ObjectId) -> Option<&str> {
        self.object(id)
            .and_then(|o| o.text())
            .map(|t| t.content.as_str())
    }

    pub fn set_line_points(&mut self, id: ObjectId, points: Vec<Vec2>) {
        let size = strip_extent(&points);
        if let Some(data) = self.object_mut(id).and_then(|o| o.lines_mut()) {
            data.points = points;
        } else {
            return;
        }
        let center = self.transforms.center_position(id);
        self.transforms.set_size(id, size);
        self.transforms.set_center_position(id, center);
    }

    pub fn set_line_color(&mut self, id: ObjectId, color: Color) {
        if let Some(data) = self.object_mut(id).and_then(|o| o.lines_mut()) {
            data.color = color;
        }
    }

    // -- Subsystem access --

    pub fn transforms(&self) -> &TransformGraph {
        &self.transforms
    }

    pub fn transforms_mut(&mut self) -> &mut TransformGraph {
        &mut self.transforms
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn audio(&self) -> &AudioMixer {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioMixer {
        &mut self.audio
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureRegistry {
        &mut self.textures
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    pub fn ui_camera(&self) -> &UiCamera {
        &self.ui_camera
    }

    pub fn world_camera(&self) -> &WorldCamera {
        &self.world_camera
    }

    pub fn world_camera_mut(&mut self) -> &mut WorldCamera {
        &mut self.world_camera
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn delta_time(&self) -> f32 {
        self.clock.delta_time()
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn fps(&self) -> u32 {
        self.clock.fps()
    }

    pub fn random_number(&mut self, min: i32, max: i32) -> i32 {
        self.rng.range_i32(min, max)
    }

    pub fn random_bool(&mut self) -> bool {
        self.rng.random_bool()
    }

    // -- Hover --

    pub fn hovered(&self) -> Option<ObjectId> {
        self.hovered
    }

    pub fn is_hovered(&self, id: ObjectId) -> bool {
        self.hovered == Some(id)
    }

    /// Whether the hovered object is any of the given ids.
    pub fn hovered_in(&self, ids: &[ObjectId]) -> bool {
        self.hovered.map(|h| ids.contains(&h)).unwrap_or(false)
    }

    // -- Frame --

    /// Run one frame. See the type-level docs for the exact order.
    pub fn tick(&mut self, frame_dt: f32) {
        if let Some(fullscreen) = self.pending_fullscreen.take() {
            if fullscreen != self.fullscreen {
                self.fullscreen = fullscreen;
                self.window_commands
                    .push(WindowCommand::SetFullscreen(fullscreen));
            }
        }

        if self.clock.tick(frame_dt) {
            if let Some(fps_text) = self.fps_text {
                let fps = self.clock.fps();
                self.set_text(fps_text, &format!("FPS: {}", fps));
            }
        }

        let events = self.input_queue.drain();
        // Demote last frame's edges before applying this frame's events, so
        // Pressed states stay observable for exactly one tick.
        self.input.after_frame();
        self.input.begin_frame(&events, &self.ui_camera);
        if self.input.quit_requested() {
            self.quit = true;
        }

        self.reap_destroyed();

        let scene_id = self.current;
        let mut slot = self.scenes.remove(&scene_id);

        if let Some(slot) = slot.as_mut() {
            if !slot.started {
                slot.started = true;
                slot.scene.start(self);
            }
        }

        self.resolve_loads();

        let new_hover = self.pick_hovered();
        if new_hover != self.hovered {
            let old = self.hovered;
            self.hovered = new_hover;
            if let Some(slot) = slot.as_mut() {
                slot.scene.sprite_hovered(self, old, new_hover);
            }
        }

        if let Some(slot) = slot.as_mut() {
            slot.scene.update(self);
        }

        if let Some(slot) = slot {
            self.scenes.insert(scene_id, slot);
        }

        self.resolve_loads();
        self.transforms.end_frame();

        self.draw_list.clear();
        let current_stage = self.stages.entry(self.current).or_default();
        append_stage(
            &mut self.draw_list,
            current_stage,
            &self.transforms,
            &self.world_camera,
            &self.textures,
        );
        append_stage(
            &mut self.draw_list,
            &self.persistent,
            &self.transforms,
            &self.world_camera,
            &self.textures,
        );
    }

    fn reap_destroyed(&mut self) {
        let mut doomed = self.persistent.reap();
        for stage in self.stages.values_mut() {
            doomed.extend(stage.reap());
        }
        for id in doomed {
            self.transforms.remove(id);
            if self.hovered == Some(id) {
                self.hovered = None;
            }
        }
    }

    /// Measure pending text objects and mark them loaded.
    fn resolve_loads(&mut self) {
        let mut measured: Vec<(ObjectId, IVec2)> = Vec::new();
        let stages = self
            .stages
            .get_mut(&self.current)
            .into_iter()
            .chain(std::iter::once(&mut self.persistent));
        for stage in stages {
            for object in stage.iter_mut() {
                if object.load_state != LoadState::Wanted {
                    continue;
                }
                match &mut object.kind {
                    ObjectKind::Text(text) => {
                        let size =
                            self.fonts
                                .measure(&text.font, text.font_size, &text.content);
                        text.measured = size;
                        measured.push((object.id, size));
                        object.load_state = LoadState::Done;
                    }
                    _ => object.load_state = LoadState::Done,
                }
            }
        }
        for (id, size) in measured {
            self.transforms.set_size(id, size);
        }
    }

    /// Topmost shown sprite under the cursor, per-pixel where a hit mask
    /// exists.
    fn pick_hovered(&self) -> Option<ObjectId> {
        let mouse = self.input.mouse_position();
        let mut best: Option<(i32, u32, ObjectId)> = None;

        let stages = [
            (0u32, self.stages.get(&self.current)),
            (1u32, Some(&self.persistent)),
        ];
        for (rank, stage) in stages {
            let Some(stage) = stage else { continue };
            for object in stage.iter() {
                if !object.shown || object.load_state != LoadState::Done {
                    continue;
                }
                let Some(sprite) = object.sprite() else { continue };
                let probe = match object.layer {
                    ObjectLayer::World => self.world_camera.screen_to_world(mouse),
                    _ => mouse,
                };
                if !self.transforms.testing_box(object.id).contains(probe) {
                    continue;
                }
                if !self.precise_hit(object.id, sprite, probe) {
                    continue;
                }
                // Persistent outranks current; within a stage, higher z wins.
                let candidate = (object.z, rank, object.id);
                if best
                    .map(|(z, r, _)| (rank, object.z) >= (r, z))
                    .unwrap_or(true)
                {
                    best = Some(candidate);
                }
            }
        }
        best.map(|(_, _, id)| id)
    }

    fn precise_hit(
        &self,
        id: ObjectId,
        sprite: &SpriteData,
        probe: IVec2,
    ) -> bool {
        let texture = self.textures.get(sprite.texture);
        if !texture.has_hit_mask() || sprite.nine_slice.is_some() {
            return true;
        }
        let rect = self.transforms.rect(id);
        if rect.size.x <= 0 || rect.size.y <= 0 {
            return false;
        }
        let local = probe - rect.position;
        let source = sprite
            .frame
            .unwrap_or(Rect::from_pos_size(IVec2::ZERO, texture.size));
        let mapped = source.position
            + IVec2::new(
                local.x * source.size.x / rect.size.x,
                local.y * source.size.y / rect.size.y,
            );
        texture.hit_test(mapped)
    }
}

fn strip_extent(points: &[Vec2]) -> IVec2 {
    if points.is_empty() {
        return IVec2::ZERO;
    }
    let mut min = points[0];
    let mut max = points[0];
    for p in points {
        min = min.min(*p);
        max = max.max(*p);
    }
    (max - min).ceil().as_ivec2()
}
