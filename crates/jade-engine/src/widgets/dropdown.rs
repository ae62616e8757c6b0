use glam::IVec2;

use crate::api::engine::Engine;
use crate::api::params::{BoxSpriteParams, SpriteParams, TextParams};
use crate::assets::fonts::DEFAULT_FONT;
use crate::core::color::Color;
use crate::core::object::{ObjectId, ObjectLayer};
use crate::core::rect::Rect;
use crate::core::transform::Anchor;
use crate::input::queue::MouseButton;

const ENTRY_PADDING: i32 = 4;

#[derive(Debug, Clone)]
pub struct DropdownParams {
    pub position: IVec2,
    /// Size of the collapsed selector box.
    pub size: IVec2,
    pub z: i32,
    pub layer: ObjectLayer,
    pub box_texture: String,
    pub corner: i32,
    pub expand_arrow_texture: String,
    pub contract_arrow_texture: String,
    pub scrollbar_texture: String,
    pub scroll_handle_texture: String,
    pub entries: Vec<String>,
    pub selected: usize,
    /// Entries visible at once when expanded.
    pub max_visible: usize,
    pub font: String,
    pub font_size: u32,
    pub text_color: Color,
    pub click_sound: Option<String>,
}

impl Default for DropdownParams {
    fn default() -> Self {
        Self {
            position: IVec2::ZERO,
            size: IVec2::new(240, 32),
            z: 0,
            layer: ObjectLayer::Ui,
            box_texture: "dropdown_box".to_string(),
            corner: 6,
            expand_arrow_texture: "arrow_down".to_string(),
            contract_arrow_texture: "arrow_up".to_string(),
            scrollbar_texture: "scrollbar_axis".to_string(),
            scroll_handle_texture: "scrollbar_handle".to_string(),
            entries: Vec::new(),
            selected: 0,
            max_visible: 6,
            font: DEFAULT_FONT.to_string(),
            font_size: 16,
            text_color: Color::WHITE,
            click_sound: None,
        }
    }
}

/// Drop-down selector: a collapsed box showing the selection, expanding
/// into a scrollable entry list. Selection, the arrow, or a click outside
/// the widget collapses it again.
pub struct Dropdown {
    box_sprite: ObjectId,
    arrow: ObjectId,
    selected_text: ObjectId,
    list_box: ObjectId,
    entry_texts: Vec<ObjectId>,
    highlight: ObjectId,
    scrollbar: ObjectId,
    scroll_handle: ObjectId,
    expand_arrow_texture: String,
    contract_arrow_texture: String,
    entries: Vec<String>,
    selected: usize,
    scroll: usize,
    max_visible: usize,
    entry_height: i32,
    expanded: bool,
    changed: bool,
    dragging: bool,
    grab_offset: i32,
    click_sound: Option<String>,
}

impl Dropdown {
    pub fn new(engine: &mut Engine, params: DropdownParams) -> Self {
        let z = params.z;
        let box_sprite = engine.create_box_sprite(BoxSpriteParams {
            texture: params.box_texture.clone(),
            corner: params.corner,
            position: params.position,
            size: params.size,
            z,
            layer: params.layer,
            ..Default::default()
        });

        let arrow_size = engine.textures().natural_size(&params.expand_arrow_texture);
        let arrow = engine.create_sprite(SpriteParams {
            texture: params.expand_arrow_texture.clone(),
            size: Some(arrow_size),
            z: z + 1,
            layer: params.layer,
            ..Default::default()
        });
        engine.transforms_mut().attach(
            box_sprite,
            arrow,
            IVec2::new(-ENTRY_PADDING, 0),
            Anchor::RightCenter,
            Anchor::RightCenter,
        );

        let selected_text = engine.create_text(TextParams {
            font: params.font.clone(),
            font_size: params.font_size,
            text: params
                .entries
                .get(params.selected)
                .cloned()
                .unwrap_or_default(),
            color: params.text_color,
            z: z + 1,
            layer: params.layer,
            ..Default::default()
        });
        engine.transforms_mut().attach(
            box_sprite,
            selected_text,
            IVec2::new(ENTRY_PADDING * 2, 0),
            Anchor::LeftCenter,
            Anchor::LeftCenter,
        );

        // Expanded list, hidden until needed.
        let entry_height = params.font_size as i32 + 2 * ENTRY_PADDING;
        let visible = params.max_visible.max(1);
        let list_size = IVec2::new(
            params.size.x,
            entry_height * visible as i32 + 2 * ENTRY_PADDING,
        );
        let list_box = engine.create_box_sprite(BoxSpriteParams {
            texture: params.box_texture,
            corner: params.corner,
            size: list_size,
            // The list overlays whatever sits under the collapsed box.
            z: z + 10,
            layer: params.layer,
            shown: false,
            ..Default::default()
        });
        engine.transforms_mut().attach(
            box_sprite,
            list_box,
            IVec2::new(0, 2),
            Anchor::BottomLeft,
            Anchor::TopLeft,
        );

        let highlight = engine.create_solid_sprite(
            Color::WHITE,
            Rect::new(0, 0, list_size.x - 2 * ENTRY_PADDING, entry_height),
            z + 11,
            params.layer,
        );
        engine.set_alpha(highlight, 0.15);
        engine.set_shown(highlight, false);

        let mut entry_texts = Vec::with_capacity(visible);
        for i in 0..visible {
            let text = engine.create_text(TextParams {
                font: params.font.clone(),
                font_size: params.font_size,
                color: params.text_color,
                z: z + 12,
                layer: params.layer,
                shown: false,
                ..Default::default()
            });
            engine.transforms_mut().attach(
                list_box,
                text,
                IVec2::new(
                    ENTRY_PADDING * 2,
                    ENTRY_PADDING * 2 + i as i32 * entry_height,
                ),
                Anchor::TopLeft,
                Anchor::TopLeft,
            );
            entry_texts.push(text);
        }

        let scrollbar = engine.create_sprite(SpriteParams {
            texture: params.scrollbar_texture,
            size: Some(IVec2::new(8, list_size.y - 2 * ENTRY_PADDING)),
            z: z + 11,
            layer: params.layer,
            shown: false,
            ..Default::default()
        });
        engine.transforms_mut().attach(
            list_box,
            scrollbar,
            IVec2::new(-ENTRY_PADDING, 0),
            Anchor::RightCenter,
            Anchor::RightCenter,
        );
        let scroll_handle = engine.create_sprite(SpriteParams {
            texture: params.scroll_handle_texture,
            size: Some(IVec2::new(8, 24)),
            z: z + 12,
            layer: params.layer,
            shown: false,
            ..Default::default()
        });
        engine.transforms_mut().attach(
            scrollbar,
            scroll_handle,
            IVec2::ZERO,
            Anchor::TopCenter,
            Anchor::TopCenter,
        );

        let mut dropdown = Self {
            box_sprite,
            arrow,
            selected_text,
            list_box,
            entry_texts,
            highlight,
            scrollbar,
            scroll_handle,
            expand_arrow_texture: params.expand_arrow_texture,
            contract_arrow_texture: params.contract_arrow_texture,
            selected: params.selected.min(params.entries.len().saturating_sub(1)),
            entries: params.entries,
            scroll: 0,
            max_visible: visible,
            entry_height,
            expanded: false,
            changed: false,
            dragging: false,
            grab_offset: 0,
            click_sound: params.click_sound,
        };
        dropdown.refresh(engine);
        dropdown
    }

    pub fn update(&mut self, engine: &mut Engine) {
        self.changed = false;
        let pressed = engine.input().button_pressed(MouseButton::Left);
        let mouse = engine.input().mouse_position();

        if !self.expanded {
            if pressed && engine.hovered_in(&[self.box_sprite, self.arrow]) {
                self.set_expanded(engine, true);
                self.play_click(engine);
            }
            return;
        }

        // Wheel scrolls the visible window.
        let wheel = engine.input().wheel_y();
        if wheel != 0 {
            self.set_scroll(engine, self.scroll as i32 - wheel);
        }

        // Scroll handle drag.
        if !self.dragging
            && engine.is_hovered(self.scroll_handle)
            && pressed
        {
            self.dragging = true;
            self.grab_offset = mouse.y - engine.transforms().position(self.scroll_handle).y;
        }
        if self.dragging {
            if engine.input().button_down(MouseButton::Left) {
                self.drag_handle(engine, mouse.y);
            } else {
                self.dragging = false;
            }
            self.update_highlight(engine, mouse);
            return;
        }

        let list_rect = self.inner_list_rect(engine);
        if pressed {
            if list_rect.contains(mouse) {
                let slot = ((mouse.y - list_rect.y()) / self.entry_height) as usize;
                let index = self.scroll + slot;
                if index < self.entries.len() {
                    if index != self.selected {
                        self.selected = index;
                        self.changed = true;
                    }
                    self.play_click(engine);
                    self.set_expanded(engine, false);
                    self.refresh(engine);
                }
            } else if engine.hovered_in(&[self.arrow, self.box_sprite]) {
                self.set_expanded(engine, false);
            } else if !engine.is_hovered(self.scrollbar) {
                // Click-away closes without changing the selection.
                self.set_expanded(engine, false);
            }
        }

        self.update_highlight(engine, mouse);
    }

    /// Selection changed this frame.
    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn index(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&str> {
        self.entries.get(self.selected).map(String::as_str)
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn root(&self) -> ObjectId {
        self.box_sprite
    }

    pub fn set_entries(&mut self, engine: &mut Engine, entries: Vec<String>, selected: usize) {
        self.entries = entries;
        self.selected = selected.min(self.entries.len().saturating_sub(1));
        self.scroll = 0;
        self.refresh(engine);
    }

    pub fn set_selected(&mut self, engine: &mut Engine, index: usize) {
        self.selected = index.min(self.entries.len().saturating_sub(1));
        self.refresh(engine);
    }

    fn max_scroll(&self) -> usize {
        self.entries.len().saturating_sub(self.max_visible)
    }

    fn set_scroll(&mut self, engine: &mut Engine, scroll: i32) {
        self.scroll = scroll.clamp(0, self.max_scroll() as i32) as usize;
        self.refresh(engine);
    }

    fn drag_handle(&mut self, engine: &mut Engine, mouse_y: i32) {
        let track = engine.transforms().rect(self.scrollbar);
        let handle_h = engine.transforms().size(self.scroll_handle).y;
        let span = (track.height() - handle_h).max(1);
        let y = (mouse_y - self.grab_offset - track.y()).clamp(0, span);
        let fraction = y as f32 / span as f32;
        let scroll = (fraction * self.max_scroll() as f32).round() as i32;
        if scroll as usize != self.scroll {
            self.set_scroll(engine, scroll);
        } else {
            self.place_handle(engine);
        }
    }

    fn inner_list_rect(&self, engine: &Engine) -> Rect {
        let rect = engine.transforms().rect(self.list_box);
        Rect::new(
            rect.x() + ENTRY_PADDING,
            rect.y() + ENTRY_PADDING * 2,
            rect.width() - 2 * ENTRY_PADDING,
            self.max_visible as i32 * self.entry_height,
        )
    }

    fn update_highlight(&self, engine: &mut Engine, mouse: IVec2) {
        let list_rect = self.inner_list_rect(engine);
        if self.expanded && list_rect.contains(mouse) {
            let slot = (mouse.y - list_rect.y()) / self.entry_height;
            if self.scroll + (slot as usize) < self.entries.len() {
                engine.set_shown(self.highlight, true);
                engine.transforms_mut().set_position(
                    self.highlight,
                    IVec2::new(list_rect.x(), list_rect.y() + slot * self.entry_height),
                );
                return;
            }
        }
        engine.set_shown(self.highlight, false);
    }

    fn set_expanded(&mut self, engine: &mut Engine, expanded: bool) {
        self.expanded = expanded;
        self.dragging = false;
        engine.set_shown(self.list_box, expanded);
        engine.set_shown(self.highlight, false);
        let has_scrollbar = self.entries.len() > self.max_visible;
        engine.set_shown(self.scrollbar, expanded && has_scrollbar);
        engine.set_shown(self.scroll_handle, expanded && has_scrollbar);
        for (i, &text) in self.entry_texts.iter().enumerate() {
            engine.set_shown(text, expanded && self.scroll + i < self.entries.len());
        }
        let texture = if expanded {
            self.contract_arrow_texture.clone()
        } else {
            self.expand_arrow_texture.clone()
        };
        engine.set_sprite_texture(self.arrow, &texture);
    }

    fn refresh(&mut self, engine: &mut Engine) {
        engine.set_text(
            self.selected_text,
            &self
                .entries
                .get(self.selected)
                .cloned()
                .unwrap_or_default(),
        );
        for (i, &text) in self.entry_texts.iter().enumerate() {
            match self.entries.get(self.scroll + i) {
                Some(entry) => {
                    engine.set_text(text, entry);
                    engine.set_shown(text, self.expanded);
                }
                None => engine.set_shown(text, false),
            }
        }
        self.place_handle(engine);
    }

    fn place_handle(&self, engine: &mut Engine) {
        let max_scroll = self.max_scroll();
        if max_scroll == 0 {
            return;
        }
        let track = engine.transforms().rect(self.scrollbar);
        let handle_h = engine.transforms().size(self.scroll_handle).y;
        let span = (track.height() - handle_h).max(0);
        let y = (self.scroll as f32 / max_scroll as f32 * span as f32).round() as i32;
        let x = engine.transforms().position(self.scroll_handle).x;
        engine
            .transforms_mut()
            .set_position(self.scroll_handle, IVec2::new(x, track.y() + y));
    }

    fn play_click(&self, engine: &mut Engine) {
        if let Some(sound) = &self.click_sound {
            engine.audio_mut().play_sound(sound);
        }
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

    fn dropdown(engine: &mut Engine, entries: &[&str]) -> Dropdown {
        Dropdown::new(
            engine,
            DropdownParams {
                position: IVec2::new(100, 100),
                size: IVec2::new(240, 32),
                entries: entries.iter().map(|s| s.to_string()).collect(),
                max_visible: 3,
                font_size: 16,
                ..Default::default()
            },
        )
    }

    fn click(engine: &mut Engine, widget: &mut Dropdown, x: i32, y: i32) {
        engine.push_event(InputEvent::PointerDown {
            button: MouseButton::Left,
            x,
            y,
        });
        engine.tick(0.016);
        widget.update(engine);
        engine.push_event(InputEvent::PointerUp {
            button: MouseButton::Left,
            x,
            y,
        });
        engine.tick(0.016);
        widget.update(engine);
    }

    #[test]
    fn click_expands_then_selects() {
        let mut engine = engine();
        let mut dd = dropdown(&mut engine, &["800x600", "1280x720", "1920x1080"]);
        assert!(!dd.is_expanded());

        // Click the collapsed box.
        click(&mut engine, &mut dd, 110, 110);
        assert!(dd.is_expanded());

        // List starts at box bottom + 2 = 134; inner top = 134 + 8.
        // Second entry occupies y in [142 + 24, 142 + 48).
        click(&mut engine, &mut dd, 110, 142 + 30);
        assert!(!dd.is_expanded());
        assert!(dd.changed() || dd.index() == 1);
        assert_eq!(dd.index(), 1);
        assert_eq!(dd.selected_entry(), Some("1280x720"));
    }

    #[test]
    fn click_away_closes_without_change() {
        let mut engine = engine();
        let mut dd = dropdown(&mut engine, &["a", "b", "c"]);
        click(&mut engine, &mut dd, 110, 110);
        assert!(dd.is_expanded());

        click(&mut engine, &mut dd, 700, 500);
        assert!(!dd.is_expanded());
        assert_eq!(dd.index(), 0);
        assert!(!dd.changed());
    }

    #[test]
    fn wheel_scrolls_entries() {
        let mut engine = engine();
        let mut dd = dropdown(&mut engine, &["a", "b", "c", "d", "e"]);
        click(&mut engine, &mut dd, 110, 110);
        assert!(dd.is_expanded());

        engine.push_event(InputEvent::Wheel { y: -1 });
        engine.tick(0.016);
        dd.update(&mut engine);
        assert_eq!(dd.scroll, 1);

        // Clamped at the end of the list.
        for _ in 0..5 {
            engine.push_event(InputEvent::Wheel { y: -1 });
            engine.tick(0.016);
            dd.update(&mut engine);
        }
        assert_eq!(dd.scroll, 2);
    }
}
