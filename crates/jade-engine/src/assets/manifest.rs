use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Asset manifest describing every texture, sheet, font, sound and cursor
/// a game ships. Loaded from a JSON file at startup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssetManifest {
    #[serde(default)]
    pub textures: Vec<TextureEntry>,
    /// Sprite sheets: named frames cut out of an already-listed texture.
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
    #[serde(default)]
    pub fonts: Vec<FontEntry>,
    #[serde(default)]
    pub sounds: HashMap<String, SoundEntry>,
    #[serde(default)]
    pub cursors: Vec<CursorEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureEntry {
    pub name: String,
    /// Relative path to the PNG file.
    pub path: String,
    /// Build a per-pixel alpha hit mask for precise hover testing.
    #[serde(default)]
    pub hit_mask: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetEntry {
    /// Name of the backing texture entry.
    pub texture: String,
    pub frames: Vec<FrameEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameEntry {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Font metrics used for headless text measurement. `advance` is the mean
/// glyph advance as a fraction of the font size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontEntry {
    pub name: String,
    pub path: String,
    #[serde(default = "default_advance")]
    pub advance: f32,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundEntry {
    pub path: String,
    /// Music streams get the reserved music channels.
    #[serde(default)]
    pub music: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorEntry {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub hotspot_x: i32,
    #[serde(default)]
    pub hotspot_y: i32,
}

fn default_advance() -> f32 {
    0.55
}

fn default_line_height() -> f32 {
    1.2
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_sounds() {
        let json = r#"{
            "sounds": {
                "click": { "path": "click.ogg" },
                "menu_theme": { "path": "theme.ogg", "music": true }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sounds.len(), 2);
        assert!(!manifest.sounds["click"].music);
        assert!(manifest.sounds["menu_theme"].music);
    }

    #[test]
    fn parse_textures_and_sheet() {
        let json = r#"{
            "textures": [
                { "name": "ui", "path": "ui.png", "hit_mask": true }
            ],
            "sheets": [
                {
                    "texture": "ui",
                    "frames": [
                        { "name": "button_normal", "x": 0, "y": 0, "w": 64, "h": 24 }
                    ]
                }
            ]
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert!(manifest.textures[0].hit_mask);
        assert_eq!(manifest.sheets[0].frames[0].name, "button_normal");
    }

    #[test]
    fn font_defaults_applied() {
        let json = r#"{ "fonts": [ { "name": "vera", "path": "vera.ttf" } ] }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        let font = &manifest.fonts[0];
        assert!((font.advance - 0.55).abs() < 1e-6);
        assert!((font.line_height - 1.2).abs() < 1e-6);
    }
}
