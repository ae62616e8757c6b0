use std::collections::HashMap;

use glam::IVec2;

/// Name of the font registered out of the box.
pub const DEFAULT_FONT: &str = "default";

/// Headless font metrics: a mean glyph advance (as a fraction of the font
/// size) and a line-height factor. Rasterization is the host's business;
/// layout only needs these two numbers.
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            advance: 0.55,
            line_height: 1.2,
        }
    }
}

/// Registry of fonts by name.
pub struct FontRegistry {
    fonts: HashMap<String, FontMetrics>,
}

impl FontRegistry {
    pub fn new() -> Self {
        let mut fonts = HashMap::new();
        fonts.insert(DEFAULT_FONT.to_string(), FontMetrics::default());
        Self { fonts }
    }

    pub fn register(&mut self, name: &str, metrics: FontMetrics) {
        self.fonts.insert(name.to_string(), metrics);
    }

    fn metrics(&self, name: &str) -> FontMetrics {
        match self.fonts.get(name) {
            Some(m) => *m,
            None => {
                log::warn!("unknown font '{}', using default metrics", name);
                FontMetrics::default()
            }
        }
    }

    /// Measure a single line of text.
    pub fn measure(&self, font: &str, font_size: u32, text: &str) -> IVec2 {
        let metrics = self.metrics(font);
        let width = (text.chars().count() as f32 * metrics.advance * font_size as f32).ceil();
        IVec2::new(width as i32, font_size as i32)
    }

    /// Vertical distance between successive lines.
    pub fn line_advance(&self, font: &str, font_size: u32) -> i32 {
        (self.metrics(font).line_height * font_size as f32).round() as i32
    }

    /// Greedy word wrap into lines no wider than `max_width`. Words wider
    /// than the limit get a line of their own rather than being split.
    pub fn wrap(&self, font: &str, font_size: u32, text: &str, max_width: i32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if self.measure(font, font_size, &candidate).x <= max_width || current.is_empty() {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_scales_with_length_and_size() {
        let fonts = FontRegistry::new();
        let short = fonts.measure(DEFAULT_FONT, 20, "hi");
        let long = fonts.measure(DEFAULT_FONT, 20, "hello");
        assert!(long.x > short.x);
        assert_eq!(short.y, 20);

        let big = fonts.measure(DEFAULT_FONT, 40, "hi");
        assert_eq!(big.x, short.x * 2);
    }

    #[test]
    fn wrap_respects_width() {
        let fonts = FontRegistry::new();
        let limit = fonts.measure(DEFAULT_FONT, 20, "aaaa bbbb").x;
        let lines = fonts.wrap(DEFAULT_FONT, 20, "aaaa bbbb cccc dddd", limit);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc dddd"]);
        for line in &lines {
            assert!(fonts.measure(DEFAULT_FONT, 20, line).x <= limit);
        }
    }

    #[test]
    fn wrap_keeps_overlong_word_on_own_line() {
        let fonts = FontRegistry::new();
        let lines = fonts.wrap(DEFAULT_FONT, 20, "a extraordinarily b", 40);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "extraordinarily");
    }
}
