/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const LIGHT_GREY: Color = Color::rgb(190, 190, 190);
    pub const DARK_GREY: Color = Color::rgb(60, 60, 60);
    /// Signature engine green.
    pub const JADE: Color = Color::rgb(0, 168, 107);
    /// Fallback texture color, deliberately loud.
    pub const PINK: Color = Color::rgb(255, 0, 220);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Pack into 0xRRGGBBAA, used as a cache key for solid-color textures.
    pub fn packed(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_is_unique_per_channel() {
        assert_ne!(
            Color::rgba(1, 0, 0, 255).packed(),
            Color::rgba(0, 1, 0, 255).packed()
        );
        assert_eq!(Color::rgb(255, 0, 220).packed(), 0xFF00DCFF);
    }
}
