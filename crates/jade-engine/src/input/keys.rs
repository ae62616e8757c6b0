//! Named key codes. Values follow the USB-style codes most hosts emit for
//! printable keys (ASCII) with function/navigation keys above 0x4000_0000.

pub const KEY_BACKSPACE: u32 = 8;
pub const KEY_TAB: u32 = 9;
pub const KEY_RETURN: u32 = 13;
pub const KEY_ESCAPE: u32 = 27;
pub const KEY_SPACE: u32 = 32;

pub const KEY_A: u32 = 97;
pub const KEY_D: u32 = 100;
pub const KEY_S: u32 = 115;
pub const KEY_W: u32 = 119;

pub const KEY_F11: u32 = 0x4000_0044;
pub const KEY_RIGHT: u32 = 0x4000_004F;
pub const KEY_LEFT: u32 = 0x4000_0050;
pub const KEY_DOWN: u32 = 0x4000_0051;
pub const KEY_UP: u32 = 0x4000_0052;
pub const KEY_LSHIFT: u32 = 0x4000_00E1;
pub const KEY_LCTRL: u32 = 0x4000_00E0;

/// Human-readable key name for settings screens.
pub fn key_name(key_code: u32) -> String {
    match key_code {
        KEY_BACKSPACE => "Backspace".to_string(),
        KEY_TAB => "Tab".to_string(),
        KEY_RETURN => "Return".to_string(),
        KEY_ESCAPE => "Escape".to_string(),
        KEY_SPACE => "Space".to_string(),
        KEY_F11 => "F11".to_string(),
        KEY_RIGHT => "Right".to_string(),
        KEY_LEFT => "Left".to_string(),
        KEY_DOWN => "Down".to_string(),
        KEY_UP => "Up".to_string(),
        KEY_LSHIFT => "Left Shift".to_string(),
        KEY_LCTRL => "Left Ctrl".to_string(),
        c if (33..127).contains(&c) => {
            // Printable ASCII, shown uppercased.
            (c as u8 as char).to_ascii_uppercase().to_string()
        }
        c => format!("Key {}", c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_keys_uppercase() {
        assert_eq!(key_name(KEY_A), "A");
        assert_eq!(key_name(KEY_W), "W");
    }

    #[test]
    fn named_keys() {
        assert_eq!(key_name(KEY_ESCAPE), "Escape");
        assert_eq!(key_name(KEY_F11), "F11");
    }

    #[test]
    fn unknown_keys_fall_back_to_code() {
        assert_eq!(key_name(0x4000_1234), format!("Key {}", 0x4000_1234));
    }
}
