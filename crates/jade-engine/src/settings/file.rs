//! Settings file format: plain text, one entry per line.
//!
//! ```text
//! // My Game settings
//! 1.0.4242
//! // Music volume
//! 0;1;0.800000
//! ```
//!
//! `//` lines are comments. The first payload line is the build version;
//! a file written by a different build is discarded wholesale and the
//! defaults are re-saved. Entry lines are `id;type;value` with type
//! 0 = int, 1 = float, 2 = bool.

use crate::settings::{BuildVersion, SettingValue};

const TYPE_INT: u32 = 0;
const TYPE_FLOAT: u32 = 1;
const TYPE_BOOL: u32 = 2;

/// Parse a settings file. Returns `None` when the build version does not
/// match (caller keeps defaults). Malformed entry lines are skipped with
/// a warning so one bad line cannot take the file down.
pub fn parse(text: &str, expected: BuildVersion) -> Option<Vec<(u32, SettingValue)>> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("//"));

    let version_line = lines.next()?;
    if parse_version(version_line) != Some(expected) {
        log::info!(
            "settings file version '{}' does not match build {}.{}.{}, using defaults",
            version_line,
            expected.0,
            expected.1,
            expected.2
        );
        return None;
    }

    let mut entries = Vec::new();
    for line in lines {
        match parse_entry(line) {
            Some(entry) => entries.push(entry),
            None => log::warn!("skipping malformed settings line: '{}'", line),
        }
    }
    Some(entries)
}

/// Render entries (with their descriptions) into file text.
pub fn serialize<'a>(
    app_name: &str,
    version: BuildVersion,
    entries: impl Iterator<Item = (u32, &'a str, SettingValue)>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("// {} settings\n", app_name));
    out.push_str(&format!("{}.{}.{}\n", version.0, version.1, version.2));
    for (id, description, value) in entries {
        if !description.is_empty() {
            out.push_str(&format!("// {}\n", description));
        }
        let line = match value {
            SettingValue::Int(v) => format!("{};{};{}\n", id, TYPE_INT, v),
            SettingValue::Float(v) => format!("{};{};{:.6}\n", id, TYPE_FLOAT, v),
            SettingValue::Bool(v) => format!("{};{};{}\n", id, TYPE_BOOL, v as i32),
        };
        out.push_str(&line);
    }
    out
}

fn parse_version(line: &str) -> Option<BuildVersion> {
    let mut parts = line.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let hash = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(BuildVersion(major, minor, hash))
}

fn parse_entry(line: &str) -> Option<(u32, SettingValue)> {
    let mut parts = line.split(';');
    let id: u32 = parts.next()?.trim().parse().ok()?;
    let kind: u32 = parts.next()?.trim().parse().ok()?;
    let raw = parts.next()?.trim();
    let value = match kind {
        TYPE_INT => SettingValue::Int(raw.parse().ok()?),
        TYPE_FLOAT => SettingValue::Float(raw.parse().ok()?),
        TYPE_BOOL => SettingValue::Bool(raw.parse::<i32>().ok()? != 0),
        _ => return None,
    };
    Some((id, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION: BuildVersion = BuildVersion(1, 0, 4242);

    #[test]
    fn round_trip() {
        let entries = vec![
            (0u32, "Music volume", SettingValue::Float(0.8)),
            (2u32, "Fullscreen", SettingValue::Bool(true)),
            (7u32, "Lives", SettingValue::Int(3)),
        ];
        let text = serialize(
            "Test",
            VERSION,
            entries.iter().map(|(id, d, v)| (*id, *d, *v)),
        );
        let parsed = parse(&text, VERSION).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0], (0, SettingValue::Float(0.8)));
        assert_eq!(parsed[1], (2, SettingValue::Bool(true)));
        assert_eq!(parsed[2], (7, SettingValue::Int(3)));
    }

    #[test]
    fn version_mismatch_discards_file() {
        let text = serialize("Test", VERSION, std::iter::empty());
        assert!(parse(&text, BuildVersion(1, 0, 9999)).is_none());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let text = "1.0.4242\n0;1;0.5\nthis is not an entry\n1;9;5\n2;0;4\n";
        let parsed = parse(text, VERSION).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1], (2, SettingValue::Int(4)));
    }

    #[test]
    fn comments_and_blank_lines_ignored() {
        let text = "\n// header\n1.0.4242\n\n// Music volume\n0;1;0.250000\n";
        let parsed = parse(text, VERSION).unwrap();
        assert_eq!(parsed, vec![(0, SettingValue::Float(0.25))]);
    }
}
