use glam::IVec2;

/// Smallest window the engine will offer in the resolutions list.
pub const MIN_DISPLAY_SIZE: IVec2 = IVec2::new(800, 600);

/// A selectable window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    pub size: IVec2,
    /// Matches the desktop resolution.
    pub native: bool,
}

impl DisplayMode {
    /// Label for resolution dropdowns, e.g. `1920x1080 (Native)`.
    pub fn label(&self) -> String {
        if self.native {
            format!("{}x{} (Native)", self.size.x, self.size.y)
        } else {
            format!("{}x{}", self.size.x, self.size.y)
        }
    }
}

/// Build the selectable mode list from the sizes the host reports:
/// drop sub-minimum sizes, dedupe, sort ascending and mark the native one.
pub fn collect_display_modes(sizes: &[IVec2], native: IVec2) -> Vec<DisplayMode> {
    let mut sizes: Vec<IVec2> = sizes
        .iter()
        .copied()
        .chain(std::iter::once(native))
        .filter(|s| s.x >= MIN_DISPLAY_SIZE.x && s.y >= MIN_DISPLAY_SIZE.y)
        .collect();
    if sizes.is_empty() {
        // A desktop below the minimum still needs one entry to run in.
        sizes.push(native);
    }
    sizes.sort_by_key(|s| (s.x, s.y));
    sizes.dedup();
    sizes
        .into_iter()
        .map(|size| DisplayMode {
            size,
            native: size == native,
        })
        .collect()
}

/// Index of the mode closest to `wanted`, preferring the native mode on a
/// tie. The list must be non-empty.
pub fn closest_display_mode(modes: &[DisplayMode], wanted: IVec2) -> usize {
    let mut best = 0;
    let mut best_score = i64::MAX;
    for (i, mode) in modes.iter().enumerate() {
        let d = (mode.size - wanted).abs();
        let score = (d.x as i64 + d.y as i64) * 2 - mode.native as i64;
        if score < best_score {
            best_score = score;
            best = i;
        }
    }
    best
}
