use glam::{IVec2, Vec2};

use crate::core::rect::Rect;

/// Margin (in render pixels) where the cursor starts panning the world camera.
const PAN_BORDER: i32 = 50;

/// The render resolution is split into this many steps when fitting the
/// scaled output buffer into a window.
const SCALE_STEPS: i32 = 16;

/// UI camera: maps between window pixels and the fixed render resolution.
///
/// The engine always lays out UI at the render resolution; the host blits
/// the result into a letterboxed `scaled` rect inside the actual window.
#[derive(Debug, Clone)]
pub struct UiCamera {
    resolution: IVec2,
    window: IVec2,
    scaled: Rect,
}

impl UiCamera {
    pub fn new(resolution: IVec2) -> Self {
        Self {
            resolution,
            window: resolution,
            scaled: Rect::from_pos_size(IVec2::ZERO, resolution),
        }
    }

    /// Render resolution (layout space).
    pub fn resolution(&self) -> IVec2 {
        self.resolution
    }

    pub fn window_size(&self) -> IVec2 {
        self.window
    }

    /// Letterboxed output rect inside the window.
    pub fn scaled_rect(&self) -> Rect {
        self.scaled
    }

    /// Update window geometry directly.
    pub fn set_window(&mut self, window: IVec2, scaled_size: IVec2, scaled_offset: IVec2) {
        self.window = window;
        self.scaled = Rect::from_pos_size(scaled_offset, scaled_size);
    }

    /// Fit the output buffer into a window: the largest multiple of a
    /// 1/16th of the render resolution that fits, centered.
    pub fn fit_window(&mut self, window: IVec2) {
        // Scale in sixteenths of the full resolution so a window that
        // matches the resolution exactly maps 1:1.
        let k = (window * SCALE_STEPS / self.resolution.max(IVec2::ONE))
            .min_element()
            .max(1);
        let scaled = self.resolution * k / SCALE_STEPS;
        let offset = (window - scaled) / 2;
        self.set_window(window, scaled, offset);
    }

    /// Map a window-space point into render space, clamping into the
    /// letterboxed area first so off-buffer coordinates stay on the edge.
    pub fn window_to_render(&self, point: IVec2) -> IVec2 {
        let local = (point - self.scaled.position)
            .clamp(IVec2::ZERO, self.scaled.size);
        IVec2::new(
            local.x * self.resolution.x / self.scaled.size.x.max(1),
            local.y * self.resolution.y / self.scaled.size.y.max(1),
        )
    }
}

/// World camera: integer scroll offset between world and screen space.
#[derive(Debug, Clone, Default)]
pub struct WorldCamera {
    offset: Vec2,
}

impl WorldCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> IVec2 {
        self.offset.as_ivec2()
    }

    pub fn set_offset(&mut self, offset: IVec2) {
        self.offset = offset.as_vec2();
    }

    pub fn move_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn world_to_screen(&self, point: IVec2) -> IVec2 {
        point - self.offset()
    }

    pub fn screen_to_world(&self, point: IVec2) -> IVec2 {
        point + self.offset()
    }

    pub fn world_to_screen_f32(&self, point: Vec2) -> Vec2 {
        point - self.offset().as_vec2()
    }

    pub fn world_rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_pos_size(self.world_to_screen(rect.position), rect.size)
    }

    /// Pan when the cursor sits inside the screen-border margin. Speed is
    /// half a screen per second on each axis.
    pub fn screen_border_pan(&mut self, mouse: IVec2, resolution: IVec2, dt: f32) {
        let speed = resolution.as_vec2() * 0.5 * dt;
        if mouse.x < PAN_BORDER {
            self.offset.x -= speed.x;
        } else if mouse.x >= resolution.x - PAN_BORDER {
            self.offset.x += speed.x;
        }
        if mouse.y < PAN_BORDER {
            self.offset.y -= speed.y;
        } else if mouse.y >= resolution.y - PAN_BORDER {
            self.offset.y += speed.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_mapping_when_window_matches_resolution() {
        let mut cam = UiCamera::new(IVec2::new(800, 600));
        cam.fit_window(IVec2::new(800, 600));
        assert_eq!(cam.scaled_rect(), Rect::new(0, 0, 800, 600));
        assert_eq!(
            cam.window_to_render(IVec2::new(123, 456)),
            IVec2::new(123, 456)
        );
    }

    #[test]
    fn letterboxed_window_centers_and_scales() {
        let mut cam = UiCamera::new(IVec2::new(800, 600));
        // 1000x600 window: scaled stays 800x600, offset (100, 0).
        cam.fit_window(IVec2::new(1000, 600));
        assert_eq!(cam.scaled_rect(), Rect::new(100, 0, 800, 600));
        assert_eq!(cam.window_to_render(IVec2::new(100, 0)), IVec2::ZERO);
        assert_eq!(
            cam.window_to_render(IVec2::new(500, 300)),
            IVec2::new(400, 300)
        );
    }

    #[test]
    fn oversized_window_scales_in_sixteenths() {
        let mut cam = UiCamera::new(IVec2::new(800, 600));
        // 1024x768 fits 20/16ths of 800x600: 1000x750, centered.
        cam.fit_window(IVec2::new(1024, 768));
        assert_eq!(cam.scaled_rect(), Rect::new(12, 9, 1000, 750));
        assert_eq!(
            cam.window_to_render(IVec2::new(512, 384)),
            IVec2::new(400, 300)
        );
    }

    #[test]
    fn off_buffer_points_clamp_to_edges() {
        let mut cam = UiCamera::new(IVec2::new(800, 600));
        cam.fit_window(IVec2::new(1000, 600));
        assert_eq!(cam.window_to_render(IVec2::new(0, 0)), IVec2::ZERO);
        assert_eq!(
            cam.window_to_render(IVec2::new(2000, 2000)),
            IVec2::new(800, 600)
        );
    }

    #[test]
    fn half_size_window_halves_coordinates() {
        let mut cam = UiCamera::new(IVec2::new(800, 600));
        cam.fit_window(IVec2::new(400, 300));
        assert_eq!(cam.scaled_rect().size, IVec2::new(400, 300));
        assert_eq!(
            cam.window_to_render(IVec2::new(200, 150)),
            IVec2::new(400, 300)
        );
    }

    #[test]
    fn world_round_trip() {
        let mut cam = WorldCamera::new();
        cam.set_offset(IVec2::new(300, -40));
        let p = IVec2::new(10, 20);
        assert_eq!(cam.world_to_screen(p), IVec2::new(-290, 60));
        assert_eq!(cam.screen_to_world(cam.world_to_screen(p)), p);
    }

    #[test]
    fn border_pan_moves_toward_edges() {
        let mut cam = WorldCamera::new();
        let res = IVec2::new(800, 600);
        cam.screen_border_pan(IVec2::new(0, 300), res, 0.1);
        assert!(cam.offset().x < 0);
        assert_eq!(cam.offset().y, 0);

        let mut cam = WorldCamera::new();
        cam.screen_border_pan(IVec2::new(799, 599), res, 0.1);
        assert!(cam.offset().x > 0);
        assert!(cam.offset().y > 0);
    }

    #[test]
    fn center_of_screen_does_not_pan() {
        let mut cam = WorldCamera::new();
        cam.screen_border_pan(IVec2::new(400, 300), IVec2::new(800, 600), 0.1);
        assert_eq!(cam.offset(), IVec2::ZERO);
    }
}
