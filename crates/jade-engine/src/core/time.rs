/// Frame clock. The host supplies the frame delta; the clock tracks
/// elapsed time, the frame counter and a one-second FPS window.
pub struct Clock {
    delta: f32,
    elapsed: f64,
    frame: u64,
    /// f64 so sixty 1/60 deltas land exactly on the one-second mark.
    fps_window: f64,
    fps_frames: u32,
    fps: u32,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            delta: 0.0,
            elapsed: 0.0,
            frame: 0,
            fps_window: 0.0,
            fps_frames: 0,
            fps: 0,
        }
    }

    /// Advance the clock by one frame. Returns `true` when the FPS
    /// readout was refreshed (once per second).
    pub fn tick(&mut self, frame_dt: f32) -> bool {
        // Negative or absurd deltas (debugger pauses, clock jumps) are clamped.
        let frame_dt = frame_dt.clamp(0.0, 1.0);
        self.delta = frame_dt;
        self.elapsed += frame_dt as f64;
        self.frame += 1;

        self.fps_window += frame_dt as f64;
        self.fps_frames += 1;
        if self.fps_window >= 1.0 {
            self.fps = self.fps_frames;
            self.fps_window -= 1.0;
            self.fps_frames = 0;
            return true;
        }
        false
    }

    /// Delta time of the current frame, in seconds.
    pub fn delta_time(&self) -> f32 {
        self.delta
    }

    /// Total time since the clock started, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of ticks so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Frames counted over the last full second.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
