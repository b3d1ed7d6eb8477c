use std::time::Instant;

use crate::core::timer::Throttled;

/// Longest frame delta handed to the animation code, in seconds
pub const MAX_FRAME_DELTA: f32 = 0.25;
pub const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    /// Seconds since the previous frame, capped at [`MAX_FRAME_DELTA`]
    pub delta: f32,
    /// Seconds since the previous frame as measured, for wall-clock timers
    pub elapsed: f32,
}

/// Wall clock for the render loop. Deltas are capped so a stalled window
/// does not fast-forward the animation when it resumes.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn tick(&mut self) -> FrameInfo {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameInfo {
        let elapsed = now
            .saturating_duration_since(self.last_frame_time)
            .as_secs_f32();
        let time = now.saturating_duration_since(self.start_time).as_secs_f32();

        let info = FrameInfo {
            number: self.frame_number,
            time,
            delta: elapsed.min(MAX_FRAME_DELTA),
            elapsed,
        };

        self.frame_number += 1;
        self.last_frame_time = now;
        info
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames per second averaged over [`FPS_UPDATE_INTERVAL`]
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    fps: f32,
    window: Throttled,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: 0,
            fps: 0.0,
            window: Throttled::new(FPS_UPDATE_INTERVAL),
        }
    }

    /// Count one frame. Returns the new average when the window closes.
    pub fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        let interval = self.window.try_tick(delta)?;
        self.fps = self.frames as f32 / interval;
        self.frames = 0;
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
