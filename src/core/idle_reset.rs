use super::timer::Countdown;

pub const IDLE_RESET_SECONDS: f32 = 5.0;

/// Single-shot timer that sends the camera home some time after a model is fitted.
#[derive(Debug, Clone)]
pub struct IdleReset {
    countdown: Countdown,
}

impl IdleReset {
    pub fn new() -> Self {
        Self::with_delay(IDLE_RESET_SECONDS)
    }

    pub fn with_delay(seconds: f32) -> Self {
        Self {
            countdown: Countdown::new(seconds),
        }
    }

    /// Start the countdown; a pending one is replaced.
    pub fn arm(&mut self) {
        self.countdown.start();
    }

    pub fn cancel(&mut self) {
        self.countdown.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.countdown.is_active()
    }

    /// True on the frame the delay runs out.
    pub fn tick(&mut self, delta: f32) -> bool {
        self.countdown.tick(delta)
    }
}

impl Default for IdleReset {
    fn default() -> Self {
        Self::new()
    }
}
