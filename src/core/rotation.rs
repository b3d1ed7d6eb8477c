use crate::math::lerp;

pub const SLOW_AUTO_SPEED: f32 = 2.0;
pub const FAST_AUTO_SPEED: f32 = 15.0;
pub const FIXED_AUTO_SPEED: f32 = 3.0;
/// Fraction of the remaining gap closed each frame.
pub const SPEED_BLEND: f32 = 0.05;

/// 1 when the camera faces the model's front (azimuth 0), 0 when it faces the back.
pub fn front_factor(azimuth: f32) -> f32 {
    (azimuth.cos() + 1.0) / 2.0
}

/// Speed the driver eases toward: slow at the front, fast at the back.
pub fn target_speed(azimuth: f32) -> f32 {
    SLOW_AUTO_SPEED + (1.0 - front_factor(azimuth)) * (FAST_AUTO_SPEED - SLOW_AUTO_SPEED)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub current_speed: f32,
}

/// Per-frame auto-rotate speed. Advanced from the render loop, never from a timer.
#[derive(Debug, Clone)]
pub struct AutoRotateDriver {
    variable_speed: bool,
    state: RotationState,
}

impl AutoRotateDriver {
    pub fn new(variable_speed: bool) -> Self {
        let current_speed = if variable_speed {
            SLOW_AUTO_SPEED
        } else {
            FIXED_AUTO_SPEED
        };
        Self {
            variable_speed,
            state: RotationState { current_speed },
        }
    }

    pub fn current_speed(&self) -> f32 {
        self.state.current_speed
    }

    /// Step once for the given azimuth and return the speed to hand to the controls.
    pub fn advance(&mut self, azimuth: f32) -> f32 {
        self.state.current_speed = if self.variable_speed {
            lerp(self.state.current_speed, target_speed(azimuth), SPEED_BLEND)
        } else {
            FIXED_AUTO_SPEED
        };
        self.state.current_speed
    }
}
