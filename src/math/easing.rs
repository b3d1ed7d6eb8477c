use std::f32::consts::FRAC_PI_2;

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Decelerating sine curve, `t` in [0, 1].
pub fn out_sine(t: f32) -> f32 {
    (t.clamp(0.0, 1.0) * FRAC_PI_2).sin()
}

/// Quadratic ease that accelerates through the first half and decelerates through the second.
pub fn in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 15.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 15.0, 1.0), 15.0);
        assert!((lerp(0.0, 10.0, 0.05) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_easings_hit_endpoints() {
        for ease in [out_sine as fn(f32) -> f32, in_out_quad] {
            assert!(ease(0.0).abs() < 1e-6);
            assert!((ease(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_in_out_quad_midpoint() {
        assert!((in_out_quad(0.5) - 0.5).abs() < 1e-6);
        assert!(in_out_quad(0.25) < 0.25);
        assert!(in_out_quad(0.75) > 0.75);
    }

    #[test]
    fn test_out_sine_front_loaded() {
        assert!(out_sine(0.5) > 0.5);
    }

    #[test]
    fn test_easing_clamps_input() {
        assert_eq!(out_sine(2.0), out_sine(1.0));
        assert_eq!(in_out_quad(-1.0), 0.0);
    }
}
