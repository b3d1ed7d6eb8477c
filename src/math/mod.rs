mod aabb;
mod easing;

pub use aabb::AABB;
pub use easing::{in_out_quad, lerp, out_sine};
