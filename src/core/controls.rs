use glam::Vec3;
use std::f32::consts::{PI, TAU};

use crate::camera::PerspectiveCamera;

pub const DAMPING_FACTOR: f32 = 0.05;
const POLE_EPSILON: f32 = 1e-6;

/// Camera offset from the orbit target in spherical form.
/// `theta` is the azimuth around +Y measured from +Z, `phi` the polar angle from +Y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    fn make_safe(&mut self) {
        self.phi = self.phi.clamp(POLE_EPSILON, PI - POLE_EPSILON);
    }
}

/// Orbit controller around a target point: damped drag rotation and
/// continuous auto-rotation. Zoom and pan can be switched off.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub rotate_speed: f32,
    pub auto_rotate: bool,
    /// Revolutions per minute at 60 fps are `speed / 2`; 2.0 is one turn every 30 s.
    pub auto_rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    spherical: Spherical,
    spherical_delta: Spherical,
    pan_offset: Vec3,
    scale: f32,
}

impl OrbitControls {
    pub fn new(camera: &PerspectiveCamera) -> Self {
        let mut controls = Self {
            target: Vec3::ZERO,
            enable_damping: false,
            damping_factor: DAMPING_FACTOR,
            enable_zoom: true,
            enable_pan: true,
            rotate_speed: 1.0,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            spherical: Spherical::default(),
            spherical_delta: Spherical::default(),
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        };
        controls.sync(camera);
        controls
    }

    /// Horizontal orbit angle as of the last update, 0 when the camera sits on +Z.
    pub fn azimuthal_angle(&self) -> f32 {
        self.spherical.theta
    }

    pub fn polar_angle(&self) -> f32 {
        self.spherical.phi
    }

    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    /// Re-read the camera pose without applying any pending motion.
    pub fn sync(&mut self, camera: &PerspectiveCamera) {
        self.spherical = Spherical::from_offset(camera.position - self.target);
    }

    /// Drop pending rotation, pan and zoom.
    pub fn stop_motion(&mut self) {
        self.spherical_delta = Spherical::default();
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
    }

    /// Place the camera and target exactly, discarding any motion in flight.
    pub fn reset_to(&mut self, camera: &mut PerspectiveCamera, position: Vec3, target: Vec3) {
        camera.position = position;
        self.target = target;
        camera.look_at(target);
        self.stop_motion();
        self.sync(camera);
    }

    pub fn auto_rotation_angle(&self, delta: f32) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed * delta
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    /// Pointer drag in pixels, scaled so a drag across the full height is one turn.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        self.rotate_left(TAU * dx / height * self.rotate_speed);
        self.rotate_up(TAU * dy / height * self.rotate_speed);
    }

    /// Wheel input; positive moves closer. Returns false when zoom is disabled.
    pub fn zoom_by(&mut self, wheel_delta: f32) -> bool {
        if !self.enable_zoom || wheel_delta == 0.0 {
            return false;
        }
        let factor = 0.95f32.powf(wheel_delta.abs());
        if wheel_delta > 0.0 {
            self.scale *= factor;
        } else {
            self.scale /= factor;
        }
        true
    }

    /// Screen-space pan in pixels. Returns false when pan is disabled.
    pub fn pan_by_pixels(
        &mut self,
        camera: &PerspectiveCamera,
        dx: f32,
        dy: f32,
        viewport_height: f32,
    ) -> bool {
        if !self.enable_pan {
            return false;
        }
        let offset = camera.position - self.target;
        let target_distance = offset.length() * (camera.fov_radians() / 2.0).tan();
        let height = viewport_height.max(1.0);
        let forward = (-offset).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);
        self.pan_offset += -right * (2.0 * dx * target_distance / height)
            + up * (2.0 * dy * target_distance / height);
        true
    }

    /// Advance one frame: apply auto-rotation and pending motion, then move the camera.
    pub fn update(&mut self, camera: &mut PerspectiveCamera, delta: f32) {
        self.spherical = Spherical::from_offset(camera.position - self.target);

        if self.auto_rotate {
            self.rotate_left(self.auto_rotation_angle(delta));
        }

        if self.enable_damping {
            self.spherical.theta += self.spherical_delta.theta * self.damping_factor;
            self.spherical.phi += self.spherical_delta.phi * self.damping_factor;
            self.target += self.pan_offset * self.damping_factor;
        } else {
            self.spherical.theta += self.spherical_delta.theta;
            self.spherical.phi += self.spherical_delta.phi;
            self.target += self.pan_offset;
        }

        self.spherical.make_safe();
        self.spherical.radius =
            (self.spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.position = self.target + self.spherical.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.spherical_delta.theta *= keep;
            self.spherical_delta.phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(position: Vec3) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::with_aspect(1.0);
        camera.position = position;
        camera
    }

    #[test]
    fn test_azimuth_front_and_back() {
        let front = OrbitControls::new(&camera_at(Vec3::new(0.0, 0.0, 5.0)));
        assert!(front.azimuthal_angle().abs() < 1e-6);

        let back = OrbitControls::new(&camera_at(Vec3::new(0.0, 0.0, -5.0)));
        assert!((back.azimuthal_angle().abs() - PI).abs() < 1e-6);

        let side = OrbitControls::new(&camera_at(Vec3::new(5.0, 0.0, 0.0)));
        assert!((side.azimuthal_angle() - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_spherical_round_trip() {
        let offset = Vec3::new(1.0, 2.0, 3.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!((back - offset).length() < 1e-5);
    }

    #[test]
    fn test_update_without_motion_keeps_pose() {
        let mut camera = camera_at(Vec3::new(0.0, 1.0, 4.0));
        let mut controls = OrbitControls::new(&camera);
        controls.update(&mut camera, 1.0 / 60.0);
        assert!((camera.position - Vec3::new(0.0, 1.0, 4.0)).length() < 1e-5);
        assert_eq!(camera.look_target(), Vec3::ZERO);
    }

    #[test]
    fn test_auto_rotate_preserves_distance_and_height() {
        let mut camera = camera_at(Vec3::new(0.0, 1.0, 4.0));
        let mut controls = OrbitControls::new(&camera);
        controls.auto_rotate = true;
        controls.auto_rotate_speed = 3.0;
        for _ in 0..30 {
            controls.update(&mut camera, 1.0 / 60.0);
        }
        assert!((camera.position.length() - Vec3::new(0.0, 1.0, 4.0).length()).abs() < 1e-4);
        assert!((camera.position.y - 1.0).abs() < 1e-4);
        assert!(camera.position.x.abs() > 0.01);
    }

    #[test]
    fn test_auto_rotate_without_damping_matches_angle() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 10.0));
        let mut controls = OrbitControls::new(&camera);
        controls.auto_rotate = true;
        controls.auto_rotate_speed = 2.0;
        controls.update(&mut camera, 1.0);
        // rotate_left subtracts from theta
        let expected = -TAU / 60.0 * 2.0;
        assert!((controls.azimuthal_angle() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_damping_spreads_rotation_over_frames() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 10.0));
        let mut controls = OrbitControls::new(&camera);
        controls.enable_damping = true;
        controls.rotate_left(1.0);
        controls.update(&mut camera, 1.0 / 60.0);
        assert!((controls.azimuthal_angle() + DAMPING_FACTOR).abs() < 1e-5);
        controls.update(&mut camera, 1.0 / 60.0);
        assert!(controls.azimuthal_angle() < -DAMPING_FACTOR);
    }

    #[test]
    fn test_zoom_and_pan_disabled() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 10.0));
        let mut controls = OrbitControls::new(&camera);
        controls.enable_zoom = false;
        controls.enable_pan = false;
        assert!(!controls.zoom_by(3.0));
        assert!(!controls.pan_by_pixels(&camera, 40.0, 10.0, 600.0));
        controls.update(&mut camera, 1.0 / 60.0);
        assert!((camera.position - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);
        assert_eq!(controls.target, Vec3::ZERO);
    }

    #[test]
    fn test_zoom_in_moves_closer() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 10.0));
        let mut controls = OrbitControls::new(&camera);
        assert!(controls.zoom_by(1.0));
        controls.update(&mut camera, 1.0 / 60.0);
        assert!((camera.position.z - 9.5).abs() < 1e-4);
    }

    #[test]
    fn test_polar_angle_stays_off_pole() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 10.0));
        let mut controls = OrbitControls::new(&camera);
        controls.rotate_up(10.0);
        controls.update(&mut camera, 1.0 / 60.0);
        assert!(controls.polar_angle() > 0.0);
        assert!(camera.position.is_finite());
    }

    #[test]
    fn test_reset_to_discards_motion() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 10.0));
        let mut controls = OrbitControls::new(&camera);
        controls.enable_damping = true;
        controls.rotate_left(2.0);
        controls.update(&mut camera, 1.0 / 60.0);

        controls.reset_to(&mut camera, Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 10.0));
        assert!(controls.azimuthal_angle().abs() < 1e-6);

        controls.update(&mut camera, 1.0 / 60.0);
        assert!((camera.position - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);
    }
}
