//! Framing a loaded model: the fit distance and the camera pose derived from it.

use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::config::{clamp_elevation, clamp_zoom};

use super::controls::OrbitControls;

/// Per-asset fit result. `fit_distance == 0.0` means nothing has been fitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitState {
    pub fit_distance: f32,
    pub home_camera_position: Vec3,
    pub home_target_position: Vec3,
}

impl FitState {
    pub fn is_fit(&self) -> bool {
        self.fit_distance > 0.0
    }
}

/// Camera distance at which a model of `size` fills the vertical field of view,
/// the horizontal one, or its own depth, whichever is largest.
pub fn fit_distance(size: Vec3, fov_degrees: f32, aspect: f32) -> f32 {
    let half_fov_tan = (fov_degrees.to_radians() / 2.0).tan();
    let fit_height_distance = size.y / (2.0 * half_fov_tan);
    let fit_width_distance = size.x / (2.0 * half_fov_tan) / aspect.max(f32::EPSILON);
    fit_height_distance.max(fit_width_distance).max(size.z)
}

/// Camera placement for one zoom/elevation combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub distance: f32,
    pub position: Vec3,
    pub near: f32,
    pub far: f32,
}

impl CameraPose {
    /// `None` until a positive fit distance exists.
    pub fn compute(fit_distance: f32, zoom_multiplier: f32, elevation_degrees: f32) -> Option<Self> {
        if !(fit_distance > 0.0) {
            return None;
        }

        let distance = fit_distance * clamp_zoom(zoom_multiplier);
        let elevation = clamp_elevation(elevation_degrees).to_radians();
        let position = Vec3::new(0.0, elevation.sin() * distance, elevation.cos() * distance);

        let near = (distance / 10.0).max(0.1);
        // Sub-centimetre models would otherwise get far <= near.
        let far = if distance * 10.0 > near {
            distance * 10.0
        } else {
            near * 10.0
        };

        Some(Self {
            distance,
            position,
            near,
            far,
        })
    }
}

/// Place the camera for the current zoom and elevation and record the result as the home pose.
/// Returns false, touching nothing, while `fit` holds no distance.
pub fn apply_camera_settings(
    fit: &mut FitState,
    camera: &mut PerspectiveCamera,
    controls: &mut OrbitControls,
    zoom_multiplier: f32,
    elevation_degrees: f32,
) -> bool {
    let Some(pose) = CameraPose::compute(fit.fit_distance, zoom_multiplier, elevation_degrees)
    else {
        return false;
    };

    camera.position = pose.position;
    camera.near = pose.near;
    camera.far = pose.far;
    camera.look_at(controls.target);
    camera.update_projection_matrix();

    fit.home_camera_position = camera.position;
    fit.home_target_position = controls.target;
    controls.stop_motion();
    controls.sync(camera);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_distance_height_bound() {
        // tan(30°) * 2 = 1.1547; a 2-unit tall model needs ~1.732
        let distance = fit_distance(Vec3::new(0.1, 2.0, 0.1), 60.0, 1.0);
        assert!((distance - 3.0f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_fit_distance_width_bound_uses_aspect() {
        let wide = fit_distance(Vec3::new(4.0, 0.1, 0.1), 60.0, 0.5);
        assert!((wide - 4.0 / (2.0 * 30f32.to_radians().tan()) / 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_fit_distance_depth_bound() {
        assert_eq!(fit_distance(Vec3::new(0.1, 0.1, 50.0), 60.0, 1.0), 50.0);
    }

    #[test]
    fn test_pose_none_until_fit() {
        assert!(CameraPose::compute(0.0, 1.5, 0.0).is_none());
        assert!(CameraPose::compute(-1.0, 1.5, 0.0).is_none());
        assert!(CameraPose::compute(f32::NAN, 1.5, 0.0).is_none());
    }

    #[test]
    fn test_pose_elevation_zero() {
        let pose = CameraPose::compute(2.0, 1.5, 0.0).unwrap();
        assert_eq!(pose.distance, 3.0);
        assert_eq!(pose.position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(pose.near, 0.3);
        assert_eq!(pose.far, 30.0);
    }

    #[test]
    fn test_pose_near_floor() {
        let pose = CameraPose::compute(0.5, 1.0, 0.0).unwrap();
        assert_eq!(pose.near, 0.1);
        assert_eq!(pose.far, 5.0);
    }

    #[test]
    fn test_pose_tiny_model_keeps_depth_range() {
        let pose = CameraPose::compute(0.001, 0.1, 0.0).unwrap();
        assert!(pose.near < pose.far);
    }

    #[test]
    fn test_apply_is_noop_without_fit() {
        let mut camera = PerspectiveCamera::with_aspect(1.0);
        let mut controls = OrbitControls::new(&camera);
        let mut fit = FitState::default();
        let before = camera;
        assert!(!apply_camera_settings(&mut fit, &mut camera, &mut controls, 1.5, 0.0));
        assert_eq!(camera, before);
        assert_eq!(fit, FitState::default());
    }

    #[test]
    fn test_apply_records_home_pose() {
        let mut camera = PerspectiveCamera::with_aspect(1.0);
        let mut controls = OrbitControls::new(&camera);
        let mut fit = FitState {
            fit_distance: 4.0,
            ..Default::default()
        };
        assert!(apply_camera_settings(&mut fit, &mut camera, &mut controls, 1.0, 90.0));

        let expected_angle = 89f32.to_radians();
        assert!((camera.position.y - expected_angle.sin() * 4.0).abs() < 1e-5);
        assert!((camera.position.z - expected_angle.cos() * 4.0).abs() < 1e-5);
        assert_eq!(fit.home_camera_position, camera.position);
        assert_eq!(fit.home_target_position, Vec3::ZERO);
        assert_eq!(camera.look_target(), Vec3::ZERO);
    }
}
