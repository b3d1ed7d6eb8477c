use glam::Vec3;
use model_display::camera::{PerspectiveCamera, FIELD_OF_VIEW_DEGREES};
use model_display::core::controls::OrbitControls;
use model_display::core::fitting::{apply_camera_settings, fit_distance, CameraPose, FitState};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4 * b.abs().max(1.0)
}

#[cfg(test)]
mod fit_distance_tests {
    use super::*;

    #[test]
    fn test_unit_cube_square_viewport() {
        // height bound 1/(2 tan 30°) = 0.866 loses to the depth of 1
        let distance = fit_distance(Vec3::ONE, FIELD_OF_VIEW_DEGREES, 1.0);
        assert_eq!(distance, 1.0);
    }

    #[test]
    fn test_tall_model_is_height_bound() {
        let size = Vec3::new(1.0, 10.0, 1.0);
        let expected = 10.0 / (2.0 * 30f32.to_radians().tan());
        assert!(close(fit_distance(size, FIELD_OF_VIEW_DEGREES, 16.0 / 9.0), expected));
    }

    #[test]
    fn test_narrow_viewport_is_width_bound() {
        let size = Vec3::new(6.0, 1.0, 1.0);
        let aspect = 375.0 / 667.0;
        let expected = 6.0 / (2.0 * 30f32.to_radians().tan()) / aspect;
        assert!(close(fit_distance(size, FIELD_OF_VIEW_DEGREES, aspect), expected));
    }

    #[test]
    fn test_never_smaller_than_any_bound() {
        let sizes = [
            Vec3::new(3.0, 1.0, 0.5),
            Vec3::new(0.2, 4.0, 1.0),
            Vec3::new(1.0, 1.0, 9.0),
        ];
        for aspect in [0.5, 1.0, 2.0] {
            for size in sizes {
                let distance = fit_distance(size, FIELD_OF_VIEW_DEGREES, aspect);
                let tan = 30f32.to_radians().tan();
                assert!(distance >= size.z);
                assert!(distance + 1e-5 >= size.y / (2.0 * tan));
                assert!(distance + 1e-5 >= size.x / (2.0 * tan) / aspect);
            }
        }
    }

    #[test]
    fn test_wider_window_never_moves_camera_back() {
        let size = Vec3::new(4.0, 2.0, 1.0);
        let narrow = fit_distance(size, FIELD_OF_VIEW_DEGREES, 0.75);
        let wide = fit_distance(size, FIELD_OF_VIEW_DEGREES, 2.0);
        assert!(wide <= narrow);
    }
}

#[cfg(test)]
mod camera_pose_tests {
    use super::*;

    #[test]
    fn test_distance_scales_with_zoom() {
        for zoom in [0.1, 0.5, 1.0, 1.5, 3.0] {
            let pose = CameraPose::compute(2.0, zoom, 30.0).unwrap();
            assert!(close(pose.distance, 2.0 * zoom));
            assert!(close(pose.position.length(), pose.distance));
        }
    }

    #[test]
    fn test_zoom_below_minimum_is_clamped() {
        let pose = CameraPose::compute(2.0, 0.0, 0.0).unwrap();
        assert!(close(pose.distance, 0.2));
    }

    #[test]
    fn test_elevation_sets_height_above_target() {
        let pose = CameraPose::compute(1.0, 1.0, 30.0).unwrap();
        assert!(close(pose.position.y, 0.5));
        assert_eq!(pose.position.x, 0.0);
        assert!(pose.position.z > 0.0);
    }

    #[test]
    fn test_negative_elevation_looks_from_below() {
        let pose = CameraPose::compute(1.0, 1.0, -45.0).unwrap();
        assert!(pose.position.y < 0.0);
    }

    #[test]
    fn test_elevation_clamped_short_of_pole() {
        let pose = CameraPose::compute(1.0, 1.0, 400.0).unwrap();
        assert!(pose.position.z > 0.0);
        assert!(close(pose.position.y, 89f32.to_radians().sin()));
    }

    #[test]
    fn test_depth_range_always_valid() {
        for fit in [1e-4, 0.01, 1.0, 250.0, 1e5] {
            for zoom in [0.1, 1.5, 4.0] {
                let pose = CameraPose::compute(fit, zoom, 0.0).unwrap();
                assert!(pose.near >= 0.1);
                assert!(pose.far > pose.near);
                assert!(pose.far >= pose.distance || pose.distance < pose.near);
            }
        }
    }
}

#[cfg(test)]
mod apply_settings_tests {
    use super::*;

    fn fitted(distance: f32) -> (FitState, PerspectiveCamera, OrbitControls) {
        let camera = PerspectiveCamera::with_aspect(4.0 / 3.0);
        let controls = OrbitControls::new(&camera);
        let fit = FitState {
            fit_distance: distance,
            ..Default::default()
        };
        (fit, camera, controls)
    }

    #[test]
    fn test_home_pose_follows_latest_settings() {
        let (mut fit, mut camera, mut controls) = fitted(2.0);
        assert!(apply_camera_settings(&mut fit, &mut camera, &mut controls, 1.5, 0.0));
        assert_eq!(fit.home_camera_position, Vec3::new(0.0, 0.0, 3.0));

        assert!(apply_camera_settings(&mut fit, &mut camera, &mut controls, 2.0, 0.0));
        assert_eq!(fit.home_camera_position, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(camera.position, fit.home_camera_position);
    }

    #[test]
    fn test_same_settings_twice_give_same_pose() {
        let (mut fit, mut camera, mut controls) = fitted(2.0);
        assert!(apply_camera_settings(&mut fit, &mut camera, &mut controls, 2.3, 37.0));
        let first = (camera, fit, controls.distance());

        assert!(apply_camera_settings(&mut fit, &mut camera, &mut controls, 2.3, 37.0));
        assert_eq!(camera, first.0);
        assert_eq!(fit, first.1);
        assert_eq!(controls.distance(), first.2);
    }

    #[test]
    fn test_controls_resync_to_new_pose() {
        let (mut fit, mut camera, mut controls) = fitted(2.0);
        apply_camera_settings(&mut fit, &mut camera, &mut controls, 1.0, 0.0);
        assert!(close(controls.distance(), 2.0));
        assert_eq!(controls.target, Vec3::ZERO);
    }

    #[test]
    fn test_projection_updated() {
        let (mut fit, mut camera, mut controls) = fitted(50.0);
        apply_camera_settings(&mut fit, &mut camera, &mut controls, 1.0, 0.0);
        assert!(close(camera.near, 5.0));
        assert!(close(camera.far, 500.0));
        let expected = PerspectiveCamera::new(camera.fov_degrees, camera.aspect, 5.0, 500.0);
        assert_eq!(camera.projection_matrix(), expected.projection_matrix());
    }
}
