use glam::{Mat4, Vec3};

use crate::camera::PerspectiveCamera;
use crate::config::Theme;
use crate::overlay::HudStats;
use crate::types::{DotInstance, SceneUniform};

/// Ambient fill plus one directional key light aimed at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient_color: Vec3,
    pub ambient_intensity: f32,
    pub directional_color: Vec3,
    pub directional_intensity: f32,
    pub directional_position: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_color: Vec3::ONE,
            ambient_intensity: 0.6,
            directional_color: Vec3::ONE,
            directional_intensity: 1.0,
            directional_position: Vec3::new(2.0, 4.0, 5.0),
        }
    }
}

impl Lighting {
    /// Unit vector from the lit surface toward the light.
    pub fn light_direction(&self) -> Vec3 {
        self.directional_position.normalize_or_zero()
    }
}

/// Everything the renderer needs for one frame.
pub struct SceneFrame<'a> {
    pub camera: &'a PerspectiveCamera,
    pub model_transform: Mat4,
    pub lighting: &'a Lighting,
    pub theme: Theme,
    pub backdrop: &'a [DotInstance],
    pub hud: Option<&'a HudStats>,
}

impl SceneFrame<'_> {
    pub fn scene_uniform(&self) -> SceneUniform {
        let normal_matrix = self.model_transform.inverse().transpose();
        let light = self.lighting;
        SceneUniform {
            view_proj: self.camera.view_projection().to_cols_array_2d(),
            model: self.model_transform.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            light_direction: light.light_direction().extend(light.directional_intensity).to_array(),
            light_color: light.directional_color.extend(1.0).to_array(),
            ambient: light.ambient_color.extend(light.ambient_intensity).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lighting() {
        let lighting = Lighting::default();
        assert_eq!(lighting.ambient_intensity, 0.6);
        assert_eq!(lighting.directional_intensity, 1.0);
        let dir = lighting.light_direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.y > 0.0 && dir.z > 0.0);
    }

    #[test]
    fn test_scene_uniform_packs_lighting() {
        let camera = PerspectiveCamera::with_aspect(1.0);
        let lighting = Lighting::default();
        let frame = SceneFrame {
            camera: &camera,
            model_transform: Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0)),
            lighting: &lighting,
            theme: Theme::Light,
            backdrop: &[],
            hud: None,
        };
        let uniform = frame.scene_uniform();
        assert_eq!(uniform.ambient, [1.0, 1.0, 1.0, 0.6]);
        assert_eq!(uniform.light_direction[3], 1.0);
        assert_eq!(uniform.model[3], [0.0, -1.0, 0.0, 1.0]);
        // translation-only transform leaves normals unchanged
        assert_eq!(
            Mat4::from_cols_array_2d(&uniform.normal_matrix).transform_vector3(Vec3::Y),
            Vec3::Y
        );
    }
}
