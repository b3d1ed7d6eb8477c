use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ASSET_PATH: &str = "app.glb";
pub const DEFAULT_ZOOM_MULTIPLIER: f32 = 1.5;
pub const MIN_ZOOM_MULTIPLIER: f32 = 0.1;
pub const MAX_ELEVATION_DEGREES: f32 = 89.0;

/// Zoom multipliers below 0.1 would put the camera inside the model.
pub fn clamp_zoom(multiplier: f32) -> f32 {
    if multiplier.is_nan() {
        return MIN_ZOOM_MULTIPLIER;
    }
    multiplier.max(MIN_ZOOM_MULTIPLIER)
}

/// Elevation stays off the poles so the orbit never flips.
pub fn clamp_elevation(degrees: f32) -> f32 {
    if degrees.is_nan() {
        return 0.0;
    }
    degrees.clamp(-MAX_ELEVATION_DEGREES, MAX_ELEVATION_DEGREES)
}

/// Light/dark palette shared by the backdrop and the clear colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn background(self) -> [f32; 4] {
        match self {
            Theme::Light => [0.973, 0.976, 0.984, 1.0],
            Theme::Dark => [0.059, 0.071, 0.098, 1.0],
        }
    }

    pub fn dot_color(self) -> [f32; 4] {
        match self {
            Theme::Light => [0.059, 0.090, 0.165, 1.0],
            Theme::Dark => [0.796, 0.835, 0.882, 1.0],
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}', expected light or dark", other)),
        }
    }
}

/// Viewer settings. Only zoom and elevation change after mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    pub asset_path: PathBuf,
    pub variable_speed: bool,
    pub zoom_multiplier: f32,
    pub elevation_degrees: f32,
    pub theme: Theme,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            asset_path: PathBuf::from(DEFAULT_ASSET_PATH),
            variable_speed: true,
            zoom_multiplier: DEFAULT_ZOOM_MULTIPLIER,
            elevation_degrees: 0.0,
            theme: Theme::Light,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ViewerConfig =
            serde_json::from_str(json).context("Failed to parse viewer config")?;
        Ok(config.clamped())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read viewer config: {:?}", path))?;
        Self::from_json_str(&json).with_context(|| format!("Invalid viewer config: {:?}", path))
    }

    pub fn set_zoom_multiplier(&mut self, multiplier: f32) {
        self.zoom_multiplier = clamp_zoom(multiplier);
    }

    pub fn set_elevation_degrees(&mut self, degrees: f32) {
        self.elevation_degrees = clamp_elevation(degrees);
    }

    pub fn clamped(mut self) -> Self {
        self.set_zoom_multiplier(self.zoom_multiplier);
        self.set_elevation_degrees(self.elevation_degrees);
        self
    }
}
