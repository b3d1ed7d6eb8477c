// cli.rs - Command-line interface configuration
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{Theme, ViewerConfig};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "model-display")]
#[command(about = "Auto-rotating glTF model viewer", long_about = None)]
pub struct Cli {
    /// glTF or GLB file to display
    #[arg(value_name = "ASSET")]
    pub asset_path: Option<PathBuf>,

    /// Same as the positional path; wins when both are given
    #[arg(long = "asset", value_name = "PATH")]
    pub asset: Option<PathBuf>,

    /// JSON file with viewer settings; flags override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rotate at a constant speed instead of speeding up around the back
    #[arg(long = "fixed-speed")]
    pub fixed_speed: bool,

    /// Camera distance as a multiple of the fit distance (min 0.1)
    #[arg(long)]
    pub zoom: Option<f32>,

    /// Camera elevation in degrees, clamped to [-89, 89]
    #[arg(long, allow_hyphen_values = true)]
    pub elevation: Option<f32>,

    /// Initial theme: light or dark
    #[arg(long)]
    pub theme: Option<Theme>,

    /// Disable UI elements and console output
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

impl Cli {
    /// Start from the config file (or defaults) and apply the flags on top
    pub fn viewer_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::from_json_file(path)?,
            None => ViewerConfig::default(),
        };

        if let Some(path) = self.asset.as_ref().or(self.asset_path.as_ref()) {
            config.asset_path = path.clone();
        }
        if self.fixed_speed {
            config.variable_speed = false;
        }
        if let Some(zoom) = self.zoom {
            config.set_zoom_multiplier(zoom);
        }
        if let Some(elevation) = self.elevation {
            config.set_elevation_degrees(elevation);
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        Ok(config.clamped())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["model-display"]);
        let config = cli.viewer_config().unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert!(!cli.no_ui);
    }

    #[test]
    fn test_flags_override() {
        let cli = Cli::parse_from([
            "model-display",
            "robot.glb",
            "--fixed-speed",
            "--zoom",
            "0.01",
            "--elevation",
            "-120",
            "--theme",
            "dark",
            "--no-ui",
        ]);
        let config = cli.viewer_config().unwrap();
        assert_eq!(config.asset_path, PathBuf::from("robot.glb"));
        assert!(!config.variable_speed);
        assert_eq!(config.zoom_multiplier, 0.1);
        assert_eq!(config.elevation_degrees, -89.0);
        assert_eq!(config.theme, Theme::Dark);
        assert!(cli.no_ui);
    }

    #[test]
    fn test_asset_flag_wins_over_positional() {
        let cli = Cli::parse_from(["model-display", "a.glb", "--asset", "b.glb"]);
        assert_eq!(cli.viewer_config().unwrap().asset_path, PathBuf::from("b.glb"));
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let cli = Cli::parse_from(["model-display", "--config", "no/such/viewer.json"]);
        assert!(cli.viewer_config().is_err());
    }
}
