use crate::config::{Theme, MAX_ELEVATION_DEGREES, MIN_ZOOM_MULTIPLIER};
use crate::core::viewer::AssetPhase;

pub const MAX_ZOOM_SLIDER: f32 = 4.0;

/// Values shown in the overlay for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudStats {
    pub fps: f32,
    pub rotation_speed: f32,
    pub zoom_multiplier: f32,
    pub elevation_degrees: f32,
    pub variable_speed: bool,
    pub theme: Theme,
    pub asset: AssetPhase,
}

/// Changes requested through the overlay widgets
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlayActions {
    pub zoom_multiplier: Option<f32>,
    pub elevation_degrees: Option<f32>,
    pub toggle_theme: bool,
}

impl OverlayActions {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Later values win; theme toggles cancel out in pairs.
    pub fn merge(&mut self, other: OverlayActions) {
        if other.zoom_multiplier.is_some() {
            self.zoom_multiplier = other.zoom_multiplier;
        }
        if other.elevation_degrees.is_some() {
            self.elevation_degrees = other.elevation_degrees;
        }
        self.toggle_theme ^= other.toggle_theme;
    }
}

fn accent(theme: Theme) -> egui::Color32 {
    match theme {
        Theme::Light => egui::Color32::from_rgb(37, 99, 235),
        Theme::Dark => egui::Color32::from_rgb(74, 158, 255),
    }
}

fn status_text(phase: AssetPhase) -> &'static str {
    match phase {
        AssetPhase::Pending => "loading",
        AssetPhase::Fitted => "ready",
        AssetPhase::Degenerate => "empty model",
        AssetPhase::Failed => "load failed",
    }
}

/// FPS readout in the corner plus a small panel of view controls.
pub fn draw_overlay(ctx: &egui::Context, hud: &HudStats) -> OverlayActions {
    let mut actions = OverlayActions::default();

    egui::Window::new("FPS")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 10.0))
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{:.0}", hud.fps))
                    .size(48.0)
                    .color(accent(hud.theme)),
            );
            ui.label(
                egui::RichText::new("FPS")
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
        });

    egui::Window::new("View")
        .resizable(false)
        .collapsible(true)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
        .show(ctx, |ui| {
            ui.label(format!("Model: {}", status_text(hud.asset)));
            let mode = if hud.variable_speed { "variable" } else { "fixed" };
            ui.label(format!("Rotation: {:.2} ({})", hud.rotation_speed, mode));
            ui.separator();

            let mut zoom = hud.zoom_multiplier;
            if ui
                .add(egui::Slider::new(&mut zoom, MIN_ZOOM_MULTIPLIER..=MAX_ZOOM_SLIDER).text("Zoom"))
                .changed()
            {
                actions.zoom_multiplier = Some(zoom);
            }

            let mut elevation = hud.elevation_degrees;
            if ui
                .add(
                    egui::Slider::new(&mut elevation, -MAX_ELEVATION_DEGREES..=MAX_ELEVATION_DEGREES)
                        .text("Elevation")
                        .suffix("°"),
                )
                .changed()
            {
                actions.elevation_degrees = Some(elevation);
            }

            let label = if hud.theme.is_dark() { "Light theme" } else { "Dark theme" };
            if ui.button(label).clicked() {
                actions.toggle_theme = true;
            }
        });

    actions
}
