use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use super::controls::OrbitControls;
use super::fitting::{self, FitState};
use super::idle_reset::IdleReset;
use super::rotation::AutoRotateDriver;
use super::window::{MountPoint, SurfaceSize};
use crate::camera::PerspectiveCamera;
use crate::config::{Theme, ViewerConfig};
use crate::frame::MAX_FRAME_DELTA;
use crate::loaders::{spawn_asset_load, AssetEvent, AssetSource, LoadTicket, ModelData};
use crate::overlay::HudStats;
use crate::scene::{Lighting, SceneFrame};
use crate::types::DotInstance;

static NEXT_MOUNT_ID: AtomicU64 = AtomicU64::new(1);

/// Rendering backend owned by a mounted viewer
pub trait SceneRenderer {
    /// Resize the drawing surface and any size-dependent targets
    fn resize(&mut self, size: SurfaceSize);

    /// Replace the displayed model
    fn set_model(&mut self, model: &ModelData);

    fn render(&mut self, frame: &SceneFrame) -> Result<()>;

    /// Free GPU resources; the renderer is not used again afterwards
    fn release(&mut self);
}

/// Where the model load stands, as seen by the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetPhase {
    Pending,
    Fitted,
    Degenerate,
    Failed,
}

/// What happened to a delivered asset event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOutcome {
    Fitted,
    Degenerate,
    Failed,
    /// The event belonged to another or an already torn down mount
    Discarded,
}

/// Per-frame inputs owned by the application rather than the viewer
#[derive(Debug, Clone, Copy)]
pub struct FrameChrome<'a> {
    pub theme: Theme,
    pub backdrop: &'a [DotInstance],
    pub fps: Option<f32>,
}

struct SceneResources<R> {
    renderer: R,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    lighting: Lighting,
    model_transform: Mat4,
    surface: SurfaceSize,
}

/// One mounted model viewer: renderer, camera, orbit controls and lighting,
/// plus the fit, auto-rotate and idle-reset state that lives as long as they do.
pub struct Viewer<R: SceneRenderer> {
    mount_id: u64,
    config: ViewerConfig,
    resources: Option<SceneResources<R>>,
    liveness: Option<Arc<()>>,
    fit: FitState,
    rotation: AutoRotateDriver,
    idle: IdleReset,
    asset: AssetPhase,
}

impl<R: SceneRenderer> Viewer<R> {
    /// Build the scene for `mount`. Returns `Ok(None)` when there is nothing to mount into.
    pub fn mount<F>(
        config: ViewerConfig,
        mount: Option<&dyn MountPoint>,
        create_renderer: F,
    ) -> Result<Option<Self>>
    where
        F: FnOnce(SurfaceSize) -> Result<R>,
    {
        let Some(mount) = mount else {
            log::warn!("No mount point available, viewer not created");
            return Ok(None);
        };

        let config = config.clamped();
        let surface = SurfaceSize::resolve(mount);
        let renderer = create_renderer(surface).context("Failed to create scene renderer")?;

        let camera = PerspectiveCamera::with_aspect(surface.aspect());
        let mut controls = OrbitControls::new(&camera);
        controls.enable_damping = true;
        controls.enable_zoom = false;
        controls.enable_pan = false;
        controls.auto_rotate = true;

        let rotation = AutoRotateDriver::new(config.variable_speed);
        controls.auto_rotate_speed = rotation.current_speed();

        let mount_id = NEXT_MOUNT_ID.fetch_add(1, Ordering::Relaxed);
        log::info!(
            "Mounted viewer {} at {}x{} for {:?}",
            mount_id,
            surface.width,
            surface.height,
            config.asset_path
        );

        Ok(Some(Self {
            mount_id,
            config,
            resources: Some(SceneResources {
                renderer,
                camera,
                controls,
                lighting: Lighting::default(),
                model_transform: Mat4::IDENTITY,
                surface,
            }),
            liveness: Some(Arc::new(())),
            fit: FitState::default(),
            rotation,
            idle: IdleReset::new(),
            asset: AssetPhase::Pending,
        }))
    }

    /// Ticket for work that must not outlive this mount. None once torn down.
    pub fn load_ticket(&self) -> Option<LoadTicket> {
        self.liveness
            .as_ref()
            .map(|token| LoadTicket::new(self.mount_id, token))
    }

    /// Start loading the configured asset in the background.
    /// Returns the worker handle, or None when the viewer is already torn down.
    pub fn start_loading<S, F>(
        &mut self,
        source: Arc<S>,
        deliver: F,
    ) -> Result<Option<JoinHandle<()>>>
    where
        S: AssetSource + ?Sized + 'static,
        F: FnOnce(AssetEvent) + Send + 'static,
    {
        let Some(ticket) = self.load_ticket() else {
            return Ok(None);
        };
        let path = self.config.asset_path.clone();
        log::debug!("Viewer {} loading {:?}", self.mount_id, path);
        self.asset = AssetPhase::Pending;
        let handle = spawn_asset_load(ticket, path, source, deliver)
            .context("Failed to start asset loader thread")?;
        Ok(Some(handle))
    }

    /// Apply a finished load, provided it was started by this mount and the mount is still up.
    pub fn handle_asset_event(&mut self, event: AssetEvent) -> AssetOutcome {
        if event.ticket.mount_id() != self.mount_id
            || !event.ticket.is_live()
            || !self.is_mounted()
        {
            log::debug!(
                "Viewer {} discarding load of {:?} for mount {}",
                self.mount_id,
                event.path,
                event.ticket.mount_id()
            );
            return AssetOutcome::Discarded;
        }

        match event.result {
            Ok(model) => self.show_model(&model),
            Err(err) => {
                log::error!("Failed to load {:?}: {:#}", event.path, err);
                self.asset = AssetPhase::Failed;
                AssetOutcome::Failed
            }
        }
    }

    /// Add `model` to the scene, recentered on the origin, and fit the camera to it.
    pub fn show_model(&mut self, model: &ModelData) -> AssetOutcome {
        let Some(res) = self.resources.as_mut() else {
            return AssetOutcome::Discarded;
        };

        res.renderer.set_model(model);

        let bounds = model.bounds();
        if !bounds.has_extent() {
            log::warn!("Model {:?} has no extent, skipping camera fit", model.name);
            res.model_transform = Mat4::IDENTITY;
            self.asset = AssetPhase::Degenerate;
            return AssetOutcome::Degenerate;
        }

        let center = bounds.center();
        let size = bounds.size();
        res.model_transform = Mat4::from_translation(-center);

        self.fit.fit_distance = fitting::fit_distance(size, res.camera.fov_degrees, res.camera.aspect);
        log::info!(
            "Fitted {:?}: size {:?}, fit distance {:.3}",
            model.name,
            size,
            self.fit.fit_distance
        );

        res.controls.target = Vec3::ZERO;
        res.controls.sync(&res.camera);
        self.apply_camera_settings();

        self.idle.arm();
        self.asset = AssetPhase::Fitted;
        AssetOutcome::Fitted
    }

    /// Re-place the camera for the current zoom and elevation. False when nothing was fitted yet.
    pub fn apply_camera_settings(&mut self) -> bool {
        let Some(res) = self.resources.as_mut() else {
            return false;
        };
        fitting::apply_camera_settings(
            &mut self.fit,
            &mut res.camera,
            &mut res.controls,
            self.config.zoom_multiplier,
            self.config.elevation_degrees,
        )
    }

    pub fn set_zoom_multiplier(&mut self, multiplier: f32) -> bool {
        self.config.set_zoom_multiplier(multiplier);
        self.apply_camera_settings()
    }

    pub fn set_elevation_degrees(&mut self, degrees: f32) -> bool {
        self.config.set_elevation_degrees(degrees);
        self.apply_camera_settings()
    }

    /// Pointer drag on the surface, in physical pixels.
    pub fn orbit_by_pixels(&mut self, dx: f32, dy: f32) {
        if let Some(res) = self.resources.as_mut() {
            let height = res.surface.height as f32;
            res.controls.rotate_by_pixels(dx, dy, height);
        }
    }

    pub fn zoom_by(&mut self, wheel_delta: f32) -> bool {
        self.resources
            .as_mut()
            .is_some_and(|res| res.controls.zoom_by(wheel_delta))
    }

    pub fn pan_by_pixels(&mut self, dx: f32, dy: f32) -> bool {
        self.resources.as_mut().is_some_and(|res| {
            let height = res.surface.height as f32;
            res.controls.pan_by_pixels(&res.camera, dx, dy, height)
        })
    }

    /// Advance by `elapsed` wall-clock seconds, then draw. The idle timer takes the full
    /// interval; rotation and controls see it capped at [`MAX_FRAME_DELTA`].
    pub fn frame(&mut self, elapsed: f32, chrome: &FrameChrome) -> Result<()> {
        let Some(res) = self.resources.as_mut() else {
            return Ok(());
        };

        let speed = self.rotation.advance(res.controls.azimuthal_angle());
        res.controls.auto_rotate_speed = speed;
        res.controls
            .update(&mut res.camera, elapsed.min(MAX_FRAME_DELTA));

        if self.idle.tick(elapsed) {
            log::debug!("Viewer {} idle, returning camera home", self.mount_id);
            res.controls.reset_to(
                &mut res.camera,
                self.fit.home_camera_position,
                self.fit.home_target_position,
            );
        }

        let hud = chrome.fps.map(|fps| HudStats {
            fps,
            rotation_speed: speed,
            zoom_multiplier: self.config.zoom_multiplier,
            elevation_degrees: self.config.elevation_degrees,
            variable_speed: self.config.variable_speed,
            theme: chrome.theme,
            asset: self.asset,
        });

        res.renderer.render(&SceneFrame {
            camera: &res.camera,
            model_transform: res.model_transform,
            lighting: &res.lighting,
            theme: chrome.theme,
            backdrop: chrome.backdrop,
            hud: hud.as_ref(),
        })
    }

    /// Follow the mount's current size.
    pub fn resize(&mut self, mount: &dyn MountPoint) {
        self.resize_to(SurfaceSize::resolve(mount));
    }

    pub fn resize_to(&mut self, size: SurfaceSize) {
        let Some(res) = self.resources.as_mut() else {
            return;
        };
        let size = SurfaceSize::new(size.width.max(1), size.height.max(1));
        res.surface = size;
        res.camera.aspect = size.aspect();
        res.camera.update_projection_matrix();
        res.renderer.resize(size);
    }

    /// Release everything the mount created. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.idle.cancel();
        self.liveness = None;
        if let Some(mut res) = self.resources.take() {
            res.renderer.release();
            log::info!("Viewer {} torn down", self.mount_id);
        }
        self.fit = FitState::default();
    }

    pub fn is_mounted(&self) -> bool {
        self.resources.is_some()
    }

    pub fn mount_id(&self) -> u64 {
        self.mount_id
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn camera(&self) -> Option<&PerspectiveCamera> {
        self.resources.as_ref().map(|res| &res.camera)
    }

    pub fn controls(&self) -> Option<&OrbitControls> {
        self.resources.as_ref().map(|res| &res.controls)
    }

    pub fn renderer(&self) -> Option<&R> {
        self.resources.as_ref().map(|res| &res.renderer)
    }

    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.resources.as_mut().map(|res| &mut res.renderer)
    }

    pub fn model_transform(&self) -> Option<Mat4> {
        self.resources.as_ref().map(|res| res.model_transform)
    }

    pub fn surface_size(&self) -> Option<SurfaceSize> {
        self.resources.as_ref().map(|res| res.surface)
    }

    pub fn fit_state(&self) -> &FitState {
        &self.fit
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation.current_speed()
    }

    pub fn idle_pending(&self) -> bool {
        self.idle.is_pending()
    }

    pub fn asset_phase(&self) -> AssetPhase {
        self.asset
    }
}

impl<R: SceneRenderer> Drop for Viewer<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
