use clap::Parser;
use glam::Vec2;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

use model_display::cli::Cli;
use model_display::config::{Theme, ViewerConfig};
use model_display::core::input_adapter::{command_for_key, PointerTracker, ViewerCommand};
use model_display::core::viewer::{FrameChrome, Viewer};
use model_display::core::window::MountPoint;
use model_display::frame::{FpsCounter, FrameClock};
use model_display::grid::DotGrid;
use model_display::loaders::{AssetEvent, GltfFileSource};
use model_display::overlay::OverlayActions;
use model_display::renderer::ModelRenderer;
use model_display::window::WinitMount;

// === Constants ===

const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;

// === Type Aliases ===

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Events posted to the UI thread from worker threads
#[derive(Debug)]
enum AppEvent {
    AssetLoaded(AssetEvent),
}

// === Application ===

struct App {
    show_ui: bool,
    config: ViewerConfig,
    proxy: EventLoopProxy<AppEvent>,
    source: Arc<GltfFileSource>,
    mount: Option<WinitMount>,
    viewer: Option<Viewer<ModelRenderer>>,
    theme: Theme,
    backdrop: DotGrid,
    pointer: PointerTracker,
    clock: FrameClock,
    fps: FpsCounter,
}

impl App {
    fn new(config: ViewerConfig, show_ui: bool, proxy: EventLoopProxy<AppEvent>) -> Self {
        Self {
            show_ui,
            theme: config.theme,
            config,
            proxy,
            source: Arc::new(GltfFileSource),
            mount: None,
            viewer: None,
            backdrop: DotGrid::new(INITIAL_WINDOW_WIDTH as f32, INITIAL_WINDOW_HEIGHT as f32),
            pointer: PointerTracker::new(),
            clock: FrameClock::new(),
            fps: FpsCounter::new(),
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Option<WinitMount> {
        if let Some(mount) = &self.mount {
            return Some(mount.clone());
        }
        match event_loop.create_window(
            Window::default_attributes()
                .with_title("Model Display")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(window) => {
                let mount = WinitMount::new(Arc::new(window));
                self.mount = Some(mount.clone());
                Some(mount)
            }
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                None
            }
        }
    }

    fn mount_viewer(&mut self, event_loop: &ActiveEventLoop) {
        let Some(mount) = self.create_window(event_loop) else {
            event_loop.exit();
            return;
        };

        let window = mount.inner().clone();
        let viewer = match Viewer::mount(self.config.clone(), Some(&mount as &dyn MountPoint), |size| {
            pollster::block_on(ModelRenderer::new(window, size))
        }) {
            Ok(Some(viewer)) => viewer,
            Ok(None) => return,
            Err(e) => {
                log::error!("Failed to initialize viewer: {:#}", e);
                event_loop.exit();
                return;
            }
        };
        self.viewer = Some(viewer);

        let (width, height) = mount.logical_size();
        self.backdrop.resize(width, height);
        self.clock = FrameClock::new();

        let proxy = self.proxy.clone();
        if let Some(viewer) = self.viewer.as_mut() {
            let started = viewer.start_loading(self.source.clone(), move |event| {
                if proxy.send_event(AppEvent::AssetLoaded(event)).is_err() {
                    log::debug!("Event loop closed before the asset arrived");
                }
            });
            if let Err(e) = started {
                log::error!("{:#}", e);
            }
        }
    }

    fn apply_command(&mut self, command: ViewerCommand, event_loop: &ActiveEventLoop) {
        match command {
            ViewerCommand::Quit => event_loop.exit(),
            ViewerCommand::ToggleTheme => self.toggle_theme(),
            ViewerCommand::ZoomBy(step) => {
                if let Some(viewer) = self.viewer.as_mut() {
                    let zoom = viewer.config().zoom_multiplier + step;
                    viewer.set_zoom_multiplier(zoom);
                    log::info!("Zoom multiplier: {:.2}", viewer.config().zoom_multiplier);
                }
            }
            ViewerCommand::ElevateBy(step) => {
                if let Some(viewer) = self.viewer.as_mut() {
                    let elevation = viewer.config().elevation_degrees + step;
                    viewer.set_elevation_degrees(elevation);
                    log::info!("Elevation: {:.0}°", viewer.config().elevation_degrees);
                }
            }
        }
    }

    fn apply_overlay(&mut self, actions: OverlayActions) {
        if let Some(viewer) = self.viewer.as_mut() {
            if let Some(zoom) = actions.zoom_multiplier {
                viewer.set_zoom_multiplier(zoom);
            }
            if let Some(elevation) = actions.elevation_degrees {
                viewer.set_elevation_degrees(elevation);
            }
        }
        if actions.toggle_theme {
            self.toggle_theme();
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        log::info!("Theme: {:?}", self.theme);
    }

    fn handle_resize(&mut self) {
        let Some(mount) = &self.mount else {
            return;
        };
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.resize(mount);
        }
        let (width, height) = mount.logical_size();
        self.backdrop.resize(width, height);
    }

    fn pointer_moved(&mut self, physical: (f32, f32)) {
        let scale = self.mount.as_ref().map_or(1.0, WinitMount::scale_factor);
        self.backdrop
            .pointer_moved(Vec2::new(physical.0, physical.1) / scale);
    }

    fn redraw(&mut self) {
        let Some(mount) = &self.mount else {
            return;
        };
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        let frame = self.clock.tick();
        if let Some(fps) = self.fps.record(frame.elapsed) {
            log::trace!("FPS: {:.1}", fps);
        }

        let (dx, dy) = self.pointer.take_drag();
        if dx != 0.0 || dy != 0.0 {
            viewer.orbit_by_pixels(dx, dy);
        }
        let wheel = self.pointer.take_wheel();
        if wheel != 0.0 && !viewer.zoom_by(wheel) {
            log::trace!("Wheel zoom ignored");
        }

        self.backdrop.advance(frame.delta);
        let instances = self.backdrop.instances(mount.scale_factor());
        let chrome = FrameChrome {
            theme: self.theme,
            backdrop: &instances,
            fps: self.show_ui.then(|| self.fps.fps()),
        };

        if let Err(e) = viewer.frame(frame.elapsed, &chrome) {
            log::error!("Render error: {:#}", e);
        }

        let actions = viewer
            .renderer_mut()
            .map(ModelRenderer::take_overlay_actions)
            .unwrap_or_default();
        if !actions.is_empty() {
            self.apply_overlay(actions);
        }
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_none() {
            self.mount_viewer(event_loop);
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::AssetLoaded(event) => match self.viewer.as_mut() {
                Some(viewer) => {
                    let outcome = viewer.handle_asset_event(event);
                    log::debug!("Asset event handled: {:?}", outcome);
                }
                None => log::debug!("Asset for {:?} arrived after unmount", event.path),
            },
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if self.show_ui {
            if let Some(renderer) = self.viewer.as_mut().and_then(Viewer::renderer_mut) {
                let consumed = renderer.handle_event(&event);
                let pointer_grab = matches!(
                    event,
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        ..
                    } | WindowEvent::MouseWheel { .. }
                        | WindowEvent::KeyboardInput { .. }
                );
                if consumed && pointer_grab {
                    return; // egui consumed the event
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key,
                        logical_key,
                        ..
                    },
                ..
            } => {
                if let Some(command) = command_for_key(physical_key, &logical_key) {
                    self.apply_command(command, event_loop);
                }
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.handle_resize();
            }
            WindowEvent::Touch(touch) if touch.phase == TouchPhase::Moved => {
                self.pointer_moved((touch.location.x as f32, touch.location.y as f32));
            }
            WindowEvent::RedrawRequested => self.redraw(),
            other => {
                if self.pointer.process_event(&other) {
                    if let Some(position) = self.pointer.position() {
                        self.pointer_moved(position);
                    }
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let (Some(mount), true) = (&self.mount, self.viewer.is_some()) {
            mount.request_redraw();
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut viewer) = self.viewer.take() {
            // keep live zoom/elevation for the next mount
            self.config = viewer.config().clone();
            viewer.teardown();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut viewer) = self.viewer.take() {
            viewer.teardown();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.viewer_config()?;

    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;
    let mut app = App::new(config, !cli.no_ui, event_loop.create_proxy());

    if !cli.no_ui {
        println!("Model Display - Controls: drag to orbit, +/- zoom, Up/Down elevation, T theme, Escape to quit");
    }
    event_loop.run_app(&mut app)?;

    Ok(())
}
