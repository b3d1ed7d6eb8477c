use std::sync::Arc;
use winit::window::Window as WinitWindow;

use crate::core::window::{MountPoint, SurfaceSize};

pub const FALLBACK_VIEWPORT_WIDTH: u32 = 800;
pub const FALLBACK_VIEWPORT_HEIGHT: u32 = 600;

/// A winit window used as the viewer's mount point
#[derive(Debug, Clone)]
pub struct WinitMount {
    inner: Arc<WinitWindow>,
}

impl WinitMount {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self { inner: window }
    }

    pub fn inner(&self) -> &Arc<WinitWindow> {
        &self.inner
    }

    pub fn scale_factor(&self) -> f32 {
        self.inner.scale_factor() as f32
    }

    /// Client area in logical pixels
    pub fn logical_size(&self) -> (f32, f32) {
        let size = self.inner.inner_size().to_logical::<f32>(self.inner.scale_factor());
        (size.width, size.height)
    }
}

impl MountPoint for WinitMount {
    fn container_size(&self) -> SurfaceSize {
        let size = self.inner.inner_size();
        SurfaceSize::new(size.width, size.height)
    }

    fn viewport_size(&self) -> SurfaceSize {
        self.inner
            .current_monitor()
            .map(|monitor| {
                let size = monitor.size();
                SurfaceSize::new(size.width, size.height)
            })
            .filter(|size| !size.is_empty())
            .unwrap_or(SurfaceSize::new(FALLBACK_VIEWPORT_WIDTH, FALLBACK_VIEWPORT_HEIGHT))
    }

    fn request_redraw(&self) {
        self.inner.request_redraw();
    }
}
