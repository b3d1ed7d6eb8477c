/// Surface size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    /// Container size, with each zero axis taken from the viewport instead.
    /// Never returns a zero axis so the aspect ratio stays finite.
    pub fn resolve(mount: &dyn MountPoint) -> Self {
        let container = mount.container_size();
        let viewport = mount.viewport_size();
        let pick = |own: u32, fallback: u32| if own > 0 { own } else { fallback.max(1) };
        Self {
            width: pick(container.width, viewport.width),
            height: pick(container.height, viewport.height),
        }
    }
}

/// Where a viewer is attached: reports its own bounds and the enclosing viewport.
pub trait MountPoint {
    /// Current bounds of the container, zero while it is not laid out
    fn container_size(&self) -> SurfaceSize;

    /// Size of the whole display area, used when the container reports zero
    fn viewport_size(&self) -> SurfaceSize;

    /// Request another frame
    fn request_redraw(&self);
}
