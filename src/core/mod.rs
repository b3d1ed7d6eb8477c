pub mod controls;
pub mod fitting;
pub mod idle_reset;
pub mod input_adapter;
pub mod rotation;
pub mod timer;
pub mod viewer;
pub mod window;

pub use controls::{OrbitControls, Spherical};
pub use fitting::{apply_camera_settings, fit_distance, CameraPose, FitState};
pub use idle_reset::{IdleReset, IDLE_RESET_SECONDS};
pub use input_adapter::{command_for_key, PointerTracker, ViewerCommand};
pub use rotation::{AutoRotateDriver, RotationState};
pub use timer::{Countdown, Throttled};
pub use viewer::{AssetOutcome, AssetPhase, FrameChrome, SceneRenderer, Viewer};
pub use window::{MountPoint, SurfaceSize};
