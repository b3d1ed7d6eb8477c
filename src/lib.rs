pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod frame;
pub mod grid;
pub mod loaders;
pub mod math;
pub mod overlay;
pub mod renderer;
pub mod scene;
pub mod types;
pub mod window;

pub use camera::PerspectiveCamera;
pub use config::{Theme, ViewerConfig};
pub use crate::core::viewer::{AssetOutcome, AssetPhase, FrameChrome, SceneRenderer, Viewer};
pub use loaders::{AssetEvent, AssetSource, GltfFileSource, LoadTicket, ModelData};
