pub mod gltf;
pub mod task;

pub use gltf::{load_gltf_model, MeshData, ModelData};
pub use task::{spawn_asset_load, AssetEvent, AssetSource, GltfFileSource, LoadTicket};
