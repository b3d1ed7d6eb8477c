use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};

use super::gltf::{load_gltf_model, ModelData};

/// Anything that can turn a path into model data
pub trait AssetSource: Send + Sync {
    fn load(&self, path: &Path) -> Result<ModelData>;
}

/// Reads glTF/GLB files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfFileSource;

impl AssetSource for GltfFileSource {
    fn load(&self, path: &Path) -> Result<ModelData> {
        load_gltf_model(path)
    }
}

/// Identifies the mount a load was started for. The weak token dies
/// when that mount is torn down.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    mount_id: u64,
    liveness: Weak<()>,
}

impl LoadTicket {
    pub fn new(mount_id: u64, token: &Arc<()>) -> Self {
        Self {
            mount_id,
            liveness: Arc::downgrade(token),
        }
    }

    pub fn mount_id(&self) -> u64 {
        self.mount_id
    }

    pub fn is_live(&self) -> bool {
        self.liveness.strong_count() > 0
    }
}

/// Result of one background load, addressed to the mount that asked for it
#[derive(Debug)]
pub struct AssetEvent {
    pub ticket: LoadTicket,
    pub path: PathBuf,
    pub result: Result<ModelData>,
}

/// Load `path` on a worker thread and hand the outcome to `deliver`,
/// unless the owning mount went away in the meantime.
pub fn spawn_asset_load<S, F>(
    ticket: LoadTicket,
    path: PathBuf,
    source: Arc<S>,
    deliver: F,
) -> std::io::Result<JoinHandle<()>>
where
    S: AssetSource + ?Sized + 'static,
    F: FnOnce(AssetEvent) + Send + 'static,
{
    thread::Builder::new()
        .name("asset-loader".to_string())
        .spawn(move || {
            let result = source.load(&path);
            if !ticket.is_live() {
                log::debug!(
                    "Dropping load of {:?} for unmounted viewer {}",
                    path,
                    ticket.mount_id()
                );
                return;
            }
            deliver(AssetEvent {
                ticket,
                path,
                result,
            });
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::Mutex;

    struct EmptySource;

    impl AssetSource for EmptySource {
        fn load(&self, _path: &Path) -> Result<ModelData> {
            Ok(ModelData::default())
        }
    }

    /// Blocks inside `load` until the test releases it.
    struct GatedSource {
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl AssetSource for GatedSource {
        fn load(&self, _path: &Path) -> Result<ModelData> {
            let gate = self.gate.lock().map_err(|_| anyhow::anyhow!("gate poisoned"))?;
            gate.recv()?;
            Ok(ModelData::default())
        }
    }

    #[test]
    fn test_ticket_dies_with_token() {
        let token = Arc::new(());
        let ticket = LoadTicket::new(7, &token);
        assert!(ticket.is_live());
        assert_eq!(ticket.mount_id(), 7);
        drop(token);
        assert!(!ticket.is_live());
    }

    #[test]
    fn test_live_load_is_delivered() {
        let token = Arc::new(());
        let (tx, rx) = mpsc::channel();
        let handle = spawn_asset_load(
            LoadTicket::new(1, &token),
            PathBuf::from("app.glb"),
            Arc::new(EmptySource),
            move |event| tx.send(event).unwrap(),
        )
        .unwrap();
        handle.join().unwrap();

        let event = rx.recv().unwrap();
        assert_eq!(event.ticket.mount_id(), 1);
        assert_eq!(event.path, PathBuf::from("app.glb"));
        assert!(event.result.is_ok());
    }

    #[test]
    fn test_load_finishing_after_teardown_is_dropped() {
        let token = Arc::new(());
        let (release, gate) = mpsc::channel();
        let (tx, rx) = mpsc::channel::<AssetEvent>();
        let source = Arc::new(GatedSource {
            gate: Mutex::new(gate),
        });

        let handle = spawn_asset_load(
            LoadTicket::new(2, &token),
            PathBuf::from("app.glb"),
            source,
            move |event| tx.send(event).unwrap(),
        )
        .unwrap();

        drop(token);
        release.send(()).unwrap();
        handle.join().unwrap();

        assert!(rx.try_recv().is_err());
    }
}
