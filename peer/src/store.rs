use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::info;

use bodysync_shared::{Snapshot, SnapshotError};

/// Datastore holding the local user's snapshot as an opaque blob
pub trait SnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError>;
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError>;
}

/// Keeps the snapshot as a JSON file on disk
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, error: std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.display().to_string(),
            reason: error.to_string(),
        }
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        let blob = match fs::read_to_string(&self.path) {
            Ok(blob) => blob,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.io_error(error)),
        };
        Snapshot::from_json(&blob).map(Some)
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let blob = snapshot.to_json()?;
        fs::write(&self.path, blob).map_err(|error| self.io_error(error))?;
        info!("Saved snapshot to {}", self.path.display());
        Ok(())
    }
}

/// Snapshot kept in memory, for embedders with their own datastore
#[derive(Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        self.blob.as_deref().map(Snapshot::from_json).transpose()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        self.blob = Some(snapshot.to_json()?);
        Ok(())
    }
}
