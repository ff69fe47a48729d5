use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{paint::paint_entry::ModelPaintData, types::ModelName};

/// Errors that can occur while reading or writing the local snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Stored blob could not be parsed
    #[error("Stored snapshot is corrupted: {reason}")]
    Corrupted { reason: String },

    /// Snapshot could not be serialized
    #[error("Failed to serialize snapshot: {reason}")]
    EncodeFailed { reason: String },

    /// The datastore failed to read or write
    #[error("Datastore I/O failed for {path}: {reason}")]
    Io { path: String, reason: String },
}

/// Camera pose handed over by the presentation layer on stop
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: [0.0, 1.5, 4.0],
            target: [0.0, 1.0, 0.0],
            fov: 45.0,
        }
    }
}

/// Per-user state written on stop and read on resume. It is not a
/// substitute for network resync: peers always bootstrap from `init`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub model_paint_data: ModelPaintData,
    pub active_model_name: ModelName,
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
    pub camera_fov: f32,
}

impl Snapshot {
    pub fn new(model_paint_data: ModelPaintData, active_model_name: ModelName, camera: CameraState) -> Self {
        Self {
            model_paint_data,
            active_model_name,
            camera_position: camera.position,
            camera_target: camera.target,
            camera_fov: camera.fov,
        }
    }

    pub fn camera(&self) -> CameraState {
        CameraState {
            position: self.camera_position,
            target: self.camera_target,
            fov: self.camera_fov,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|error| SnapshotError::EncodeFailed {
            reason: error.to_string(),
        })
    }

    pub fn from_json(blob: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(blob).map_err(|error| SnapshotError::Corrupted {
            reason: error.to_string(),
        })
    }
}
