use thiserror::Error;

use bodysync_shared::{MessageError, Mode, PaintError, SnapshotError};

use crate::transport::TransportError;

/// Errors surfaced by a bodysync peer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeerError {
    /// Envelope could not be encoded or decoded
    #[error("Message error: {0}")]
    Message(#[from] MessageError),

    /// Paint was rejected by the store
    #[error("Paint error: {0}")]
    Paint(#[from] PaintError),

    /// Local snapshot could not be read or written
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Transport failed while sending or receiving
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Only the host may switch models during Tour or Doctor mode
    #[error("Switching models is not allowed for non-host peers in {mode:?} mode")]
    ModelSwitchDenied { mode: Mode },

    /// Action is not available in the current mode
    #[error("Action {action:?} is not available in {mode:?} mode")]
    ActionNotPermitted { action: &'static str, mode: Mode },
}
