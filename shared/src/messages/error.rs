use thiserror::Error;

/// Errors that can occur while encoding or decoding envelopes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Payload is not a JSON envelope
    #[error("Received payload is not a valid envelope: {reason}")]
    InvalidEnvelope { reason: String },

    /// Action tag is known but its content does not match the contract
    #[error("Content of {action:?} message is malformed: {reason}")]
    MalformedContent { action: &'static str, reason: String },

    /// Serializing an outgoing envelope failed
    #[error("Failed to encode {action:?} message: {reason}")]
    EncodeFailed { action: &'static str, reason: String },
}
