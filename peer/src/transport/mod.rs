mod conditioner;
mod local;

pub use conditioner::LinkConditionerConfig;
pub use local::{LocalHub, LocalTransport};

use thiserror::Error;

use bodysync_shared::{Identity, UserInfo};

/// Errors that can occur on the broadcast transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The connection to the session group is gone
    #[error("Transport is disconnected from the session group")]
    Disconnected,
}

/// What the presence / messaging layer reports to a peer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    /// Another peer joined the session group
    Joined(UserInfo),
    /// Another peer left the session group
    Left(Identity),
    /// An encoded envelope from another peer
    Message(String),
    /// This peer lost its connection
    Disconnected,
}

/// Broadcast channel scoped to one session group. Delivery is best-effort:
/// messages may be lost, duplicated by the sender, or arrive in any order.
pub trait Transport {
    fn connect(self: Box<Self>) -> (Box<dyn MessageSender>, Box<dyn MessageReceiver>);
}

pub trait MessageSender: Send + Sync {
    /// Sends a payload to every other peer of the group
    fn send(&self, payload: &str) -> Result<(), TransportError>;
}

pub trait MessageReceiver: Send + Sync {
    /// Returns the next pending event, if any, without blocking
    fn receive(&mut self) -> Result<Option<TransportEvent>, TransportError>;
}
