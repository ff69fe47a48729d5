mod peer;
mod peer_config;

pub use peer::Peer;
pub use peer_config::PeerConfig;
