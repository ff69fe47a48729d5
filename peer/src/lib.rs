//! # Bodysync Peer
//! A peer of a shared HumanBody session. Applies local actions, broadcasts
//! them to the session group and merges what the other peers send back.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod error;
mod events;
mod peer;
mod store;
pub mod transport;

pub use error::PeerError;
pub use events::{
    AnswerCheckEvent, CloseQuizModalEvent, ConnectionLostEvent, ErrorEvent, Event, Events,
    GameOverEvent, JoinEvent, LeaderboardEvent, LeaveEvent, ModeChangeEvent, ModelSwitchEvent,
    NoticeDismissEvent, PaintEvent, PaintNoticeEvent, QuestionEvent, RestoreCameraEvent,
    TourStepEvent,
};
pub use peer::{Peer, PeerConfig};
pub use store::{JsonFileStore, MemoryStore, SnapshotStore};
