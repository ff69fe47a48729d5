//! # Bodysync Shared
//! Session state and wire messages shared by every bodysync peer: the
//! roster, the paint store, the mode machine and the Doctor-mode quiz.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod catalog;
mod color;
mod messages;
mod mode;
mod paint;
mod quiz;
mod roster;
mod session_state;
mod snapshot;
mod types;

pub use catalog::BodyPartCatalog;
pub use color::{ColorParseError, PaintColor, Rgb};
pub use messages::{
    action::{Action, InitContent, PaintContent, SyncContent},
    envelope::Envelope,
    error::MessageError,
};
pub use mode::{
    mode_machine::{can_change_model, ModeMachine, ModeTask, ModeTransition},
    timer_queue::{TimerHandle, TimerQueue},
};
pub use paint::{
    error::PaintError,
    paint_entry::{ModelPaintData, PaintEntry, PaintStamp},
    paint_store::{PaintOutcome, PaintStore},
};
pub use quiz::quiz_coordinator::{Arbitration, QuizCoordinator, QuizPhase, QuizStep, RejectReason};
pub use roster::{participant::Participant, roster::Roster};
pub use session_state::SessionState;
pub use snapshot::{CameraState, Snapshot, SnapshotError};
pub use types::{Identity, Mode, ModelName, QuizCursor, UserInfo};
