use std::{mem, vec::IntoIter};

use bodysync_shared::{
    Identity, ModeTransition, ModelName, Participant, PaintEntry, QuizCursor, UserInfo,
};

use crate::PeerError;

/// Notifications for the presentation layer, collected between two calls
/// to `Peer::receive`
pub struct Events {
    leaderboards: Vec<Vec<Participant>>,
    joins: Vec<UserInfo>,
    leaves: Vec<Identity>,
    paints: Vec<(ModelName, PaintEntry)>,
    model_switches: Vec<(ModelName, Vec<PaintEntry>)>,
    mode_changes: Vec<ModeTransition>,
    camera_restores: Vec<()>,
    quiz_modal_closes: Vec<()>,
    questions: Vec<(QuizCursor, String)>,
    game_overs: Vec<QuizCursor>,
    answer_checks: Vec<(String, bool)>,
    paint_notices: Vec<(u64, UserInfo, String)>,
    notice_dismissals: Vec<u64>,
    tour_steps: Vec<(usize, String)>,
    connection_losses: Vec<()>,
    errors: Vec<PeerError>,

    empty: bool,
}

impl Events {
    pub(crate) fn new() -> Self {
        Self {
            leaderboards: Vec::new(),
            joins: Vec::new(),
            leaves: Vec::new(),
            paints: Vec::new(),
            model_switches: Vec::new(),
            mode_changes: Vec::new(),
            camera_restores: Vec::new(),
            quiz_modal_closes: Vec::new(),
            questions: Vec::new(),
            game_overs: Vec::new(),
            answer_checks: Vec::new(),
            paint_notices: Vec::new(),
            notice_dismissals: Vec::new(),
            tour_steps: Vec::new(),
            connection_losses: Vec::new(),
            errors: Vec::new(),

            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: Event>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: Event>(&self) -> bool {
        V::has(self)
    }

    // Crate-public

    pub(crate) fn push_leaderboard(&mut self, roster: &[Participant]) {
        self.leaderboards.push(roster.to_vec());
        self.empty = false;
    }

    pub(crate) fn push_join(&mut self, user: UserInfo) {
        self.joins.push(user);
        self.empty = false;
    }

    pub(crate) fn push_leave(&mut self, identity: Identity) {
        self.leaves.push(identity);
        self.empty = false;
    }

    pub(crate) fn push_paint(&mut self, model: ModelName, entry: PaintEntry) {
        self.paints.push((model, entry));
        self.empty = false;
    }

    pub(crate) fn push_model_switch(&mut self, model: ModelName, entries: &[PaintEntry]) {
        self.model_switches.push((model, entries.to_vec()));
        self.empty = false;
    }

    pub(crate) fn push_mode_change(&mut self, transition: ModeTransition) {
        if transition.restore_camera {
            self.camera_restores.push(());
        }
        if transition.close_quiz_modal {
            self.quiz_modal_closes.push(());
        }
        self.mode_changes.push(transition);
        self.empty = false;
    }

    pub(crate) fn push_question(&mut self, cursor: QuizCursor, part_id: String) {
        self.questions.push((cursor, part_id));
        self.empty = false;
    }

    pub(crate) fn push_game_over(&mut self, cursor: QuizCursor) {
        self.game_overs.push(cursor);
        self.empty = false;
    }

    pub(crate) fn push_answer_check(&mut self, part_id: &str, correct: bool) {
        self.answer_checks.push((part_id.to_string(), correct));
        self.empty = false;
    }

    pub(crate) fn push_paint_notice(&mut self, notice: u64, painter: UserInfo, part_id: String) {
        self.paint_notices.push((notice, painter, part_id));
        self.empty = false;
    }

    pub(crate) fn push_notice_dismissal(&mut self, notice: u64) {
        self.notice_dismissals.push(notice);
        self.empty = false;
    }

    pub(crate) fn push_tour_step(&mut self, index: usize, part_id: String) {
        self.tour_steps.push((index, part_id));
        self.empty = false;
    }

    pub(crate) fn push_connection_loss(&mut self) {
        self.connection_losses.push(());
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: PeerError) {
        self.errors.push(error);
        self.empty = false;
    }
}

// Event Trait
pub trait Event {
    type Iter;

    fn iter(events: &mut Events) -> Self::Iter;

    fn has(events: &Events) -> bool;
}

// LeaderboardEvent
/// The roster changed; carries the full roster with scores
pub struct LeaderboardEvent;
impl Event for LeaderboardEvent {
    type Iter = IntoIter<Vec<Participant>>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.leaderboards).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.leaderboards.is_empty()
    }
}

// JoinEvent
pub struct JoinEvent;
impl Event for JoinEvent {
    type Iter = IntoIter<UserInfo>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.joins).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.joins.is_empty()
    }
}

// LeaveEvent
pub struct LeaveEvent;
impl Event for LeaveEvent {
    type Iter = IntoIter<Identity>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.leaves).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.leaves.is_empty()
    }
}

// PaintEvent
/// A part of the displayed model must be re-rendered with a new color
pub struct PaintEvent;
impl Event for PaintEvent {
    type Iter = IntoIter<(ModelName, PaintEntry)>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.paints).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.paints.is_empty()
    }
}

// ModelSwitchEvent
/// Display this model with all of its stored paint
pub struct ModelSwitchEvent;
impl Event for ModelSwitchEvent {
    type Iter = IntoIter<(ModelName, Vec<PaintEntry>)>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.model_switches).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.model_switches.is_empty()
    }
}

// ModeChangeEvent
pub struct ModeChangeEvent;
impl Event for ModeChangeEvent {
    type Iter = IntoIter<ModeTransition>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.mode_changes).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.mode_changes.is_empty()
    }
}

// RestoreCameraEvent
pub struct RestoreCameraEvent;
impl Event for RestoreCameraEvent {
    type Iter = IntoIter<()>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.camera_restores).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.camera_restores.is_empty()
    }
}

// CloseQuizModalEvent
pub struct CloseQuizModalEvent;
impl Event for CloseQuizModalEvent {
    type Iter = IntoIter<()>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.quiz_modal_closes).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.quiz_modal_closes.is_empty()
    }
}

// QuestionEvent
/// Ask the user to find this part
pub struct QuestionEvent;
impl Event for QuestionEvent {
    type Iter = IntoIter<(QuizCursor, String)>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.questions).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.questions.is_empty()
    }
}

// GameOverEvent
pub struct GameOverEvent;
impl Event for GameOverEvent {
    type Iter = IntoIter<QuizCursor>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.game_overs).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.game_overs.is_empty()
    }
}

// AnswerCheckEvent
/// Local feedback on a click in Doctor mode: (clicked part, correct)
pub struct AnswerCheckEvent;
impl Event for AnswerCheckEvent {
    type Iter = IntoIter<(String, bool)>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.answer_checks).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.answer_checks.is_empty()
    }
}

// PaintNoticeEvent
/// Transient popup: (notice id, painter, part)
pub struct PaintNoticeEvent;
impl Event for PaintNoticeEvent {
    type Iter = IntoIter<(u64, UserInfo, String)>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.paint_notices).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.paint_notices.is_empty()
    }
}

// NoticeDismissEvent
pub struct NoticeDismissEvent;
impl Event for NoticeDismissEvent {
    type Iter = IntoIter<u64>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.notice_dismissals).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.notice_dismissals.is_empty()
    }
}

// TourStepEvent
pub struct TourStepEvent;
impl Event for TourStepEvent {
    type Iter = IntoIter<(usize, String)>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.tour_steps).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.tour_steps.is_empty()
    }
}

// ConnectionLostEvent
pub struct ConnectionLostEvent;
impl Event for ConnectionLostEvent {
    type Iter = IntoIter<()>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.connection_losses).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.connection_losses.is_empty()
    }
}

// ErrorEvent
pub struct ErrorEvent;
impl Event for ErrorEvent {
    type Iter = IntoIter<PeerError>;

    fn iter(events: &mut Events) -> Self::Iter {
        mem::take(&mut events.errors).into_iter()
    }

    fn has(events: &Events) -> bool {
        !events.errors.is_empty()
    }
}
