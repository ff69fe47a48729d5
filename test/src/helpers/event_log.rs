use bodysync_peer::{
    AnswerCheckEvent, CloseQuizModalEvent, ConnectionLostEvent, ErrorEvent, Events,
    GameOverEvent, JoinEvent, LeaderboardEvent, LeaveEvent, ModeChangeEvent, ModelSwitchEvent,
    NoticeDismissEvent, PaintEvent, PaintNoticeEvent, PeerError, QuestionEvent,
    RestoreCameraEvent, TourStepEvent,
};
use bodysync_shared::{
    Identity, ModeTransition, ModelName, PaintEntry, Participant, QuizCursor, UserInfo,
};

/// Everything a peer reported to its presentation layer during a test
#[derive(Default)]
pub struct EventLog {
    pub leaderboards: Vec<Vec<Participant>>,
    pub joins: Vec<UserInfo>,
    pub leaves: Vec<Identity>,
    pub paints: Vec<(ModelName, PaintEntry)>,
    pub model_switches: Vec<(ModelName, Vec<PaintEntry>)>,
    pub mode_changes: Vec<ModeTransition>,
    pub camera_restores: usize,
    pub quiz_modal_closes: usize,
    pub questions: Vec<(QuizCursor, String)>,
    pub game_overs: Vec<QuizCursor>,
    pub answer_checks: Vec<(String, bool)>,
    pub paint_notices: Vec<(u64, UserInfo, String)>,
    pub notice_dismissals: Vec<u64>,
    pub tour_steps: Vec<(usize, String)>,
    pub connection_losses: usize,
    pub errors: Vec<PeerError>,
}

impl EventLog {
    pub fn record(&mut self, mut events: Events) {
        if events.is_empty() {
            return;
        }

        self.leaderboards.extend(events.read::<LeaderboardEvent>());
        self.joins.extend(events.read::<JoinEvent>());
        self.leaves.extend(events.read::<LeaveEvent>());
        self.paints.extend(events.read::<PaintEvent>());
        self.model_switches.extend(events.read::<ModelSwitchEvent>());
        self.mode_changes.extend(events.read::<ModeChangeEvent>());
        self.camera_restores += events.read::<RestoreCameraEvent>().count();
        self.quiz_modal_closes += events.read::<CloseQuizModalEvent>().count();
        self.questions.extend(events.read::<QuestionEvent>());
        self.game_overs.extend(events.read::<GameOverEvent>());
        self.answer_checks.extend(events.read::<AnswerCheckEvent>());
        self.paint_notices.extend(events.read::<PaintNoticeEvent>());
        self.notice_dismissals.extend(events.read::<NoticeDismissEvent>());
        self.tour_steps.extend(events.read::<TourStepEvent>());
        self.connection_losses += events.read::<ConnectionLostEvent>().count();
        self.errors.extend(events.read::<ErrorEvent>());
    }

    /// Last question shown, if any
    pub fn last_question(&self) -> Option<&(QuizCursor, String)> {
        self.questions.last()
    }

    /// Last roster pushed to the leaderboard, if any
    pub fn last_leaderboard(&self) -> Option<&[Participant]> {
        self.leaderboards.last().map(Vec::as_slice)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
