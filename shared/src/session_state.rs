use std::time::{Duration, Instant};

use crate::{
    catalog::BodyPartCatalog,
    color::PaintColor,
    mode::{
        mode_machine::{ModeMachine, ModeTask, ModeTransition},
        timer_queue::TimerHandle,
    },
    paint::{
        error::PaintError,
        paint_entry::{ModelPaintData, PaintEntry},
        paint_store::{PaintOutcome, PaintStore},
    },
    quiz::quiz_coordinator::{Arbitration, QuizCoordinator, QuizStep},
    roster::{participant::Participant, roster::Roster},
    types::{Identity, Mode, ModelName, QuizCursor, UserInfo},
};

/// Everything one peer knows about the session. Owned by a single
/// controller; peers share it only by exchanging messages.
pub struct SessionState {
    local: UserInfo,
    active_model: ModelName,
    modes: ModeMachine,
    paint: PaintStore,
    roster: Roster,
    quiz: QuizCoordinator,
    catalog: BodyPartCatalog,
}

impl SessionState {
    /// Creates the state of a peer, hosting the session or not. The local
    /// participant is always on its own roster.
    pub fn new(
        local: UserInfo,
        hosting: bool,
        active_model: ModelName,
        catalog: BodyPartCatalog,
    ) -> Self {
        let mut roster = Roster::new();
        let participant = if hosting {
            Participant::host(local.identity.clone(), local.display_name.clone())
        } else {
            Participant::new(local.identity.clone(), local.display_name.clone())
        };
        roster.join(participant);

        Self {
            local,
            active_model,
            modes: ModeMachine::new(),
            paint: PaintStore::new(),
            roster,
            quiz: QuizCoordinator::new(),
            catalog,
        }
    }

    // Identity & roles

    pub fn local(&self) -> &UserInfo {
        &self.local
    }

    pub fn local_participant(&self) -> Participant {
        self.roster
            .get(&self.local.identity)
            .cloned()
            .unwrap_or_else(|| {
                Participant::new(self.local.identity.clone(), self.local.display_name.clone())
            })
    }

    pub fn is_local(&self, identity: &Identity) -> bool {
        &self.local.identity == identity
    }

    pub fn is_host(&self) -> bool {
        self.roster.is_host(&self.local.identity)
    }

    /// Host, or alone in a session nobody hosts
    pub fn is_authority(&self) -> bool {
        self.is_host() || self.roster.host().is_none()
    }

    // Model

    pub fn active_model(&self) -> ModelName {
        self.active_model
    }

    pub fn set_active_model(&mut self, model: ModelName) -> bool {
        let changed = self.active_model != model;
        self.active_model = model;
        changed
    }

    pub fn can_change_model(&self) -> bool {
        self.modes.can_change_model(self.is_host())
    }

    pub fn catalog(&self) -> &BodyPartCatalog {
        &self.catalog
    }

    pub fn active_parts(&self) -> &[String] {
        self.catalog.parts(self.active_model)
    }

    // Paint

    pub fn paint(&self) -> &PaintStore {
        &self.paint
    }

    pub fn apply_local_paint(
        &mut self,
        model: ModelName,
        part_id: &str,
        color: PaintColor,
    ) -> Result<PaintEntry, PaintError> {
        self.paint
            .apply_local_paint(&self.catalog, model, part_id, color, &self.local.identity)
    }

    pub fn apply_remote_paint(
        &mut self,
        model: ModelName,
        entry: PaintEntry,
    ) -> Result<PaintOutcome, PaintError> {
        self.paint.apply_remote_paint(&self.catalog, model, entry)
    }

    pub fn merge_full_state(&mut self, remote: ModelPaintData) {
        self.paint.merge_full_state(&self.catalog, remote);
    }

    // Roster

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn adopt_roster(&mut self, incoming: Vec<Participant>) {
        let local = self.local_participant();
        self.roster.replace_with(incoming, &local);
    }

    // Modes & timers

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    /// Changes mode. Leaving Doctor also stops the quiz.
    pub fn transition(&mut self, to: Mode) -> ModeTransition {
        let transition = self.modes.transition(to);
        if transition.from == Mode::Doctor {
            self.quiz.stop();
        }
        transition
    }

    pub fn schedule(&mut self, now: &Instant, delay: Duration, task: ModeTask) -> TimerHandle {
        self.modes.schedule(now, delay, task)
    }

    pub fn cancel_timer(&mut self, handle: &TimerHandle) -> bool {
        self.modes.cancel(handle)
    }

    pub fn poll_due(&mut self, now: &Instant) -> Vec<ModeTask> {
        self.modes.poll_due(now)
    }

    pub fn pending_timers(&self) -> usize {
        self.modes.pending_timers()
    }

    // Quiz

    pub fn quiz(&self) -> &QuizCoordinator {
        &self.quiz
    }

    pub fn start_quiz(&mut self) -> QuizStep {
        let parts = self.catalog.parts(self.active_model);
        self.quiz.start(parts)
    }

    pub fn ask_next(&mut self) -> QuizStep {
        let parts = self.catalog.parts(self.active_model);
        self.quiz.ask_next(parts)
    }

    pub fn pose(&mut self, cursor: QuizCursor) -> QuizStep {
        let parts = self.catalog.parts(self.active_model);
        self.quiz.pose(cursor, parts)
    }

    /// The current question re-read against the displayed model, if one is
    /// being asked
    pub fn refresh_question(&mut self) -> Option<QuizStep> {
        let parts = self.catalog.parts(self.active_model);
        self.quiz.refresh(parts)
    }

    pub fn check_answer(&self, clicked_part: &str) -> bool {
        self.quiz.check_answer(self.active_parts(), clicked_part)
    }

    pub fn arbitrate(&mut self, identity: &Identity, question: Option<QuizCursor>) -> Arbitration {
        self.quiz.arbitrate(&mut self.roster, identity, question)
    }
}
