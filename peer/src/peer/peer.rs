use std::{
    mem,
    time::{Duration, Instant},
};

use log::{debug, info, warn};

use bodysync_shared::{
    Action, Arbitration, CameraState, Envelope, Identity, InitContent, Mode, ModeTask, ModelName,
    PaintColor, PaintContent, PaintEntry, PaintOutcome, QuizStep, SessionState, Snapshot,
    SyncContent, TimerHandle, UserInfo,
};

use crate::{
    events::Events,
    store::SnapshotStore,
    transport::{MessageReceiver, MessageSender, Transport, TransportError, TransportEvent},
    PeerConfig, PeerError,
};

/// One participant of a shared HumanBody session.
///
/// A Peer owns the whole session state and is the single entry and exit
/// point of the network: local actions are applied then broadcast, received
/// envelopes are decoded and routed to the same components. Delivery is
/// best-effort, so nothing here waits for or expects acknowledgement.
pub struct Peer {
    config: PeerConfig,
    state: SessionState,
    io: Option<(Box<dyn MessageSender>, Box<dyn MessageReceiver>)>,
    next_notice: u64,
    pending_question: Option<TimerHandle>,
    incoming_events: Events,
}

impl Peer {
    /// Create a Peer that hosts a new session
    pub fn host(config: PeerConfig, user: UserInfo) -> Self {
        Self::new(config, user, true)
    }

    /// Create a Peer that joins an existing session
    pub fn join(config: PeerConfig, user: UserInfo) -> Self {
        Self::new(config, user, false)
    }

    fn new(config: PeerConfig, user: UserInfo, hosting: bool) -> Self {
        let state = SessionState::new(user, hosting, config.initial_model, config.catalog.clone());

        Self {
            config,
            state,
            io: None,
            next_notice: 0,
            pending_question: None,
            incoming_events: Events::new(),
        }
    }

    /// Connects to the session group through the given transport
    pub fn connect<T: Into<Box<dyn Transport>>>(&mut self, transport: T) {
        // the previous connection must be gone before the new one joins
        self.io = None;

        let transport: Box<dyn Transport> = transport.into();
        let (sender, receiver) = transport.connect();
        self.io = Some((sender, receiver));
        info!("{} connected", self.state.local().identity);
    }

    pub fn is_connected(&self) -> bool {
        self.io.is_some()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn local(&self) -> &UserInfo {
        self.state.local()
    }

    pub fn is_host(&self) -> bool {
        self.state.is_host()
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn active_model(&self) -> ModelName {
        self.state.active_model()
    }

    /// Whether the UI should offer model switching right now
    pub fn can_change_model(&self) -> bool {
        self.state.can_change_model()
    }

    /// Must be called regularly: drains the transport, fires due timers and
    /// returns every event collected since the last call
    pub fn receive(&mut self, now: Instant) -> Events {
        self.maintain_transport(&now);
        self.fire_timers(&now);

        mem::replace(&mut self.incoming_events, Events::new())
    }

    // Local actions

    /// Paints a part of the displayed model and broadcasts it
    pub fn paint(&mut self, part_id: &str, color: PaintColor) -> Result<PaintEntry, PeerError> {
        let model = self.state.active_model();
        self.paint_model(model, part_id, color)
    }

    /// Paints a part of any model. Only the displayed model is re-rendered;
    /// the others show the paint once switched to.
    pub fn paint_model(
        &mut self,
        model: ModelName,
        part_id: &str,
        color: PaintColor,
    ) -> Result<PaintEntry, PeerError> {
        self.require_mode("paint", Mode::Paint)?;

        let entry = self.state.apply_local_paint(model, part_id, color)?;

        self.send(Action::Paint(PaintContent::new(model, entry.clone())));
        if model == self.state.active_model() {
            self.incoming_events.push_paint(model, entry.clone());
        }

        Ok(entry)
    }

    /// Displays another model. The host also pushes its full paint state so
    /// every peer converges on the same picture.
    pub fn switch_model(&mut self, model: ModelName) -> Result<(), PeerError> {
        if !self.state.can_change_model() {
            return Err(PeerError::ModelSwitchDenied {
                mode: self.state.mode(),
            });
        }

        self.show_model(model);
        self.send(Action::SwitchModel(model));
        if self.state.is_host() {
            self.send_full_sync();
        }

        Ok(())
    }

    /// Changes mode locally and tells the other peers
    pub fn select_mode(&mut self, mode: Mode, now: Instant) {
        self.apply_mode(mode, &now);
        self.send(Action::ModeChange(mode));

        if mode == Mode::Doctor && self.state.is_authority() {
            self.begin_doctor();
        }
    }

    /// Handles a click on a part while in Doctor mode. The answer is checked
    /// locally; only a correct one is reported to the host.
    pub fn click_part(&mut self, part_id: &str, now: Instant) -> Result<bool, PeerError> {
        self.require_mode("answer", Mode::Doctor)?;

        let correct = self.state.check_answer(part_id);
        self.incoming_events.push_answer_check(part_id, correct);
        if !correct {
            return Ok(false);
        }

        let question = self.state.quiz().cursor();
        if self.state.is_authority() {
            let identity = self.state.local().identity.clone();
            self.arbitrate(&identity, Some(question), &now);
        } else {
            self.send(Action::Answer(Some(question)));
        }

        Ok(true)
    }

    /// Host only: re-broadcasts the full paint state
    pub fn resync(&mut self) -> bool {
        if !self.state.is_host() {
            return false;
        }
        self.send_full_sync();
        true
    }

    /// Announces departure and drops the transport
    pub fn leave(&mut self) {
        self.send(Action::Leave);
        self.io = None;
        info!("{} left the session", self.state.local().identity);
    }

    /// Writes the local snapshot (paint data, model, camera)
    pub fn stop(
        &mut self,
        camera: CameraState,
        store: &mut dyn SnapshotStore,
    ) -> Result<(), PeerError> {
        let snapshot = Snapshot::new(
            self.state.paint().all().clone(),
            self.state.active_model(),
            camera,
        );
        store.save(&snapshot)?;
        Ok(())
    }

    /// Restores the local snapshot, if one was saved. Returns the camera to
    /// restore.
    pub fn resume(&mut self, store: &dyn SnapshotStore) -> Result<Option<CameraState>, PeerError> {
        let Some(snapshot) = store.load()? else {
            return Ok(None);
        };

        let camera = snapshot.camera();
        self.state.merge_full_state(snapshot.model_paint_data);
        self.show_model(snapshot.active_model_name);

        Ok(Some(camera))
    }

    // Private methods

    fn maintain_transport(&mut self, now: &Instant) {
        loop {
            let result = match self.io.as_mut() {
                Some((_, receiver)) => receiver.receive(),
                None => return,
            };

            match result {
                Ok(Some(event)) => self.handle_transport_event(event, now),
                Ok(None) => return,
                Err(error) => {
                    self.connection_lost(Some(error));
                    return;
                }
            }
        }
    }

    fn handle_transport_event(&mut self, event: TransportEvent, now: &Instant) {
        match event {
            TransportEvent::Joined(user) => self.on_join(user),
            TransportEvent::Left(identity) => self.on_leave(&identity),
            TransportEvent::Message(payload) => self.on_payload(&payload, now),
            TransportEvent::Disconnected => self.connection_lost(None),
        }
    }

    fn on_payload(&mut self, payload: &str, now: &Instant) {
        let envelope = match Envelope::decode(payload) {
            Ok(Some(envelope)) => envelope,
            Ok(None) => {
                debug!("Dropping message with unknown action");
                return;
            }
            Err(error) => {
                warn!("{}", error);
                self.incoming_events.push_error(error.into());
                return;
            }
        };

        if self.state.is_local(&envelope.user.identity) {
            return;
        }

        self.handle_action(envelope.user, envelope.action, now);
    }

    fn handle_action(&mut self, sender: UserInfo, action: Action, now: &Instant) {
        debug!("{} <- {} from {}", self.state.local().identity, action.tag(), sender.identity);

        match action {
            Action::Init(InitContent(paint_data, roster)) => {
                self.state.merge_full_state(paint_data);
                self.state.adopt_roster(roster);
                self.incoming_events
                    .push_leaderboard(self.state.roster().participants());
                let model = self.state.active_model();
                self.show_model(model);
            }
            Action::SwitchModel(model) => {
                self.show_model(model);
            }
            Action::ModeChange(mode) => {
                if mode == self.state.mode() {
                    return;
                }
                self.apply_mode(mode, now);
                if mode == Mode::Doctor && self.state.is_host() {
                    self.begin_doctor();
                }
            }
            Action::Paint(content) => {
                let (model, entry) = content.into_entry();
                match self.state.apply_remote_paint(model, entry) {
                    Ok(PaintOutcome::Applied(entry)) => {
                        let part_id = entry.part_id.clone();
                        if model == self.state.active_model() {
                            self.incoming_events.push_paint(model, entry);
                        }
                        self.notify_paint(sender, part_id, now);
                    }
                    Ok(PaintOutcome::Unchanged) => {}
                    Err(error) => warn!("{}", error),
                }
            }
            Action::SyncAllPaintData(content) => {
                self.state.merge_full_state(content.model_paint_data);
                self.show_model(content.current_model);
            }
            Action::NextQuestion(cursor) => {
                if self.state.is_host() {
                    debug!("Host ignores nextQuestion from {}", sender.identity);
                    return;
                }
                if self.state.mode() != Mode::Doctor {
                    self.apply_mode(Mode::Doctor, now);
                }
                // the host drives the cursor now, drop any local advance
                if let Some(handle) = self.pending_question.take() {
                    self.state.cancel_timer(&handle);
                }
                let step = self.state.pose(cursor);
                self.show_step(step);
            }
            Action::Answer(question) => {
                if !self.state.is_host() {
                    return;
                }
                self.arbitrate(&sender.identity, question, now);
            }
            Action::Update(roster) => {
                self.state.adopt_roster(roster);
                self.incoming_events
                    .push_leaderboard(self.state.roster().participants());
            }
            Action::StartDoctor(roster) => {
                self.state.adopt_roster(roster);
                self.incoming_events
                    .push_leaderboard(self.state.roster().participants());
                if self.state.mode() != Mode::Doctor {
                    self.apply_mode(Mode::Doctor, now);
                }
            }
            Action::Leave => {
                self.on_leave(&sender.identity);
            }
        }
    }

    fn on_join(&mut self, user: UserInfo) {
        if self.state.is_local(&user.identity) {
            return;
        }

        self.state
            .roster_mut()
            .record_join(user.identity.clone(), user.display_name.clone());
        self.incoming_events.push_join(user);
        self.incoming_events
            .push_leaderboard(self.state.roster().participants());

        if self.state.is_host() {
            let content = InitContent(
                self.state.paint().all().clone(),
                self.state.roster().participants().to_vec(),
            );
            self.send(Action::Init(content));
        }
    }

    fn on_leave(&mut self, identity: &Identity) {
        if self.state.is_local(identity) {
            return;
        }

        let was_host = self.state.is_host();
        if self.state.roster_mut().remove(identity).is_none() {
            return;
        }

        self.incoming_events.push_leave(identity.clone());
        self.incoming_events
            .push_leaderboard(self.state.roster().participants());

        if !was_host && self.state.is_host() {
            info!("{} took over as host", self.state.local().identity);
        }
    }

    fn arbitrate(&mut self, identity: &Identity, question: Option<usize>, now: &Instant) {
        if self.state.mode() != Mode::Doctor {
            return;
        }

        match self.state.arbitrate(identity, question) {
            Arbitration::Accepted { .. } => {
                self.incoming_events
                    .push_leaderboard(self.state.roster().participants());
                if self.state.is_host() {
                    let roster = self.state.roster().participants().to_vec();
                    self.send(Action::Update(roster));
                }
                let delay = self.config.question_delay;
                let handle = self.state.schedule(now, delay, ModeTask::AskNextQuestion);
                self.pending_question = Some(handle);
            }
            Arbitration::Rejected(reason) => {
                debug!("Answer from {} rejected: {:?}", identity, reason);
            }
        }
    }

    fn apply_mode(&mut self, mode: Mode, now: &Instant) {
        let transition = self.state.transition(mode);
        self.incoming_events.push_mode_change(transition);

        if mode == Mode::Tour {
            self.state
                .schedule(now, Duration::ZERO, ModeTask::TourStep { index: 0 });
        }
    }

    /// Starts the quiz from the first question. The host announces it.
    fn begin_doctor(&mut self) {
        self.state.roster_mut().reset_scores();
        if self.state.is_host() {
            let roster = self.state.roster().participants().to_vec();
            self.send(Action::StartDoctor(roster));
        }
        self.incoming_events
            .push_leaderboard(self.state.roster().participants());

        let step = self.state.start_quiz();
        if self.state.is_host() {
            self.send(Action::NextQuestion(step.cursor()));
        }
        self.show_step(step);
    }

    fn fire_timers(&mut self, now: &Instant) {
        for task in self.state.poll_due(now) {
            match task {
                ModeTask::AskNextQuestion => {
                    self.pending_question = None;
                    let step = self.state.ask_next();
                    if self.state.is_host() {
                        self.send(Action::NextQuestion(step.cursor()));
                    }
                    self.show_step(step);
                }
                ModeTask::DismissPaintNotice { notice } => {
                    self.incoming_events.push_notice_dismissal(notice);
                }
                ModeTask::TourStep { index } => {
                    let model = self.state.active_model();
                    let Some(part_id) = self.state.catalog().part(model, index) else {
                        debug!("Tour of {} finished", model);
                        continue;
                    };
                    let part_id = part_id.to_string();
                    self.incoming_events.push_tour_step(index, part_id);

                    let interval = self.config.tour_step_interval;
                    self.state
                        .schedule(now, interval, ModeTask::TourStep { index: index + 1 });
                }
            }
        }
    }

    fn show_model(&mut self, model: ModelName) {
        let changed = self.state.set_active_model(model);
        self.incoming_events
            .push_model_switch(model, self.state.paint().entries(model));
        if !changed {
            return;
        }

        // the question now refers to the same index on the new model
        if let Some(step) = self.state.refresh_question() {
            self.show_step(step);
        }
    }

    fn show_step(&mut self, step: QuizStep) {
        match step {
            QuizStep::Question { cursor, part_id } => {
                self.incoming_events.push_question(cursor, part_id)
            }
            QuizStep::GameOver { cursor } => self.incoming_events.push_game_over(cursor),
        }
    }

    fn notify_paint(&mut self, painter: UserInfo, part_id: String, now: &Instant) {
        let notice = self.next_notice;
        self.next_notice += 1;

        self.incoming_events
            .push_paint_notice(notice, painter, part_id);
        let duration = self.config.paint_notice_duration;
        self.state
            .schedule(now, duration, ModeTask::DismissPaintNotice { notice });
    }

    fn send_full_sync(&mut self) {
        let content = SyncContent {
            model_paint_data: self.state.paint().all().clone(),
            current_model: self.state.active_model(),
        };
        self.send(Action::SyncAllPaintData(content));
    }

    fn require_mode(&self, action: &'static str, mode: Mode) -> Result<(), PeerError> {
        if self.state.mode() == mode {
            return Ok(());
        }
        Err(PeerError::ActionNotPermitted {
            action,
            mode: self.state.mode(),
        })
    }

    /// Hands an action to the transport. Without a transport the peer runs
    /// purely locally and the action stays local.
    fn send(&mut self, action: Action) {
        let Some((sender, _)) = self.io.as_ref() else {
            debug!("Not connected, {} stays local", action.tag());
            return;
        };

        let envelope = Envelope::new(self.state.local().clone(), action);
        let payload = match envelope.encode() {
            Ok(payload) => payload,
            Err(error) => {
                warn!("{}", error);
                self.incoming_events.push_error(error.into());
                return;
            }
        };

        if let Err(TransportError::Disconnected) = sender.send(&payload) {
            self.connection_lost(None);
        }
    }

    fn connection_lost(&mut self, error: Option<TransportError>) {
        warn!("{} lost its connection", self.state.local().identity);
        self.io = None;
        self.incoming_events.push_connection_loss();
        if let Some(error) = error {
            self.incoming_events.push_error(error.into());
        }
    }
}
