use std::time::{Duration, Instant};

use log::debug;

use crate::{
    mode::timer_queue::{TimerHandle, TimerQueue},
    types::Mode,
};

/// Deferred work owned by the current mode
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModeTask {
    /// Host advances the quiz after a correct answer
    AskNextQuestion,
    /// Hide the transient "someone painted" popup
    DismissPaintNotice { notice: u64 },
    /// Highlight the next part of the tour walk
    TourStep { index: usize },
}

/// What leaving the previous mode requires of the presentation layer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: Mode,
    pub to: Mode,
    pub cancelled_timers: usize,
    pub restore_camera: bool,
    pub close_quiz_modal: bool,
}

/// Whether a peer may request a model switch in `mode`
pub fn can_change_model(is_host_local: bool, mode: Mode) -> bool {
    is_host_local || mode == Mode::Paint
}

/// Paint / Tour / Doctor state machine. Owns every timer so that leaving
/// Tour or Doctor cancels them deterministically.
pub struct ModeMachine {
    mode: Mode,
    timers: TimerQueue<ModeTask>,
}

impl ModeMachine {
    pub fn new() -> Self {
        Self {
            mode: Mode::Paint,
            timers: TimerQueue::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Moves to `to`. Never rejected. Leaving Tour or Doctor, including
    /// re-entering Doctor, runs the stop-hook first.
    pub fn transition(&mut self, to: Mode) -> ModeTransition {
        let from = self.mode;
        let stopping = matches!(from, Mode::Tour | Mode::Doctor);

        let cancelled_timers = if stopping { self.timers.cancel_all() } else { 0 };
        self.mode = to;

        debug!(
            "Mode {:?} -> {:?} ({} timers cancelled)",
            from, to, cancelled_timers
        );

        ModeTransition {
            from,
            to,
            cancelled_timers,
            restore_camera: stopping,
            close_quiz_modal: from == Mode::Doctor,
        }
    }

    pub fn can_change_model(&self, is_host_local: bool) -> bool {
        can_change_model(is_host_local, self.mode)
    }

    pub fn schedule(&mut self, now: &Instant, delay: Duration, task: ModeTask) -> TimerHandle {
        self.timers.schedule(now, delay, task)
    }

    pub fn cancel(&mut self, handle: &TimerHandle) -> bool {
        self.timers.cancel(handle)
    }

    pub fn poll_due(&mut self, now: &Instant) -> Vec<ModeTask> {
        self.timers.poll_due(now)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

impl Default for ModeMachine {
    fn default() -> Self {
        Self::new()
    }
}
