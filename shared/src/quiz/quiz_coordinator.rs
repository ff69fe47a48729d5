use log::{debug, info};

use crate::{
    roster::roster::Roster,
    types::{Identity, QuizCursor},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    /// Doctor mode is not running
    Idle,
    /// A question is posed and may be answered
    Asking,
    /// The cursor ran past the part list; inert until restarted
    Over,
}

/// What every peer should display after the cursor moved
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizStep {
    Question { cursor: QuizCursor, part_id: String },
    GameOver { cursor: QuizCursor },
}

impl QuizStep {
    pub fn cursor(&self) -> QuizCursor {
        match self {
            QuizStep::Question { cursor, .. } | QuizStep::GameOver { cursor } => *cursor,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    NotAsking,
    AlreadyAnswered,
    StaleQuestion {
        current: QuizCursor,
        answered: QuizCursor,
    },
    UnknownParticipant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arbitration {
    Accepted { identity: Identity, score: u32 },
    Rejected(RejectReason),
}

/// Doctor-mode question sequencing and first-correct-answer arbitration.
///
/// Arbitration runs on the host only. Among answers to the same question
/// the first one the host receives wins, whatever order they were sent in.
pub struct QuizCoordinator {
    phase: QuizPhase,
    cursor: QuizCursor,
    first_answer_lock: bool,
}

impl QuizCoordinator {
    pub fn new() -> Self {
        Self {
            phase: QuizPhase::Idle,
            cursor: 0,
            first_answer_lock: false,
        }
    }

    /// Restarts the quiz from the first part
    pub fn start(&mut self, parts: &[String]) -> QuizStep {
        info!("Starting quiz over {} parts", parts.len());
        self.pose(0, parts)
    }

    /// Advances to the next question. Once the quiz is over it stays over.
    pub fn ask_next(&mut self, parts: &[String]) -> QuizStep {
        if self.phase == QuizPhase::Over {
            return QuizStep::GameOver {
                cursor: self.cursor,
            };
        }
        self.pose(self.cursor + 1, parts)
    }

    /// Shows the question at `cursor`, reopening the answer lock
    pub fn pose(&mut self, cursor: QuizCursor, parts: &[String]) -> QuizStep {
        self.cursor = cursor;

        let Some(part_id) = parts.get(cursor) else {
            info!("Quiz over at cursor {}", cursor);
            self.phase = QuizPhase::Over;
            self.first_answer_lock = true;
            return QuizStep::GameOver { cursor };
        };

        self.phase = QuizPhase::Asking;
        self.first_answer_lock = false;
        QuizStep::Question {
            cursor,
            part_id: part_id.clone(),
        }
    }

    /// Re-reads the current question against another part list. The answer
    /// lock is kept: the question is the same, only its target moved.
    pub fn refresh(&mut self, parts: &[String]) -> Option<QuizStep> {
        if self.phase != QuizPhase::Asking {
            return None;
        }

        let Some(part_id) = parts.get(self.cursor) else {
            info!("Quiz over at cursor {} after model change", self.cursor);
            self.phase = QuizPhase::Over;
            self.first_answer_lock = true;
            return Some(QuizStep::GameOver {
                cursor: self.cursor,
            });
        };

        Some(QuizStep::Question {
            cursor: self.cursor,
            part_id: part_id.clone(),
        })
    }

    pub fn stop(&mut self) {
        self.phase = QuizPhase::Idle;
        self.first_answer_lock = false;
    }

    /// Local evaluation of a click against this peer's copy of the target
    pub fn check_answer(&self, parts: &[String], clicked_part: &str) -> bool {
        self.phase == QuizPhase::Asking
            && parts
                .get(self.cursor)
                .map(|target| target == clicked_part)
                .unwrap_or(false)
    }

    /// Host-side arbitration of an answer. `question` is the cursor the
    /// answering peer saw; `None` means the current one.
    pub fn arbitrate(
        &mut self,
        roster: &mut Roster,
        identity: &Identity,
        question: Option<QuizCursor>,
    ) -> Arbitration {
        if self.phase != QuizPhase::Asking {
            return Arbitration::Rejected(RejectReason::NotAsking);
        }
        if let Some(answered) = question {
            if answered != self.cursor {
                debug!(
                    "Ignoring answer from {} for question {} (current {})",
                    identity, answered, self.cursor
                );
                return Arbitration::Rejected(RejectReason::StaleQuestion {
                    current: self.cursor,
                    answered,
                });
            }
        }
        if self.first_answer_lock {
            return Arbitration::Rejected(RejectReason::AlreadyAnswered);
        }
        if !roster.increment_score(identity) {
            return Arbitration::Rejected(RejectReason::UnknownParticipant);
        }

        self.first_answer_lock = true;
        let score = roster.score(identity).unwrap_or_default();
        info!("{} answered question {} first (score {})", identity, self.cursor, score);

        Arbitration::Accepted {
            identity: identity.clone(),
            score,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn cursor(&self) -> QuizCursor {
        self.cursor
    }

    pub fn is_locked(&self) -> bool {
        self.first_answer_lock
    }
}

impl Default for QuizCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
