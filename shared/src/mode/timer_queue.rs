use std::time::{Duration, Instant};

/// Handle to a scheduled task, used to cancel it before it fires
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Cancellable one-shot tasks, polled by the owner with the current time.
/// Nothing fires on its own: a cancelled or cleared task can never run.
pub struct TimerQueue<T> {
    next_handle: u64,
    pending: Vec<(TimerHandle, Instant, T)>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, now: &Instant, delay: Duration, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.pending.push((handle, *now + delay, task));
        handle
    }

    pub fn cancel(&mut self, handle: &TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(pending, _, _)| pending != handle);
        self.pending.len() != before
    }

    /// Cancels every pending task, returning how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    /// Removes and returns every task due at `now`, earliest deadline first
    pub fn poll_due(&mut self, now: &Instant) -> Vec<T> {
        let mut due = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].1 <= *now {
                due.push(self.pending.remove(index));
            } else {
                index += 1;
            }
        }

        // stable, so tasks sharing a deadline keep their scheduling order
        due.sort_by_key(|(_, deadline, _)| *deadline);
        due.into_iter().map(|(_, _, task)| task).collect()
    }

    pub fn contains(&self, handle: &TimerHandle) -> bool {
        self.pending.iter().any(|(pending, _, _)| pending == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
