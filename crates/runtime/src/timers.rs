use foundation::time::Timestamp;

/// Identifies an armed timer in a deterministic, stable way.
///
/// This is intentionally a small, copyable handle so callers can retain it
/// for cancellation without holding any queue state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// One-shot timer queue driven entirely by host-supplied timestamps.
///
/// Ordering contract:
/// - `fire_due` returns timers in `(deadline, id)` order, so two queues fed
///   the same schedule/cancel/fire sequence produce identical output.
/// - A cancelled timer never fires; firing consumes the timer.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    armed: Vec<(Timestamp, TimerId)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            armed: Vec::new(),
        }
    }

    pub fn schedule(&mut self, deadline: Timestamp) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.armed.push((deadline, id));
        id
    }

    /// Returns whether the timer was still armed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.armed.len();
        self.armed.retain(|(_, armed_id)| *armed_id != id);
        self.armed.len() != before
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// Fire every timer whose deadline is at or before `now`.
    pub fn fire_due(&mut self, now: Timestamp) -> Vec<TimerId> {
        let mut due: Vec<(Timestamp, TimerId)> = Vec::new();
        self.armed.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }
}
