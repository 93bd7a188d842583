//! Single-threaded timer queue
//!
//! Stand-in for the browser's setTimeout/setInterval. Timers fire in
//! `(due_ms, insertion order)` order against a virtual clock that only moves
//! when the host calls `tick`.

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What happens when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// One spawn attempt; rescheduled while the scheduler is running
    SpawnTick,
    /// Take a word off screen (expiry or end of feedback)
    RemoveWord { id: u32 },
    /// Move on to the next level after the last hit
    AdvanceLevel,
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due_ms: u64,
    task: Task,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire at `due_ms`
    pub fn schedule(&mut self, due_ms: u64, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer { id, due_ms, task });
        id
    }

    /// Cancel a pending timer; returns false if it already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Due time of a pending timer
    pub fn due_time(&self, id: TimerId) -> Option<u64> {
        self.timers.iter().find(|t| t.id == id).map(|t| t.due_ms)
    }

    /// Remove and return the earliest timer due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerId, u64, Task)> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;
        let timer = self.timers.swap_remove(idx);
        Some((timer.id, timer.due_ms, timer.task))
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
