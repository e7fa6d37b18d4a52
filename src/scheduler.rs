//! Deferred callbacks for the UI thread.
//!
//! egui has no "run this after N ms" facility, so tasks are queued here with
//! a deadline and the shell drains whatever is due once per frame. Time is
//! always passed in by the caller.

use std::time::{Duration, Instant};

/// Handle returned by [`Scheduler::schedule`], used to cancel the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

struct Entry<T> {
    id: TimerId,
    due: Instant,
    payload: T,
}

pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: now + delay,
            payload,
        });
        id
    }

    /// Returns false if the task already ran or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Remove and return every task whose deadline has passed, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<(TimerId, T)> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| (e.due, e.id));
        due.into_iter().map(|e| (e.id, e.payload)).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.due).min()
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_tasks_come_out_in_deadline_order() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(start, Duration::from_millis(300), "late");
        scheduler.schedule(start, Duration::from_millis(100), "early");
        scheduler.schedule(start, Duration::from_secs(10), "future");

        let due: Vec<_> = scheduler
            .take_due(start + Duration::from_millis(500))
            .into_iter()
            .map(|(_, p)| p)
            .collect();

        assert_eq!(due, vec!["early", "late"]);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(
            scheduler.next_deadline(),
            Some(start + Duration::from_secs(10))
        );
    }

    #[test]
    fn cancelled_task_never_fires() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(start, Duration::from_millis(10), ());

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.take_due(start + Duration::from_secs(1)).is_empty());
        assert_eq!(scheduler.next_deadline(), None);
    }
}
