//! Deferred one-shot actions.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::trace;

/// Identifier for a scheduled action.
pub type TimerId = u32;

/// Queue of deferred one-shot actions, pumped by the host event loop.
///
/// Scheduling is fire-and-forget: an entry fires once its delay has elapsed
/// and is then dropped. Nothing coalesces overlapping schedules of the same
/// action, so deferred actions must be idempotent.
#[derive(Debug)]
pub struct TimerQueue<A> {
    /// Scheduled entries.
    entries: HashMap<TimerId, Entry<A>>,
    next_id: TimerId,
}

#[derive(Debug)]
struct Entry<A> {
    action: A,
    delay: Duration,
    scheduled: Instant,
}

impl<A> TimerQueue<A> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_id: 1,
        }
    }

    /// Schedule an action to fire after `delay`.
    pub fn schedule(&mut self, action: A, delay: Duration) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;

        let entry = Entry {
            action,
            delay,
            scheduled: Instant::now(),
        };

        self.entries.insert(id, entry);
        id
    }

    /// Cancel a scheduled action. Unknown ids are ignored.
    pub fn cancel(&mut self, id: TimerId) {
        self.entries.remove(&id);
    }

    /// Take every action whose delay has elapsed by `now`, in schedule order.
    pub fn fire_due(&mut self, now: Instant) -> Vec<A> {
        let mut due: Vec<TimerId> = self
            .entries
            .iter()
            .filter(|(_, entry)| now.saturating_duration_since(entry.scheduled) >= entry.delay)
            .map(|(&id, _)| id)
            .collect();
        due.sort_unstable();

        if !due.is_empty() {
            trace!("{} deferred actions due", due.len());
        }

        due.into_iter()
            .filter_map(|id| self.entries.remove(&id))
            .map(|entry| entry.action)
            .collect()
    }

    /// Get number of pending actions.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Deferred {
        RestoreAnimation,
        HideControls,
    }

    #[test]
    fn test_fire_after_delay() {
        let mut queue = TimerQueue::new();
        queue.schedule(Deferred::RestoreAnimation, Duration::from_millis(50));

        assert_eq!(queue.fire_due(Instant::now()), Vec::<Deferred>::new());
        assert_eq!(queue.pending(), 1);

        let later = Instant::now() + Duration::from_millis(60);
        assert_eq!(queue.fire_due(later), vec![Deferred::RestoreAnimation]);
        assert!(queue.is_empty());

        // Entries fire once
        assert_eq!(queue.fire_due(later), Vec::<Deferred>::new());
    }

    #[test]
    fn test_zero_delay_fires_immediately() {
        let mut queue = TimerQueue::new();
        queue.schedule(Deferred::HideControls, Duration::ZERO);
        assert_eq!(queue.fire_due(Instant::now()), vec![Deferred::HideControls]);
    }

    #[test]
    fn test_overlapping_schedules_all_fire() {
        let mut queue = TimerQueue::new();
        queue.schedule(Deferred::RestoreAnimation, Duration::from_millis(50));
        queue.schedule(Deferred::RestoreAnimation, Duration::from_millis(50));

        let later = Instant::now() + Duration::from_millis(100);
        let fired = queue.fire_due(later);
        assert_eq!(
            fired,
            vec![Deferred::RestoreAnimation, Deferred::RestoreAnimation]
        );
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(Deferred::HideControls, Duration::ZERO);
        queue.cancel(id);
        queue.cancel(id + 100);

        assert!(queue.is_empty());
        assert_eq!(queue.fire_due(Instant::now()), Vec::<Deferred>::new());
    }

    #[test]
    fn test_fires_in_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(Deferred::HideControls, Duration::from_millis(10));
        queue.schedule(Deferred::RestoreAnimation, Duration::from_millis(5));

        let later = Instant::now() + Duration::from_millis(50);
        assert_eq!(
            queue.fire_due(later),
            vec![Deferred::HideControls, Deferred::RestoreAnimation]
        );
    }
}
