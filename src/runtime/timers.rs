//! One-shot deferred callbacks for the single-threaded UI loop.
//!
//! Owners poll [`Timers::drain_due`] from their `tick` and act on the keys that
//! came due. Dropping the owner drops its pending timers, so nothing can fire
//! against a torn-down calendar.

use std::fmt::Debug;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct DelayedTask<K> {
    due_at: Instant,
    key: K,
}

#[derive(Debug, Clone)]
pub struct Timers<K> {
    delayed: Vec<DelayedTask<K>>,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Timers {
            delayed: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq + Debug> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `key` to fire `delay` after `now`. A pending timer with the same key
    /// is replaced.
    pub fn start(&mut self, key: K, delay: Duration, now: Instant) {
        self.delayed.retain(|task| task.key != key);
        self.delayed.push(DelayedTask {
            due_at: now + delay,
            key,
        });
    }

    /// Returns true if a pending timer was removed.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.delayed.len();
        self.delayed.retain(|task| task.key != key);
        before != self.delayed.len()
    }

    pub fn is_pending_where(&self, pred: impl Fn(&K) -> bool) -> bool {
        self.delayed.iter().any(|task| pred(&task.key))
    }

    pub fn clear(&mut self) {
        self.delayed.clear();
    }

    /// Removes and returns every key due at `now`, earliest first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<K> {
        let mut due = Vec::new();
        self.delayed.retain(|task| {
            if task.due_at <= now {
                due.push(task.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|task| task.due_at);
        due.into_iter().map(|task| task.key).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.delayed.iter().map(|task| task.due_at).min()
    }
}

/// How long an event loop may block at `now` before `deadline`, never more
/// than `cap`.
pub fn poll_timeout(deadline: Option<Instant>, now: Instant, cap: Duration) -> Duration {
    match deadline {
        Some(due) => due.saturating_duration_since(now).min(cap),
        None => cap,
    }
}
