// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline scheduling for the status-poll and log-poll loops
//!
//! Every periodic loop owns a [`Timer`] handle. Arming a timer replaces its
//! previous deadline, so a loop never has two outstanding wake-ups. The
//! runtime asks the shared [`Scheduler`] which timers are due and dispatches
//! them one at a time.

use crate::clock::Clock;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Identity of a scheduled wake-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerId {
    /// Next build status poll
    BuildPoll,
    /// Next log page fetch
    LogPoll,
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerId::BuildPoll => write!(f, "build-poll"),
            TimerId::LogPoll => write!(f, "log-poll"),
        }
    }
}

/// A due timer returned by [`Scheduler::poll`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledItem {
    pub id: TimerId,
    pub fire_at: Instant,
}

/// Pending deadlines, at most one per [`TimerId`]
#[derive(Debug, Default)]
pub struct Scheduler {
    deadlines: HashMap<TimerId, Instant>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `id` to fire at `fire_at`, replacing any earlier deadline
    pub fn schedule(&mut self, id: TimerId, fire_at: Instant) {
        self.deadlines.insert(id, fire_at);
    }

    /// Disarm `id`. Returns whether a deadline was pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.deadlines.remove(&id).is_some()
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Remove and return every timer due at or before `now`, earliest first
    pub fn poll(&mut self, now: Instant) -> Vec<ScheduledItem> {
        let mut ready: Vec<ScheduledItem> = self
            .deadlines
            .iter()
            .filter(|(_, fire_at)| **fire_at <= now)
            .map(|(id, fire_at)| ScheduledItem {
                id: *id,
                fire_at: *fire_at,
            })
            .collect();
        ready.sort_by_key(|item| (item.fire_at, item.id));

        for item in &ready {
            self.deadlines.remove(&item.id);
        }
        ready
    }

    /// Earliest pending deadline, if any
    pub fn next_fire_time(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }
}

/// A cancellable delayed wake-up owned by one component
#[derive(Clone)]
pub struct Timer<C: Clock> {
    id: TimerId,
    scheduler: Arc<Mutex<Scheduler>>,
    clock: C,
}

impl<C: Clock> Timer<C> {
    pub fn new(id: TimerId, scheduler: Arc<Mutex<Scheduler>>, clock: C) -> Self {
        Self {
            id,
            scheduler,
            clock,
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Fire after `delay`, replacing a pending deadline
    pub fn arm(&self, delay: Duration) {
        let fire_at = self.clock.now() + delay;
        self.lock().schedule(self.id, fire_at);
    }

    /// Disarm. Returns whether a deadline was pending.
    pub fn clear(&self) -> bool {
        self.lock().cancel(self.id)
    }

    pub fn is_armed(&self) -> bool {
        self.lock().is_armed(self.id)
    }

    /// Guard that disarms this timer when dropped, whatever path the
    /// owning scope leaves by
    pub fn clear_on_drop(&self) -> ClearOnDrop<C> {
        ClearOnDrop {
            timer: self.clone(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Scheduler> {
        self.scheduler.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<C: Clock> fmt::Debug for Timer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("id", &self.id)
            .field("armed", &self.is_armed())
            .finish()
    }
}

/// See [`Timer::clear_on_drop`]
pub struct ClearOnDrop<C: Clock> {
    timer: Timer<C>,
}

impl<C: Clock> Drop for ClearOnDrop<C> {
    fn drop(&mut self) {
        self.timer.clear();
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
