// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A min-heap of deferred work, ordered by deadline. Not thread-safe on its
//! own — the engine crate wraps one in a `parking_lot::Mutex` and drives it
//! from a `Runner` loop, mirroring the source's lock-guarded queue.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use crate::event::Event;
use crate::id::EntityId;
use crate::job::Job;

/// What a scheduler entry carries once it fires.
pub enum Trigger {
    Event(Event),
    Job(Box<dyn Job>),
}

struct Entry {
    deadline: Instant,
    handle: Option<EntityId>,
    trigger: Trigger,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so the earliest deadline sorts first.
        other.deadline.cmp(&self.deadline)
    }
}

#[derive(Default)]
pub struct Scheduler {
    queue: BinaryHeap<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `trigger` to fire `delay` after `now`. `handle` need not be
    /// unique — pass the same handle again and `cancel` removes every entry
    /// carrying it. A job's own handle is conventionally the id of the
    /// entity it drives.
    pub fn enter(&mut self, handle: Option<EntityId>, now: Instant, delay: Duration, trigger: Trigger) {
        self.queue.push(Entry {
            deadline: now + delay,
            handle,
            trigger,
        });
    }

    /// Removes every entry carrying `handle`.
    pub fn cancel(&mut self, handle: EntityId) {
        let remaining: Vec<Entry> = self
            .queue
            .drain()
            .filter(|entry| entry.handle != Some(handle))
            .collect();
        self.queue = remaining.into_iter().collect();
    }

    /// The `last_tick` of the job entry scheduled under `handle`, if any —
    /// consulted before cancelling a superseded task's job so its
    /// replacement can measure elapsed time.
    pub fn job_last_tick(&self, handle: EntityId) -> Option<Instant> {
        self.queue.iter().find_map(|entry| match (&entry.trigger, entry.handle) {
            (Trigger::Job(job), Some(entry_handle)) if entry_handle == handle => {
                Some(job.last_tick())
            }
            _ => None,
        })
    }

    /// The deadline of the earliest pending entry, if the queue is non-empty.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.peek().map(|entry| entry.deadline)
    }

    /// Pops and returns the earliest entry if its deadline is at or before
    /// `now`, along with the handle it was scheduled under.
    pub fn pop_due(&mut self, now: Instant) -> Option<(Option<EntityId>, Trigger)> {
        if self.queue.peek().is_some_and(|entry| entry.deadline <= now) {
            self.queue.pop().map(|entry| (entry.handle, entry.trigger))
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
