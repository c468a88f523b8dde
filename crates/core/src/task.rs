// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An entity's current intent. Exactly one `Task` is live per entity at a
//! time; replacing it is the only way to change an entity's behavior.
//!
//! Unlike the source, where a task both creates its job and hands it back
//! out via a separate `get_job()` accessor, `start` returns the job
//! directly alongside its actions — the engine hands that job straight to
//! the scheduler, so nothing needs to retain a second owning reference to
//! it. When a task is later superseded, the engine looks up its job's
//! `last_tick` from the scheduler entry before cancelling it and passes
//! that to `finish`, which is all `MotionTask::finish` needs from the job
//! it no longer owns.

use std::time::Instant;

use crate::action::Action;
use crate::job::Job;
use crate::state::State;

pub struct TaskStart {
    pub actions: Vec<Action>,
    pub job: Option<Box<dyn Job>>,
}

impl TaskStart {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions, job: None }
    }

    pub fn with_job(actions: Vec<Action>, job: Box<dyn Job>) -> Self {
        Self {
            actions,
            job: Some(job),
        }
    }
}

pub trait Task: Send {
    fn start(&mut self, state: &mut State, now: Instant) -> TaskStart;
    fn finish(&mut self, state: &mut State, now: Instant, last_tick: Option<Instant>) -> Vec<Action>;
}

/// The task an entity is given before it has reacted to anything. Emits
/// nothing in either direction and drives no job.
pub struct EmptyTask;

impl Task for EmptyTask {
    fn start(&mut self, _state: &mut State, _now: Instant) -> TaskStart {
        TaskStart::new(Vec::new())
    }

    fn finish(&mut self, _state: &mut State, _now: Instant, _last_tick: Option<Instant>) -> Vec<Action> {
        Vec::new()
    }
}
