// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! edgin-sim-engine: the concrete task/job vocabulary, the entity
//! behavior dispatch table, the client-facing `Gateway` contract, and the
//! `Engine` that ties them to a [`edgin_sim_core::Scheduler`] and
//! [`edgin_sim_core::State`].

pub mod dispatch;
pub mod engine;
pub mod gateway;
pub mod jobs;
pub mod runner;
pub mod tasks;

pub use dispatch::dispatch;
pub use engine::{prime_world, Engine};
pub use gateway::Gateway;
pub use jobs::{DamageJob, DieJob, EatJob, GrowJob, HungerDrainJob, MotionJob, WaitJob};
pub use tasks::{
    CraftTask, DieAndDropTask, GrowTask, HarvestTask, IdleTask, InventoryUpdateTask, MotionTask,
    StateChangeTask, UseItemTask, WalkTask,
};

#[cfg(any(test, feature = "test-support"))]
pub use gateway::collecting::CollectingGateway;
