// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Runner loop (spec.md §4.2): a single-threaded cooperative loop over
//! the `Engine`'s scheduler. Sleeps until the next deadline, dispatches
//! everything due, and repeats — interruptible both by an earlier entry
//! arriving mid-sleep (`Engine::woken`) and by an external shutdown signal,
//! mirroring the source's `executor.Runner` thread.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use edgin_sim_core::Clock;

use crate::engine::Engine;

/// Runs `engine`'s scheduler loop until `shutdown` is cancelled. Intended to
/// be spawned as its own task; the network ingress side calls
/// `Engine::handle_event` concurrently — the two never race because the
/// `Engine` itself serializes all State access behind its own lock (§5).
pub async fn run<C: Clock>(engine: Arc<Engine<C>>, shutdown: CancellationToken) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("runner shut down");
                return;
            }
            () = sleep_until_due(&engine) => {
                while engine.run_due().await {}
            }
        }
    }
}

/// Resolves once the earliest scheduler entry's deadline has passed. An
/// empty queue sleeps on `Engine::woken` instead of spinning (spec.md §4.2
/// step 1: "an empty queue is legal and should not spin"). A new entry
/// arriving with an earlier deadline than the one currently slept on
/// re-enters the loop to recompute the sleep target, rather than
/// oversleeping past it.
async fn sleep_until_due<C: Clock>(engine: &Engine<C>) {
    loop {
        match engine.next_deadline() {
            None => {
                engine.woken().await;
            }
            Some(deadline) => {
                tokio::select! {
                    () = tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)) => return,
                    () = engine.woken() => {}
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
