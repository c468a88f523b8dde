// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The side-effect sink actions are delivered through (spec.md §4.3/§6).
//! Contract only — the server crate supplies the concrete socket-backed
//! implementation; nothing in this crate depends on sockets or JSON.

use async_trait::async_trait;

use edgin_sim_core::{Action, EntityId};

/// Delivers actions to connected clients. A send failure is logged by the
/// implementation and must never abort the Engine step that produced it
/// (spec.md §7) — `Gateway` methods return `()`, not `Result`.
#[async_trait]
pub trait Gateway: Send + Sync + 'static {
    /// Sends `actions` to every connected client.
    async fn broadcast(&self, actions: Vec<Action>);

    /// Sends `actions` to a single client identified by its hero entity id.
    /// A client that has already disconnected is a silent no-op.
    async fn send_to(&self, receiver_id: EntityId, actions: Vec<Action>);
}

/// An in-memory `Gateway` that only records what it was asked to send, for
/// exercising `Engine` without real sockets — mirrors the teacher's
/// `FakeAgentAdapter` test-support pattern.
#[cfg(any(test, feature = "test-support"))]
pub mod collecting {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Delivery {
        Broadcast(Vec<Action>),
        SendTo(EntityId, Vec<Action>),
    }

    #[derive(Default)]
    pub struct CollectingGateway {
        deliveries: Mutex<Vec<Delivery>>,
    }

    impl CollectingGateway {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn take_deliveries(&self) -> Vec<Delivery> {
            std::mem::take(&mut self.deliveries.lock())
        }

        /// Flattened view of every action broadcast or sent so far, in order.
        pub fn all_actions(&self) -> Vec<Action> {
            self.deliveries
                .lock()
                .iter()
                .flat_map(|delivery| match delivery {
                    Delivery::Broadcast(actions) => actions.clone(),
                    Delivery::SendTo(_, actions) => actions.clone(),
                })
                .collect()
        }
    }

    #[async_trait]
    impl Gateway for CollectingGateway {
        async fn broadcast(&self, actions: Vec<Action>) {
            self.deliveries.lock().push(Delivery::Broadcast(actions));
        }

        async fn send_to(&self, receiver_id: EntityId, actions: Vec<Action>) {
            self.deliveries.lock().push(Delivery::SendTo(receiver_id, actions));
        }
    }
}
