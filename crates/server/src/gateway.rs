// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The concrete, socket-backed [`Gateway`]: a map from hero entity id to the
//! outbound half of its connection's write task (spec.md §6's `Gateway`
//! contract; mirrors the source's `ClientAssociation` + `Gateway` pair).
//! A send failure — the peer is gone or its write task has ended — is
//! logged and swallowed (spec.md §7), never propagated to the `Engine`.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::warn;

use edgin_sim_core::{Action, EntityId};
use edgin_sim_engine::Gateway;

/// One outbound line, pre-serialized by the caller so this module never
/// needs to know about JSON.
pub type OutboundLine = String;

#[derive(Default)]
pub struct TcpGateway {
    connections: Mutex<Vec<(EntityId, mpsc::UnboundedSender<OutboundLine>)>>,
}

impl TcpGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the outbound channel for a newly connected hero. Called
    /// once the hero's id is known (the `associate` callback of
    /// `Engine::connect_hero`).
    pub fn register(&self, hero_id: EntityId, sender: mpsc::UnboundedSender<OutboundLine>) {
        self.connections.lock().push((hero_id, sender));
    }

    /// Drops a disconnected hero's outbound channel.
    pub fn unregister(&self, hero_id: EntityId) {
        self.connections.lock().retain(|(id, _)| *id != hero_id);
    }

    fn send_line(&self, hero_id: EntityId, line: &OutboundLine) {
        let sender = self
            .connections
            .lock()
            .iter()
            .find(|(id, _)| *id == hero_id)
            .map(|(_, sender)| sender.clone());
        if let Some(sender) = sender {
            if sender.send(line.clone()).is_err() {
                warn!(entity_id = %hero_id, "gateway send failed: connection closed");
            }
        }
    }
}

#[async_trait]
impl Gateway for TcpGateway {
    async fn broadcast(&self, actions: Vec<Action>) {
        let targets: Vec<EntityId> = self.connections.lock().iter().map(|(id, _)| *id).collect();
        for action in &actions {
            let line = match crate::wire::encode_action(action) {
                Ok(line) => line,
                Err(error) => {
                    warn!(%error, "gateway broadcast: failed to encode action");
                    continue;
                }
            };
            for &target in &targets {
                self.send_line(target, &line);
            }
        }
    }

    async fn send_to(&self, receiver_id: EntityId, actions: Vec<Action>) {
        for action in &actions {
            match crate::wire::encode_action(action) {
                Ok(line) => self.send_line(receiver_id, &line),
                Err(error) => warn!(%error, "gateway send_to: failed to encode action"),
            }
        }
    }
}

pub fn new_shared() -> Arc<TcpGateway> {
    Arc::new(TcpGateway::new())
}
