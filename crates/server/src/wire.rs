// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Newline-delimited JSON wire codec (spec.md §6): inbound frames decode to
//! `Move`, outbound frames encode `Action`. The engine never sees JSON —
//! this module is the only place the boundary is crossed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use edgin_sim_core::{Action, Assembly, EntityId, Event, Hand, UpdateVariant};

/// A single client move, decoded from one line of the inbound TCP stream.
/// Mirrors spec.md §6's "Move vocabulary consumed": each variant maps 1:1
/// to an `Event` targeted at the sender's own hero id.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum Move {
    #[serde(rename = "move:motion_start")]
    MotionStart { bearing: f64 },

    #[serde(rename = "move:motion_stop")]
    MotionStop {},

    #[serde(rename = "move:hand_activation")]
    HandActivation { hand: Hand, object_id: Option<EntityId> },

    #[serde(rename = "move:inventory_update")]
    InventoryUpdate {
        hand: Hand,
        inventory_index: usize,
        update_variant: UpdateVariant,
    },

    #[serde(rename = "move:craft")]
    Craft { assembly: Assembly },
}

#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed move frame: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decodes one inbound line into an `Event` addressed to `receiver_id`
/// (the sender's own hero). Malformed JSON is a `WireError`; a
/// syntactically valid but otherwise unrecognized move decodes to `Ok`
/// with no corresponding event path here, since `Move` is a closed enum —
/// client input the simulation doesn't trust beyond what `serde` already
/// rejects (spec.md §7: unknown move kind => silently discard).
pub fn decode_move(line: &str, receiver_id: EntityId) -> Result<Event, WireError> {
    let mv: Move = serde_json::from_str(line)?;
    Ok(event_from_move(mv, receiver_id))
}

fn event_from_move(mv: Move, receiver_id: EntityId) -> Event {
    match mv {
        Move::MotionStart { bearing } => Event::MotionStart { receiver_id, bearing },
        Move::MotionStop {} => Event::MotionStop { receiver_id },
        Move::HandActivation { hand, object_id } => Event::HandActivation {
            receiver_id,
            hand,
            object_id,
        },
        Move::InventoryUpdate {
            hand,
            inventory_index,
            update_variant,
        } => Event::InventoryUpdate {
            receiver_id,
            hand,
            inventory_index,
            update_variant,
        },
        Move::Craft { assembly } => Event::Craft { receiver_id, assembly },
    }
}

/// Encodes one outbound `Action` as a single JSON line, newline-terminated.
pub fn encode_action(action: &Action) -> Result<String, WireError> {
    let mut line = serde_json::to_string(action)?;
    line.push('\n');
    Ok(line)
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
