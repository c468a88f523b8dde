// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Material-kind tag carried by every entity, used to match recipe
//! ingredients against inventory contents during crafting.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Essence {
    Rocks,
    Gold,
    Meat,
    Logs,
    Tool,
    Vegy,
    Plant,
    Hero,
    Sticks,
    Void,
}

crate::simple_display! {
    Essence {
        Rocks => "rocks",
        Gold => "gold",
        Meat => "meat",
        Logs => "logs",
        Tool => "tool",
        Vegy => "vegy",
        Plant => "plant",
        Hero => "hero",
        Sticks => "sticks",
        Void => "void",
    }
}
