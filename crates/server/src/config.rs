// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line configuration (spec.md §6 "Ports": values supplied by the
//! embedding environment). No file-based config — there is nothing to
//! persist across runs (Non-goals: persistence).

use clap::Parser;

/// Starts the world simulation server core.
#[derive(Debug, Parser)]
#[command(name = "edgin-sim-server", version)]
pub struct Config {
    /// TCP port clients connect to for game data (moves in, actions out).
    #[arg(long, env = "EDGIN_TCP_PORT", default_value_t = 9000)]
    pub tcp_port: u16,

    /// UDP port LAN discovery probes are answered on.
    #[arg(long, env = "EDGIN_UDP_PORT", default_value_t = 9001)]
    pub udp_port: u16,

    /// Radius of the simulated sphere.
    #[arg(long, env = "EDGIN_SPHERE_RADIUS", default_value_t = 100.0)]
    pub sphere_radius: f64,
}
