// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server entry point (spec.md §6 "Ports"): wires the pure `Engine` core up
//! to real sockets — a TCP listener for game data, a UDP socket answering
//! LAN discovery — and runs them alongside the scheduler's `Runner` loop
//! until interrupted.

use std::sync::Arc;

use clap::Parser;
use tokio::net::{TcpListener, UdpSocket};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edgin_sim_core::SystemClock;
use edgin_sim_engine::{prime_world, Engine};
use edgin_sim_server::{connection, discovery, gateway, worldgen, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,edgin_sim_engine=debug,edgin_sim_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    tracing::info!(?config, "starting edgin-sim-server");

    let state = worldgen::generate(config.sphere_radius);
    let gateway = gateway::new_shared();
    let engine = Arc::new(Engine::new(state, SystemClock, gateway.clone() as Arc<dyn edgin_sim_engine::Gateway>));

    let prime_actions = prime_world(&engine);
    if !prime_actions.is_empty() {
        // World-generated entities (warriors, the berry bush) kick off their
        // autonomous behavior before any client connects; there is no one
        // to broadcast to yet, so the actions are simply dropped.
        tracing::debug!(count = prime_actions.len(), "primed world-generated entities");
    }

    let tcp_listener = TcpListener::bind(("0.0.0.0", config.tcp_port)).await?;
    let udp_socket = UdpSocket::bind(("0.0.0.0", config.udp_port)).await?;
    tracing::info!(tcp_port = config.tcp_port, udp_port = config.udp_port, "listening");

    let shutdown = CancellationToken::new();

    let runner_handle = tokio::spawn(edgin_sim_engine::runner::run(engine.clone(), shutdown.clone()));
    let accept_handle = tokio::spawn(connection::accept_loop(
        tcp_listener,
        engine.clone(),
        gateway.clone(),
        shutdown.clone(),
    ));
    let discovery_handle = tokio::spawn(discovery::respond_loop(udp_socket, shutdown.clone()));

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");
    shutdown.cancel();

    let _ = tokio::join!(runner_handle, accept_handle, discovery_handle);
    Ok(())
}
