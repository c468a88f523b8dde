// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TCP accept loop and per-connection handling (spec.md §6: one fixed TCP
//! port for game data; §4.3's "Connection hook" / "Disconnection hook").
//! Mirrors the source's `Harbour`/`EventAcceptor`/`EventListener`: each
//! accepted connection gets its own read loop decoding `Move` lines into
//! `Event`s for the `Engine`, and its own write task draining the
//! `TcpGateway`'s outbound channel for that hero.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use edgin_sim_core::Clock;
use edgin_sim_engine::Engine;

use crate::gateway::TcpGateway;
use crate::wire;

/// Accepts connections on `listener` until `shutdown` is cancelled,
/// spawning an independent task per connection (source: one `Harbour`
/// thread fans in/out to many client sockets via its selector; here each
/// connection gets its own pair of cooperating tasks instead).
pub async fn accept_loop<C: Clock>(
    listener: TcpListener,
    engine: Arc<Engine<C>>,
    gateway: Arc<TcpGateway>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("tcp accept loop shut down");
                return;
            }
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, addr)) => {
                        debug!(%addr, "tcp connection accepted");
                        let engine = Arc::clone(&engine);
                        let gateway = Arc::clone(&gateway);
                        let shutdown = shutdown.clone();
                        tokio::spawn(async move {
                            handle_connection(stream, engine, gateway, shutdown).await;
                        });
                    }
                    Err(error) => warn!(%error, "tcp accept error"),
                }
            }
        }
    }
}

async fn handle_connection<C: Clock>(
    stream: TcpStream,
    engine: Arc<Engine<C>>,
    gateway: Arc<TcpGateway>,
    shutdown: CancellationToken,
) {
    let (read_half, mut write_half) = stream.into_split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let hero_id = engine
        .connect_hero(|hero_id| gateway.register(hero_id, tx))
        .await;

    let writer = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if write_half.write_all(line.as_bytes()).await.is_err() {
                break;
            }
        }
    });

    let mut lines = BufReader::new(read_half).lines();
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            read = lines.next_line() => {
                match read {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match wire::decode_move(&line, hero_id) {
                            Ok(event) => engine.handle_event(event).await,
                            Err(error) => warn!(%error, entity_id = %hero_id, "malformed move frame dropped"),
                        }
                    }
                    Ok(None) => break,
                    Err(error) => {
                        warn!(%error, entity_id = %hero_id, "tcp read error");
                        break;
                    }
                }
            }
        }
    }

    info!(entity_id = %hero_id, "client disconnected");
    gateway.unregister(hero_id);
    engine.disconnect_hero(hero_id).await;
    writer.abort();
}

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;
