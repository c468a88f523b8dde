// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;

use edgin_sim_core::{Action, BareSphere, FakeClock, State};
use edgin_sim_engine::Engine;

use super::accept_loop;
use crate::gateway;

const SETTLE: Duration = Duration::from_millis(30);

async fn spawn_test_server() -> (std::net::SocketAddr, CancellationToken) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let state = State::new(Arc::new(BareSphere::new(100.0)), Vec::new());
    let gateway = gateway::new_shared();
    let engine = Arc::new(Engine::new(state, FakeClock::new(), gateway.clone() as Arc<dyn edgin_sim_engine::Gateway>));
    let shutdown = CancellationToken::new();

    tokio::spawn(accept_loop(listener, engine, gateway, shutdown.clone()));
    tokio::time::sleep(SETTLE).await;

    (addr, shutdown)
}

async fn read_one_action(stream: &mut BufReader<tokio::net::tcp::OwnedReadHalf>) -> Action {
    let mut line = String::new();
    stream.read_line(&mut line).await.unwrap();
    serde_json::from_str(line.trim()).unwrap()
}

/// Connecting sends the new hero its own `ActorCreation` roster before
/// anything else, mirroring the connect-time send sequence.
#[tokio::test]
async fn connecting_receives_actor_creation() {
    let (addr, shutdown) = spawn_test_server().await;

    let stream = TcpStream::connect(addr).await.unwrap();
    let (read_half, _write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let action = read_one_action(&mut reader).await;
    assert!(matches!(action, Action::ActorCreation { .. }));

    shutdown.cancel();
}

/// A second connection's hero creation is broadcast to the first
/// connection; a malformed frame sent in between is dropped silently
/// rather than severing anyone's connection.
#[tokio::test]
async fn malformed_frame_does_not_kill_the_connection() {
    let (addr, shutdown) = spawn_test_server().await;

    let first = TcpStream::connect(addr).await.unwrap();
    let (first_read, mut first_write) = first.into_split();
    let mut first_reader = BufReader::new(first_read);
    // first connection's own ActorCreation roster (empty world)
    let _ = read_one_action(&mut first_reader).await;

    first_write.write_all(b"not json at all\n").await.unwrap();
    tokio::time::sleep(SETTLE).await;

    let second = TcpStream::connect(addr).await.unwrap();
    tokio::time::sleep(SETTLE).await;

    // first connection observes the second hero's broadcast creation,
    // proving its read loop survived the malformed frame.
    let action = read_one_action(&mut first_reader).await;
    assert!(matches!(action, Action::ActorCreation { .. }));

    drop(second);
    shutdown.cancel();
}

/// Disconnecting broadcasts an `ActorDeletion` for the departed hero.
#[tokio::test]
async fn disconnecting_broadcasts_actor_deletion() {
    let (addr, shutdown) = spawn_test_server().await;

    let watcher = TcpStream::connect(addr).await.unwrap();
    let (watcher_read, _watcher_write) = watcher.into_split();
    let mut watcher_reader = BufReader::new(watcher_read);
    let _ = read_one_action(&mut watcher_reader).await; // watcher's own roster

    let leaving = TcpStream::connect(addr).await.unwrap();
    // watcher sees the leaving hero's creation broadcast
    let _ = read_one_action(&mut watcher_reader).await;

    drop(leaving);

    let action = read_one_action(&mut watcher_reader).await;
    assert!(matches!(action, Action::ActorDeletion { .. }));

    shutdown.cancel();
}
