// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! LAN discovery responder (spec.md §6: "UDP on the broadcast port answers
//! every datagram with a single JSON object"). Mirrors the source's
//! `ServerBroadcaster`: no state, no parsing of the inbound datagram at
//! all — any packet on the port gets the same reply.

use serde::Serialize;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct DiscoveryResponse {
    name: &'static str,
    version: &'static str,
}

fn discovery_payload() -> Vec<u8> {
    let response = DiscoveryResponse {
        name: "edgin_around",
        version: VERSION,
    };
    // A fixed, always-serializable struct — failure here would be a
    // programmer error, not a runtime condition worth propagating.
    serde_json::to_vec(&response).unwrap_or_default()
}

/// Answers every inbound datagram on `socket` until `shutdown` is
/// cancelled. The source reads into a fixed 1024-byte buffer and ignores
/// its contents entirely; this does the same.
pub async fn respond_loop(socket: UdpSocket, shutdown: CancellationToken) {
    let payload = discovery_payload();
    let mut buf = [0u8; 1024];
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("udp discovery responder shut down");
                return;
            }
            received = socket.recv_from(&mut buf) => {
                match received {
                    Ok((_, addr)) => {
                        if let Err(error) = socket.send_to(&payload, addr).await {
                            warn!(%error, %addr, "udp discovery reply failed");
                        }
                    }
                    Err(error) => warn!(%error, "udp discovery recv error"),
                }
            }
        }
    }
}
