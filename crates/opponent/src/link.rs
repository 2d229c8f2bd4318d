//! UDP link loop.
//!
//! One socket receives on `0.0.0.0:<recv_port>` and sends to
//! `<host>:<send_port>`. Every [`LINK_POLL_MS`] the latched requests are turned
//! into datagrams; inbound datagrams are parsed as they arrive and never block
//! on the game side: kinds go into a bounded channel with `try_send`.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use tokio::net::UdpSocket;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

use crate::controller::LinkController;
use crate::core::{LinkRequest, LinkStatus};
use crate::protocol::{parse_datagram, Inbound};
use crate::types::{PieceKind, DEFAULT_RECV_PORT, DEFAULT_SEND_PORT, LINK_POLL_MS};

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("failed to create link runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to resolve opponent address {addr}: {source}")]
    Resolve {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("opponent address {0} resolved to nothing")]
    NoAddress(String),
}

/// Link configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    pub host: String,
    pub recv_port: u16,
    pub send_port: u16,
    pub disabled: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            recv_port: DEFAULT_RECV_PORT,
            send_port: DEFAULT_SEND_PORT,
            disabled: false,
        }
    }
}

impl LinkConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create from any variable lookup; unset or unparsable values keep the
    /// defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = var("TASKTRIS_OPPONENT_HOST").unwrap_or(defaults.host);
        let recv_port = var("TASKTRIS_RECV_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.recv_port);
        let send_port = var("TASKTRIS_SEND_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.send_port);
        let disabled = var("TASKTRIS_OPPONENT_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            host,
            recv_port,
            send_port,
            disabled,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.recv_port)
    }

    pub fn peer_addr(&self) -> String {
        format!("{}:{}", self.host, self.send_port)
    }
}

/// Bind the receive socket and resolve the opponent's address.
pub async fn connect(config: &LinkConfig) -> Result<(UdpSocket, SocketAddr), LinkError> {
    let bind = config.bind_addr();
    let socket = UdpSocket::bind(&bind)
        .await
        .map_err(|source| LinkError::Bind { addr: bind, source })?;

    let peer = config.peer_addr();
    let mut addrs = tokio::net::lookup_host(&peer)
        .await
        .map_err(|source| LinkError::Resolve {
            addr: peer.clone(),
            source,
        })?
        .collect::<Vec<_>>();
    // the socket is IPv4-only
    addrs.sort_by_key(|a| !a.is_ipv4());
    let target = addrs
        .into_iter()
        .next()
        .ok_or(LinkError::NoAddress(peer))?;
    Ok((socket, target))
}

/// Channels between the link loop and the game side
pub struct LinkChannels {
    pub requests: mpsc::UnboundedReceiver<LinkRequest>,
    pub kinds: mpsc::Sender<PieceKind>,
    pub status: watch::Sender<LinkStatus>,
}

/// Run the link until the request channel closes.
///
/// `ready` receives the socket's local address once the loop is running.
pub async fn run_link(
    socket: UdpSocket,
    peer: SocketAddr,
    mut channels: LinkChannels,
    ready: Option<oneshot::Sender<SocketAddr>>,
) {
    let mut controller = LinkController::from_entropy();
    let mut tick = tokio::time::interval(Duration::from_millis(u64::from(LINK_POLL_MS)));
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut buf = [0u8; 64];

    if let Some(ready) = ready {
        if let Ok(addr) = socket.local_addr() {
            let _ = ready.send(addr);
        }
    }
    debug!(%peer, "opponent link running");

    loop {
        tokio::select! {
            _ = tick.tick() => {
                loop {
                    match channels.requests.try_recv() {
                        Ok(request) => controller.request(request),
                        Err(mpsc::error::TryRecvError::Empty) => break,
                        Err(mpsc::error::TryRecvError::Disconnected) => {
                            debug!("opponent link stopped");
                            return;
                        }
                    }
                }
                for msg in controller.poll(channels.kinds.capacity()) {
                    let line = msg.encode();
                    trace!(%line, "-> opponent");
                    if let Err(err) = socket.send_to(line.as_bytes(), peer).await {
                        debug!(%err, "send to opponent failed");
                    }
                }
            }
            received = socket.recv_from(&mut buf) => {
                match received {
                    Ok((len, from)) => handle_datagram(&buf[..len], from, &channels),
                    Err(err) => trace!(%err, "receive failed"),
                }
            }
        }
    }
}

fn handle_datagram(bytes: &[u8], from: SocketAddr, channels: &LinkChannels) {
    let Some(inbound) = parse_datagram(bytes) else {
        trace!(%from, len = bytes.len(), "ignored datagram");
        return;
    };
    trace!(?inbound, "<- opponent");

    match inbound {
        Inbound::Mode(mode) => channels.status.send_modify(|s| {
            s.mode = Some(mode);
            s.messages += 1;
        }),
        Inbound::Next(kind) => {
            if channels.kinds.try_send(kind).is_err() {
                warn!(?kind, "piece buffer full, dropping kind");
            }
            channels.status.send_modify(|s| s.messages += 1);
        }
    }
}
