//! Opponent link runtime integration.
//!
//! Bridges the sync frame loop with the async link loop.

use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};
use tracing::info;

use crate::core::{LinkRequest, LinkStatus, OpponentPort};
use crate::link::{connect, run_link, LinkChannels, LinkConfig, LinkError};
use crate::types::{PieceKind, REMOTE_QUEUE_CAPACITY};

/// Running link instance.
pub struct OpponentLink {
    _rt: Runtime,
    requests: mpsc::UnboundedSender<LinkRequest>,
    kinds: mpsc::Receiver<PieceKind>,
    status: watch::Receiver<LinkStatus>,
}

impl OpponentLink {
    /// Bind the socket and start the link loop on a background runtime.
    pub fn start(config: &LinkConfig) -> Result<Self, LinkError> {
        let rt = Runtime::new().map_err(LinkError::Runtime)?;
        let (socket, peer) = rt.block_on(connect(config))?;
        info!(bind = %config.bind_addr(), %peer, "opponent link started");

        let (requests, requests_rx) = mpsc::unbounded_channel();
        let (kinds_tx, kinds) = mpsc::channel(REMOTE_QUEUE_CAPACITY);
        let (status_tx, status) = watch::channel(LinkStatus::default());
        let channels = LinkChannels {
            requests: requests_rx,
            kinds: kinds_tx,
            status: status_tx,
        };
        rt.spawn(run_link(socket, peer, channels, None));

        Ok(Self {
            _rt: rt,
            requests,
            kinds,
            status,
        })
    }
}

impl OpponentPort for OpponentLink {
    fn request(&mut self, request: LinkRequest) {
        if request == LinkRequest::Reset {
            while self.kinds.try_recv().is_ok() {}
        }
        let _ = self.requests.send(request);
    }

    fn try_next_kind(&mut self) -> Option<PieceKind> {
        self.kinds.try_recv().ok()
    }

    fn poll_status(&mut self) -> Option<LinkStatus> {
        if self.status.has_changed().unwrap_or(false) {
            Some(*self.status.borrow_and_update())
        } else {
            None
        }
    }
}
