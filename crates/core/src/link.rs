//! Opponent port - the session-facing side of the opponent link
//!
//! The game tasks never touch sockets. They raise requests and pull buffered piece
//! kinds through [`OpponentPort`]; the network implementation lives in the
//! opponent crate and test code supplies scripted ones.

use crate::types::{GameMode, PieceKind};

/// Latched requests from the tasks to the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRequest {
    /// New seed, drop buffered kinds, prefetch two kinds
    Reset,
    /// Announce a seed and ask for the current mode (sent while disconnected)
    Probe,
    /// Transmit a mode selection
    SelectMode(GameMode),
    /// Ask for one more piece kind once the buffer has room
    NeedNext,
}

/// What the link has learned from inbound datagrams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkStatus {
    /// Last mode announced by the opponent
    pub mode: Option<GameMode>,
    /// Count of valid inbound messages so far
    pub messages: u64,
}

pub trait OpponentPort {
    fn request(&mut self, request: LinkRequest);

    /// Pop the oldest buffered kind without blocking
    fn try_next_kind(&mut self) -> Option<PieceKind>;

    /// `Some` when a valid message arrived since the previous poll
    fn poll_status(&mut self) -> Option<LinkStatus>;
}

/// Port used when no opponent process is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl OpponentPort for Offline {
    fn request(&mut self, _request: LinkRequest) {}

    fn try_next_kind(&mut self) -> Option<PieceKind> {
        None
    }

    fn poll_status(&mut self) -> Option<LinkStatus> {
        None
    }
}
