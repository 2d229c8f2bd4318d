//! Text datagram protocol spoken with the opponent process.
//!
//! Outbound: `SEED=<int>`, `MODE`, `MODE=<mode>`, `NEXT`.
//! Inbound: `MODE=<mode>`, `NEXT=<letter>`. Anything else is ignored.

use std::fmt;

use crate::types::{GameMode, PieceKind};

/// Message sent to the opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outbound {
    /// New random seed for the opponent's generator
    Seed(i32),
    /// Ask for the current mode
    QueryMode,
    /// Switch the opponent to a mode
    SetMode(GameMode),
    /// Ask for one piece kind
    Next,
}

impl Outbound {
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Outbound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outbound::Seed(seed) => write!(f, "SEED={seed}"),
            Outbound::QueryMode => f.write_str("MODE"),
            Outbound::SetMode(mode) => write!(f, "MODE={}", mode.as_str()),
            Outbound::Next => f.write_str("NEXT"),
        }
    }
}

/// Message received from the opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    Mode(GameMode),
    Next(PieceKind),
}

/// Parse one datagram payload.
///
/// Keys and values must match exactly (uppercase). Trailing NULs and line
/// endings are stripped first, since C senders often include them.
pub fn parse_inbound(text: &str) -> Option<Inbound> {
    let text = text.trim_end_matches(['\0', '\r', '\n']);
    let (key, value) = text.split_once('=')?;
    match key {
        "MODE" => GameMode::ALL
            .into_iter()
            .find(|m| m.as_str() == value)
            .map(Inbound::Mode),
        "NEXT" => PieceKind::from_letter(value).map(Inbound::Next),
        _ => None,
    }
}

/// Parse raw datagram bytes; non-UTF-8 payloads are ignored.
pub fn parse_datagram(bytes: &[u8]) -> Option<Inbound> {
    std::str::from_utf8(bytes).ok().and_then(parse_inbound)
}
