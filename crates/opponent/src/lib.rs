//! Opponent link module - piece kinds and game modes over UDP text datagrams
//!
//! In two-player mode the piece kinds come from an external opponent process
//! instead of the local bag. The link keeps one UDP socket open, sends
//! requests on a fixed 15ms cadence and buffers at most two received kinds.
//!
//! # Protocol Overview
//!
//! ```text
//! game -> opponent: SEED=<int>   new random seed
//! game -> opponent: MODE         query the current mode
//! game -> opponent: MODE=<mode>  FAIR | EASY | HARD | RANDOM | DETERMINISTIC
//! game -> opponent: NEXT         request one piece kind
//! opponent -> game: MODE=<mode>  current mode
//! opponent -> game: NEXT=<kind>  S | Z | J | L | T | O | I
//! ```
//!
//! Any valid inbound message marks the opponent as connected. There is no
//! explicit timeout on the link; a missing kind shows up as a stalled spawn
//! on the game side.
//!
//! # Environment Variables
//!
//! - `TASKTRIS_OPPONENT_HOST`: Opponent address (default: "127.0.0.1")
//! - `TASKTRIS_RECV_PORT`: Local receive port (default: 1234)
//! - `TASKTRIS_SEND_PORT`: Opponent port (default: 1235)
//! - `TASKTRIS_OPPONENT_DISABLED`: Set to "1" or "true" to run without a link
//!
//! # Implementation
//!
//! - [`protocol`]: datagram codec
//! - [`controller`]: pure request latching and ordering
//! - [`link`]: the tokio UDP loop
//! - [`runtime`]: [`OpponentLink`], the blocking-free handle the tasks use

pub mod controller;
pub mod link;
pub mod protocol;
pub mod runtime;

pub use tasktris_core as core;
pub use tasktris_types as types;

pub use controller::LinkController;
pub use link::{connect, run_link, LinkChannels, LinkConfig, LinkError};
pub use protocol::{parse_datagram, parse_inbound, Inbound, Outbound};
pub use runtime::OpponentLink;
