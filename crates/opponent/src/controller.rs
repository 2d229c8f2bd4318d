//! Request latching for the link loop.
//!
//! Requests raised by the tasks are latched here and turned into outbound
//! messages once per link iteration, always in the same order:
//! reset, probe, mode select, need-next. A need-next request waits until the
//! local piece buffer has room.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::LinkRequest;
use crate::protocol::Outbound;
use crate::types::GameMode;

/// Most messages one iteration can produce
pub const MAX_BURST: usize = 7;

#[derive(Debug, Clone)]
pub struct LinkController {
    reset: bool,
    probe: bool,
    select: Option<GameMode>,
    need_next: bool,
    /// The next need-next fetches two kinds (falling + preview)
    prime: bool,
    seeds: StdRng,
}

impl LinkController {
    pub fn new(seed: u64) -> Self {
        Self {
            reset: false,
            probe: false,
            select: None,
            need_next: false,
            prime: true,
            seeds: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn request(&mut self, request: LinkRequest) {
        match request {
            LinkRequest::Reset => self.reset = true,
            LinkRequest::Probe => self.probe = true,
            LinkRequest::SelectMode(mode) => self.select = Some(mode),
            LinkRequest::NeedNext => self.need_next = true,
        }
    }

    /// Messages for this iteration. `room` is the free space in the piece buffer.
    pub fn poll(&mut self, room: usize) -> ArrayVec<Outbound, MAX_BURST> {
        let mut out = ArrayVec::new();

        if std::mem::take(&mut self.reset) {
            out.push(Outbound::Seed(self.new_seed()));
            self.prime = true;
            self.need_next = true;
        }

        if std::mem::take(&mut self.probe) {
            out.push(Outbound::Seed(self.new_seed()));
            out.push(Outbound::QueryMode);
        }

        if let Some(mode) = self.select.take() {
            out.push(Outbound::SetMode(mode));
            out.push(Outbound::QueryMode);
        }

        if self.need_next && room > 0 {
            out.push(Outbound::Next);
            if self.prime {
                out.push(Outbound::Next);
            }
            self.prime = false;
            self.need_next = false;
        }

        out
    }

    pub fn is_priming(&self) -> bool {
        self.prime
    }

    pub fn has_pending(&self) -> bool {
        self.reset || self.probe || self.select.is_some() || self.need_next
    }

    fn new_seed(&mut self) -> i32 {
        self.seeds.gen_range(0..=i32::MAX)
    }
}
