//! Piece generator - where the next piece type comes from
//!
//! Single player draws from a local fair bag: every draw removes one uniformly
//! chosen remaining kind, and the bag refills with all seven once empty, so each
//! run of seven draws from a fresh bag contains every kind exactly once.
//! Multi player takes kinds one at a time from the opponent link in FIFO order.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::link::OpponentPort;
use crate::types::PieceKind;

/// Anything that can hand out the next piece kind.
///
/// `None` means no kind is available right now; the caller must not spawn.
pub trait PieceSource {
    fn next_kind(&mut self) -> Option<PieceKind>;
}

/// Shuffle bag of the seven kinds, drawn without replacement
#[derive(Debug, Clone)]
pub struct FairBag {
    remaining: ArrayVec<PieceKind, 7>,
    rng: StdRng,
}

impl FairBag {
    /// Create a bag with a deterministic seed
    pub fn new(seed: u64) -> Self {
        Self {
            remaining: ArrayVec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a bag seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            remaining: ArrayVec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Discard the current bag so the next draw starts a fresh one
    pub fn reset(&mut self) {
        self.remaining.clear();
    }

    /// Kinds left before the next refill
    pub fn remaining(&self) -> &[PieceKind] {
        &self.remaining
    }

    fn refill(&mut self) {
        self.remaining.clear();
        self.remaining.extend(PieceKind::ALL);
    }

    /// Draw one kind, refilling first when the bag is empty
    pub fn draw(&mut self) -> PieceKind {
        if self.remaining.is_empty() {
            self.refill();
        }
        let idx = self.rng.gen_range(0..self.remaining.len());
        self.remaining.remove(idx)
    }
}

impl PieceSource for FairBag {
    fn next_kind(&mut self) -> Option<PieceKind> {
        Some(self.draw())
    }
}

/// Kinds pushed by the opponent, borrowed for one session cycle
pub struct RemoteFeed<'a> {
    port: &'a mut dyn OpponentPort,
}

impl<'a> RemoteFeed<'a> {
    pub fn new(port: &'a mut dyn OpponentPort) -> Self {
        Self { port }
    }
}

impl PieceSource for RemoteFeed<'_> {
    fn next_kind(&mut self) -> Option<PieceKind> {
        self.port.try_next_kind()
    }
}
