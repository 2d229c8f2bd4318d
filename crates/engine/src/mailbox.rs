//! Single-slot queues and binary signals between tasks.
//!
//! A [`Mailbox`] holds at most one value and every publish replaces whatever was
//! there, so a publisher never fails and a reader always sees the latest
//! consistent value. A [`Signal`] is a latched flag: giving it twice before it
//! is taken is the same as giving it once.

/// Single-slot queue with replace-latest semantics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox<T> {
    slot: Option<T>,
}

impl<T> Mailbox<T> {
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Replace the slot contents.
    pub fn publish(&mut self, value: T) {
        self.slot = Some(value);
    }

    /// Read without consuming.
    pub fn peek(&self) -> Option<&T> {
        self.slot.as_ref()
    }

    /// Read and empty the slot.
    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Binary signal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signal {
    given: bool,
}

impl Signal {
    pub const fn new() -> Self {
        Self { given: false }
    }

    pub fn give(&mut self) {
        self.given = true;
    }

    /// Consume the signal. Returns whether it was pending.
    pub fn take(&mut self) -> bool {
        std::mem::replace(&mut self.given, false)
    }

    pub fn is_pending(&self) -> bool {
        self.given
    }
}
