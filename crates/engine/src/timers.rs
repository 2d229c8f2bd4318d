//! Fall / lock-delay timer engine.
//!
//! Two countdown timers advanced by the session with the time elapsed since its
//! previous cycle. Expirations never touch game state; they give a latched
//! [`Signal`] that the session consumes on the same or a later cycle. Since the
//! timers only advance inside session cycles, they stand still whenever the Game
//! state is not active.

use crate::mailbox::Signal;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerMode {
    OneShot,
    Periodic,
}

/// Millisecond countdown, one-shot or periodic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTimer {
    mode: TimerMode,
    period_ms: u32,
    remaining_ms: u32,
    active: bool,
}

impl CountdownTimer {
    pub fn one_shot(period_ms: u32) -> Self {
        Self::with_mode(TimerMode::OneShot, period_ms)
    }

    pub fn periodic(period_ms: u32) -> Self {
        Self::with_mode(TimerMode::Periodic, period_ms)
    }

    fn with_mode(mode: TimerMode, period_ms: u32) -> Self {
        Self {
            mode,
            period_ms: period_ms.max(1),
            remaining_ms: 0,
            active: false,
        }
    }

    /// Arm with a full period, restarting if already running.
    pub fn start(&mut self) {
        self.remaining_ms = self.period_ms;
        self.active = true;
    }

    /// Set a new period and (re)start.
    pub fn change_period(&mut self, period_ms: u32) {
        self.period_ms = period_ms.max(1);
        self.start();
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.remaining_ms = 0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    /// Count down. Returns `true` if the timer expired at least once.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !self.active {
            return false;
        }
        if elapsed_ms < self.remaining_ms {
            self.remaining_ms -= elapsed_ms;
            return false;
        }
        match self.mode {
            TimerMode::OneShot => {
                self.active = false;
                self.remaining_ms = 0;
            }
            TimerMode::Periodic => {
                let over = elapsed_ms - self.remaining_ms;
                self.remaining_ms = self.period_ms - over % self.period_ms;
            }
        }
        true
    }
}

/// The fall timer, the lock-delay timer and their signals
#[derive(Debug, Clone)]
pub struct FallLockTimers {
    settings: Settings,
    fall: CountdownTimer,
    lock: CountdownTimer,
    fall_signal: Signal,
    lock_signal: Signal,
}

impl FallLockTimers {
    pub fn new(settings: Settings) -> Self {
        Self {
            fall: CountdownTimer::periodic(settings.fall_period(0)),
            lock: CountdownTimer::one_shot(settings.lock_period(0)),
            settings,
            fall_signal: Signal::new(),
            lock_signal: Signal::new(),
        }
    }

    /// Advance both timers and latch their signals.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if self.fall.advance(elapsed_ms) {
            self.fall_signal.give();
        }
        if self.lock.advance(elapsed_ms) {
            self.lock_signal.give();
        }
    }

    /// (Re)start automatic descent at the period for `level`.
    ///
    /// A descent latched before the restart is dropped.
    pub fn start_fall(&mut self, level: u32) {
        self.fall.change_period(self.settings.fall_period(level));
        self.fall_signal.take();
    }

    pub fn stop_fall(&mut self) {
        self.fall.stop();
        self.fall_signal.take();
    }

    /// Start the grace period after the first landing.
    pub fn start_lock(&mut self, level: u32) {
        self.lock.change_period(self.settings.lock_period(level));
        self.lock_signal.take();
    }

    /// Restart a running grace period. No-op if the lock timer is idle.
    pub fn rearm_lock(&mut self) {
        if self.lock.is_active() {
            self.lock.start();
        }
    }

    pub fn lock_active(&self) -> bool {
        self.lock.is_active()
    }

    pub fn fall_active(&self) -> bool {
        self.fall.is_active()
    }

    pub fn stop_all(&mut self) {
        self.fall.stop();
        self.lock.stop();
        self.fall_signal.take();
        self.lock_signal.take();
    }

    pub fn take_fall(&mut self) -> bool {
        self.fall_signal.take()
    }

    pub fn take_lock(&mut self) -> bool {
        self.lock_signal.take()
    }

    pub fn fall_period_ms(&self) -> u32 {
        self.fall.period_ms()
    }

    pub fn lock_period_ms(&self) -> u32 {
        self.lock.period_ms()
    }
}
