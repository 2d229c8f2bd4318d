//! Application state machine.
//!
//! Three states on a ring, `Menu -> Game -> Pause -> Menu`, moved by `Next` and
//! `Previous` signals. The signal queue holds one entry; a signal sent while it
//! is occupied is dropped. Transitions closer together than the minimum interval
//! are dropped as well, which absorbs duplicate signals queued by tasks that
//! keep reporting the same condition every frame.
//!
//! Exactly one state is active at any time; only its task runs.

use tracing::{debug, info};

use crate::input::{KeyEdges, KeySnapshot};
use crate::types::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppState {
    Menu,
    Game,
    Pause,
}

impl AppState {
    pub const ALL: [AppState; 3] = [AppState::Menu, AppState::Game, AppState::Pause];

    pub fn next(self) -> Self {
        match self {
            AppState::Menu => AppState::Game,
            AppState::Game => AppState::Pause,
            AppState::Pause => AppState::Menu,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            AppState::Menu => AppState::Pause,
            AppState::Game => AppState::Menu,
            AppState::Pause => AppState::Game,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateSignal {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: AppState,
    pub to: AppState,
}

#[derive(Debug, Clone)]
pub struct StateMachine {
    active: AppState,
    pending: Option<StateSignal>,
    last_change_ms: Option<u64>,
    min_interval_ms: u64,
}

impl StateMachine {
    /// Starts in [`AppState::Menu`].
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            active: AppState::Menu,
            pending: None,
            last_change_ms: None,
            min_interval_ms,
        }
    }

    /// Queue a signal. Returns `false` if the queue was already full.
    pub fn send(&mut self, signal: StateSignal) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(signal);
        true
    }

    /// Apply the queued signal, if any and if the minimum interval has passed.
    pub fn process(&mut self, now_ms: u64) -> Option<Transition> {
        let signal = self.pending.take()?;
        if let Some(last) = self.last_change_ms {
            if now_ms.saturating_sub(last) < self.min_interval_ms {
                debug!(?signal, "state signal dropped (rate limit)");
                return None;
            }
        }

        let from = self.active;
        let to = match signal {
            StateSignal::Next => from.next(),
            StateSignal::Previous => from.previous(),
        };
        self.active = to;
        self.last_change_ms = Some(now_ms);
        info!(?from, ?to, "state change");
        Some(Transition { from, to })
    }

    pub fn active(&self) -> AppState {
        self.active
    }

    pub fn is_active(&self, state: AppState) -> bool {
        self.active == state
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// What the transition keys asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCommand {
    /// Game + Esc
    Pause,
    /// Pause + Esc, only while the game is running and connected
    Resume,
    /// Pause + R
    Restart,
    /// Pause + M
    MainMenu,
    /// Menu + S with a complete configuration
    Start,
    /// Menu + Q
    Quit,
}

/// Facts the transition keys depend on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateContext {
    /// Player mode and handedness chosen
    pub config_ready: bool,
    pub multiplayer: bool,
    pub connected: bool,
    pub game_over: bool,
}

/// Debounced transition keys, shared by all three states
#[derive(Debug, Clone, Default)]
pub struct StateInput {
    edges: KeyEdges,
}

impl StateInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(
        &mut self,
        active: AppState,
        ctx: StateContext,
        keys: &KeySnapshot,
    ) -> Option<StateCommand> {
        let edges = self.edges.sample(keys);
        let pressed = |key: Key| edges.is_pressed(key);

        match active {
            AppState::Game => pressed(Key::Escape).then_some(StateCommand::Pause),
            AppState::Pause => {
                if pressed(Key::Escape) && !ctx.game_over && ctx.connected {
                    Some(StateCommand::Resume)
                } else if pressed(Key::R) {
                    Some(StateCommand::Restart)
                } else if pressed(Key::M) {
                    Some(StateCommand::MainMenu)
                } else {
                    None
                }
            }
            AppState::Menu => {
                let link_ok = !ctx.multiplayer || ctx.connected;
                if pressed(Key::S) && ctx.config_ready && link_ok {
                    Some(StateCommand::Start)
                } else if pressed(Key::Q) {
                    Some(StateCommand::Quit)
                } else {
                    None
                }
            }
        }
    }
}
