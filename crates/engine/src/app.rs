//! Application scheduler.
//!
//! One call to [`App::frame`] is one scheduling round: the link status is
//! polled, the transition keys are checked, the task owning the active state
//! runs and draws, the score task runs, and finally a queued state signal is
//! applied. Side effects of a key command (session reset, link requests) happen
//! only when its transition actually goes through.

use std::path::Path;

use tracing::{debug, info};

use crate::canvas::{Canvas, CanvasError, Sprites};
use crate::core::{LinkRequest, OpponentPort};
use crate::input::InputState;
use crate::session::CycleReport;
use crate::settings::Settings;
use crate::shared::Shared;
use crate::state_machine::{
    AppState, StateCommand, StateContext, StateInput, StateMachine, StateSignal, Transition,
};
use crate::tasks::{GameTask, MenuTask, PauseTask, ScoreTask};
use crate::types::PlayerMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

pub struct App {
    settings: Settings,
    machine: StateMachine,
    transition_keys: StateInput,
    pending_command: Option<StateCommand>,
    shared: Shared,
    menu: MenuTask,
    game: GameTask,
    pause: PauseTask,
    scores: ScoreTask,
    sprites: Sprites,
    last_frame_ms: Option<u64>,
}

impl App {
    /// Loads the square sprites from `resources`.
    pub fn new(
        settings: Settings,
        seed: u64,
        canvas: &mut dyn Canvas,
        resources: &Path,
    ) -> Result<Self, CanvasError> {
        let sprites = Sprites::load(canvas, resources)?;
        Ok(Self {
            settings,
            machine: StateMachine::new(u64::from(settings.state_debounce_ms)),
            transition_keys: StateInput::new(),
            pending_command: None,
            shared: Shared::new(),
            menu: MenuTask::new(),
            game: GameTask::new(settings, seed),
            pause: PauseTask::new(),
            scores: ScoreTask::new(),
            sprites,
            last_frame_ms: None,
        })
    }

    pub fn frame(
        &mut self,
        input: &mut InputState,
        now_ms: u64,
        canvas: &mut dyn Canvas,
        link: &mut dyn OpponentPort,
    ) -> FrameOutcome {
        let elapsed_ms = match self.last_frame_ms {
            Some(last) => u32::try_from(now_ms.saturating_sub(last)).unwrap_or(u32::MAX),
            None => self.settings.frame_ms,
        };
        self.last_frame_ms = Some(now_ms);

        if let Some(status) = link.poll_status() {
            if !self.shared.connected {
                info!(mode = ?status.mode, "opponent connected");
            }
            self.shared.connected = true;
            self.shared.opponent_mode = status.mode;
        }

        let active = self.machine.active();
        let ctx = self.context(active);
        if let Some(command) = self.transition_keys.check(active, ctx, &input.keys) {
            if command == StateCommand::Quit {
                info!("quit requested");
                return FrameOutcome::Quit;
            }
            let signal = match command {
                StateCommand::Resume | StateCommand::Restart => StateSignal::Previous,
                _ => StateSignal::Next,
            };
            if self.machine.send(signal) {
                self.pending_command = Some(command);
            }
        }

        match active {
            AppState::Menu => self.menu.step(input, &mut self.shared, link, canvas),
            AppState::Game => {
                let config = self.shared.config.peek().copied();
                let report = self.game.step(
                    input,
                    elapsed_ms,
                    config.as_ref(),
                    link,
                    canvas,
                    &self.sprites,
                );
                self.after_cycle(report);
            }
            AppState::Pause => {
                let mode = self.game.session().config().player_mode;
                self.pause.step(input, mode, &mut self.shared, link, canvas);
            }
        }

        self.scores.step(&mut self.shared);

        let command = self.pending_command.take();
        match self.machine.process(now_ms) {
            Some(transition) => self.enter(transition, command, link),
            None => {
                if let Some(command) = command {
                    debug!(?command, "command dropped with its transition");
                }
            }
        }
        FrameOutcome::Continue
    }

    fn context(&self, active: AppState) -> StateContext {
        let multiplayer = match active {
            AppState::Menu => self.menu.player_mode() == Some(PlayerMode::Multi),
            _ => self.game.session().config().player_mode == PlayerMode::Multi,
        };
        StateContext {
            config_ready: self.shared.config.peek().is_some(),
            multiplayer,
            connected: !multiplayer || self.shared.connected,
            game_over: self.shared.is_game_over(),
        }
    }

    fn after_cycle(&mut self, report: CycleReport) {
        let score = self.game.session().score();
        self.shared.score.publish(score);
        self.shared.game_over.publish(report.game_over);

        if report.newly_over {
            let mut finished = score;
            finished.player = Some(self.shared.player_name);
            self.shared.finished.publish(finished);
        }
        if report.connection_lost {
            if self.shared.connected {
                info!("opponent connection lost");
            }
            self.shared.connected = false;
        }
        if report.game_over || report.connection_lost {
            self.machine.send(StateSignal::Next);
        }
    }

    fn enter(
        &mut self,
        transition: Transition,
        command: Option<StateCommand>,
        link: &mut dyn OpponentPort,
    ) {
        match command {
            Some(StateCommand::Restart | StateCommand::MainMenu) => self.reset_session(link),
            Some(StateCommand::Start) => {
                if self.menu.player_mode() == Some(PlayerMode::Multi) {
                    link.request(LinkRequest::NeedNext);
                }
            }
            _ => {}
        }

        if transition.from == AppState::Pause && transition.to == AppState::Game {
            self.game.session_mut().resume(link);
        }
    }

    fn reset_session(&mut self, link: &mut dyn OpponentPort) {
        if self.game.session().config().player_mode == PlayerMode::Multi {
            link.request(LinkRequest::Reset);
        }
        self.game.session_mut().request_reset();
        self.shared.game_over.publish(false);
        self.shared.score.clear();
    }

    pub fn active(&self) -> AppState {
        self.machine.active()
    }

    pub fn shared(&self) -> &Shared {
        &self.shared
    }

    pub fn game(&self) -> &GameTask {
        &self.game
    }

    pub fn menu_mut(&mut self) -> &mut MenuTask {
        &mut self.menu
    }

    pub fn sprites(&self) -> &Sprites {
        &self.sprites
    }
}
