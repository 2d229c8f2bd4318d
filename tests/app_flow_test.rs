//! App flow tests - menu, game and pause driven frame by frame

use std::collections::VecDeque;
use std::path::Path;

use tasktris::core::{LinkRequest, LinkStatus, OpponentPort};
use tasktris::engine::canvas::testing::RecordingCanvas;
use tasktris::engine::{App, AppState, FrameOutcome, Settings};
use tasktris::input::InputState;
use tasktris::types::{GameMode, Handedness, Key, PieceKind, PlayerMode, PLAYER_NAMES};

/// Frames 400ms apart clear the transition rate limit
const SLOW: u64 = 400;

/// Opponent port driven by the test; silent unless fed
#[derive(Default)]
struct ScriptedPort {
    kinds: VecDeque<PieceKind>,
    status: Option<LinkStatus>,
    requests: Vec<LinkRequest>,
}

impl ScriptedPort {
    /// Next poll reports a valid message from the opponent
    fn announce(&mut self, mode: GameMode) {
        self.status = Some(LinkStatus {
            mode: Some(mode),
            messages: 1,
        });
    }
}

impl OpponentPort for ScriptedPort {
    fn request(&mut self, request: LinkRequest) {
        self.requests.push(request);
    }

    fn try_next_kind(&mut self) -> Option<PieceKind> {
        self.kinds.pop_front()
    }

    fn poll_status(&mut self) -> Option<LinkStatus> {
        self.status.take()
    }
}

struct Harness {
    app: App,
    canvas: RecordingCanvas,
    port: ScriptedPort,
    now: u64,
}

impl Harness {
    fn new() -> Self {
        let mut canvas = RecordingCanvas::new();
        let app = App::new(Settings::default(), 9, &mut canvas, Path::new("resources"))
            .expect("recording canvas loads anything");
        Self {
            app,
            canvas,
            port: ScriptedPort::default(),
            now: 0,
        }
    }

    fn frame_at(&mut self, dt: u64, input: &mut InputState) -> FrameOutcome {
        self.now += dt;
        self.app.frame(input, self.now, &mut self.canvas, &mut self.port)
    }

    fn idle(&mut self, dt: u64) {
        self.frame_at(dt, &mut InputState::default());
    }

    /// Press and release a key on two consecutive frames
    fn tap(&mut self, key: Key) -> FrameOutcome {
        let mut input = InputState::default();
        input.keys.set(key, true);
        let outcome = self.frame_at(SLOW, &mut input);
        self.idle(20);
        outcome
    }

    fn single_player(&mut self) {
        self.app.menu_mut().select_player_mode(PlayerMode::Single);
        self.app.menu_mut().select_handedness(Handedness::Right);
        self.idle(20);
    }
}

#[test]
fn test_menu_game_pause_ring() {
    let mut h = Harness::new();
    h.idle(20);
    assert_eq!(h.app.active(), AppState::Menu);
    assert!(h.canvas.contains_text("PRESS Q TO QUIT"));
    assert!(h.canvas.contains_text("CHOOSE PLAYERS AND ROTATION"));

    h.single_player();
    assert!(h.canvas.contains_text("PRESS S TO START"));
    h.tap(Key::S);
    assert_eq!(h.app.active(), AppState::Game);

    h.idle(20);
    assert!(h.canvas.contains_text("ESC TO PAUSE"));
    assert!(h.app.game().session().falling().is_some());

    h.tap(Key::Escape);
    assert_eq!(h.app.active(), AppState::Pause);
    assert!(h.canvas.contains_text("PRESS ESC TO RESUME"));

    h.tap(Key::Escape);
    assert_eq!(h.app.active(), AppState::Game);

    h.tap(Key::Escape);
    h.tap(Key::M);
    assert_eq!(h.app.active(), AppState::Menu);
}

#[test]
fn test_falling_piece_is_frozen_while_paused() {
    let mut h = Harness::new();
    h.single_player();
    h.tap(Key::S);
    h.tap(Key::Escape);
    assert_eq!(h.app.active(), AppState::Pause);
    let depth = h.app.game().session().falling().map(|p| p.position().y);
    assert!(depth.is_some());

    // several fall periods pass without the game task running
    for _ in 0..30 {
        h.idle(100);
    }
    assert_eq!(h.app.game().session().falling().map(|p| p.position().y), depth);

    h.tap(Key::Escape);
    assert_eq!(h.app.active(), AppState::Game);
    for _ in 0..100 {
        h.idle(20);
    }
    let later = h.app.game().session().falling().map(|p| p.position().y);
    assert_ne!(later, depth);
}

#[test]
fn test_restart_resets_the_session() {
    let mut h = Harness::new();
    h.single_player();
    h.tap(Key::S);
    let mut drop = InputState::default();
    for _ in 0..500 {
        if h.app.game().session().board().filled() > 0 {
            break;
        }
        drop.keys.set(Key::Down, true);
        h.frame_at(20, &mut drop);
    }
    assert!(h.app.game().session().board().filled() > 0);

    h.tap(Key::Escape);
    h.tap(Key::R);
    assert_eq!(h.app.active(), AppState::Game);
    assert_eq!(h.app.game().session().board().filled(), 0);
}

#[test]
fn test_game_over_goes_to_pause_and_records_the_score() {
    let mut h = Harness::new();
    h.single_player();
    h.tap(Key::S);

    let mut drop = InputState::default();
    for _ in 0..10_000 {
        if h.app.active() != AppState::Game {
            break;
        }
        drop.keys.set(Key::Down, true);
        h.frame_at(20, &mut drop);
    }
    assert_eq!(h.app.active(), AppState::Pause);
    assert!(h.app.shared().is_game_over());

    h.idle(20);
    assert!(h.canvas.contains_text("GAME OVER"));
    for name in PLAYER_NAMES {
        assert!(h.canvas.contains_text(name));
    }

    // Esc cannot resume a finished game
    h.tap(Key::Escape);
    assert_eq!(h.app.active(), AppState::Pause);
}

#[test]
fn test_multiplayer_start_needs_a_connection() {
    let mut h = Harness::new();
    h.app.menu_mut().select_player_mode(PlayerMode::Multi);
    h.app.menu_mut().select_handedness(Handedness::Left);
    h.idle(20);
    assert!(h.canvas.contains_text("ERROR: NO CONNECTION"));
    h.tap(Key::S);
    assert_eq!(h.app.active(), AppState::Menu);
}

#[test]
fn test_quit_only_from_the_menu() {
    let mut h = Harness::new();
    h.single_player();
    h.tap(Key::S);
    assert_eq!(h.tap(Key::Q), FrameOutcome::Continue);
    assert_eq!(h.app.active(), AppState::Game);

    h.tap(Key::Escape);
    h.tap(Key::M);
    assert_eq!(h.tap(Key::Q), FrameOutcome::Quit);
}

#[test]
fn test_lost_opponent_pauses_until_it_answers_again() {
    let mut h = Harness::new();
    h.port.announce(GameMode::Fair);
    h.app.menu_mut().select_player_mode(PlayerMode::Multi);
    h.app.menu_mut().select_handedness(Handedness::Right);
    h.idle(20);
    assert!(h.app.shared().connected);
    assert!(h.canvas.contains_text("PRESS S TO START"));

    h.tap(Key::S);
    assert_eq!(h.app.active(), AppState::Game);
    assert!(h.port.requests.contains(&LinkRequest::NeedNext));

    // no kinds arrive, the spawn times out and the game pauses by itself
    for _ in 0..200 {
        if h.app.active() != AppState::Game {
            break;
        }
        h.idle(20);
    }
    assert_eq!(h.app.active(), AppState::Pause);
    assert!(!h.app.shared().connected);
    assert!(!h.app.shared().is_game_over());
    h.idle(20);
    assert!(h.canvas.contains_text("CONNECTION LOST"));
    assert_eq!(h.port.requests.last(), Some(&LinkRequest::Probe));

    // Esc is refused while the opponent is silent
    h.tap(Key::Escape);
    assert_eq!(h.app.active(), AppState::Pause);

    // the opponent answers again; resuming still takes a key press
    h.port.announce(GameMode::Fair);
    h.port.kinds.extend([PieceKind::T, PieceKind::O]);
    h.idle(20);
    assert!(h.app.shared().connected);
    assert!(h.canvas.contains_text("PRESS ESC TO RESUME"));
    assert_eq!(h.app.active(), AppState::Pause);

    h.tap(Key::Escape);
    assert_eq!(h.app.active(), AppState::Game);
    assert_eq!(h.app.game().session().falling().map(|p| p.kind()), Some(PieceKind::T));
    assert_eq!(h.app.game().session().preview().map(|p| p.kind()), Some(PieceKind::O));
}
