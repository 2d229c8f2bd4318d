//! Game session - one cycle of gameplay per rendered frame.
//!
//! The session owns the board, the falling and preview pieces, the score and the
//! fall/lock timers. Other tasks only ever see the [`GameSnapshot`] published at
//! the end of each cycle.
//!
//! Cycle order:
//! 1. advance timers by the elapsed time
//! 2. handle a pending reset, then read the configuration on a fresh start
//! 3. spawn if no piece is falling (multi player may have to wait for a kind)
//! 4. detect game over
//! 5. re-arm the lock delay, then horizontal move, rotation, one descent
//! 6. start the lock delay on the first landing; lock and spawn when it expires
//! 7. publish the snapshot

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::core::{
    can_move_down, is_game_over, lock_piece, move_down, move_horizontal, rotate, Board,
    Direction, FairBag, GameSnapshot, LinkRequest, OpponentPort, PieceSource, RemoteFeed, Score,
    Tetromino,
};
use crate::mailbox::Signal;
use crate::settings::Settings;
use crate::timers::FallLockTimers;
use crate::types::{Color, GameMode, Handedness, PieceKind, PlayerMode};

/// Chosen in the menu, fixed for the duration of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub player_mode: PlayerMode,
    pub handedness: Handedness,
    pub opponent_mode: Option<GameMode>,
    pub start_level: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_mode: PlayerMode::Single,
            handedness: Handedness::Right,
            opponent_mode: None,
            start_level: 0,
        }
    }
}

/// Player requests for one cycle, already debounced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionInput {
    pub horizontal: Option<Direction>,
    pub rotate: bool,
    pub fast_drop: bool,
}

impl SessionInput {
    fn button_pressed(&self) -> bool {
        self.horizontal.is_some() || self.rotate
    }
}

/// What happened during one cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// The session is over (true on every cycle after top-out)
    pub game_over: bool,
    /// Top-out was detected on this cycle
    pub newly_over: bool,
    /// A remote kind has been missing for longer than the fetch timeout
    pub connection_lost: bool,
    pub locked: bool,
    pub lines_cleared: usize,
    pub spawned: bool,
}

pub struct GameSession {
    settings: Settings,
    config: SessionConfig,
    board: Board,
    falling: Option<Tetromino>,
    preview: Option<Tetromino>,
    score: Score,
    bag: FairBag,
    colors: StdRng,
    timers: FallLockTimers,
    reset: Signal,
    needs_start: bool,
    resting: bool,
    spawn_wait_ms: u32,
    connected: bool,
    game_over: bool,
    snapshot: GameSnapshot,
}

impl GameSession {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            settings,
            config: SessionConfig::default(),
            board: Board::new(),
            falling: None,
            preview: None,
            score: Score::default(),
            bag: FairBag::new(seed),
            colors: StdRng::seed_from_u64(seed.rotate_left(17)),
            timers: FallLockTimers::new(settings),
            reset: Signal::new(),
            needs_start: true,
            resting: false,
            spawn_wait_ms: 0,
            connected: true,
            game_over: false,
            snapshot: GameSnapshot::default(),
        }
    }

    /// Ask for a full reset on the next cycle.
    pub fn request_reset(&mut self) {
        self.reset.give();
    }

    /// Called when the Game state becomes active again after a pause.
    pub fn resume(&mut self, link: &mut dyn OpponentPort) {
        self.spawn_wait_ms = 0;
        self.connected = true;
        if self.falling.is_none() && self.config.player_mode == PlayerMode::Multi {
            link.request(LinkRequest::NeedNext);
        }
    }

    /// Run one cycle.
    ///
    /// `config` is read only when a session starts (first cycle or after reset).
    pub fn step(
        &mut self,
        input: SessionInput,
        elapsed_ms: u32,
        config: Option<&SessionConfig>,
        link: &mut dyn OpponentPort,
    ) -> CycleReport {
        let mut report = CycleReport::default();
        self.timers.advance(elapsed_ms);

        if self.reset.take() {
            self.clear();
        }
        if self.needs_start {
            self.start(config);
        }

        if self.game_over {
            report.game_over = true;
            self.publish();
            return report;
        }

        if self.falling.is_none() {
            if !self.try_spawn(link) {
                self.wait_for_kind(elapsed_ms, &mut report);
                self.publish();
                return report;
            }
            report.spawned = true;
        }

        self.play(input, link, &mut report);
        self.publish();
        report
    }

    fn play(&mut self, input: SessionInput, link: &mut dyn OpponentPort, report: &mut CycleReport) {
        let Some(mut piece) = self.falling else {
            return;
        };

        if is_game_over(&piece, &self.board) {
            info!(score = self.score.points, lines = self.score.lines, "game over");
            self.game_over = true;
            self.timers.stop_all();
            report.game_over = true;
            report.newly_over = true;
            return;
        }

        if self.timers.lock_active() && (input.button_pressed() || can_move_down(&piece, &self.board))
        {
            self.timers.rearm_lock();
        }

        if let Some(direction) = input.horizontal {
            move_horizontal(&mut piece, &self.board, direction);
        }
        if input.rotate {
            rotate(&mut piece, &self.board, self.config.handedness);
        }

        // One descent per cycle; the player's drop wins over the timer's.
        let landed = if input.fast_drop || self.timers.take_fall() {
            move_down(&mut piece, &self.board)
        } else {
            false
        };
        if landed && !self.resting {
            self.timers.start_lock(self.score.level);
            self.resting = true;
        }
        self.falling = Some(piece);

        if self.timers.take_lock() {
            if can_move_down(&piece, &self.board) {
                // slid off the ledge since the timer started
                self.resting = false;
            } else {
                self.lock_and_advance(&piece, link, report);
            }
        }
    }

    fn lock_and_advance(
        &mut self,
        piece: &Tetromino,
        link: &mut dyn OpponentPort,
        report: &mut CycleReport,
    ) {
        self.timers.stop_fall();
        lock_piece(piece, &mut self.board);
        let cleared = self.board.clear_full_rows().len();
        let awarded = self.score.record_clear(cleared);
        debug!(kind = ?piece.kind(), cleared, awarded, level = self.score.level, "piece locked");

        report.locked = true;
        report.lines_cleared = cleared;
        self.falling = None;
        self.resting = false;
        self.spawn_wait_ms = 0;
        if self.try_spawn(link) {
            report.spawned = true;
        }
    }

    fn wait_for_kind(&mut self, elapsed_ms: u32, report: &mut CycleReport) {
        if self.config.player_mode != PlayerMode::Multi {
            return;
        }
        self.spawn_wait_ms = self.spawn_wait_ms.saturating_add(elapsed_ms);
        if self.spawn_wait_ms > self.settings.piece_fetch_timeout_ms {
            if self.connected {
                warn!(waited_ms = self.spawn_wait_ms, "no piece from opponent");
            }
            self.connected = false;
            report.connection_lost = true;
        }
    }

    fn clear(&mut self) {
        self.timers.stop_all();
        self.board.clear();
        self.falling = None;
        self.preview = None;
        self.bag.reset();
        self.resting = false;
        self.game_over = false;
        self.needs_start = true;
    }

    fn start(&mut self, config: Option<&SessionConfig>) {
        if let Some(config) = config {
            self.config = *config;
        }
        self.score.reset(self.config.start_level);
        self.spawn_wait_ms = 0;
        self.connected = true;
        self.needs_start = false;
        info!(mode = ?self.config.player_mode, level = self.config.start_level, "session started");
    }

    /// Promote the preview to falling and draw a new preview.
    ///
    /// The very first spawn needs two kinds. A kind that arrives while the second
    /// is still missing is kept as the preview.
    fn try_spawn(&mut self, link: &mut dyn OpponentPort) -> bool {
        if self.preview.is_none() {
            let Some(kind) = self.next_kind(link) else {
                return false;
            };
            self.preview = Some(self.fresh(kind));
        }
        let Some(kind) = self.next_kind(link) else {
            return false;
        };
        let next = self.fresh(kind);
        self.falling = self.preview.replace(next);
        self.spawn_wait_ms = 0;
        self.timers.start_fall(self.score.level);
        true
    }

    fn next_kind(&mut self, link: &mut dyn OpponentPort) -> Option<PieceKind> {
        match self.config.player_mode {
            PlayerMode::Single => self.bag.next_kind(),
            PlayerMode::Multi => {
                let kind = RemoteFeed::new(&mut *link).next_kind()?;
                link.request(LinkRequest::NeedNext);
                Some(kind)
            }
        }
    }

    fn fresh(&mut self, kind: PieceKind) -> Tetromino {
        let color = Color::ALL[self.colors.gen_range(0..Color::ALL.len())];
        Tetromino::spawn(kind, color)
    }

    fn publish(&mut self) {
        self.snapshot.board.clone_from(&self.board);
        self.snapshot.falling = self.falling;
        self.snapshot.preview = self.preview;
        self.snapshot.score = self.score;
        self.snapshot.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn falling(&self) -> Option<&Tetromino> {
        self.falling.as_ref()
    }

    pub fn preview(&self) -> Option<&Tetromino> {
        self.preview.as_ref()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn timers(&self) -> &FallLockTimers {
        &self.timers
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Offline;

    fn single() -> GameSession {
        GameSession::new(Settings::default(), 3)
    }

    #[test]
    fn first_cycle_spawns_falling_and_preview() {
        let mut s = single();
        let report = s.step(SessionInput::default(), 20, None, &mut Offline);
        assert!(report.spawned);
        assert!(s.falling().is_some());
        assert!(s.preview().is_some());
        assert!(s.timers().fall_active());
        assert_eq!(s.falling().map(|p| p.rotation()), Some(0));
        assert_eq!(s.preview().map(|p| p.rotation()), Some(0));
    }

    #[test]
    fn config_is_only_read_at_start() {
        let mut s = single();
        let cfg = SessionConfig {
            start_level: 4,
            ..SessionConfig::default()
        };
        s.step(SessionInput::default(), 20, Some(&cfg), &mut Offline);
        assert_eq!(s.score().level, 4);

        let later = SessionConfig {
            start_level: 7,
            ..SessionConfig::default()
        };
        s.step(SessionInput::default(), 20, Some(&later), &mut Offline);
        assert_eq!(s.config().start_level, 4);
    }

    #[test]
    fn timer_descent_moves_one_row() {
        let mut s = single();
        s.step(SessionInput::default(), 20, None, &mut Offline);
        let y0 = s.falling().map(|p| p.position().y);
        s.step(SessionInput::default(), 500, None, &mut Offline);
        let y1 = s.falling().map(|p| p.position().y);
        assert_eq!(y1, y0.map(|y| y + 1));
    }

    #[test]
    fn fast_drop_and_timer_commit_one_row_together() {
        let mut s = single();
        s.step(SessionInput::default(), 20, None, &mut Offline);
        let drop = SessionInput {
            fast_drop: true,
            ..SessionInput::default()
        };
        s.step(drop, 500, None, &mut Offline);
        assert_eq!(s.falling().map(|p| p.position().y), Some(1));
    }

    #[test]
    fn reset_clears_board_and_keeps_start_level() {
        let mut s = single();
        let cfg = SessionConfig {
            start_level: 2,
            ..SessionConfig::default()
        };
        let drop = SessionInput {
            fast_drop: true,
            ..SessionInput::default()
        };
        s.step(SessionInput::default(), 20, Some(&cfg), &mut Offline);
        for _ in 0..40 {
            s.step(drop, 20, Some(&cfg), &mut Offline);
        }
        assert!(s.board().filled() > 0);

        s.request_reset();
        s.step(SessionInput::default(), 20, Some(&cfg), &mut Offline);
        assert_eq!(s.board().filled(), 0);
        assert_eq!(s.score().level, 2);
        assert_eq!(s.score().points, 0);
    }
}
