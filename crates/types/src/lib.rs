//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, task scheduling, drawing, opponent protocol).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 16 rows (indexed 0-15, row 0 is the floor)
//! - **Shape mask**: 5x5 cells per piece
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 20 | Display refresh / task cycle cadence |
//! | `FALL_PERIOD_MS` | 500 | Automatic descent period at level 0 |
//! | `LOCK_DELAY_MS` | 300 | Lock-delay grace period at level 0 |
//! | `LEVEL_STEP_MS` | 40 | Both periods shrink by this much per level |
//! | `MIN_PERIOD_MS` | 50 | Floor for both periods |
//! | `LINK_POLL_MS` | 15 | Opponent link iteration delay |
//! | `STATE_DEBOUNCE_MS` | 300 | Minimum interval between state transitions |
//! | `PIECE_FETCH_TIMEOUT_MS` | 1000 | Spawn wait before the opponent counts as lost |
//!
//! # Examples
//!
//! ```
//! use tasktris_types::{GameMode, Handedness, PieceKind, COLS, ROWS};
//!
//! assert_eq!(PieceKind::from_letter("I"), Some(PieceKind::I));
//! assert_eq!(PieceKind::T.letter(), "T");
//!
//! assert_eq!(GameMode::from_str("hard"), Some(GameMode::Hard));
//! assert_eq!(Handedness::Right.step(), 1);
//!
//! assert_eq!(COLS, 10);
//! assert_eq!(ROWS, 16);
//! ```

/// Board width in cells (10 columns)
pub const COLS: usize = 10;

/// Board height in cells (16 rows)
pub const ROWS: usize = 16;

/// Side length of the square shape mask
pub const FIGURE_SIZE: usize = 5;

/// Display refresh cadence (one task cycle per frame)
pub const FRAME_MS: u32 = 20;

/// Fall timer period at level 0
pub const FALL_PERIOD_MS: u32 = 500;

/// Lock-delay timer period at level 0
pub const LOCK_DELAY_MS: u32 = 300;

/// Per-level reduction applied to both timer periods
pub const LEVEL_STEP_MS: u32 = 40;

/// Lower clamp for both timer periods
pub const MIN_PERIOD_MS: u32 = 50;

/// Opponent link loop delay
pub const LINK_POLL_MS: u32 = 15;

/// Minimum interval between two accepted state transitions
pub const STATE_DEBOUNCE_MS: u32 = 300;

/// How long a spawn may wait for a remote piece type
pub const PIECE_FETCH_TIMEOUT_MS: u32 = 1000;

/// Default UDP port the opponent link listens on
pub const DEFAULT_RECV_PORT: u16 = 1234;

/// Default UDP port the opponent process listens on
pub const DEFAULT_SEND_PORT: u16 = 1235;

/// Capacity of the buffered remote piece types
pub const REMOTE_QUEUE_CAPACITY: usize = 2;

/// Number of entries kept in the high-score table
pub const HIGH_SCORE_CAPACITY: usize = 3;

/// Highest level selectable in the menu
pub const MAX_START_LEVEL: u8 = 9;

/// Cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1) for higher levels.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Names offered on the game-over screen. The first entry is the default.
pub const PLAYER_NAMES: [&str; 6] = [
    "tetrisdominator420",
    "xXTetrisGodXx",
    "iplaytetrislul",
    "isuckattetris69",
    "xX360NOSCOPEXx",
    "fischlipp",
];

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    S,
    Z,
    J,
    L,
    T,
    O,
    I,
}

impl PieceKind {
    /// All kinds in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
        PieceKind::O,
        PieceKind::I,
    ];

    /// Parse the single-letter wire name (exact match, uppercase)
    ///
    /// # Examples
    ///
    /// ```
    /// use tasktris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_letter("S"), Some(PieceKind::S));
    /// assert_eq!(PieceKind::from_letter("s"), None);
    /// assert_eq!(PieceKind::from_letter("SS"), None);
    /// ```
    pub fn from_letter(s: &str) -> Option<Self> {
        match s {
            "S" => Some(PieceKind::S),
            "Z" => Some(PieceKind::Z),
            "J" => Some(PieceKind::J),
            "L" => Some(PieceKind::L),
            "T" => Some(PieceKind::T),
            "O" => Some(PieceKind::O),
            "I" => Some(PieceKind::I),
            _ => None,
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::T => "T",
            PieceKind::O => "O",
            PieceKind::I => "I",
        }
    }

    /// Index into per-kind tables (same order as [`PieceKind::ALL`]).
    pub fn index(&self) -> usize {
        match self {
            PieceKind::S => 0,
            PieceKind::Z => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::T => 4,
            PieceKind::O => 5,
            PieceKind::I => 6,
        }
    }
}

/// Square colors. Color is chosen per piece for presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Blue,
    Green,
    Yellow,
    Red,
    LightBlue,
    Purple,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Red,
        Color::LightBlue,
        Color::Purple,
    ];

    /// File stem of the square sprite for this color.
    pub fn sprite_name(&self) -> &'static str {
        match self {
            Color::Blue => "blue_square",
            Color::Green => "green_square",
            Color::Yellow => "yellow_square",
            Color::Red => "red_square",
            Color::LightBlue => "lightblue_square",
            Color::Purple => "purple_square",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a locked square of that color
pub type Cell = Option<Color>;

/// Which way the rotate key turns the piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    /// Counter-clockwise
    Left,
    /// Clockwise
    Right,
}

impl Handedness {
    /// Rotation index delta applied per rotate press.
    pub fn step(&self) -> i8 {
        match self {
            Handedness::Left => -1,
            Handedness::Right => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Handedness::Left => "LEFT",
            Handedness::Right => "RIGHT",
        }
    }
}

/// Single player uses the local bag; multi player takes types from the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMode {
    Single,
    Multi,
}

impl PlayerMode {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerMode::Single => "1 PLAYER",
            PlayerMode::Multi => "2 PLAYERS",
        }
    }
}

/// Opponent difficulty modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Fair,
    Easy,
    Hard,
    Random,
    Deterministic,
}

impl GameMode {
    pub const ALL: [GameMode; 5] = [
        GameMode::Fair,
        GameMode::Easy,
        GameMode::Hard,
        GameMode::Random,
        GameMode::Deterministic,
    ];

    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fair" => Some(GameMode::Fair),
            "easy" => Some(GameMode::Easy),
            "hard" => Some(GameMode::Hard),
            "random" => Some(GameMode::Random),
            "deterministic" => Some(GameMode::Deterministic),
            _ => None,
        }
    }

    /// Uppercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Fair => "FAIR",
            GameMode::Easy => "EASY",
            GameMode::Hard => "HARD",
            GameMode::Random => "RANDOM",
            GameMode::Deterministic => "DETERMINISTIC",
        }
    }
}

/// Logical keys sampled by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
    S,
    R,
    M,
    Q,
}

impl Key {
    /// Number of logical keys (size of a key snapshot).
    pub const COUNT: usize = 9;

    pub const ALL: [Key; Key::COUNT] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Escape,
        Key::S,
        Key::R,
        Key::M,
        Key::Q,
    ];

    /// Slot of this key in a key snapshot.
    pub fn slot(&self) -> usize {
        *self as usize
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn hex(v: u32) -> Self {
        Self {
            r: ((v >> 16) & 0xff) as u8,
            g: ((v >> 8) & 0xff) as u8,
            b: (v & 0xff) as u8,
        }
    }
}
