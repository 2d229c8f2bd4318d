//! Values the tasks exchange through single-slot mailboxes.

use crate::core::{HighScores, Score};
use crate::mailbox::Mailbox;
use crate::session::SessionConfig;
use crate::types::{GameMode, PLAYER_NAMES};

#[derive(Debug, Clone)]
pub struct Shared {
    /// Menu -> Game: complete configuration, once chosen
    pub config: Mailbox<SessionConfig>,
    /// Game -> Pause: latest score of the running session
    pub score: Mailbox<Score>,
    /// Game -> Pause: whether the session has topped out
    pub game_over: Mailbox<bool>,
    /// Game -> Score: final score of a finished session
    pub finished: Mailbox<Score>,
    /// Pause -> Score: name picked on the game-over screen
    pub rename: Mailbox<&'static str>,
    /// Score -> Menu: the ranking
    pub high_scores: Mailbox<HighScores>,
    /// Name attached to the next finished score
    pub player_name: &'static str,
    /// Opponent answered recently
    pub connected: bool,
    /// Mode last announced by the opponent
    pub opponent_mode: Option<GameMode>,
}

impl Shared {
    pub fn new() -> Self {
        Self {
            config: Mailbox::new(),
            score: Mailbox::new(),
            game_over: Mailbox::new(),
            finished: Mailbox::new(),
            rename: Mailbox::new(),
            high_scores: Mailbox::new(),
            player_name: PLAYER_NAMES[0],
            connected: false,
            opponent_mode: None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.peek().copied().unwrap_or(false)
    }
}

impl Default for Shared {
    fn default() -> Self {
        Self::new()
    }
}
