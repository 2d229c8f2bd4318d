//! Menu task - player mode, rotation, level and opponent mode selection.
//!
//! Selection buttons are level-triggered (holding the mouse over one keeps it
//! selected). Buttons that cause an action (screen switch, mode transmission) fire
//! once per click.

use crate::canvas::{
    draw_centered, draw_title, push_button, Canvas, ACCENT, ALERT, BLACK, DIM, WHITE,
};
use crate::core::{LinkRequest, OpponentPort};
use crate::input::{Debouncer, InputState};
use crate::session::SessionConfig;
use crate::shared::Shared;
use crate::types::{GameMode, Handedness, PlayerMode, MAX_START_LEVEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuScreen {
    Main,
    Levels,
}

#[derive(Debug, Clone)]
pub struct MenuTask {
    screen: MenuScreen,
    player_mode: Option<PlayerMode>,
    handedness: Option<Handedness>,
    start_level: u32,
    click: Debouncer,
}

impl MenuTask {
    pub fn new() -> Self {
        Self {
            screen: MenuScreen::Main,
            player_mode: None,
            handedness: None,
            start_level: 0,
            click: Debouncer::new(),
        }
    }

    /// Complete configuration, or `None` while mode or handedness is unset.
    pub fn config(&self, shared: &Shared) -> Option<SessionConfig> {
        Some(SessionConfig {
            player_mode: self.player_mode?,
            handedness: self.handedness?,
            opponent_mode: shared.opponent_mode,
            start_level: self.start_level,
        })
    }

    pub fn player_mode(&self) -> Option<PlayerMode> {
        self.player_mode
    }

    pub fn select_player_mode(&mut self, mode: PlayerMode) {
        self.player_mode = Some(mode);
    }

    pub fn select_handedness(&mut self, handedness: Handedness) {
        self.handedness = Some(handedness);
    }

    pub fn select_level(&mut self, level: u32) {
        self.start_level = level.min(MAX_START_LEVEL as u32);
    }

    pub fn step(
        &mut self,
        input: &InputState,
        shared: &mut Shared,
        link: &mut dyn OpponentPort,
        canvas: &mut dyn Canvas,
    ) {
        let clicked = self.click.update(input.mouse.left_down);
        canvas.clear(BLACK);

        match self.screen {
            MenuScreen::Main => self.draw_main(input, clicked, shared, link, canvas),
            MenuScreen::Levels => self.draw_levels(input, clicked, shared, canvas),
        }

        if self.player_mode == Some(PlayerMode::Multi) && !shared.connected {
            link.request(LinkRequest::Probe);
        }

        match self.config(shared) {
            Some(config) => shared.config.publish(config),
            None => shared.config.clear(),
        }
    }

    fn draw_main(
        &mut self,
        input: &InputState,
        clicked: bool,
        shared: &Shared,
        link: &mut dyn OpponentPort,
        canvas: &mut dyn Canvas,
    ) {
        let mouse = &input.mouse;
        draw_title(canvas, "TASKTRIS", 1);

        canvas.draw_text("PLAYERS", 6, 4, DIM);
        for (i, mode) in [PlayerMode::Single, PlayerMode::Multi].into_iter().enumerate() {
            let x = 20 + i as i32 * 14;
            if push_button(canvas, mouse, mode.label(), x, 4, self.player_mode == Some(mode)) {
                self.player_mode = Some(mode);
            }
        }

        canvas.draw_text("ROTATION", 6, 6, DIM);
        for (i, hand) in [Handedness::Left, Handedness::Right].into_iter().enumerate() {
            let x = 20 + i as i32 * 14;
            if push_button(canvas, mouse, hand.label(), x, 6, self.handedness == Some(hand)) {
                self.handedness = Some(hand);
            }
        }

        canvas.draw_text("LEVEL", 6, 8, DIM);
        canvas.draw_text(&self.start_level.to_string(), 20, 8, WHITE);
        if push_button(canvas, mouse, "SELECT LEVEL", 34, 8, false) && clicked {
            self.screen = MenuScreen::Levels;
        }

        let multi = self.player_mode == Some(PlayerMode::Multi);
        if multi && shared.connected {
            canvas.draw_text("OPPONENT", 6, 10, DIM);
            let mut x = 6;
            for mode in GameMode::ALL {
                let label = mode.as_str();
                let selected = shared.opponent_mode == Some(mode);
                if push_button(canvas, mouse, label, x, 11, selected) && clicked {
                    link.request(LinkRequest::SelectMode(mode));
                }
                x += canvas.text_size(label).0 + 3;
            }
        }

        let ready = self.config(shared).is_some();
        if multi && !shared.connected {
            draw_centered(canvas, "ERROR: NO CONNECTION", 14, ALERT);
        } else if ready {
            draw_centered(canvas, "PRESS S TO START", 14, ACCENT);
        } else {
            draw_centered(canvas, "CHOOSE PLAYERS AND ROTATION", 14, DIM);
        }
        draw_centered(canvas, "PRESS Q TO QUIT", 17, DIM);
    }

    fn draw_levels(
        &mut self,
        input: &InputState,
        clicked: bool,
        shared: &Shared,
        canvas: &mut dyn Canvas,
    ) {
        let mouse = &input.mouse;
        draw_title(canvas, "SELECT LEVEL", 1);

        for level in 0..=MAX_START_LEVEL as u32 {
            let x = 8 + level as i32 * 5;
            if push_button(canvas, mouse, &level.to_string(), x, 4, self.start_level == level) {
                self.start_level = level;
            }
        }

        draw_centered(canvas, "HIGH SCORES", 7, DIM);
        let entries = shared
            .high_scores
            .peek()
            .map(|t| t.entries())
            .unwrap_or(&[]);
        if entries.is_empty() {
            draw_centered(canvas, "-", 9, DIM);
        }
        for (rank, entry) in entries.iter().enumerate() {
            let line = format!(
                "{}. {:<20} {:>7}",
                rank + 1,
                entry.player.unwrap_or("-"),
                entry.points
            );
            draw_centered(canvas, &line, 9 + rank as i32, WHITE);
        }

        if push_button(canvas, mouse, "BACK TO MAIN MENU", 22, 15, false) && clicked {
            self.screen = MenuScreen::Main;
        }
    }
}

impl Default for MenuTask {
    fn default() -> Self {
        Self::new()
    }
}
