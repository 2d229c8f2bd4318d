//! Pause task - pause menu, connection-lost notice and game-over screen.

use crate::canvas::{draw_centered, draw_title, push_button, Canvas, ACCENT, ALERT, BLACK, DIM, WHITE};
use crate::core::{LinkRequest, OpponentPort, Score};
use crate::input::InputState;
use crate::shared::Shared;
use crate::types::{PlayerMode, PLAYER_NAMES};

/// Where the first name button goes
const NAMES_Y: i32 = 8;

#[derive(Debug, Clone, Default)]
pub struct PauseTask;

impl PauseTask {
    pub fn new() -> Self {
        Self
    }

    pub fn step(
        &mut self,
        input: &InputState,
        player_mode: PlayerMode,
        shared: &mut Shared,
        link: &mut dyn OpponentPort,
        canvas: &mut dyn Canvas,
    ) {
        canvas.clear(BLACK);
        let link_ok = player_mode == PlayerMode::Single || shared.connected;
        if !link_ok {
            link.request(LinkRequest::Probe);
        }

        if shared.is_game_over() {
            let score = shared.score.peek().copied().unwrap_or_default();
            draw_game_over(canvas, input, &score, shared);
        } else if link_ok {
            draw_title(canvas, "PAUSED", 2);
            draw_centered(canvas, "PRESS ESC TO RESUME", 7, WHITE);
            draw_centered(canvas, "R TO RESTART", 9, WHITE);
            draw_centered(canvas, "M FOR MAIN MENU", 11, WHITE);
        } else {
            draw_title(canvas, "ERROR", 2);
            draw_centered(canvas, "CONNECTION LOST", 7, ALERT);
            draw_centered(canvas, "R TO RESTART", 9, WHITE);
            draw_centered(canvas, "M FOR MAIN MENU", 11, WHITE);
        }
    }
}

fn draw_game_over(canvas: &mut dyn Canvas, input: &InputState, score: &Score, shared: &mut Shared) {
    draw_title(canvas, "GAME OVER", 1);
    draw_centered(
        canvas,
        &format!("SCORE {}   LEVEL {}   LINES {}", score.points, score.level, score.lines),
        4,
        ACCENT,
    );

    draw_centered(canvas, "ENTER YOUR NAME", NAMES_Y - 2, DIM);
    for (i, name) in PLAYER_NAMES.iter().enumerate() {
        let (w, _) = canvas.text_size(name);
        let x = (crate::canvas::SCREEN_W - w - 2) / 2;
        let y = NAMES_Y + i as i32;
        let selected = shared.player_name == *name;
        if push_button(canvas, &input.mouse, name, x, y, selected) && !selected {
            shared.player_name = name;
            shared.rename.publish(name);
        }
    }

    draw_centered(canvas, "R TO RESTART   M FOR MAIN MENU", 16, WHITE);
}
