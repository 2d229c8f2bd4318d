//! Game task - feeds debounced buttons into the session and draws the playfield.

use crate::canvas::{
    draw_centered, Canvas, Sprites, ACCENT, BLACK, DIM, SCREEN_H, SQUARE_H, SQUARE_W, WHITE,
};
use crate::core::{Direction, GameSnapshot, OpponentPort, Tetromino};
use crate::input::{Debouncer, InputState};
use crate::session::{CycleReport, GameSession, SessionConfig, SessionInput};
use crate::settings::Settings;
use crate::types::{Key, COLS, ROWS};

/// Left edge of the board interior
const BOARD_X: i32 = 4;
/// Top edge of the board interior
const BOARD_Y: i32 = 1;
/// Side panel column
const PANEL_X: i32 = BOARD_X + COLS as i32 * SQUARE_W + SQUARE_W + 4;

pub struct GameTask {
    session: GameSession,
    left: Debouncer,
    right: Debouncer,
    rotate: Debouncer,
}

impl GameTask {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            session: GameSession::new(settings, seed),
            left: Debouncer::new(),
            right: Debouncer::new(),
            rotate: Debouncer::new(),
        }
    }

    /// Turn the raw snapshot into this cycle's requests.
    ///
    /// Left wins over Right when both edges arrive together. The fast-drop key is
    /// level-triggered and cleared once consumed, so only fresh key events (or
    /// auto-repeat) keep it coming.
    fn read_buttons(&mut self, input: &mut InputState) -> SessionInput {
        let keys = &mut input.keys;
        let left = self.left.update(keys.is_pressed(Key::Left));
        let right = self.right.update(keys.is_pressed(Key::Right));
        let rotate = self.rotate.update(keys.is_pressed(Key::Up));
        let fast_drop = keys.is_pressed(Key::Down);
        if fast_drop {
            keys.clear(Key::Down);
        }

        let horizontal = if left {
            Some(Direction::Left)
        } else if right {
            Some(Direction::Right)
        } else {
            None
        };
        SessionInput {
            horizontal,
            rotate,
            fast_drop,
        }
    }

    pub fn step(
        &mut self,
        input: &mut InputState,
        elapsed_ms: u32,
        config: Option<&SessionConfig>,
        link: &mut dyn OpponentPort,
        canvas: &mut dyn Canvas,
        sprites: &Sprites,
    ) -> CycleReport {
        let buttons = self.read_buttons(input);
        let report = self.session.step(buttons, elapsed_ms, config, link);
        draw_game(canvas, sprites, self.session.snapshot(), self.session.config());
        report
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }
}

/// Board row (0 = floor) to screen line. The only board-space to screen-space
/// conversion.
fn screen_y_of_row(row: usize) -> i32 {
    BOARD_Y + (ROWS - 1 - row) as i32 * SQUARE_H
}

fn screen_x_of_col(col: i32) -> i32 {
    BOARD_X + col * SQUARE_W
}

pub fn draw_game(
    canvas: &mut dyn Canvas,
    sprites: &Sprites,
    snap: &GameSnapshot,
    config: &SessionConfig,
) {
    canvas.clear(BLACK);

    // walls and floor
    let wall = sprites.wall();
    for row in 0..=ROWS as i32 {
        let y = BOARD_Y + row * SQUARE_H;
        canvas.draw_image(wall, BOARD_X - SQUARE_W, y);
        canvas.draw_image(wall, screen_x_of_col(COLS as i32), y);
    }
    for col in 0..COLS as i32 {
        canvas.draw_image(wall, screen_x_of_col(col), screen_y_of_row(0) + SQUARE_H);
    }

    for row in 0..ROWS {
        let Some(cells) = snap.board.row(row) else {
            continue;
        };
        for (col, cell) in cells.iter().enumerate() {
            if let Some(color) = cell {
                canvas.draw_image(
                    sprites.square(*color),
                    screen_x_of_col(col as i32),
                    screen_y_of_row(row),
                );
            }
        }
    }

    if !snap.game_over {
        if let Some(piece) = &snap.falling {
            for (col, depth) in piece.cells() {
                if depth >= 0 {
                    canvas.draw_image(
                        sprites.square(piece.color()),
                        screen_x_of_col(col as i32),
                        BOARD_Y + depth as i32 * SQUARE_H,
                    );
                }
            }
        }
    }

    draw_panel(canvas, sprites, snap, config);
}

fn draw_panel(
    canvas: &mut dyn Canvas,
    sprites: &Sprites,
    snap: &GameSnapshot,
    config: &SessionConfig,
) {
    let mut y = BOARD_Y;
    for (label, value) in [
        ("SCORE", snap.score.points),
        ("LEVEL", snap.score.level),
        ("LINES", snap.score.lines),
    ] {
        canvas.draw_text(label, PANEL_X, y, DIM);
        canvas.draw_text(&value.to_string(), PANEL_X + 8, y, WHITE);
        y += 2;
    }

    canvas.draw_text("NEXT", PANEL_X, y, DIM);
    if let Some(preview) = &snap.preview {
        draw_preview(canvas, sprites, preview, PANEL_X, y + 1);
    }

    let mode = match config.opponent_mode {
        Some(m) => format!("{} - {}", config.player_mode.label(), m.as_str()),
        None => config.player_mode.label().to_string(),
    };
    canvas.draw_text(&mode, PANEL_X, SCREEN_H - 4, ACCENT);
    canvas.draw_text("ESC TO PAUSE", PANEL_X, SCREEN_H - 2, DIM);

    if snap.falling.is_none() && !snap.game_over {
        draw_centered(canvas, "WAITING FOR OPPONENT", SCREEN_H - 1, ACCENT);
    }
}

fn draw_preview(canvas: &mut dyn Canvas, sprites: &Sprites, piece: &Tetromino, x: i32, y: i32) {
    for (dx, dy) in piece.shape().cells() {
        canvas.draw_image(
            sprites.square(piece.color()),
            x + dx as i32 * SQUARE_W,
            y + dy as i32 * SQUARE_H,
        );
    }
}
