//! [`Canvas`] over a terminal framebuffer.
//!
//! One canvas unit is one terminal cell. Square images are drawn as solid
//! `SQUARE_W x SQUARE_H` blocks in the colour their file name names
//! (`blue_square.png` is blue); the image content is not decoded.

use std::path::Path;

use crate::engine::canvas::{Canvas, CanvasError, ImageHandle, SQUARE_H, SQUARE_W, TITLE_FONT};
use crate::engine::canvas::{BODY_FONT, SCREEN_H, SCREEN_W};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

const SQUARE_GLYPH: char = '█';

/// Colour each known sprite stands for
fn sprite_color(stem: &str) -> Option<Rgb> {
    let rgb = match stem {
        "blue_square" => Rgb::new(80, 120, 220),
        "green_square" => Rgb::new(100, 220, 120),
        "yellow_square" => Rgb::new(240, 220, 80),
        "red_square" => Rgb::new(220, 80, 80),
        "lightblue_square" => Rgb::new(80, 220, 220),
        "purple_square" => Rgb::new(200, 120, 220),
        "grey_square" => Rgb::new(90, 90, 100),
        _ => return None,
    };
    Some(rgb)
}

pub struct TerminalCanvas {
    fb: FrameBuffer,
    images: Vec<Rgb>,
    font: u16,
}

impl TerminalCanvas {
    pub fn new() -> Self {
        Self::with_size(SCREEN_W as u16, SCREEN_H as u16)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        Self {
            fb: FrameBuffer::new(width, height),
            images: Vec::new(),
            font: BODY_FONT,
        }
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    /// The buffer handed to the renderer for the swap.
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }
}

impl Default for TerminalCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for TerminalCanvas {
    fn clear(&mut self, color: Rgb) {
        self.fb.clear(Cell::blank(color));
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) {
        self.fb.put_str(x, y, text, color, self.font >= TITLE_FONT);
    }

    fn draw_filled_box(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb) {
        let style = CellStyle {
            bg: color,
            ..CellStyle::default()
        };
        self.fb.fill_rect(x, y, w, h, ' ', style);
    }

    fn draw_image(&mut self, image: ImageHandle, x: i32, y: i32) {
        let Some(color) = self.images.get(image.0 as usize).copied() else {
            return;
        };
        let style = CellStyle {
            fg: color,
            ..CellStyle::default()
        };
        self.fb.fill_rect(x, y, SQUARE_W, SQUARE_H, SQUARE_GLYPH, style);
    }

    fn load_image(&mut self, path: &Path) -> Result<ImageHandle, CanvasError> {
        if !path.is_file() {
            return Err(CanvasError::ImageNotFound(path.to_path_buf()));
        }
        let color = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(sprite_color)
            .ok_or_else(|| CanvasError::UnsupportedImage(path.to_path_buf()))?;
        self.images.push(color);
        Ok(ImageHandle(self.images.len() as u32 - 1))
    }

    fn text_size(&self, text: &str) -> (i32, i32) {
        (text.chars().count() as i32, 1)
    }

    fn set_font_size(&mut self, size: u16) {
        self.font = size;
    }

    fn font_size(&self) -> u16 {
        self.font
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::canvas::{draw_title, push_button};
    use crate::engine::input::MouseState;

    #[test]
    fn missing_image_is_an_error() {
        let mut canvas = TerminalCanvas::new();
        let err = canvas.load_image(Path::new("/nonexistent/images/blue_square.png"));
        assert!(matches!(err, Err(CanvasError::ImageNotFound(_))));
    }

    #[test]
    fn title_text_is_bold() {
        let mut canvas = TerminalCanvas::new();
        draw_title(&mut canvas, "HI", 0);
        let x = (SCREEN_W - 2) / 2;
        let cell = canvas.framebuffer().get(x, 0).unwrap_or_default();
        assert_eq!(cell.ch, 'H');
        assert!(cell.style.bold);
    }

    #[test]
    fn button_label_sits_on_its_box() {
        let mut canvas = TerminalCanvas::new();
        let mouse = MouseState::default();
        push_button(&mut canvas, &mouse, "OK", 2, 1, true);
        assert_eq!(canvas.framebuffer().row_text(1).trim(), "OK");
        let cell = canvas.framebuffer().get(2, 1).unwrap_or_default();
        assert_eq!(cell.style.bg, crate::engine::canvas::BUTTON_ACTIVE);
    }
}
