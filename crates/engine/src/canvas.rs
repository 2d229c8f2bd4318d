//! Drawing boundary.
//!
//! The tasks never touch a display. They draw through [`Canvas`], and only the
//! active task holds `&mut` access to it during a frame, which serializes all
//! drawing the same way a screen lock would.
//!
//! Coordinates are canvas units with the origin at the top-left. One board square
//! is [`SQUARE_W`] x [`SQUARE_H`] units.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::{Color, Rgb};

/// Screen width in canvas units
pub const SCREEN_W: i32 = 64;
/// Screen height in canvas units
pub const SCREEN_H: i32 = 20;
pub const SQUARE_W: i32 = 2;
pub const SQUARE_H: i32 = 1;

pub const BLACK: Rgb = Rgb::hex(0x000000);
pub const WHITE: Rgb = Rgb::hex(0xdcdcdc);
pub const DIM: Rgb = Rgb::hex(0x505050);
pub const ACCENT: Rgb = Rgb::hex(0xffd75f);
pub const ALERT: Rgb = Rgb::hex(0xff5f5f);
pub const BUTTON: Rgb = Rgb::hex(0x303a4a);
pub const BUTTON_ACTIVE: Rgb = Rgb::hex(0x3a6ea5);

pub const TITLE_FONT: u16 = 2;
pub const BODY_FONT: u16 = 1;

/// Opaque handle returned by [`Canvas::load_image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("image not found: {0}")]
    ImageNotFound(PathBuf),
    #[error("unsupported image: {0}")]
    UnsupportedImage(PathBuf),
}

pub trait Canvas {
    fn clear(&mut self, color: Rgb);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb);
    fn draw_filled_box(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb);
    fn draw_image(&mut self, image: ImageHandle, x: i32, y: i32);
    fn load_image(&mut self, path: &Path) -> Result<ImageHandle, CanvasError>;
    fn text_size(&self, text: &str) -> (i32, i32);
    fn set_font_size(&mut self, size: u16);
    fn font_size(&self) -> u16;
}

/// Square sprites, loaded once at startup
#[derive(Debug, Clone, Copy)]
pub struct Sprites {
    squares: [ImageHandle; 6],
    wall: ImageHandle,
}

impl Sprites {
    /// Load every square image from `<resources>/images/<name>.png`.
    pub fn load(canvas: &mut dyn Canvas, resources: &Path) -> Result<Self, CanvasError> {
        let images = resources.join("images");
        let mut squares = [ImageHandle(0); 6];
        for (slot, color) in squares.iter_mut().zip(Color::ALL) {
            *slot = canvas.load_image(&images.join(format!("{}.png", color.sprite_name())))?;
        }
        let wall = canvas.load_image(&images.join("grey_square.png"))?;
        Ok(Self { squares, wall })
    }

    pub fn square(&self, color: Color) -> ImageHandle {
        let idx = Color::ALL.iter().position(|c| *c == color).unwrap_or(0);
        self.squares[idx]
    }

    pub fn wall(&self) -> ImageHandle {
        self.wall
    }
}

/// Draw `text` horizontally centred on the screen.
pub fn draw_centered(canvas: &mut dyn Canvas, text: &str, y: i32, color: Rgb) {
    let (w, _) = canvas.text_size(text);
    canvas.draw_text(text, (SCREEN_W - w) / 2, y, color);
}

/// Draw a title line in the large font, restoring the previous size.
pub fn draw_title(canvas: &mut dyn Canvas, text: &str, y: i32) {
    let previous = canvas.font_size();
    canvas.set_font_size(TITLE_FONT);
    draw_centered(canvas, text, y, ACCENT);
    canvas.set_font_size(previous);
}

/// A labelled box the mouse can press.
///
/// Returns whether the left button is held over it on this frame.
pub fn push_button(
    canvas: &mut dyn Canvas,
    mouse: &crate::input::MouseState,
    label: &str,
    x: i32,
    y: i32,
    selected: bool,
) -> bool {
    let (tw, th) = canvas.text_size(label);
    let (w, h) = (tw + 2, th);
    let fill = if selected { BUTTON_ACTIVE } else { BUTTON };
    canvas.draw_filled_box(x, y, w, h, fill);
    canvas.draw_text(label, x + 1, y, if selected { ACCENT } else { WHITE });
    mouse.pressed_in(x, y, w, h)
}

/// In-memory canvas that records what was drawn.
///
/// Text is measured the way the terminal measures it (one unit per character).
pub mod testing {
    use std::path::{Path, PathBuf};

    use super::{Canvas, CanvasError, ImageHandle, BODY_FONT};
    use crate::types::Rgb;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DrawnText {
        pub text: String,
        pub x: i32,
        pub y: i32,
        pub color: Rgb,
    }

    #[derive(Debug, Clone, Default)]
    pub struct RecordingCanvas {
        pub texts: Vec<DrawnText>,
        pub images: Vec<(ImageHandle, i32, i32)>,
        pub boxes: Vec<(i32, i32, i32, i32)>,
        pub loaded: Vec<PathBuf>,
        pub clears: usize,
        font: u16,
    }

    impl RecordingCanvas {
        pub fn new() -> Self {
            Self {
                font: BODY_FONT,
                ..Self::default()
            }
        }

        pub fn contains_text(&self, needle: &str) -> bool {
            self.texts.iter().any(|t| t.text.contains(needle))
        }

        /// Images drawn with the given handle
        pub fn count_image(&self, image: ImageHandle) -> usize {
            self.images.iter().filter(|(h, _, _)| *h == image).count()
        }
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, _color: Rgb) {
            self.texts.clear();
            self.images.clear();
            self.boxes.clear();
            self.clears += 1;
        }

        fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) {
            self.texts.push(DrawnText {
                text: text.to_string(),
                x,
                y,
                color,
            });
        }

        fn draw_filled_box(&mut self, x: i32, y: i32, w: i32, h: i32, _color: Rgb) {
            self.boxes.push((x, y, w, h));
        }

        fn draw_image(&mut self, image: ImageHandle, x: i32, y: i32) {
            self.images.push((image, x, y));
        }

        fn load_image(&mut self, path: &Path) -> Result<ImageHandle, CanvasError> {
            self.loaded.push(path.to_path_buf());
            Ok(ImageHandle(self.loaded.len() as u32 - 1))
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
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingCanvas;
    use super::*;
    use crate::input::MouseState;

    #[test]
    fn sprites_load_one_image_per_color_plus_wall() {
        let mut canvas = RecordingCanvas::new();
        let sprites = Sprites::load(&mut canvas, Path::new("res")).unwrap();
        assert_eq!(canvas.loaded.len(), Color::ALL.len() + 1);
        assert!(canvas.loaded[0].ends_with("images/blue_square.png"));
        assert_ne!(sprites.square(Color::Red), sprites.wall());
    }

    #[test]
    fn title_restores_font_size() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_font_size(BODY_FONT);
        draw_title(&mut canvas, "X", 0);
        assert_eq!(canvas.font_size(), BODY_FONT);
    }

    #[test]
    fn button_hit_box_covers_padded_label() {
        let mut canvas = RecordingCanvas::new();
        let mouse = MouseState {
            x: 14,
            y: 3,
            left_down: true,
        };
        // "ABCD" at x=10 spans 10..16
        assert!(push_button(&mut canvas, &mouse, "ABCD", 10, 3, false));
        assert!(!push_button(&mut canvas, &mouse, "ABCD", 10, 4, false));
        assert_eq!(canvas.boxes[0], (10, 3, 6, 1));
    }
}
