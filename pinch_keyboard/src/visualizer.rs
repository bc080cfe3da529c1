//! The display window, using `minifb`.
//!
//! Shows composed canvases and reports what the user did since the last
//! frame: the quit key, and the mouse (which drives the simulated hand).

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::canvas::Canvas;
use crate::tracker::PointerSample;

/// What happened in the window since the last poll.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Poll {
    pub quit:    bool,
    pub pointer: Option<PointerSample>,
}

/// A display surface the frame loop can present to and poll.
pub trait Surface {
    fn present(&mut self, canvas: &Canvas) -> Result<(), minifb::Error>;
    fn poll(&mut self) -> Poll;
}

pub struct Visualizer {
    window: Window,
    width:  usize,
    height: usize,
}

impl Visualizer {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            title,
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer { window, width, height })
    }
}

impl Surface for Visualizer {
    fn present(&mut self, canvas: &Canvas) -> Result<(), minifb::Error> {
        self.window.update_with_buffer(canvas.pixels(), self.width, self.height)
    }

    fn poll(&mut self) -> Poll {
        if !self.window.is_open() {
            return Poll { quit: true, pointer: None };
        }

        // Bare `q` quits.  Shift+Q is what forwarded capital Q keystrokes
        // look like when this window has focus.
        let shift = self.window.is_key_down(Key::LeftShift)
                 || self.window.is_key_down(Key::RightShift);
        let quit = !shift && self.window.is_key_pressed(Key::Q, KeyRepeat::No);

        let pointer = self.window.get_mouse_pos(MouseMode::Discard).map(|(x, y)| PointerSample {
            x,
            y,
            pressed: self.window.get_mouse_down(MouseButton::Left),
        });

        Poll { quit, pointer }
    }
}
