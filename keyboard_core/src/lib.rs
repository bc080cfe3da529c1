//! # keyboard_core
//!
//! The I/O-free half of the pinch keyboard: a fixed on-screen layout, the
//! pinch-gesture → keystroke mapper with per-key debounce, a wrapping text
//! buffer, and the cursor/flash timers.  Nothing here touches a camera, a
//! window or the OS input stream; the `pinch_keyboard` crate wires these
//! pieces into the frame loop.
//!
//! ## Per-frame flow
//!
//! | Step | Owner | Effect |
//! |---|---|---|
//! | Tick timers | [`session::Session`] | cursor blink, flash expiry |
//! | Hit-test fingertip | [`layout::Layout::key_at`] | first key in layout order |
//! | Pinch + debounce | [`mapper::PressMapper`] | at most one [`mapper::Press`] |
//! | Apply keystroke | [`buffer::TextBuffer`] | char / delete / newline |
//!
//! ## Example
//!
//! ```
//! use std::time::Instant;
//! use keyboard_core::{HandLandmarks, KeyboardConfig, Session};
//!
//! let now = Instant::now();
//! let mut session = Session::new(KeyboardConfig::default(), now);
//!
//! // Index tip over "Q" (50..135, 50..135), middle tip 10 px away.
//! let mut pts = vec![(600.0, 600.0); 21];
//! pts[8]  = (90.0, 90.0);
//! pts[12] = (100.0, 90.0);
//! let hand = HandLandmarks::from_points(&pts).unwrap();
//!
//! let press = session.step(Some(&hand), now).unwrap();
//! assert_eq!(press.label.to_string(), "Q");
//! assert_eq!(session.buffer().lines(), ["Q"]);
//! ```

pub mod hand;
pub mod layout;
pub mod mapper;
pub mod buffer;
pub mod timing;
pub mod config;
pub mod session;

pub use hand::{HandLandmarks, LandmarkError, Point};
pub use layout::{Key, KeyLabel, Keystroke, Layout};
pub use mapper::{Press, PressMapper};
pub use buffer::TextBuffer;
pub use timing::{CursorBlink, FlashState};
pub use config::{ConfigError, KeyboardConfig};
pub use session::Session;
