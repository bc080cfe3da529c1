//! # pinch_keyboard
//!
//! A virtual keyboard drawn over a (mirrored) camera feed.  Point at a key
//! with the index finger and pinch the middle finger against it to type.
//! Typed text scrolls in a panel at the bottom of the window and is also
//! forwarded to the operating system as real keystrokes.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Index tip over a key, index+middle tips < 30 px apart | Press that key (once per 0.4 s per key) |
//! | Pinch over `Space` / `Backspace` / `Enter` | space / delete / newline |
//! | `q` in the window | Quit |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: a synthetic backdrop, and the mouse
//!   drives a synthetic hand (hold the left button to pinch).
//! * `camera` — **Camera mode**: frames from a webcam via `nokhwa`.
//!
//! Landmarks from an external hand tracker can be piped in on stdin with
//! `--landmarks-stdin`; see [`tracker::FeedTracker`] for the line format.

pub mod canvas;
pub mod frame;
pub mod tracker;
pub mod sink;
pub mod render;
pub mod visualizer;
pub mod app;
