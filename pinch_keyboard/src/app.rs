//! Top-level frame loop.
//!
//! `FrameLoop` owns the frame source, the hand tracker, the keystroke sink,
//! the `Session` and the renderer.  `run()` pairs it with a window and keeps
//! going until the window reports quit or a frame cannot be captured.

use std::time::Instant;

use log::{debug, info, warn};
use thiserror::Error;

use keyboard_core::{KeyboardConfig, KeyLabel, Session};

use crate::canvas::Canvas;
use crate::frame::{FrameError, FrameSource, SimFrameSource};
use crate::render::{FrameInfo, Renderer};
use crate::sink::{KeystrokeSink, NullSink, OsKeystrokeSink};
use crate::tracker::{FeedTracker, HandTracker, PointerSample, SimHandTracker};
use crate::visualizer::{Surface, Visualizer};

pub const WIN_W: u32 = 1280;
pub const WIN_H: u32 = 720;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("window error: {0}")]
    Window(#[from] minifb::Error),
    #[error(transparent)]
    Config(#[from] keyboard_core::ConfigError),
    #[error("camera support not compiled in; rebuild with `--features camera` or pass --sim")]
    CameraUnsupported,
}

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameMode {
    /// Synthetic backdrop.
    Simulated,
    /// Webcam with the given index.
    Camera(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerMode {
    /// Mouse drives a synthetic hand.
    Mouse,
    /// Landmarks read from stdin, one JSON array per line.
    StdinFeed,
}

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub frames:     FrameMode,
    pub tracker:    TrackerMode,
    pub width:      u32,
    pub height:     u32,
    /// Forward accepted presses to the OS.
    pub keystrokes: bool,
    pub keyboard:   KeyboardConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            frames:     if cfg!(feature = "camera") { FrameMode::Camera(0) } else { FrameMode::Simulated },
            tracker:    TrackerMode::Mouse,
            width:      WIN_W,
            height:     WIN_H,
            keystrokes: true,
            keyboard:   KeyboardConfig::default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameLoop
// ════════════════════════════════════════════════════════════════════════════

pub struct FrameLoop {
    source:   Box<dyn FrameSource>,
    tracker:  Box<dyn HandTracker>,
    sink:     Box<dyn KeystrokeSink>,
    session:  Session,
    renderer: Renderer,
    status:   String,
    mode:     String,
    last_key: Option<KeyLabel>,
}

impl FrameLoop {
    pub fn new(
        source:  Box<dyn FrameSource>,
        tracker: Box<dyn HandTracker>,
        sink:    Box<dyn KeystrokeSink>,
        session: Session,
        width:   usize,
        height:  usize,
    ) -> Self {
        let mode = format!("{} / {}", source.describe(), tracker.name());
        FrameLoop {
            source,
            tracker,
            sink,
            session,
            renderer: Renderer::new(width, height),
            status:   mode.clone(),
            mode,
            last_key: None,
        }
    }

    /// One capture → detect → map → render cycle.  Returns the composed
    /// canvas for display.  A capture failure is fatal to the loop.
    pub fn tick(&mut self, pointer: Option<PointerSample>, now: Instant) -> Result<&Canvas, AppError> {
        let frame = self.source.capture()?;

        self.tracker.observe_pointer(pointer);
        let hand = self.tracker.detect(&frame);

        if let Some(press) = self.session.step(hand.as_ref(), now) {
            debug!("typed {:?}", press.keystroke);
            if let Err(e) = self.sink.send(press.keystroke) {
                warn!("keystroke not forwarded: {}", e);
            }
            self.last_key = Some(press.label);
            self.status = format!("{}  last: {}", self.mode, press.label);
        }

        let info = FrameInfo { hand: hand.as_ref(), status: &self.status };
        Ok(self.renderer.render(&frame, &self.session, &info))
    }

    pub fn session(&self) -> &Session { &self.session }

    pub fn last_key(&self) -> Option<KeyLabel> { self.last_key }

    /// Drive `surface` until it reports quit.
    pub fn run_on<S: Surface>(&mut self, surface: &mut S) -> Result<(), AppError> {
        let mut pointer = None;
        loop {
            let canvas = self.tick(pointer, Instant::now())?;
            surface.present(canvas)?;
            let poll = surface.poll();
            if poll.quit { return Ok(()); }
            pointer = poll.pointer;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It opens the frame
/// source first (so a missing camera fails before any window appears), then
/// the window, and drives the frame loop until quit.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    cfg.keyboard.validate()?;

    let source = open_source(&cfg)?;
    let tracker: Box<dyn HandTracker> = match cfg.tracker {
        TrackerMode::Mouse     => Box::new(SimHandTracker::new()),
        TrackerMode::StdinFeed => Box::new(FeedTracker::stdin()),
    };
    let sink: Box<dyn KeystrokeSink> = if cfg.keystrokes {
        Box::new(OsKeystrokeSink)
    } else {
        Box::new(NullSink)
    };

    let (w, h) = (cfg.width as usize, cfg.height as usize);
    let session = Session::new(cfg.keyboard.clone(), Instant::now());
    let mut frame_loop = FrameLoop::new(source, tracker, sink, session, w, h);
    info!("running with {}", frame_loop.mode);

    let mut window = Visualizer::new("Virtual Keyboard", w, h)?;
    let result = frame_loop.run_on(&mut window);

    let text = frame_loop.session().buffer().text();
    if !text.is_empty() {
        info!("typed text:\n{}", text);
    }
    result
}

fn open_source(cfg: &AppConfig) -> Result<Box<dyn FrameSource>, AppError> {
    match cfg.frames {
        FrameMode::Simulated => Ok(Box::new(SimFrameSource::new(cfg.width, cfg.height))),
        #[cfg(feature = "camera")]
        FrameMode::Camera(index) => Ok(Box::new(
            crate::frame::CameraSource::open(index, cfg.width, cfg.height)?,
        )),
        #[cfg(not(feature = "camera"))]
        FrameMode::Camera(_) => Err(AppError::CameraUnsupported),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
