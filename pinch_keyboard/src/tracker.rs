//! Hand trackers — the collaborators that turn a frame into landmarks.
//!
//! The frame loop only sees [`HandTracker::detect`].  It does not need to
//! know whether the skeleton came from the mouse-driven simulator or from an
//! external hand-tracking process piping JSON into stdin.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use image::RgbImage;
use log::{debug, warn};

use keyboard_core::hand::{HandLandmarks, Point, LANDMARK_COUNT};

// ════════════════════════════════════════════════════════════════════════════
// HandTracker trait
// ════════════════════════════════════════════════════════════════════════════

/// Pointer state sampled from the display window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x:       f32,
    pub y:       f32,
    /// Left button held.
    pub pressed: bool,
}

pub trait HandTracker {
    /// Zero or one validated hand for `frame`.
    fn detect(&mut self, frame: &RgbImage) -> Option<HandLandmarks>;

    /// Latest pointer state from the window; only the simulator uses it.
    fn observe_pointer(&mut self, _pointer: Option<PointerSample>) {}

    fn name(&self) -> &'static str;
}

/// Validate against the frame, logging and dropping anything malformed.
fn accept(raw: &[Point], frame: &RgbImage) -> Option<HandLandmarks> {
    match HandLandmarks::from_points(raw).and_then(|h| h.within(frame.width(), frame.height())) {
        Ok(hand) => Some(hand),
        Err(e)   => { debug!("dropping hand sample: {}", e); None }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandTracker — mouse-driven skeleton (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Builds a plausible upright right hand whose index fingertip sits on the
/// mouse cursor.  Holding the left button brings the middle fingertip in
/// next to the index tip, closing the pinch.
#[derive(Debug, Default)]
pub struct SimHandTracker {
    pointer: Option<PointerSample>,
}

/// Index–middle fingertip gap when pinched / open.
pub const SIM_PINCH_GAP: f32 = 12.0;
pub const SIM_OPEN_GAP:  f32 = 60.0;

impl SimHandTracker {
    pub fn new() -> Self { SimHandTracker::default() }

    /// The 21-point skeleton for a pointer sample, clamped into the frame.
    pub fn skeleton(p: PointerSample, width: u32, height: u32) -> Vec<Point> {
        let gap = if p.pressed { SIM_PINCH_GAP } else { SIM_OPEN_GAP };
        // (base x offset, tip y offset) per finger, relative to the index tip.
        let fingers: [(f32, f32); 5] = [
            (-45.0, 70.0),  // thumb
            (0.0,   0.0),   // index
            (gap,   0.0),   // middle
            (gap + 25.0, 15.0),
            (gap + 50.0, 35.0),
        ];
        let wrist = Point::new(p.x + 20.0, p.y + 200.0);

        let mut pts = Vec::with_capacity(LANDMARK_COUNT);
        pts.push(wrist);
        for (dx, tip_dy) in fingers {
            let tip = Point::new(p.x + dx, p.y + tip_dy);
            let base = Point::new(p.x + dx * 0.6 + 10.0, p.y + 120.0);
            for j in 1..4 {
                let t = j as f32 / 4.0;
                pts.push(Point::new(
                    base.x + (tip.x - base.x) * t,
                    base.y + (tip.y - base.y) * t,
                ));
            }
            pts.push(tip);
        }

        let (max_x, max_y) = (width.saturating_sub(1) as f32, height.saturating_sub(1) as f32);
        for pt in &mut pts {
            pt.x = pt.x.clamp(0.0, max_x);
            pt.y = pt.y.clamp(0.0, max_y);
        }
        pts
    }
}

impl HandTracker for SimHandTracker {
    fn detect(&mut self, frame: &RgbImage) -> Option<HandLandmarks> {
        let p = self.pointer?;
        let pts = SimHandTracker::skeleton(p, frame.width(), frame.height());
        accept(&pts, frame)
    }

    fn observe_pointer(&mut self, pointer: Option<PointerSample>) {
        self.pointer = pointer;
    }

    fn name(&self) -> &'static str { "mouse" }
}

// ════════════════════════════════════════════════════════════════════════════
// FeedTracker — external tracker over newline-delimited JSON
// ════════════════════════════════════════════════════════════════════════════

/// Hands read from a line-oriented stream, one JSON document per line:
///
/// ```text
/// [[x0, y0], [x1, y1], … [x20, y20]]    a hand
/// null                                  no hand
/// ```
///
/// A reader thread parses lines and forwards them over a channel; `detect`
/// drains the channel without blocking and keeps the newest sample until a
/// newer one (or `null`) replaces it.  Once the stream ends there is no hand.
pub struct FeedTracker {
    rx:     Receiver<Option<Vec<Point>>>,
    latest: Option<Vec<Point>>,
    closed: bool,
}

/// Parse one feed line.  `Ok(None)` is an explicit "no hand".
pub fn parse_feed_line(line: &str) -> Result<Option<Vec<Point>>, serde_json::Error> {
    let raw: Option<Vec<[f32; 2]>> = serde_json::from_str(line)?;
    Ok(raw.map(|pts| pts.into_iter().map(|[x, y]| Point::new(x, y)).collect()))
}

impl FeedTracker {
    /// Spawn a reader thread over `reader`.
    pub fn spawn<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in reader.lines() {
                let line = match line {
                    Ok(l)  => l,
                    Err(e) => { warn!("landmark feed read error: {}", e); break; }
                };
                if line.trim().is_empty() { continue; }
                match parse_feed_line(&line) {
                    Ok(sample) => if tx.send(sample).is_err() { return; },
                    Err(e)     => debug!("skipping landmark line: {}", e),
                }
            }
        });
        FeedTracker { rx, latest: None, closed: false }
    }

    pub fn stdin() -> Self {
        FeedTracker::spawn(std::io::BufReader::new(std::io::stdin()))
    }
}

impl HandTracker for FeedTracker {
    fn detect(&mut self, frame: &RgbImage) -> Option<HandLandmarks> {
        loop {
            match self.rx.try_recv() {
                Ok(sample) => self.latest = sample,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.closed {
                        warn!("landmark feed closed");
                        self.closed = true;
                    }
                    // No tracker, no hand.
                    self.latest = None;
                    break;
                }
            }
        }
        accept(self.latest.as_deref()?, frame)
    }

    fn name(&self) -> &'static str { "feed" }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
