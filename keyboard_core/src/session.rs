//! Everything that changes while the keyboard is in use, owned in one
//! place and advanced once per frame by the caller's loop.

use std::time::Instant;

use crate::buffer::TextBuffer;
use crate::config::KeyboardConfig;
use crate::hand::HandLandmarks;
use crate::layout::{KeyLabel, Layout};
use crate::mapper::{Press, PressMapper};
use crate::timing::{CursorBlink, FlashState};

pub struct Session {
    layout: Layout,
    buffer: TextBuffer,
    mapper: PressMapper,
    cursor: CursorBlink,
    flash:  FlashState,
    visible_lines: usize,
}

impl Session {
    /// Standard layout, empty buffer, cursor visible as of `now`.
    pub fn new(cfg: KeyboardConfig, now: Instant) -> Self {
        Session::with_layout(Layout::standard(), cfg, now)
    }

    pub fn with_layout(layout: Layout, cfg: KeyboardConfig, now: Instant) -> Self {
        Session {
            layout,
            buffer: TextBuffer::new(cfg.max_line_len),
            mapper: PressMapper::from_config(&cfg),
            cursor: CursorBlink::new(cfg.cursor_blink(), now),
            flash:  FlashState::new(cfg.flash()),
            visible_lines: cfg.visible_lines,
        }
    }

    /// Advance one frame.
    ///
    /// Timers are brought up to `now` first, then the hand (if any) is
    /// evaluated.  An accepted press is applied to the buffer and flashed,
    /// and returned so the caller can forward it to the OS.
    pub fn step(&mut self, hand: Option<&HandLandmarks>, now: Instant) -> Option<Press> {
        self.cursor.update(now);
        self.flash.update(now);

        let press = self.mapper.evaluate(&self.layout, hand?, now)?;
        self.buffer.append(press.keystroke);
        self.flash.set(press.label, now);
        Some(press)
    }

    pub fn layout(&self) -> &Layout { &self.layout }

    pub fn buffer(&self) -> &TextBuffer { &self.buffer }

    pub fn mapper(&self) -> &PressMapper { &self.mapper }

    pub fn cursor_visible(&self) -> bool { self.cursor.is_visible() }

    pub fn flashed(&self) -> Option<KeyLabel> { self.flash.current() }

    /// The lines the text panel should show.
    pub fn visible_lines(&self) -> &[String] { self.buffer.tail(self.visible_lines) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::hand::{INDEX_TIP, LANDMARK_COUNT, MIDDLE_TIP};
    use crate::layout::Keystroke;

    fn ms(n: u64) -> Duration { Duration::from_millis(n) }

    fn pinch_on(layout: &Layout, label: KeyLabel) -> HandLandmarks {
        let c = layout.find(label).unwrap().centre();
        let mut pts = vec![(640.0, 700.0); LANDMARK_COUNT];
        pts[INDEX_TIP]  = (c.x, c.y);
        pts[MIDDLE_TIP] = (c.x + 8.0, c.y);
        HandLandmarks::from_points(&pts).unwrap()
    }

    #[test]
    fn no_hand_no_press_but_timers_run() {
        let t0 = Instant::now();
        let mut s = Session::new(KeyboardConfig::default(), t0);
        assert!(s.step(None, t0 + ms(600)).is_none());
        assert!(!s.cursor_visible());
        assert_eq!(s.buffer().lines(), [""]);
    }

    #[test]
    fn press_types_and_flashes() {
        let t0 = Instant::now();
        let mut s = Session::new(KeyboardConfig::default(), t0);
        let h = pinch_on(s.layout(), KeyLabel::Char('H'));
        let press = s.step(Some(&h), t0).unwrap();
        assert_eq!(press.keystroke, Keystroke::Char('H'));
        assert_eq!(s.flashed(), Some(KeyLabel::Char('H')));
        assert_eq!(s.buffer().lines(), ["H"]);

        // Flash gone after 0.2 s even with no further input.
        s.step(None, t0 + ms(250));
        assert_eq!(s.flashed(), None);
    }

    #[test]
    fn typing_scenario() {
        let t0 = Instant::now();
        let mut s = Session::new(KeyboardConfig::default(), t0);
        let seq = [
            KeyLabel::Char('H'), KeyLabel::Char('I'), KeyLabel::Enter,
            KeyLabel::Char('X'), KeyLabel::Backspace,
        ];
        for (i, &label) in seq.iter().enumerate() {
            let h = pinch_on(s.layout(), label);
            assert!(s.step(Some(&h), t0 + ms(i as u64 * 100)).is_some());
        }
        assert_eq!(s.buffer().lines(), ["HI", ""]);

        // Backspace again, after its own debounce
        let h = pinch_on(s.layout(), KeyLabel::Backspace);
        assert!(s.step(Some(&h), t0 + ms(450)).is_none());
        assert!(s.step(Some(&h), t0 + ms(900)).is_some());
        assert_eq!(s.buffer().lines(), ["HI"]);
    }

    #[test]
    fn visible_lines_is_tail() {
        let t0 = Instant::now();
        let mut s = Session::new(KeyboardConfig::default(), t0);
        let enter = pinch_on(s.layout(), KeyLabel::Enter);
        for i in 0..7 {
            s.step(Some(&enter), t0 + ms(i * 500));
        }
        assert_eq!(s.buffer().line_count(), 8);
        assert_eq!(s.visible_lines().len(), 5);
    }
}
