//! Wall-clock driven visual state: the blinking text cursor and the
//! short-lived highlight on a key that was just pressed.
//!
//! Both are advanced with an explicit `now` so they depend only on elapsed
//! time, never on how many frames were rendered.

use std::time::{Duration, Instant};

use crate::layout::KeyLabel;

// ════════════════════════════════════════════════════════════════════════════
// CursorBlink
// ════════════════════════════════════════════════════════════════════════════

/// Cursor visibility, flipped once per `interval` of elapsed time.
#[derive(Clone, Debug)]
pub struct CursorBlink {
    visible:     bool,
    last_toggle: Instant,
    interval:    Duration,
}

impl CursorBlink {
    /// Visible, with the first flip due at `now + interval`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        CursorBlink { visible: true, last_toggle: now, interval }
    }

    /// Catch up with `now` and return the visibility.
    ///
    /// A long gap between calls applies every flip that fell inside it, and
    /// `last_toggle` advances in whole intervals so the phase never drifts.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.interval.is_zero() {
            return self.visible;
        }
        let elapsed = now.saturating_duration_since(self.last_toggle);
        let flips = elapsed.as_nanos() / self.interval.as_nanos();
        if flips > 0 {
            let flips = u32::try_from(flips).unwrap_or(u32::MAX);
            self.last_toggle += self.interval * flips;
            if flips % 2 == 1 {
                self.visible = !self.visible;
            }
        }
        self.visible
    }

    pub fn is_visible(&self) -> bool { self.visible }

    pub fn interval(&self) -> Duration { self.interval }
}

// ════════════════════════════════════════════════════════════════════════════
// FlashState
// ════════════════════════════════════════════════════════════════════════════

/// Which key to highlight, and since when.
#[derive(Clone, Debug)]
pub struct FlashState {
    active:   Option<(KeyLabel, Instant)>,
    duration: Duration,
}

impl FlashState {
    pub fn new(duration: Duration) -> Self {
        FlashState { active: None, duration }
    }

    pub fn set(&mut self, label: KeyLabel, now: Instant) {
        self.active = Some((label, now));
    }

    /// Clear the highlight once strictly more than `duration` has elapsed.
    pub fn update(&mut self, now: Instant) -> Option<KeyLabel> {
        if let Some((_, since)) = self.active {
            if now.saturating_duration_since(since) > self.duration {
                self.active = None;
            }
        }
        self.current()
    }

    pub fn current(&self) -> Option<KeyLabel> {
        self.active.map(|(label, _)| label)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration { Duration::from_millis(n) }

    #[test]
    fn cursor_flips_once_per_interval() {
        let t0 = Instant::now();
        let mut c = CursorBlink::new(ms(500), t0);
        assert!(c.update(t0 + ms(499)));
        assert!(!c.update(t0 + ms(500)));
        assert!(!c.update(t0 + ms(999)));
        assert!(c.update(t0 + ms(1000)));
    }

    #[test]
    fn cursor_independent_of_frame_count() {
        let t0 = Instant::now();

        // 60 fps for 2.25 s
        let mut fast = CursorBlink::new(ms(500), t0);
        let mut flips_fast = 0;
        let mut prev = fast.is_visible();
        for i in 1..=135u64 {
            let v = fast.update(t0 + ms(i * 50 / 3));
            if v != prev { flips_fast += 1; prev = v; }
        }

        // A single late frame covering the same span
        let mut slow = CursorBlink::new(ms(500), t0);
        slow.update(t0 + ms(2250));

        assert_eq!(flips_fast, 4);
        assert_eq!(fast.is_visible(), slow.is_visible());
    }

    #[test]
    fn cursor_phase_does_not_drift() {
        let t0 = Instant::now();
        let mut c = CursorBlink::new(ms(500), t0);
        c.update(t0 + ms(740));   // one flip, next due at 1000
        assert!(!c.is_visible());
        assert!(c.update(t0 + ms(1000)));
    }

    #[test]
    fn flash_clears_after_duration() {
        let t0 = Instant::now();
        let mut f = FlashState::new(ms(200));
        f.set(KeyLabel::Char('A'), t0);
        assert_eq!(f.update(t0 + ms(200)), Some(KeyLabel::Char('A')));
        assert_eq!(f.update(t0 + ms(201)), None);
    }

    #[test]
    fn flash_reset_by_new_press() {
        let t0 = Instant::now();
        let mut f = FlashState::new(ms(200));
        f.set(KeyLabel::Char('A'), t0);
        f.set(KeyLabel::Enter, t0 + ms(150));
        assert_eq!(f.update(t0 + ms(300)), Some(KeyLabel::Enter));
    }
}
