//! Pinch gesture → key press.
//!
//! Each frame the index fingertip is hit-tested against the layout.  If it
//! is over a key, the index/middle fingertips are pinched closer than the
//! threshold, and that key's own cooldown has expired, the press is
//! accepted.  Cooldowns are tracked per key label, beside the immutable
//! layout, so sliding from one key to the next while pinched still types
//! both.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::debug;

use crate::config::KeyboardConfig;
use crate::hand::HandLandmarks;
use crate::layout::{KeyLabel, Keystroke, Layout};

/// An accepted key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Press {
    pub label:     KeyLabel,
    pub keystroke: Keystroke,
    pub at:        Instant,
}

#[derive(Clone, Debug)]
pub struct PressMapper {
    pinch_threshold: f32,
    debounce:        Duration,
    last_press:      HashMap<KeyLabel, Instant>,
}

impl PressMapper {
    pub fn new(pinch_threshold: f32, debounce: Duration) -> Self {
        PressMapper { pinch_threshold, debounce, last_press: HashMap::new() }
    }

    pub fn from_config(cfg: &KeyboardConfig) -> Self {
        PressMapper::new(cfg.pinch_threshold, cfg.debounce())
    }

    /// Evaluate one frame's hand.  Returns at most one press.
    pub fn evaluate(
        &mut self,
        layout: &Layout,
        hand:   &HandLandmarks,
        now:    Instant,
    ) -> Option<Press> {
        let key = layout.key_at(hand.index_tip())?;

        let pinch = hand.pinch_distance();
        // Written as a negated `<` so a NaN distance is never a pinch.
        if !(pinch < self.pinch_threshold) {
            return None;
        }

        if let Some(&last) = self.last_press.get(&key.label) {
            if now.saturating_duration_since(last) <= self.debounce {
                return None;
            }
        }

        self.last_press.insert(key.label, now);
        debug!("press {} (pinch {:.1})", key.label, pinch);
        Some(Press { label: key.label, keystroke: key.label.keystroke(), at: now })
    }

    /// When `label` was last accepted, if ever.
    pub fn last_press(&self, label: KeyLabel) -> Option<Instant> {
        self.last_press.get(&label).copied()
    }

    pub fn pinch_threshold(&self) -> f32 { self.pinch_threshold }

    pub fn debounce(&self) -> Duration { self.debounce }
}

impl Default for PressMapper {
    fn default() -> Self { PressMapper::from_config(&KeyboardConfig::default()) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
