//! The fixed on-screen keyboard.
//!
//! Three rows of ten character keys on a 100 px pitch, then one row of wide
//! special keys laid out left to right with a 20 px gap:
//!
//! ```text
//!  Q  W  E  R  T  Y  U  I  O  P
//!  A  S  D  F  G  H  J  K  L  ;
//!  Z  X  C  V  B  N  M  ,  .  /
//!  [      Space      ] [Backspace] [Enter]
//! ```

use std::fmt;

use crate::hand::Point;

// ════════════════════════════════════════════════════════════════════════════
// Geometry
// ════════════════════════════════════════════════════════════════════════════

pub const ORIGIN:      u32 = 50;
pub const KEY_PITCH:   u32 = 100;
pub const KEY_SIZE:    u32 = 85;
pub const SPECIAL_GAP: u32 = 20;

pub const CHAR_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL;", "ZXCVBNM,./"];

pub const SPECIAL_KEYS: [(KeyLabel, u32); 3] = [
    (KeyLabel::Space,     400),
    (KeyLabel::Backspace, 170),
    (KeyLabel::Enter,     120),
];

// ════════════════════════════════════════════════════════════════════════════
// KeyLabel / Keystroke
// ════════════════════════════════════════════════════════════════════════════

/// What is printed on a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyLabel {
    Char(char),
    Space,
    Backspace,
    Enter,
}

/// What a key press does to the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    /// Remove the last character (or the empty active line).
    Delete,
    /// Start a new line.
    Newline,
}

impl KeyLabel {
    pub fn keystroke(self) -> Keystroke {
        match self {
            KeyLabel::Char(c)   => Keystroke::Char(c),
            KeyLabel::Space     => Keystroke::Char(' '),
            KeyLabel::Backspace => Keystroke::Delete,
            KeyLabel::Enter     => Keystroke::Newline,
        }
    }
}

impl fmt::Display for KeyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyLabel::Char(c)   => write!(f, "{}", c),
            KeyLabel::Space     => f.write_str("Space"),
            KeyLabel::Backspace => f.write_str("Backspace"),
            KeyLabel::Enter     => f.write_str("Enter"),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Key
// ════════════════════════════════════════════════════════════════════════════

/// A key's label and screen rectangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key {
    pub label: KeyLabel,
    pub x:     u32,
    pub y:     u32,
    pub w:     u32,
    pub h:     u32,
}

impl Key {
    /// Half-open containment: `x <= px < x + w`, same for y.
    pub fn contains(&self, p: Point) -> bool {
        let (x, y) = (self.x as f32, self.y as f32);
        p.x >= x && p.x < x + self.w as f32
            && p.y >= y && p.y < y + self.h as f32
    }

    pub fn centre(&self) -> Point {
        Point::new(
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Layout
// ════════════════════════════════════════════════════════════════════════════

/// Ordered, immutable set of keys.
#[derive(Clone, Debug)]
pub struct Layout {
    keys: Vec<Key>,
}

impl Layout {
    /// The QWERTY grid plus Space / Backspace / Enter.
    pub fn standard() -> Self {
        Layout::from_rows(&CHAR_ROWS, &SPECIAL_KEYS)
    }

    /// Character rows on the standard grid, followed by one row of special
    /// keys with explicit widths.
    pub fn from_rows(rows: &[&str], specials: &[(KeyLabel, u32)]) -> Self {
        let mut keys = Vec::with_capacity(rows.iter().map(|r| r.len()).sum::<usize>() + specials.len());

        for (i, row) in rows.iter().enumerate() {
            for (j, c) in row.chars().enumerate() {
                keys.push(Key {
                    label: KeyLabel::Char(c),
                    x:     KEY_PITCH * j as u32 + ORIGIN,
                    y:     KEY_PITCH * i as u32 + ORIGIN,
                    w:     KEY_SIZE,
                    h:     KEY_SIZE,
                });
            }
        }

        let y = KEY_PITCH * rows.len() as u32 + ORIGIN;
        let mut x = ORIGIN;
        for &(label, w) in specials {
            keys.push(Key { label, x, y, w, h: KEY_SIZE });
            x += w + SPECIAL_GAP;
        }

        Layout { keys }
    }

    pub fn keys(&self) -> &[Key] { &self.keys }

    pub fn len(&self) -> usize { self.keys.len() }

    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    /// First key, in layout order, whose rectangle contains `p`.
    pub fn key_at(&self, p: Point) -> Option<&Key> {
        self.keys.iter().find(|k| k.contains(p))
    }

    pub fn find(&self, label: KeyLabel) -> Option<&Key> {
        self.keys.iter().find(|k| k.label == label)
    }
}

impl Default for Layout {
    fn default() -> Self { Layout::standard() }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
