//! Forwarding accepted presses to the host OS as real keystrokes.

use std::thread;
use std::time::Duration;

use rdev::{EventType, Key};
use thiserror::Error;

use keyboard_core::Keystroke;

#[derive(Debug, Error, PartialEq)]
pub enum SinkError {
    #[error("no key for {0:?}")]
    Unmapped(char),
    #[error("the OS rejected synthetic {0:?}")]
    Simulate(Key),
}

pub trait KeystrokeSink {
    fn send(&mut self, keystroke: Keystroke) -> Result<(), SinkError>;
}

// ── null backend (keystroke forwarding disabled) ──────────────────────────

pub struct NullSink;

impl KeystrokeSink for NullSink {
    fn send(&mut self, _keystroke: Keystroke) -> Result<(), SinkError> { Ok(()) }
}

// ── rdev backend ──────────────────────────────────────────────────────────

/// Synthesises key press/release pairs with `rdev::simulate`.
///
/// macOS drops events (the shift modifier first) that arrive back to back,
/// so there each event is followed by a short pause.
pub struct OsKeystrokeSink;

impl KeystrokeSink for OsKeystrokeSink {
    fn send(&mut self, keystroke: Keystroke) -> Result<(), SinkError> {
        let (key, shift) = key_for(keystroke)?;
        if shift { simulate(EventType::KeyPress(Key::ShiftLeft), Key::ShiftLeft)?; }
        let typed = simulate(EventType::KeyPress(key), key)
            .and_then(|_| simulate(EventType::KeyRelease(key), key));
        if shift { simulate(EventType::KeyRelease(Key::ShiftLeft), Key::ShiftLeft)?; }
        typed
    }
}

const MACOS_EVENT_GAP: Duration = Duration::from_millis(20);

fn simulate(event: EventType, key: Key) -> Result<(), SinkError> {
    rdev::simulate(&event).map_err(|_| SinkError::Simulate(key))?;
    if cfg!(target_os = "macos") {
        thread::sleep(MACOS_EVENT_GAP);
    }
    Ok(())
}

/// Physical key (US layout) and whether shift must be held.
pub fn key_for(keystroke: Keystroke) -> Result<(Key, bool), SinkError> {
    let c = match keystroke {
        Keystroke::Delete  => return Ok((Key::Backspace, false)),
        Keystroke::Newline => return Ok((Key::Return, false)),
        Keystroke::Char(c) => c,
    };
    let shift = c.is_ascii_uppercase();
    let key = match c.to_ascii_lowercase() {
        'a' => Key::KeyA, 'b' => Key::KeyB, 'c' => Key::KeyC, 'd' => Key::KeyD,
        'e' => Key::KeyE, 'f' => Key::KeyF, 'g' => Key::KeyG, 'h' => Key::KeyH,
        'i' => Key::KeyI, 'j' => Key::KeyJ, 'k' => Key::KeyK, 'l' => Key::KeyL,
        'm' => Key::KeyM, 'n' => Key::KeyN, 'o' => Key::KeyO, 'p' => Key::KeyP,
        'q' => Key::KeyQ, 'r' => Key::KeyR, 's' => Key::KeyS, 't' => Key::KeyT,
        'u' => Key::KeyU, 'v' => Key::KeyV, 'w' => Key::KeyW, 'x' => Key::KeyX,
        'y' => Key::KeyY, 'z' => Key::KeyZ,
        '0' => Key::Num0, '1' => Key::Num1, '2' => Key::Num2, '3' => Key::Num3,
        '4' => Key::Num4, '5' => Key::Num5, '6' => Key::Num6, '7' => Key::Num7,
        '8' => Key::Num8, '9' => Key::Num9,
        ' ' => Key::Space,
        ';' => Key::SemiColon,
        ',' => Key::Comma,
        '.' => Key::Dot,
        '/' => Key::Slash,
        '-' => Key::Minus,
        '=' => Key::Equal,
        _   => return Err(SinkError::Unmapped(c)),
    };
    Ok((key, shift))
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyboard_core::Layout;

    #[test]
    fn every_layout_key_is_mapped() {
        for key in Layout::standard().keys() {
            assert!(key_for(key.label.keystroke()).is_ok(), "{} unmapped", key.label);
        }
    }

    #[test]
    fn uppercase_needs_shift() {
        assert_eq!(key_for(Keystroke::Char('Q')), Ok((Key::KeyQ, true)));
        assert_eq!(key_for(Keystroke::Char(';')), Ok((Key::SemiColon, false)));
        assert_eq!(key_for(Keystroke::Newline),   Ok((Key::Return, false)));
        assert_eq!(key_for(Keystroke::Delete),    Ok((Key::Backspace, false)));
    }

    #[test]
    fn unmapped_char() {
        assert_eq!(key_for(Keystroke::Char('é')), Err(SinkError::Unmapped('é')));
    }

    #[test]
    fn null_sink_accepts_everything() {
        assert!(NullSink.send(Keystroke::Char('é')).is_ok());
    }
}
