//! Multi-line text typed on the virtual keyboard.
//!
//! The buffer never has zero lines, and a character that would push the
//! active line past `max_line_len` starts a new line instead.  Lengths are
//! counted in `char`s.

use crate::layout::Keystroke;

pub const DEFAULT_MAX_LINE_LEN: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBuffer {
    lines:        Vec<String>,
    max_line_len: usize,
}

impl TextBuffer {
    /// An empty buffer (`[""]`) wrapping at `max_line_len` characters.
    /// A zero limit is treated as one.
    pub fn new(max_line_len: usize) -> Self {
        TextBuffer {
            lines:        vec![String::new()],
            max_line_len: max_line_len.max(1),
        }
    }

    /// Apply one keystroke.  Total: every keystroke is valid in every state.
    pub fn append(&mut self, keystroke: Keystroke) {
        match keystroke {
            Keystroke::Newline => self.lines.push(String::new()),
            Keystroke::Delete  => {
                let active = self.active_line_mut();
                if active.pop().is_none() && self.lines.len() > 1 {
                    self.lines.pop();
                }
            }
            Keystroke::Char(c) => {
                let limit = self.max_line_len;
                let active = self.active_line_mut();
                if active.chars().count() >= limit {
                    self.lines.push(c.to_string());
                } else {
                    active.push(c);
                }
            }
        }
    }

    pub fn lines(&self) -> &[String] { &self.lines }

    pub fn line_count(&self) -> usize { self.lines.len() }

    pub fn max_line_len(&self) -> usize { self.max_line_len }

    /// The last line, where typing happens.
    pub fn active_line(&self) -> &str {
        self.lines.last().map(String::as_str).unwrap_or_default()
    }

    /// The last `n` lines (fewer if the buffer is shorter).
    pub fn tail(&self, n: usize) -> &[String] {
        let start = self.lines.len().saturating_sub(n);
        &self.lines[start..]
    }

    /// All lines joined with `\n`.
    pub fn text(&self) -> String { self.lines.join("\n") }

    fn active_line_mut(&mut self) -> &mut String {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }
}

impl Default for TextBuffer {
    fn default() -> Self { TextBuffer::new(DEFAULT_MAX_LINE_LEN) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use Keystroke::*;

    fn typed(keys: &[Keystroke]) -> TextBuffer {
        let mut buf = TextBuffer::default();
        for &k in keys { buf.append(k); }
        buf
    }

    #[test]
    fn starts_with_one_empty_line() {
        let buf = TextBuffer::default();
        assert_eq!(buf.lines(), [""]);
        assert_eq!(buf.active_line(), "");
    }

    #[test]
    fn hi_newline_x_then_deletes() {
        let mut buf = typed(&[Char('H'), Char('I'), Newline, Char('X')]);
        assert_eq!(buf.lines(), ["HI", "X"]);
        buf.append(Delete);
        assert_eq!(buf.lines(), ["HI", ""]);
        buf.append(Delete);
        assert_eq!(buf.lines(), ["HI"]);
        buf.append(Delete);
        assert_eq!(buf.lines(), ["H"]);
    }

    #[test]
    fn wraps_at_fifty() {
        let mut buf = TextBuffer::default();
        for _ in 0..49 { buf.append(Char('a')); }
        assert_eq!(buf.active_line().len(), 49);
        buf.append(Char('b'));
        assert_eq!(buf.active_line().len(), 50);
        assert_eq!(buf.line_count(), 1);
        buf.append(Char('c'));
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.active_line(), "c");
        assert_eq!(buf.lines()[0].len(), 50);
    }

    #[test]
    fn wrap_counts_chars_not_bytes() {
        let mut buf = TextBuffer::new(3);
        for _ in 0..3 { buf.append(Char('é')); }
        assert_eq!(buf.line_count(), 1);
        buf.append(Char('é'));
        assert_eq!(buf.lines(), ["ééé", "é"]);
    }

    #[test]
    fn delete_on_empty_single_line_is_noop() {
        let mut buf = TextBuffer::default();
        buf.append(Delete);
        assert_eq!(buf.lines(), [""]);
    }

    #[test]
    fn delete_on_empty_active_line_drops_it() {
        let mut buf = typed(&[Char('A'), Newline, Newline]);
        assert_eq!(buf.line_count(), 3);
        buf.append(Delete);
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.lines(), ["A", ""]);
    }

    #[test]
    fn newline_adds_empty_active_line() {
        let mut buf = typed(&[Char('A')]);
        buf.append(Newline);
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.active_line(), "");
    }

    #[test]
    fn tail_returns_last_lines() {
        let buf = typed(&[Char('1'), Newline, Char('2'), Newline, Char('3')]);
        assert_eq!(buf.tail(2), ["2", "3"]);
        assert_eq!(buf.tail(10).len(), 3);
        assert_eq!(buf.text(), "1\n2\n3");
    }
}
