use proptest::prelude::*;
use keyboard_core::{Keystroke, TextBuffer};

fn keystroke_strategy() -> impl Strategy<Value = Keystroke> {
    prop_oneof![
        6 => proptest::char::range('!', '~').prop_map(Keystroke::Char),
        1 => Just(Keystroke::Char(' ')),
        2 => Just(Keystroke::Delete),
        1 => Just(Keystroke::Newline),
    ]
}

proptest! {
    #[test]
    fn never_empty_and_never_over_limit(
        keys in prop::collection::vec(keystroke_strategy(), 0..400),
        limit in 1usize..60,
    ) {
        let mut buf = TextBuffer::new(limit);
        for k in keys {
            buf.append(k);
            prop_assert!(buf.line_count() >= 1);
            prop_assert!(buf.lines().iter().all(|l| l.chars().count() <= limit));
        }
    }

    #[test]
    fn newline_grows_by_one_with_empty_active(
        keys in prop::collection::vec(keystroke_strategy(), 0..100),
    ) {
        let mut buf = TextBuffer::default();
        for k in keys { buf.append(k); }
        let before = buf.line_count();
        buf.append(Keystroke::Newline);
        prop_assert_eq!(buf.line_count(), before + 1);
        prop_assert_eq!(buf.active_line(), "");
    }

    #[test]
    fn char_then_delete_restores(
        keys in prop::collection::vec(keystroke_strategy(), 0..100),
        c in proptest::char::range('a', 'z'),
    ) {
        let mut buf = TextBuffer::default();
        for k in keys { buf.append(k); }
        let before = buf.clone();
        buf.append(Keystroke::Char(c));
        buf.append(Keystroke::Delete);
        // A wrapped char leaves an empty trailing line behind.
        if before.active_line().chars().count() < buf.max_line_len() {
            prop_assert_eq!(buf, before);
        } else {
            prop_assert_eq!(buf.line_count(), before.line_count() + 1);
            prop_assert_eq!(buf.active_line(), "");
        }
    }
}
