use std::borrow::Cow;

/// Controls other than tab, newline and carriage return, plus ESC and DEL.
fn is_control(c: char) -> bool {
    c == '\u{1b}' || c == '\u{7f}' || (c < ' ' && !matches!(c, '\t' | '\n' | '\r'))
}

/// Strips terminal control characters and ANSI escape sequences from feed text.
///
/// Feed titles, author names and abstracts are remote input; printing them
/// verbatim would let a feed move the cursor or retitle the terminal.
///
/// Removes:
/// - CSI sequences (`ESC [` ... final byte in `@`..=`~`)
/// - OSC sequences (`ESC ]` ... BEL or `ESC \`)
/// - bare ESC, DEL and every other C0 control except `\t`, `\n`, `\r`
///
/// Returns `Cow::Borrowed` when there is nothing to strip.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_control) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\u{1b}' => match chars.peek() {
                Some('[') => {
                    chars.next();
                    for c in chars.by_ref() {
                        if ('@'..='~').contains(&c) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '\u{7}' {
                            break;
                        }
                        if c == '\u{1b}' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            c if is_control(c) => {}
            c => out.push(c),
        }
    }

    Cow::Owned(out)
}

/// Collapses all whitespace runs (including line breaks) to single spaces
/// and trims both ends.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_is_borrowed() {
        let s = "Quantum Gravity Revisited";
        assert!(matches!(strip_control_chars(s), Cow::Borrowed(_)));
    }

    #[test]
    fn test_keeps_tab_newline_cr() {
        assert_eq!(strip_control_chars("a\tb\nc\rd"), "a\tb\nc\rd");
    }

    #[test]
    fn test_removes_controls_and_del() {
        assert_eq!(strip_control_chars("a\u{0}b\u{7}c\u{7f}d"), "abcd");
    }

    #[test]
    fn test_removes_csi_sequences() {
        assert_eq!(strip_control_chars("\u{1b}[31mred\u{1b}[0m"), "red");
        assert_eq!(strip_control_chars("a\u{1b}[2Jb"), "ab");
    }

    #[test]
    fn test_removes_osc_sequences() {
        assert_eq!(strip_control_chars("\u{1b}]0;title\u{7}text"), "text");
        assert_eq!(strip_control_chars("\u{1b}]0;title\u{1b}\\text"), "text");
    }

    #[test]
    fn test_bare_escape_removed() {
        assert_eq!(strip_control_chars("a\u{1b}b"), "ab");
        assert_eq!(strip_control_chars("trailing\u{1b}"), "trailing");
    }

    #[test]
    fn test_unterminated_sequences_swallow_rest() {
        assert_eq!(strip_control_chars("a\u{1b}[123"), "a");
        assert_eq!(strip_control_chars("a\u{1b}]never closed"), "a");
    }

    #[test]
    fn test_non_ascii_preserved() {
        assert_eq!(strip_control_chars("Schrödinger\u{1b}[1m 猫"), "Schrödinger 猫");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("Gravity in\n  Two\tDimensions "), "Gravity in Two Dimensions");
        assert_eq!(single_line(""), "");
    }
}
