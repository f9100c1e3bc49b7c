//! Escape-aware splitting for the exchange's delimited text formats.
//!
//! A delimiter directly preceded by a backslash is literal and never splits.
//! Tokens are returned as raw slices with escapes left in place; call
//! [`unescape`] where the literal text is needed.

use std::borrow::Cow;

pub const ESCAPE: char = '\\';

/// Split `input` on every `delimiter` not preceded by [`ESCAPE`].
///
/// Empty tokens are kept, including trailing ones, so `"a~~b~"` yields four
/// tokens. An empty input yields a single empty token.
#[must_use]
pub fn split_unescaped(input: &str, delimiter: char) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut previous = None;

    for (index, ch) in input.char_indices() {
        if ch == delimiter && previous != Some(ESCAPE) {
            tokens.push(&input[start..index]);
            start = index + ch.len_utf8();
        }
        previous = Some(ch);
    }
    tokens.push(&input[start..]);
    tokens
}

/// Like [`split_unescaped`] but drops trailing empty tokens.
#[must_use]
pub fn split_unescaped_trimmed(input: &str, delimiter: char) -> Vec<&str> {
    let mut tokens = split_unescaped(input, delimiter);
    while tokens.last().is_some_and(|token| token.is_empty()) {
        tokens.pop();
    }
    tokens
}

/// Remove the backslash in front of any of `delimiters`.
#[must_use]
pub fn unescape<'a>(token: &'a str, delimiters: &[char]) -> Cow<'a, str> {
    if !token.contains(ESCAPE) {
        return Cow::Borrowed(token);
    }

    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE && chars.peek().is_some_and(|next| delimiters.contains(next)) {
            continue;
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_plain_delimiters() {
        assert_eq!(split_unescaped("a:b:c", ':'), vec!["a", "b", "c"]);
    }

    #[test]
    fn escaped_delimiter_does_not_split() {
        assert_eq!(
            split_unescaped(r"Kempton\: 7f:123", ':'),
            vec![r"Kempton\: 7f", "123"]
        );
        assert_eq!(split_unescaped(r"a\|b|c", '|'), vec![r"a\|b", "c"]);
        assert_eq!(split_unescaped(r"x\~y~z", '~'), vec![r"x\~y", "z"]);
    }

    #[test]
    fn backslash_only_escapes_the_next_character() {
        assert_eq!(split_unescaped(r"a\b:c", ':'), vec![r"a\b", "c"]);
    }

    #[test]
    fn keeps_empty_tokens() {
        assert_eq!(split_unescaped("a~~b~", '~'), vec!["a", "", "b", ""]);
        assert_eq!(split_unescaped("", '~'), vec![""]);
        assert_eq!(split_unescaped("~", '~'), vec!["", ""]);
    }

    #[test]
    fn trimmed_drops_only_trailing_empties() {
        assert_eq!(split_unescaped_trimmed("~a~~b~~", '~'), vec!["", "a", "", "b"]);
        assert!(split_unescaped_trimmed("~~", '~').is_empty());
    }

    #[test]
    fn handles_multibyte_text() {
        assert_eq!(split_unescaped("Café;Noël", ';'), vec!["Café", "Noël"]);
    }

    #[test]
    fn unescape_strips_escapes_before_delimiters_only() {
        assert_eq!(unescape(r"O\,Brien", &[',', ';']), "O,Brien");
        assert_eq!(unescape(r"back\slash", &[',']), r"back\slash");
        assert!(matches!(unescape("plain", &[',']), Cow::Borrowed("plain")));
    }
}
