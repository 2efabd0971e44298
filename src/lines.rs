//! Line tokenization that keeps every original line break.

use std::borrow::Cow;
use std::ops::Deref;

const LF: u8 = b'\n';
const CR: u8 = b'\r';

/// A single line of a commit message.
///
/// A line is a continuous run of bytes containing neither `\r` nor `\n`. The
/// break that ended it is kept verbatim so the input can be reassembled byte
/// for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line<'a> {
    number: usize,
    content: &'a [u8],
    line_break: &'a [u8],
}

impl<'a> Line<'a> {
    /// Piece together a line.
    pub const fn new(number: usize, content: &'a [u8], line_break: &'a [u8]) -> Self {
        Self {
            number,
            content,
            line_break,
        }
    }

    /// Line number within the message, starting at 1.
    pub const fn number(&self) -> usize {
        self.number
    }

    /// The text of the line, without its line break.
    pub const fn content(&self) -> &'a [u8] {
        self.content
    }

    /// One of `"\n"`, `"\r\n"`, `"\r"`, or empty for the very last line.
    pub const fn line_break(&self) -> &'a [u8] {
        self.line_break
    }

    /// The line has no content at all.
    pub const fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The line has no content other than whitespace.
    pub fn is_blank(&self) -> bool {
        trim_start(self.content).is_empty()
    }

    /// The first non-whitespace character of the line is `#`.
    pub fn is_comment(&self) -> bool {
        trim_start(self.content).first() == Some(&b'#')
    }
}

// Unicode whitespace, up to the first invalid UTF-8 sequence.
fn trim_start(content: &[u8]) -> &[u8] {
    let valid = match std::str::from_utf8(content) {
        Ok(text) => text,
        Err(err) => std::str::from_utf8(&content[..err.valid_up_to()]).unwrap_or_default(),
    };
    &content[valid.len() - valid.trim_start().len()..]
}

/// Splits bytes into lines, yielding each with its terminator.
///
/// The remainder after the last break is always yielded, even when empty.
#[derive(Debug, Clone)]
pub(crate) struct LinesWithTerminator<'a> {
    remaining: &'a [u8],
    number: usize,
    done: bool,
}

impl<'a> LinesWithTerminator<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self {
            remaining: input,
            number: 0,
            done: input.is_empty(),
        }
    }
}

impl<'a> Iterator for LinesWithTerminator<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.number += 1;

        let input = self.remaining;
        let Some(end) = input.iter().position(|&b| b == LF || b == CR) else {
            self.done = true;
            self.remaining = &[];
            return Some(Line::new(self.number, input, &[]));
        };

        let width = if input[end] == CR && input.get(end + 1) == Some(&LF) {
            2
        } else {
            1
        };
        self.remaining = &input[end + width..];

        Some(Line::new(
            self.number,
            &input[..end],
            &input[end..end + width],
        ))
    }
}

/// Every line of a message, in order.
///
/// Empty input produces no lines at all, rather than a single empty line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lines<'a>(Vec<Line<'a>>);

impl<'a> Lines<'a> {
    /// Break `content` down into lines.
    pub fn new(content: &'a [u8]) -> Self {
        Self(LinesWithTerminator::new(content).collect())
    }

    /// Access the lines as a slice.
    pub fn as_slice(&self) -> &[Line<'a>] {
        &self.0
    }
}

impl<'a> Deref for Lines<'a> {
    type Target = [Line<'a>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> FromIterator<Line<'a>> for Lines<'a> {
    fn from_iter<T: IntoIterator<Item = Line<'a>>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for Lines<'a> {
    type Item = Line<'a>;
    type IntoIter = std::vec::IntoIter<Line<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'l, 'a> IntoIterator for &'l Lines<'a> {
    type Item = &'l Line<'a>;
    type IntoIter = std::slice::Iter<'l, Line<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Helpers available on any run of lines.
pub trait LineSlice<'a> {
    /// Index of the first line containing non-whitespace text.
    fn first_text_index(&self) -> Option<usize>;

    /// Index of the last line containing non-whitespace text.
    fn last_text_index(&self) -> Option<usize>;

    /// The lines without any leading or trailing blank lines.
    fn trim(&self) -> &[Line<'a>];

    /// The content of each line, joined by `separator`.
    ///
    /// Line breaks are not included. A single line is borrowed as is.
    fn join(&self, separator: &[u8]) -> Cow<'a, [u8]>;

    /// Content and line breaks reassembled into one byte sequence.
    fn to_bytes(&self) -> Vec<u8>;

    /// Same as [`LineSlice::to_bytes`], decoded as UTF-8 with replacement
    /// characters for invalid sequences.
    fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }
}

impl<'a> LineSlice<'a> for [Line<'a>] {
    fn first_text_index(&self) -> Option<usize> {
        self.iter().position(|line| !line.is_blank())
    }

    fn last_text_index(&self) -> Option<usize> {
        self.iter().rposition(|line| !line.is_blank())
    }

    fn trim(&self) -> &[Line<'a>] {
        match (self.first_text_index(), self.last_text_index()) {
            (Some(first), Some(last)) => &self[first..=last],
            _ => &[],
        }
    }

    fn join(&self, separator: &[u8]) -> Cow<'a, [u8]> {
        match self {
            [] => Cow::Borrowed(&[]),
            [line] => Cow::Borrowed(line.content()),
            [first, rest @ ..] => {
                let mut joined = first.content().to_vec();
                for line in rest {
                    joined.extend_from_slice(separator);
                    joined.extend_from_slice(line.content());
                }
                Cow::Owned(joined)
            }
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        let size = self
            .iter()
            .map(|line| line.content().len() + line.line_break().len())
            .sum();
        let mut bytes = Vec::with_capacity(size);
        for line in self {
            bytes.extend_from_slice(line.content());
            bytes.extend_from_slice(line.line_break());
        }
        bytes
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    fn line<'a>(number: usize, content: &'a str, line_break: &'a str) -> Line<'a> {
        Line::new(number, content.as_bytes(), line_break.as_bytes())
    }

    #[test]
    fn test_empty_input() {
        assert!(Lines::new(b"").is_empty());
    }

    #[test]
    fn test_single_line() {
        assert_eq!(
            Lines::new(b"fix: a broken thing").as_slice(),
            &[line(1, "fix: a broken thing", "")]
        );
    }

    #[test]
    fn test_trailing_break_yields_empty_last_line() {
        assert_eq!(
            Lines::new(b"foo\n").as_slice(),
            &[line(1, "foo", "\n"), line(2, "", "")]
        );
    }

    #[test]
    fn test_mixed_breaks() {
        assert_eq!(
            Lines::new(b"a\r\nb\rc\n\r\n\rd").as_slice(),
            &[
                line(1, "a", "\r\n"),
                line(2, "b", "\r"),
                line(3, "c", "\n"),
                line(4, "", "\r\n"),
                line(5, "", "\r"),
                line(6, "d", ""),
            ]
        );
    }

    #[test]
    fn test_lf_before_cr_is_two_breaks() {
        assert_eq!(
            Lines::new(b"\n\r").as_slice(),
            &[line(1, "", "\n"), line(2, "", "\r"), line(3, "", "")]
        );
    }

    #[test]
    fn test_predicates() {
        assert!(line(1, "", "").is_empty());
        assert!(!line(1, " \t ", "").is_empty());

        assert!(line(1, "", "").is_blank());
        assert!(line(1, " \t ", "").is_blank());
        assert!(!line(1, " foobar  ", "").is_blank());
        assert!(line(1, "\u{a0}\u{b}", "").is_blank());

        assert!(line(1, "# foo bar", "").is_comment());
        assert!(line(1, "  \t  # foo bar", "").is_comment());
        assert!(!line(1, "  foo # bar", "").is_comment());
        assert!(!line(1, "   ", "").is_comment());
    }

    #[test]
    fn test_predicates_with_invalid_utf8() {
        assert!(Line::new(1, b"\xc2\xa0#\xff", b"").is_comment());
        assert!(Line::new(1, b" \t# caf\xe9", b"").is_comment());
        assert!(!Line::new(1, b"\xc2\xa0\xff", b"").is_blank());
        assert!(!Line::new(1, b"\xff #", b"").is_comment());
    }

    #[test]
    fn test_text_indexes_and_trim() {
        let lines = Lines::new(b"\n  \nfoo\n\nbar\n\t\n");
        assert_eq!(lines.first_text_index(), Some(2));
        assert_eq!(lines.last_text_index(), Some(4));
        assert_eq!(lines.trim(), &lines[2..=4]);

        let blank = Lines::new(b"\n \n\t");
        assert_eq!(blank.first_text_index(), None);
        assert_eq!(blank.last_text_index(), None);
        assert!(blank.trim().is_empty());
    }

    #[test]
    fn test_join() {
        let lines = Lines::new(b"foo\r\nbar\rbaz");
        assert_eq!(&*lines.join(b"\n"), b"foo\nbar\nbaz");
        assert!(matches!(lines[..1].join(b"\n"), Cow::Borrowed(b"foo")));
        assert_eq!(&*lines[..0].join(b"\n"), b"");
    }

    #[test]
    fn test_to_string_lossy() {
        let lines = Lines::new(b"caf\xc3\xa9\r\n\xff");
        assert_eq!(lines.to_string_lossy(), "caf\u{e9}\r\n\u{fffd}");
    }

    fn line_break() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["\n", "\r", "\r\n"])
    }

    proptest! {
        #[test]
        fn round_trips_any_bytes(input in prop::collection::vec(any::<u8>(), 0..256)) {
            prop_assert_eq!(Lines::new(&input).to_bytes(), input);
        }

        #[test]
        fn round_trips_mixed_breaks(
            parts in prop::collection::vec(("[a-z #:]{0,8}", line_break()), 0..16),
            last in "[a-z ]{0,8}",
        ) {
            let mut input = String::new();
            for (content, line_break) in &parts {
                input.push_str(content);
                input.push_str(line_break);
            }
            input.push_str(&last);

            let lines = Lines::new(input.as_bytes());
            prop_assert_eq!(lines.to_bytes(), input.as_bytes());
            for (i, line) in lines.iter().enumerate() {
                prop_assert_eq!(line.number(), i + 1);
                prop_assert!(!line.content().contains(&b'\n'));
                prop_assert!(!line.content().contains(&b'\r'));
            }
            if let Some(line) = lines.last() {
                prop_assert!(line.line_break().is_empty());
            }
        }
    }
}
