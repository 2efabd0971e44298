//! Locating the head, body and foot of a commit message.

use std::fmt;

use crate::lines::{Line, LineSlice as _, Lines};
use crate::parser::is_footer_start;

/// A commit message split into its head, body and foot sections.
///
/// - The head is the first paragraph: the subject line, or several lines when
///   the subject wraps.
/// - The foot is the last paragraph, but only when its first line opens a
///   footer such as `Fixes #42` or `Signed-off-by: ...`. Otherwise that
///   paragraph belongs to the body.
/// - The body is everything in between, without surrounding blank lines.
///
/// Every section borrows lines from the original message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer<'a> {
    /// Index of the first line with non-whitespace text.
    first_line: usize,
    /// Index of the last line with non-whitespace text.
    last_line: usize,
    head_len: usize,
    foot_len: usize,
    lines: Lines<'a>,
}

impl<'a> Buffer<'a> {
    /// Break `message` down into lines and locate its sections.
    pub fn new(message: &'a [u8]) -> Self {
        let lines = Lines::new(message);
        let (Some(first_line), Some(last_line)) =
            (lines.first_text_index(), lines.last_text_index())
        else {
            tracing::trace!(lines = lines.len(), "message has no text");
            return Self {
                lines,
                ..Self::default()
            };
        };

        let head_len = lines[first_line..=last_line]
            .iter()
            .take_while(|line| !line.is_blank())
            .count();

        // The scan stops short of the head, so a single paragraph is never
        // both head and foot.
        let last_len = lines[first_line + head_len..=last_line]
            .iter()
            .skip(1)
            .rev()
            .take_while(|line| !line.is_blank())
            .count();

        let foot_len =
            if last_len > 0 && is_footer_start(lines[last_line + 1 - last_len].content()) {
                last_len
            } else {
                0
            };

        tracing::trace!(
            lines = lines.len(),
            first_line,
            last_line,
            head_len,
            foot_len,
            "located message sections"
        );

        Self {
            first_line,
            last_line,
            head_len,
            foot_len,
            lines,
        }
    }

    /// The first paragraph of the message.
    pub fn head(&self) -> &[Line<'a>] {
        &self.lines[self.first_line..self.first_line + self.head_len]
    }

    /// All lines between the head and the foot, without leading or trailing
    /// blank lines.
    ///
    /// When there is no foot section, the body runs to the last line of text.
    pub fn body(&self) -> &[Line<'a>] {
        let start = self.first_line + self.head_len + 1;
        let end = self.last_line + 1 - self.foot_len;
        if self.head_len == 0 || start >= end {
            return &[];
        }

        self.lines[start..end].trim()
    }

    /// The last paragraph, when it starts with a footer.
    pub fn foot(&self) -> &[Line<'a>] {
        if self.foot_len == 0 {
            return &[];
        }

        let end = self.last_line + 1;
        &self.lines[end - self.foot_len..end]
    }

    /// All lines from the first to the last line with text, inclusive.
    pub fn lines(&self) -> &[Line<'a>] {
        if self.head_len == 0 {
            return &[];
        }

        &self.lines[self.first_line..=self.last_line]
    }

    /// Every line of the message, including surrounding blank lines.
    pub fn raw_lines(&self) -> &[Line<'a>] {
        &self.lines
    }

    /// Number of lines from the first to the last line with text.
    pub fn line_count(&self) -> usize {
        self.lines().len()
    }

    /// The message without leading and trailing blank lines.
    ///
    /// Whitespace on the first and last line of text is kept, as are the
    /// original line breaks between lines.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines().to_bytes()
    }

    /// The message exactly as it was given.
    pub fn to_bytes_raw(&self) -> Vec<u8> {
        self.lines.to_bytes()
    }

    /// The message exactly as it was given, decoded lossily as UTF-8.
    pub fn to_string_raw(&self) -> String {
        self.lines.to_string_lossy()
    }
}

impl fmt::Display for Buffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().to_string_lossy())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::paragraph::paragraphs;
    use indoc::indoc;
    use proptest::prelude::*;

    fn numbers(lines: &[Line<'_>]) -> Vec<usize> {
        lines.iter().map(Line::number).collect()
    }

    #[track_caller]
    fn assert_sections(message: &str, head: &[usize], body: &[usize], foot: &[usize]) {
        let buf = Buffer::new(message.as_bytes());
        assert_eq!(numbers(buf.head()), head, "head of {message:?}");
        assert_eq!(numbers(buf.body()), body, "body of {message:?}");
        assert_eq!(numbers(buf.foot()), foot, "foot of {message:?}");
    }

    #[test]
    fn test_empty() {
        for message in ["", " ", "\n\n  \n\n\t\n"] {
            let buf = Buffer::new(message.as_bytes());
            assert!(buf.head().is_empty());
            assert!(buf.body().is_empty());
            assert!(buf.foot().is_empty());
            assert!(buf.lines().is_empty());
            assert_eq!(buf.line_count(), 0);
            assert!(buf.to_bytes().is_empty());
            assert_eq!(buf.to_bytes_raw(), message.as_bytes());
        }
    }

    #[test]
    fn test_single_line() {
        assert_sections("fix: a broken thing", &[1], &[], &[]);
        assert_sections("\n\n  fix: a broken thing\n\n\n", &[3], &[], &[]);
    }

    #[test]
    fn test_single_paragraph() {
        assert_sections("foo\nbar\nbaz", &[1, 2, 3], &[], &[]);
        assert_sections("feat: x\nFixes #1\n", &[1, 2], &[], &[]);
    }

    #[test]
    fn test_body() {
        assert_sections(
            "feat(token)!: change a thing\n\nmore stuff\nand more",
            &[1],
            &[3, 4],
            &[],
        );
        assert_sections(
            "feat: x\n\n\n  \nfirst\n\n\nsecond\n \n\n",
            &[1],
            &[5, 6, 7, 8],
            &[],
        );
    }

    #[test]
    fn test_foot() {
        assert_sections("feat: x\n\nFixes #349\n", &[1], &[], &[3]);
        assert_sections(
            indoc! {"
                feat: x

                Lorem ipsum dolor sit amet.

                Approved-by: A
                and B
            "},
            &[1],
            &[3],
            &[5, 6],
        );
        assert_sections("feat: x\n\nbody\n\nAcked-by:  \nmore\n", &[1], &[3], &[5, 6]);
        assert_sections("feat: x\n\nbody\n\nAcked-by: \nmore\n", &[1], &[3, 4, 5, 6], &[]);
    }

    #[test]
    fn test_last_paragraph_without_footer_is_body() {
        assert_sections(
            "feat: x\n\nsome text\n\nmore text\nFixes #1\n",
            &[1],
            &[3, 4, 5, 6],
            &[],
        );
    }

    #[test]
    fn test_crlf() {
        let buf = Buffer::new(b"\r\nfeat: x\r\n\r\nbody\r\n\r\nCloses #2\r\n\r\n");
        assert_eq!(numbers(buf.head()), [2]);
        assert_eq!(numbers(buf.body()), [4]);
        assert_eq!(numbers(buf.foot()), [6]);
        assert_eq!(buf.line_count(), 5);
        assert_eq!(buf.to_bytes(), b"feat: x\r\n\r\nbody\r\n\r\nCloses #2\r\n");
        assert_eq!(buf.to_string(), "feat: x\r\n\r\nbody\r\n\r\nCloses #2\r\n");
    }

    #[test]
    fn test_to_bytes_keeps_inner_whitespace() {
        let message = "\n \n  feat: x \n\n\tbody\n\n";
        let buf = Buffer::new(message.as_bytes());
        assert_eq!(buf.to_bytes(), b"  feat: x \n\n\tbody\n");
        assert_eq!(buf.to_string_raw(), message);
    }

    proptest! {
        #[test]
        fn trimming_is_idempotent(message in "[a-z:# \n\r\t]{0,64}") {
            let once = Buffer::new(message.as_bytes()).to_bytes();
            let twice = Buffer::new(&once).to_bytes();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn head_fits_within_text(message in "[a-z:# \n\r]{0,64}") {
            let buf = Buffer::new(message.as_bytes());
            let text_lines = buf.raw_lines().iter().filter(|line| !line.is_blank()).count();
            if text_lines == 0 {
                prop_assert!(buf.head().is_empty());
            } else {
                prop_assert!(!buf.head().is_empty());
                prop_assert!(buf.head().len() <= text_lines);
                prop_assert!(buf.head().len() <= buf.line_count());
            }
        }

        #[test]
        fn foot_is_whole_last_paragraph(message in "(([a-zA-Z-]{1,6}(: | #)[a-z]{1,4}|[a-z ]{0,8})\n{1,2}){0,8}") {
            let buf = Buffer::new(message.as_bytes());
            let foot = buf.foot();
            if let Some(first) = foot.first() {
                prop_assert!(is_footer_start(first.content()));
                prop_assert!(foot.iter().all(|line| !line.is_blank()));
                prop_assert_eq!(foot.last(), buf.lines().last());
            }
        }

        #[test]
        fn last_paragraph_without_footer_is_not_foot(message in "(([a-zA-Z-]{1,6}(: | #)[a-z]{1,4}|[a-z ]{0,8})\n{1,2}){0,8}") {
            let buf = Buffer::new(message.as_bytes());
            let paragraphs = paragraphs(buf.lines());
            if let (true, [_, .., last]) = (buf.foot().is_empty(), paragraphs.as_slice()) {
                prop_assert!(!is_footer_start(last.lines()[0].content()));
            }
        }
    }
}
