//! The plain line and paragraph view of a commit message.

use crate::lines::{Line, LineSlice as _, Lines};
use crate::paragraph::{paragraphs, Paragraph};

/// A commit message broken down into lines and paragraphs, without any
/// head, body or foot semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMessage<'a> {
    lines: Lines<'a>,
    paragraphs: Vec<Paragraph<'a>>,
}

impl<'a> RawMessage<'a> {
    /// Break `message` down into lines and paragraphs.
    pub fn new(message: &'a [u8]) -> Self {
        let lines = Lines::new(message);
        let paragraphs = paragraphs(&lines);
        Self { lines, paragraphs }
    }

    /// Every line of the message, including blank ones.
    pub fn lines(&self) -> &[Line<'a>] {
        &self.lines
    }

    /// Every paragraph of the message.
    pub fn paragraphs(&self) -> &[Paragraph<'a>] {
        &self.paragraphs
    }

    /// The message exactly as it was given, line breaks included.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.to_bytes()
    }

    /// Same as [`RawMessage::to_bytes`], decoded lossily as UTF-8.
    pub fn to_string_lossy(&self) -> String {
        self.lines.to_string_lossy()
    }
}
