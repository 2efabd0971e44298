//! Grouping of lines into paragraphs.

use crate::lines::{Line, LineSlice as _, Lines};

/// A continuous run of lines which each contain non-whitespace text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph<'a> {
    lines: Lines<'a>,
}

impl<'a> Paragraph<'a> {
    /// The lines that make up the paragraph.
    pub fn lines(&self) -> &[Line<'a>] {
        &self.lines
    }

    /// The paragraph's content and line breaks, as found in the message.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.to_bytes()
    }
}

/// Group `lines` into paragraphs, using blank lines as separators.
///
/// Blank lines never end up inside a paragraph, and a message of nothing but
/// blank lines has no paragraphs.
pub fn paragraphs<'a>(lines: &[Line<'a>]) -> Vec<Paragraph<'a>> {
    let mut paragraphs = Vec::new();
    let mut current = Vec::new();
    for line in lines {
        if !line.is_blank() {
            current.push(*line);
        } else if !current.is_empty() {
            paragraphs.push(Paragraph {
                lines: std::mem::take(&mut current).into_iter().collect(),
            });
        }
    }

    if !current.is_empty() {
        paragraphs.push(Paragraph {
            lines: current.into_iter().collect(),
        });
    }

    paragraphs
}
