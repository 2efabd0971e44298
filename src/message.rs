//! The structured form of a conventional commit message.

use std::borrow::Cow;
use std::fmt;

use winnow::stream::Offset as _;

use crate::buffer::Buffer;
use crate::lines::LineSlice as _;
use crate::parser;
use crate::{Error, ErrorKind};

const BREAKING_PHRASE: &str = "BREAKING CHANGE";
const BREAKING_ARROW: &str = "BREAKING-CHANGE";

/// A conventional commit message.
///
/// Parsing is forgiving: a header which does not follow the convention ends
/// up as the description, and a last paragraph which does not start with a
/// footer ends up in the body.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message<'a> {
    #[cfg_attr(any(feature = "serde", feature = "schemars"), serde(rename = "type"))]
    ty: Cow<'a, str>,
    scope: Cow<'a, str>,
    description: Cow<'a, str>,
    body: Cow<'a, str>,
    breaking: bool,
    footers: Vec<Footer<'a>>,
    references: Vec<Footer<'a>>,
    breaking_changes: Vec<Cow<'a, str>>,
}

impl<'a> Message<'a> {
    /// Parse a commit message.
    ///
    /// The message may use any mix of `\n`, `\r\n` and `\r` line breaks, and
    /// is decoded as UTF-8 with replacement characters where it is invalid.
    ///
    /// # Errors
    ///
    /// This function returns an error if the message contains no text at
    /// all.
    pub fn parse<T: AsRef<[u8]> + ?Sized>(message: &'a T) -> Result<Self, Error> {
        Self::from_buffer(&Buffer::new(message.as_ref()))
    }

    /// Extract a message from its head, body and foot sections.
    ///
    /// # Errors
    ///
    /// This function returns an error if the buffer has no head section.
    pub fn from_buffer(buf: &Buffer<'a>) -> Result<Self, Error> {
        if buf.head().is_empty() {
            tracing::debug!(
                lines = buf.raw_lines().len(),
                "rejecting commit message without text"
            );
            return Err(Error::new(ErrorKind::EmptyMessage));
        }

        let head = buf.head().join(b"\n");
        let header = parser::header(&head).map(|h| {
            (
                trimmed(text(carve(&head, h.ty))),
                h.scope
                    .map(|scope| trimmed(text(carve(&head, scope))))
                    .unwrap_or_default(),
                h.breaking,
                text(carve(&head, h.description)),
            )
        });
        let (ty, scope, breaking, description) =
            header.unwrap_or_else(|| (Cow::default(), Cow::default(), false, text(head)));

        let body = text(buf.body().join(b"\n"));

        let mut footers = Vec::new();
        let mut references = Vec::new();
        let mut breaking_changes = Vec::new();
        for raw in parser::footers(buf.foot()) {
            let name = text(Cow::Borrowed(raw.name));
            let value = text(raw.value);
            if raw.reference {
                references.push(Footer::new(name, value));
            } else if name == BREAKING_PHRASE || name == BREAKING_ARROW {
                breaking_changes.push(value);
            } else {
                footers.push(Footer::new(name, value));
            }
        }

        tracing::trace!(
            breaking,
            footers = footers.len(),
            references = references.len(),
            breaking_changes = breaking_changes.len(),
            "extracted commit message"
        );

        Ok(Self {
            ty,
            scope,
            description,
            body,
            breaking,
            footers,
            references,
            breaking_changes,
        })
    }

    /// The type of the commit, or empty when the header is not conventional.
    pub fn type_(&self) -> &str {
        &self.ty
    }

    /// The scope of the commit, or empty when there is none.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The commit description.
    ///
    /// This is the whole head section when the header is not conventional.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The commit body, with lines joined by `\n`.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The header carries the `!` breaking change marker, e.g.:
    /// ```text
    /// feat(scope)!: this is a breaking change
    /// ```
    ///
    /// See [`Message::is_breaking_change`] to also account for footers.
    pub fn breaking(&self) -> bool {
        self.breaking
    }

    /// Footers which are neither references nor breaking changes.
    ///
    /// A footer is similar to a Git trailer, with the exception of not
    /// requiring whitespace before newlines.
    ///
    /// See: <https://git-scm.com/docs/git-interpret-trailers>
    pub fn footers(&self) -> &[Footer<'a>] {
        &self.footers
    }

    /// Footers of the `Fixes #42` form. Values keep their leading `#`.
    pub fn references(&self) -> &[Footer<'a>] {
        &self.references
    }

    /// Descriptions from every `BREAKING CHANGE` and `BREAKING-CHANGE`
    /// footer.
    pub fn breaking_changes(&self) -> &[Cow<'a, str>] {
        &self.breaking_changes
    }

    /// The first footer whose name matches `name`, ignoring case.
    pub fn footer(&self, name: &str) -> Option<&Footer<'a>> {
        self.footers.iter().find(|footer| footer.is(name))
    }

    /// The commit introduces a breaking change.
    ///
    /// This is the case either when the header has an exclamation mark after
    /// the type and scope, or when a `BREAKING CHANGE: ` footer is defined:
    /// ```text
    /// feat: my commit description
    ///
    /// BREAKING CHANGE: this is a breaking change
    /// ```
    pub fn is_breaking_change(&self) -> bool {
        self.breaking || !self.breaking_changes.is_empty()
    }
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.ty.is_empty() {
            f.write_str(&self.ty)?;
            if !self.scope.is_empty() {
                write!(f, "({})", self.scope)?;
            }
            if self.breaking {
                f.write_str("!")?;
            }
            f.write_str(": ")?;
        }
        f.write_str(&self.description)?;

        if !self.body.is_empty() {
            write!(f, "\n\n{}", self.body)?;
        }

        let mut separator = "\n\n";
        for change in &self.breaking_changes {
            write!(f, "{separator}{BREAKING_PHRASE}: {change}")?;
            separator = "\n";
        }
        for footer in &self.footers {
            write!(f, "{separator}{}: {}", footer.name(), footer.value())?;
            separator = "\n";
        }
        for reference in &self.references {
            write!(f, "{separator}{} {}", reference.name(), reference.value())?;
            separator = "\n";
        }

        Ok(())
    }
}

/// A single footer.
///
/// Values spanning several lines are joined by `\n`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Footer<'a> {
    name: Cow<'a, str>,
    value: Cow<'a, str>,
}

impl<'a> Footer<'a> {
    /// Piece together a footer.
    pub fn new(name: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The token of the footer, e.g. `Signed-off-by` or `Fixes`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value of the footer.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The footer's name is `name`, ignoring case.
    pub fn is(&self, name: &str) -> bool {
        unicase::UniCase::new(self.name()) == unicase::UniCase::new(name)
    }
}

// The part of `whole` that `part` points into, borrowed when `whole` is.
fn carve<'a>(whole: &Cow<'a, [u8]>, part: &[u8]) -> Cow<'a, [u8]> {
    match *whole {
        Cow::Borrowed(whole) => {
            let start = part.offset_from(&whole);
            Cow::Borrowed(&whole[start..start + part.len()])
        }
        Cow::Owned(_) => Cow::Owned(part.to_vec()),
    }
}

fn text(bytes: Cow<'_, [u8]>) -> Cow<'_, str> {
    match bytes {
        Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
        Cow::Owned(bytes) => match String::from_utf8(bytes) {
            Ok(text) => Cow::Owned(text),
            Err(err) => Cow::Owned(String::from_utf8_lossy(err.as_bytes()).into_owned()),
        },
    }
}

fn trimmed(text: Cow<'_, str>) -> Cow<'_, str> {
    match text {
        Cow::Borrowed(text) => Cow::Borrowed(text.trim()),
        Cow::Owned(text) => Cow::Owned(text.trim().to_owned()),
    }
}
