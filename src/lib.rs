//! A forgiving parser for [Conventional Commit] messages.
//!
//! [conventional commit]: https://www.conventionalcommits.org
//!
//! Messages are split into a head (the subject), a body, and a foot (the
//! trailing block of footers). Anything that does not quite follow the
//! convention degrades gracefully: an unconventional subject becomes the
//! description, and a last paragraph that does not start with a footer stays
//! in the body. The only error is a message without any text.
//!
//! # Example
//!
//! ```rust
//! use indoc::indoc;
//!
//! let message = indoc!("
//!     docs(example)!: add tested usage example
//!
//!     This example is tested using Rust's doctest capabilities. Having this
//!     example helps people understand how to use the parser.
//!
//!     BREAKING CHANGE: Going from nothing to something, meaning anyone doing
//!       nothing before suddenly has something to do.
//!     Co-Authored-By: Lisa Simpson <lisa@simpsons.fam>
//!     Closes #12
//! ");
//!
//! let message = conventional_message::parse(message).unwrap();
//!
//! // You can access all components of the subject.
//! assert_eq!(message.type_(), "docs");
//! assert_eq!(message.scope(), "example");
//! assert_eq!(message.description(), "add tested usage example");
//!
//! // And the free-form body.
//! assert!(message.body().contains("helps people understand"));
//!
//! // A commit is breaking when its header has a bang (`!`) OR it has a
//! // "BREAKING CHANGE" footer.
//! assert!(message.breaking());
//! assert!(message.is_breaking_change());
//! assert!(message.breaking_changes()[0].ends_with("has something to do."));
//!
//! // Footers are sorted into plain footers and references.
//! assert_eq!(message.footers()[0].name(), "Co-Authored-By");
//! assert_eq!(message.footers()[0].value(), "Lisa Simpson <lisa@simpsons.fam>");
//! assert_eq!(message.references()[0].name(), "Closes");
//! assert_eq!(message.references()[0].value(), "#12");
//! ```
//!
//! The layers below [`Message`] are public too: [`Lines`] reproduces the
//! input byte for byte, [`paragraphs`] groups lines without any commit
//! semantics, and [`Buffer`] exposes the head, body and foot sections.

#![warn(missing_docs)]

mod buffer;
mod error;
mod lines;
mod message;
mod paragraph;
mod parser;
mod raw;

pub use buffer::Buffer;
pub use error::{Error, ErrorKind};
pub use lines::{Line, LineSlice, Lines};
pub use message::{Footer, Message};
pub use paragraph::{paragraphs, Paragraph};
pub use raw::RawMessage;

/// Parse a commit message.
///
/// Shorthand for [`Message::parse`].
///
/// # Errors
///
/// This function returns an error if the message contains no text at all.
pub fn parse<T: AsRef<[u8]> + ?Sized>(message: &T) -> Result<Message<'_>, Error> {
    tracing::trace!(len = message.as_ref().len(), "parsing commit message");
    Message::parse(message)
}

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
