use std::borrow::Cow;

use winnow::combinator::{alt, eof, fail, opt, preceded, terminated, trace};
use winnow::token::{one_of, take_till, take_while};
use winnow::{ModalResult, Parser};

use crate::lines::Line;

type Input<'i> = &'i [u8];

const HASH: &str = "#";

// <CR>              ::= "0x000D"
// <LF>              ::= "0x000A"
fn is_line_ending(c: u8) -> bool {
    c == b'\n' || c == b'\r'
}

// <parens>          ::= "(" | ")"
fn is_parens(c: u8) -> bool {
    c == b'(' || c == b')'
}

// <whitespace>      ::= <TAB> | <LF> | <FF> | <CR> | <SP>
fn is_whitespace(c: u8) -> bool {
    c.is_ascii_whitespace()
}

// <word>            ::= <ASCII letter> | <ASCII digit> | "_" | "-"
fn is_word(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'-'
}

fn whitespace0<'i>(i: &mut Input<'i>) -> ModalResult<&'i [u8]> {
    take_while(0.., is_whitespace).parse_next(i)
}

fn whitespace1<'i>(i: &mut Input<'i>) -> ModalResult<&'i [u8]> {
    take_while(1.., is_whitespace).parse_next(i)
}

/// A line that opens a new footer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FooterStart<'i> {
    pub(crate) token: &'i [u8],
    pub(crate) value: &'i [u8],
    pub(crate) reference: bool,
}

// <footer>          ::= <token>, <whitespace>+, "#", <value>
//                    |  <token>, ":", <spaced-value>
pub(crate) fn footer<'i>(i: &mut Input<'i>) -> ModalResult<FooterStart<'i>> {
    trace(
        "footer",
        terminated(alt((reference_footer, value_footer)), eof),
    )
    .parse_next(i)
}

/// Whether `line` starts a footer entry.
pub(crate) fn is_footer_start(line: &[u8]) -> bool {
    let mut i = line;
    footer(&mut i).is_ok()
}

fn reference_footer<'i>(i: &mut Input<'i>) -> ModalResult<FooterStart<'i>> {
    (token, whitespace1, (HASH, value).take())
        .map(|(token, _, value)| FooterStart {
            token,
            value,
            reference: true,
        })
        .parse_next(i)
}

fn value_footer<'i>(i: &mut Input<'i>) -> ModalResult<FooterStart<'i>> {
    (token, ":", spaced_value)
        .map(|(token, _, value)| FooterStart {
            token,
            value,
            reference: false,
        })
        .parse_next(i)
}

// <token>           ::= "BREAKING CHANGE"
//                    |  <word>+
fn token<'i>(i: &mut Input<'i>) -> ModalResult<&'i [u8]> {
    trace(
        "token",
        alt(("BREAKING CHANGE", take_while(1.., is_word))),
    )
    .parse_next(i)
}

// <spaced-value>    ::= <whitespace>+, <value>
//
// When the whitespace runs to the end of the line, its last byte is the value.
fn spaced_value<'i>(i: &mut Input<'i>) -> ModalResult<&'i [u8]> {
    let space = whitespace1.parse_next(i)?;
    match opt(value).parse_next(i)? {
        Some(value) => Ok(value),
        None => match space {
            [_, .., last] if !is_line_ending(*last) => Ok(&space[space.len() - 1..]),
            _ => fail.parse_next(i),
        },
    }
}

// <value>           ::= <any octets except newline>+
fn value<'i>(i: &mut Input<'i>) -> ModalResult<&'i [u8]> {
    take_till(1.., is_line_ending).parse_next(i)
}

/// A footer entry before it is sorted into footers, references and breaking
/// changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawFooter<'a> {
    pub(crate) name: &'a [u8],
    pub(crate) value: Cow<'a, [u8]>,
    pub(crate) reference: bool,
}

/// Collect the footer entries of the foot section.
///
/// Lines which do not open a new entry are folded into the open one, joined
/// with a line-feed. Such lines are dropped when no entry is open yet.
pub(crate) fn footers<'a>(lines: &[Line<'a>]) -> Vec<RawFooter<'a>> {
    let mut footers = Vec::new();
    let mut current: Option<RawFooter<'a>> = None;
    for line in lines {
        let mut i = line.content();
        if let Ok(start) = footer(&mut i) {
            footers.extend(current.take());
            current = Some(RawFooter {
                name: start.token,
                value: Cow::Borrowed(start.value),
                reference: start.reference,
            });
        } else if let Some(open) = current.as_mut() {
            let value = open.value.to_mut();
            value.push(b'\n');
            value.extend_from_slice(line.content());
        }
    }
    footers.extend(current);

    footers
}

/// The parts of a conventional header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header<'i> {
    pub(crate) ty: &'i [u8],
    pub(crate) scope: Option<&'i [u8]>,
    pub(crate) breaking: bool,
    pub(crate) description: &'i [u8],
}

// <header>          ::= <type>, [<scope-block>], ["!"], <whitespace>*, ":", <whitespace>, <text>
// <type>            ::= <any octets except newline or parens>*
//
// The type is the shortest prefix after which the rest of the header matches.
pub(crate) fn header<'i>(head: &'i [u8]) -> Option<Header<'i>> {
    let type_end = head
        .iter()
        .position(|&c| is_parens(c) || is_line_ending(c))
        .unwrap_or(head.len());
    // The text never spans a line break, so it lies within the last line.
    let last_line = head.len()
        - head
            .iter()
            .rposition(|&c| c == b'\n')
            .map_or(0, |pos| pos + 1);

    let mut split = 0;
    while split <= type_end {
        let (ty, mut i) = head.split_at(split);
        if let Ok((scope, breaking, description)) =
            trace("summary", |i: &mut Input<'i>| summary(i, last_line)).parse_next(&mut i)
        {
            return Some(Header {
                ty,
                scope,
                breaking,
                description,
            });
        }

        // Every split inside one whitespace run reaches the same ":".
        split += head[split..type_end]
            .iter()
            .take_while(|&&c| is_whitespace(c))
            .count()
            .max(1);
    }

    None
}

type Summary<'i> = (Option<&'i [u8]>, bool, &'i [u8]);

fn summary<'i>(i: &mut Input<'i>, last_line: usize) -> ModalResult<Summary<'i>> {
    alt((
        (|i: &mut Input<'i>| scope_block(i, last_line))
            .map(|(scope, (breaking, description))| (Some(scope), breaking, description)),
        (|i: &mut Input<'i>| breaker_and_text(i, last_line))
            .map(|(breaking, description)| (None, breaking, description)),
    ))
    .parse_next(i)
}

// <scope-block>     ::= "(", <scope>, ")", <whitespace>*
fn scope_block<'i>(
    i: &mut Input<'i>,
    last_line: usize,
) -> ModalResult<(&'i [u8], (bool, &'i [u8]))> {
    trace(
        "scope_block",
        preceded("(", |i: &mut Input<'i>| scope_and_tail(i, last_line)),
    )
    .parse_next(i)
}

// <scope>           ::= <any octets except newline>*
//
// The scope ends at the first ")" after which the rest of the header matches.
fn scope_and_tail<'i>(
    i: &mut Input<'i>,
    last_line: usize,
) -> ModalResult<(&'i [u8], (bool, &'i [u8]))> {
    let input = *i;
    let line_end = input
        .iter()
        .position(|&c| c == b'\n')
        .unwrap_or(input.len());
    let closers = input[..line_end]
        .iter()
        .enumerate()
        .filter_map(|(pos, &c)| (c == b')').then_some(pos));
    for close in closers {
        let mut rest = &input[close + 1..];
        let tail = (whitespace0, |i: &mut Input<'i>| breaker_and_text(i, last_line))
            .parse_next(&mut rest);
        if let Ok((_, tail)) = tail {
            *i = rest;
            return Ok((&input[..close], tail));
        }
    }

    trace("scope", fail).parse_next(i)
}

// ["!"], <whitespace>*, ":", <whitespace>, <text>
fn breaker_and_text<'i>(i: &mut Input<'i>, last_line: usize) -> ModalResult<(bool, &'i [u8])> {
    let (breaking, _, _, _) =
        (opt(exclamation_mark), whitespace0, ":", one_of(is_whitespace)).parse_next(i)?;
    let description =
        trace("description", |i: &mut Input<'i>| text(i, last_line)).parse_next(i)?;
    Ok((breaking.is_some(), description))
}

// <text>            ::= <any octets except newline>*
//
// `last_line` is the length of the header's last line.
fn text<'i>(i: &mut Input<'i>, last_line: usize) -> ModalResult<&'i [u8]> {
    if i.len() > last_line {
        return fail.parse_next(i);
    }
    terminated(take_till(0.., |c: u8| c == b'\n'), eof).parse_next(i)
}

fn exclamation_mark<'i>(i: &mut Input<'i>) -> ModalResult<&'i [u8]> {
    "!".parse_next(i)
}
