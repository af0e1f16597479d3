/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Block scalar ('|' literal and '>' folded) measuring.
//!
//! A block scalar is a header line:
//!
//! ```yaml
//! key: |+2 # comment
//! #    ^^^ indicator, then up to two modifiers in any order
//! ```
//!
//! followed by every subsequent line that is either blank
//! or indented by at least the scalar's content
//! indentation, which is either given explicitly by the
//! header or detected from the first non blank line.

use atoi::atoi;

use crate::{scanner::break_len, token::Token};

/// The header of a block scalar, without any trailing
/// whitespace or comment
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Header
{
    /// (Token, length) pairs making up the header, starting
    /// with the Literal or Folded indicator. A modifier
    /// that is not allowed is returned as an Unrecognized
    /// token
    pub tokens: Vec<(Token, usize)>,
    /// The explicit indentation modifier, if one was given
    pub indent: Option<u8>,
}

impl Header
{
    pub fn len(&self) -> usize
    {
        self.tokens.iter().map(|(_, len)| len).sum()
    }

    pub fn is_valid(&self) -> bool
    {
        self.tokens.iter().all(|(t, _)| *t != Token::Unrecognized)
    }
}

/// One line of a block scalar's body
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BodyLine
{
    /// Leading spaces treated as indentation
    pub indent:  usize,
    /// Bytes of content following the indentation
    pub content: usize,
    /// Bytes of line break, 0 if the line ended at EOF
    pub brk:     usize,
}

impl BodyLine
{
    pub fn len(&self) -> usize
    {
        self.indent + self.content + self.brk
    }
}

/// Scan a block scalar header at the head of .base, which
/// must start with a '|' or '>'
pub(crate) fn scan_header(base: &str) -> Option<Header>
{
    let buffer = base.as_bytes();

    let style = match buffer
    {
        [b'|', ..] => Token::Literal,
        [b'>', ..] => Token::Folded,
        _ => return None,
    };

    let mut tokens = vec![(style, 1)];
    let mut indent = None;
    let mut chomp = false;
    let mut index = 1;

    // Chomping and indentation modifiers may appear in either
    // order, but each at most once
    loop
    {
        let modifier = match buffer.get(index)
        {
            Some(b'-') if !chomp => Token::StripChomp,
            Some(b'+') if !chomp => Token::KeepChomp,
            Some(i @ b'1'..=b'9') if indent.is_none() =>
            {
                let n = atoi::<u8>(&[*i]).unwrap_or(1);
                indent = Some(n);

                Token::ExplicitIndentation(n)
            },
            // Explicit indentation of 0 is not allowed, and
            // neither are repeated modifiers
            Some(b'0') | Some(b'-') | Some(b'+') | Some(b'1'..=b'9') => Token::Unrecognized,
            _ => break,
        };

        if matches!(modifier, Token::StripChomp | Token::KeepChomp)
        {
            chomp = true;
        }

        tokens.push((modifier, 1));
        index += 1;
    }

    Some(Header { tokens, indent })
}

/// Measure the body of a block scalar starting at .base,
/// which must be the start of the line following the
/// header.
///
/// .parent is the indentation of the line the header was
/// found on, or None for a scalar that is the document's
/// top level node, and .explicit any indentation modifier
/// the header carried. Body lines are returned in order,
/// stopping before the first non blank line that is less
/// indented than the content indentation, or a document
/// marker.
pub(crate) fn body_lines(base: &str, parent: Option<usize>, explicit: Option<u8>) -> Vec<BodyLine>
{
    let content_indent = match explicit
    {
        Some(n) => parent.map_or(n as usize, |p| p + n as usize),
        None => detect_indent(base, parent.map_or(0, |p| p + 1)),
    };

    let mut lines = Vec::new();
    let mut buffer = base;

    while !buffer.is_empty()
    {
        let bytes = buffer.as_bytes();
        let spaces = bytes.iter().take_while(|b| **b == b' ').count();

        if spaces == 0 && is_document_marker(bytes)
        {
            break;
        }

        let line = match line_break_at(bytes, spaces)
        {
            // Blank lines always belong to the scalar
            Some(brk) => BodyLine {
                indent: spaces,
                content: 0,
                brk,
            },
            None if spaces >= content_indent && spaces < bytes.len() =>
            {
                let rest = &bytes[content_indent..];
                let content = (0..rest.len())
                    .find(|i| break_len(&rest[*i..]).is_some())
                    .unwrap_or(rest.len());

                BodyLine {
                    indent: content_indent,
                    content,
                    brk: break_len(&rest[content..]).unwrap_or(0),
                }
            },
            // Trailing spaces at EOF
            None if spaces == bytes.len() => BodyLine {
                indent:  spaces,
                content: 0,
                brk:     0,
            },
            None => break,
        };

        advance!(buffer, line.len());
        lines.push(line);
    }

    lines
}

/// Content indentation is taken from the first non blank
/// line, which must be indented by at least .min. If no
/// such line exists, the scalar has no content lines.
fn detect_indent(base: &str, min: usize) -> usize
{
    let mut buffer = base.as_bytes();

    while !buffer.is_empty()
    {
        let spaces = buffer.iter().take_while(|b| **b == b' ').count();

        match line_break_at(buffer, spaces)
        {
            Some(brk) => buffer = &buffer[spaces + brk..],
            None if spaces == buffer.len() => break,
            None if spaces == 0 && is_document_marker(buffer) => break,
            None => return std::cmp::max(spaces, min),
        }
    }

    min
}

fn is_document_marker(buffer: &[u8]) -> bool
{
    check!(buffer => [b'-', b'-', b'-', ..] | [b'.', b'.', b'.', ..]) && isWhiteSpaceZ!(buffer, 3)
}

fn line_break_at(buffer: &[u8], at: usize) -> Option<usize>
{
    buffer.get(at..).and_then(break_len)
}
