/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The tokenizer. Converts a document's text into a flat
//! sequence of [`TokenEntry`]s, collecting any diagnostics
//! found along the way rather than stopping on them.
//!
//! Every byte of the text is covered by exactly one token,
//! with the exception of comments, which produce nothing.

// Note that this module must come before all others, as
// they depend on the macros which expand into this scope
#[macro_use]
mod macros;

mod stats;

pub(crate) mod scalar;
pub(crate) mod tag;

use atoi::atoi;

pub(crate) use self::stats::MStats;
use self::scalar::{block, escape::classify_escape, flow, plain};
use crate::{
    error::{Error, ErrorCode},
    token::{Token, TokenEntry},
};

/// Tokenize .data, which is expected to be the text of a
/// single document, although multiple documents are
/// handled gracefully.
///
/// This function never fails, any problems encountered are
/// attached to the returned [`Scan`] as diagnostics.
pub fn tokenize(data: &str) -> Scan
{
    tokenize_at(data, MStats::new())
}

/// Tokenize .data as if it was found at .start, spans and
/// positions are offset accordingly
pub(crate) fn tokenize_at(data: &str, start: MStats) -> Scan
{
    let mut scanner = Scanner::new(data, start);

    scanner.scan();

    Scan {
        tokens:      scanner.tokens,
        diagnostics: scanner.diagnostics,
    }
}

/// The output of the tokenizer: an ordered token sequence
/// and any diagnostics produced while tokenizing
#[derive(Debug, Default)]
pub struct Scan
{
    tokens:      Vec<TokenEntry>,
    diagnostics: Vec<Error>,
}

impl Scan
{
    pub fn tokens(&self) -> &[TokenEntry]
    {
        &self.tokens
    }

    /// Both fatal diagnostics and warnings, in the order
    /// they were found
    pub fn diagnostics(&self) -> &[Error]
    {
        &self.diagnostics
    }

    /// Iterate over the bare tokens
    pub fn kinds(&self) -> impl Iterator<Item = Token> + '_
    {
        self.tokens.iter().map(TokenEntry::token)
    }

    pub fn into_parts(self) -> (Vec<TokenEntry>, Vec<Error>)
    {
        (self.tokens, self.diagnostics)
    }
}

#[derive(Debug)]
struct Scanner<'de>
{
    buffer: &'de str,
    stats:  MStats,

    /// Flow collection depth
    flow:           usize,
    /// Spaces seen at the start of the current line
    line_indent:    usize,
    /// Have we only seen indentation on this line
    line_start:     bool,
    /// Was the last token whitespace
    blank_before:   bool,
    /// Did the last token end a quoted scalar or flow
    /// collection, allowing a ':' directly after it
    adjacent_value: bool,
    /// Only a document header, node properties or
    /// whitespace have been seen on this line
    line_props:     bool,
    /// No content since the start of the text or the last
    /// document terminator, so directives are allowed
    prologue:       bool,

    tokens:      Vec<TokenEntry>,
    diagnostics: Vec<Error>,
}

impl<'de> Scanner<'de>
{
    fn new(data: &'de str, start: MStats) -> Self
    {
        let at_line_start = start.column == 0;
        Self {
            buffer:         data,
            line_start:     at_line_start,
            stats:          start,
            flow:           0,
            line_indent:    0,
            blank_before:   true,
            adjacent_value: false,
            line_props:     at_line_start,
            prologue:       true,
            tokens:         Vec::new(),
            diagnostics:    Vec::new(),
        }
    }

    fn scan(&mut self)
    {
        while !self.buffer.is_empty()
        {
            if self.stats.column == 0
            {
                if self.document_marker()
                {
                    continue;
                }

                if self.prologue && self.flow == 0 && check!(~self.buffer => [DIRECTIVE, ..])
                {
                    self.directive();

                    continue;
                }
            }

            self.next_token();
        }
    }

    fn next_token(&mut self)
    {
        let buffer = self.buffer.as_bytes();

        if let Some(brk) = break_len(buffer)
        {
            return self.push(Token::Newline, brk);
        }

        match buffer
        {
            [b' ', ..] => return self.push(Token::WhiteSpaceIndentation, 1),
            [b'\t', ..] => return self.push(Token::TabIndentation, 1),
            [b'#', ..] if self.blank_before => return self.comment(),
            _ => self.prologue = false,
        }

        match buffer
        {
            [SINGLE, ..] | [DOUBLE, ..] => self.flow_scalar(),
            [b'|', ..] | [b'>', ..] if self.flow == 0 => self.block_scalar(),

            [b'[', ..] => self.flow_start(Token::FlowSequenceStart),
            [b'{', ..] => self.flow_start(Token::FlowMappingStart),
            [b']', ..] => self.flow_end(Token::FlowSequenceEnd),
            [b'}', ..] => self.flow_end(Token::FlowMappingEnd),
            [b',', ..] => self.indicator(Token::SeparateFlowEntries),

            [b'?', ..] if self.is_indicator_end() => self.indicator(Token::KeyIndicator),
            [b':', ..] if self.is_indicator_end() || (self.flow > 0 && self.adjacent_value) =>
            {
                self.indicator(Token::ValueIndicator)
            },
            [b'-', ..] if isWhiteSpaceZ!(buffer, 1) =>
            {
                self.indicator(Token::NestedSeriesEntryIndicator)
            },

            [ANCHOR, ..] | [ALIAS, ..] => self.anchor(),
            [TAG, ..] => self.tag(),
            [b'@', ..] | [b'`', ..] => self.reserved(),

            _ => self.plain(),
        }
    }

    /// Record .token as the next .len bytes of the buffer
    fn push(&mut self, token: Token, len: usize)
    {
        let start = self.stats.clone();
        let slice = advance!(<- self.buffer, len);

        self.stats.advance(slice);
        self.tokens.push(TokenEntry::new(
            token,
            start.read..self.stats.read,
            start.lines + 1,
            start.column,
        ));

        match token
        {
            Token::WhiteSpaceIndentation if self.line_start => self.line_indent += 1,
            Token::WhiteSpaceIndentation | Token::TabIndentation =>
            {},
            Token::Newline =>
            {
                self.line_start = true;
                self.line_indent = 0;
                self.line_props = true;
            },
            Token::DocumentHeader | Token::AnchorIndicator => self.line_start = false,
            t if t.is_tag() => self.line_start = false,
            _ =>
            {
                self.line_start = false;
                self.line_props = false;
            },
        }

        self.blank_before = token.is_whitespace();
        self.adjacent_value = false;
    }

    /// Advance past .len bytes without producing a token
    fn skip(&mut self, len: usize)
    {
        let slice = advance!(<- self.buffer, len);

        self.stats.advance(slice);
    }

    fn diagnose(&mut self, at: &MStats, code: ErrorCode)
    {
        self.diagnostics.push(at.error(code));
    }

    fn document_marker(&mut self) -> bool
    {
        let token = match self.buffer.as_bytes()
        {
            [b'-', b'-', b'-', ..] => Token::DocumentHeader,
            [b'.', b'.', b'.', ..] => Token::DocumentTerminator,
            _ => return false,
        };

        if !isWhiteSpaceZ!(~self.buffer, 3)
        {
            return false;
        }

        self.prologue = token == Token::DocumentTerminator;

        // A document marker always closes any open flow
        // collections
        self.flow = 0;
        self.push(token, 3);

        true
    }

    /// Tokenize a directive line. The name and any
    /// parameters are emitted as Text, then checked against
    /// the directive's expected shape.
    fn directive(&mut self)
    {
        let start = self.stats.clone();
        let buffer: &'de str = self.buffer;

        // %YAML 1.2
        // ^
        self.push(Token::DirectiveIndicator, 1);

        // %YAML 1.2
        //  ^^^^
        let name_len = run_len(self.buffer.as_bytes());
        let name = &buffer[1..1 + name_len];

        if name_len > 0
        {
            self.push(Token::Text, name_len);
        }

        let mut params = Vec::new();

        // %TAG !e! tag:example.com,2000: # comment
        //     ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
        loop
        {
            let rest = self.buffer.as_bytes();

            match rest
            {
                [] => break,
                _ if break_len(rest).is_some() => break,
                [b' ', ..] => self.push(Token::WhiteSpaceIndentation, 1),
                [b'\t', ..] => self.push(Token::TabIndentation, 1),
                [b'#', ..] if self.blank_before => self.comment(),
                _ =>
                {
                    let len = run_len(rest);
                    let offset = buffer.len() - self.buffer.len();

                    params.push(&buffer[offset..offset + len]);
                    self.push(Token::Text, len);
                },
            }
        }

        let error = match name
        {
            "YAML" => match params.as_slice()
            {
                [version] if parse_version(version).is_some() => None,
                _ => Some(ErrorCode::InvalidVersion),
            },
            "TAG" => match params.as_slice()
            {
                [handle, ..] if !tag::is_tag_handle(handle) => Some(ErrorCode::InvalidTagHandle),
                [_, _] => None,
                _ => Some(ErrorCode::InvalidTagPrefix),
            },
            // Reserved directives should be ignored
            _ => Some(ErrorCode::UnknownDirective),
        };

        if let Some(code) = error
        {
            self.diagnose(&start, code);
        }
    }

    /// Skip a comment, up to but not including the line
    /// break
    fn comment(&mut self)
    {
        let buffer = self.buffer.as_bytes();
        let len = line_len(buffer);

        if len == buffer.len()
        {
            let at = self.stats.clone();
            self.diagnose(&at, ErrorCode::UnterminatedComment);
        }

        self.skip(len);
    }

    fn flow_scalar(&mut self)
    {
        let start = self.stats.clone();
        let single = check!(~self.buffer => [SINGLE, ..]);
        let quote = match single
        {
            true => Token::SingleQuote,
            false => Token::DoubleQuote,
        };

        self.push(quote, 1);

        loop
        {
            let buffer = self.buffer.as_bytes();

            if buffer.is_empty()
            {
                return self.diagnose(&start, ErrorCode::UnterminatedScalar);
            }

            if let Some(brk) = break_len(buffer)
            {
                self.push(Token::Newline, brk);

                continue;
            }

            match buffer
            {
                [SINGLE, SINGLE, ..] if single => self.push(Token::ProtectiveEscape, 2),
                [SINGLE, ..] if single => break,
                [DOUBLE, ..] if !single => break,
                [b'\\', ..] if !single => match classify_escape(self.buffer)
                {
                    (Some(escape), len) => self.push(escape, len),
                    (None, len) =>
                    {
                        let at = self.stats.clone();

                        self.diagnose(&at, ErrorCode::UnknownEscape);
                        self.push(Token::Unrecognized, len);
                    },
                },
                _ =>
                {
                    let len = flow::content_len(self.buffer, single);

                    self.push(Token::Text, len)
                },
            }
        }

        self.push(quote, 1);
        self.adjacent_value = true;
    }

    fn block_scalar(&mut self)
    {
        // A scalar that is the document's top level node has
        // no parent indentation
        let parent = match self.line_props && self.line_indent == 0
        {
            true => None,
            false => Some(self.line_indent),
        };
        let header = match block::scan_header(self.buffer)
        {
            Some(header) => header,
            None => return self.plain(),
        };

        if !header.is_valid()
        {
            let at = self.stats.clone();
            self.diagnose(&at, ErrorCode::InvalidBlockScalar);
        }

        // key: |+2 # comment
        //      ^^^
        for &(token, len) in header.tokens.iter()
        {
            self.push(token, len);
        }

        // key: |+2 # comment
        //         ^^^^^^^^^^
        loop
        {
            let buffer = self.buffer.as_bytes();

            match buffer
            {
                [] => break,
                _ if break_len(buffer).is_some() => break,
                [b' ', ..] => self.push(Token::WhiteSpaceIndentation, 1),
                [b'\t', ..] => self.push(Token::TabIndentation, 1),
                [b'#', ..] if self.blank_before => self.comment(),
                _ =>
                {
                    let at = self.stats.clone();
                    self.diagnose(&at, ErrorCode::InvalidBlockScalar);
                    self.push(Token::Unrecognized, line_len(buffer));
                },
            }
        }

        match break_len(self.buffer.as_bytes())
        {
            Some(brk) => self.push(Token::Newline, brk),
            None => return,
        }

        for line in block::body_lines(self.buffer, parent, header.indent)
        {
            for _ in 0..line.indent
            {
                self.push(Token::WhiteSpaceIndentation, 1);
            }

            if line.content > 0
            {
                self.push(Token::Text, line.content);
            }

            if line.brk > 0
            {
                self.push(Token::Newline, line.brk);
            }
        }
    }

    fn flow_start(&mut self, token: Token)
    {
        self.flow += 1;
        self.push(token, 1);
    }

    fn flow_end(&mut self, token: Token)
    {
        // Unbalanced brackets are the validator's concern
        self.flow = self.flow.saturating_sub(1);
        self.push(token, 1);
        self.adjacent_value = true;
    }

    /// Is the byte after an indicator character one that
    /// makes it an indicator, rather than plain text
    fn is_indicator_end(&self) -> bool
    {
        isWhiteSpaceZ!(~self.buffer, 1) || (self.flow > 0 && isFlowIndicator!(~self.buffer, 1))
    }

    /// Push an indicator, absorbing a single separating
    /// space
    fn indicator(&mut self, token: Token)
    {
        let len = match check!(~self.buffer, 1 => b' ')
        {
            true => 2,
            false => 1,
        };

        self.push(token, len);
    }

    fn anchor(&mut self)
    {
        let at = self.stats.clone();
        let props = self.line_props;
        let token = match check!(~self.buffer => [ANCHOR, ..])
        {
            true => Token::AnchorIndicator,
            false => Token::AliasIndicator,
        };

        // *anchor 'rest of the line'
        // ^
        self.push(token, 1);

        // *anchor 'rest of the line'
        //  ^^^^^^
        let buffer = self.buffer.as_bytes();
        let len = (0..buffer.len())
            .find(|i| isWhiteSpaceZ!(buffer, *i) || isFlowIndicator!(buffer, *i))
            .unwrap_or(buffer.len());

        match len
        {
            0 => self.diagnose(&at, ErrorCode::InvalidAnchorName),
            _ => self.push(Token::Text, len),
        }

        // An anchor's name is part of the node's properties
        if token == Token::AnchorIndicator
        {
            self.line_props = props;
        }
    }

    fn tag(&mut self)
    {
        let scan = tag::scan_node_tag(self.buffer);

        if let Some(code) = scan.error
        {
            let at = self.stats.clone();
            self.diagnose(&at, code);
        }

        self.push(scan.token, scan.len);
    }

    /// '@' and '`' are reserved for future use, and may not
    /// start a plain scalar
    fn reserved(&mut self)
    {
        let at = self.stats.clone();
        let len = plain::plain_extent(self.buffer, self.flow > 0);

        self.diagnose(&at, ErrorCode::ReservedIndicator);
        self.push(Token::Unrecognized, len);
    }

    fn plain(&mut self)
    {
        let len = plain::plain_extent(self.buffer, self.flow > 0);
        let token = plain::resolve(&self.buffer[..len]);

        self.push(token, len);
    }
}

/// Returns the length of the line break at the head of
/// .buffer, if there is one
pub(crate) fn break_len(buffer: &[u8]) -> Option<usize>
{
    match buffer
    {
        [b'\r', b'\n', ..] => Some(2),
        [b'\r', ..] | [b'\n', ..] => Some(1),
        [b'\xC2', b'\x85', ..] => Some(2),
        [b'\xE2', b'\x80', b'\xA8', ..] | [b'\xE2', b'\x80', b'\xA9', ..] => Some(3),
        _ => None,
    }
}

/// Length of .buffer up to the next line break, or all of
/// it if there isn't one
pub(crate) fn line_len(buffer: &[u8]) -> usize
{
    (0..buffer.len())
        .find(|i| isBreak!(buffer, *i))
        .unwrap_or_else(|| buffer.len())
}

/// Length of .buffer up to the next whitespace
fn run_len(buffer: &[u8]) -> usize
{
    (0..buffer.len())
        .find(|i| isWhiteSpaceZ!(buffer, *i))
        .unwrap_or_else(|| buffer.len())
}

/// %YAML major.minor
fn parse_version(version: &str) -> Option<(u8, u8)>
{
    let mut parts = version.splitn(2, '.');
    let (major, minor) = (parts.next()?, parts.next()?);

    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if !is_number(major) || !is_number(minor)
    {
        return None;
    }

    Some((atoi(major.as_bytes())?, atoi(minor.as_bytes())?))
}

pub(crate) const DIRECTIVE: u8 = b'%';
pub(crate) const ANCHOR: u8 = b'&';
pub(crate) const ALIAS: u8 = b'*';
pub(crate) const TAG: u8 = b'!';
pub(crate) const SINGLE: u8 = b'\'';
pub(crate) const DOUBLE: u8 = b'"';
