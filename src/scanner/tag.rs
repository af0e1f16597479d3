/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module contains functions and helpers for scanning
//! YAML node tags.
//!
//! A quick refresher on the terminology used in this
//! module. A node tag is made out of a handle and a
//! suffix:
//!
//! ---
//! %TAG <handle> <prefix>
//! key: <handle><suffix> value
//! ...
//!
//! ### Handle
//!
//! A handle is one of: !, !! or !:alphanumeric:!, each of
//! which is referred to as primary, secondary and named
//! respectively.
//!
//! ### Suffix
//!
//! Everything after the handle, up to the next whitespace
//! or flow indicator. A handle without a suffix is
//! unspecified, except for the primary handle, which alone
//! is the non specific tag ('key: ! "my value"').
//!
//! ### Verbatim
//!
//! A tag may also skip handle resolution entirely, being
//! written as '!<tag:yaml.org,2002:str>'.
//!
//! Tags are always resolved from their full text, so the
//! secondary tags sharing a prefix ('!!seq' and '!!set')
//! are never confused. Only a secondary tag cut short by
//! the end of input, ('!!se') is truly ambiguous.

use crate::{error::ErrorCode, token::Token};

/// Suffixes of the secondary handle that resolve to a core
/// type token
const CORE_TAGS: [(&str, Token); 6] = [
    ("map", Token::Map),
    ("seq", Token::Seq),
    ("str", Token::UnicodeString),
    ("set", Token::Set),
    ("omap", Token::OMap),
    ("binary", Token::Binary),
];

/// Result of scanning a node tag
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TagScan
{
    /// The resolved tag, or Unrecognized if .error is set
    pub token: Token,
    /// Bytes of .base making up the tag
    pub len:   usize,
    pub error: Option<ErrorCode>,
}

impl TagScan
{
    fn new(token: Token, len: usize) -> Self
    {
        Self {
            token,
            len,
            error: None,
        }
    }

    fn error(code: ErrorCode, len: usize) -> Self
    {
        Self {
            token: Token::Unrecognized,
            len,
            error: Some(code),
        }
    }
}

/// Scan the node tag at the head of .base, which must start
/// with a '!'.
///
/// See:
///     YAML 1.2: Section 6.9.1
///     yaml.org/spec/1.2/spec.html#id2784064
pub(crate) fn scan_node_tag(base: &str) -> TagScan
{
    let buffer = base.as_bytes();

    if check!(buffer, 1 => b'<')
    {
        return scan_verbatim(buffer);
    }

    let len = tag_extent(buffer, 1);
    let tag = &base[..len];
    let at_eof = len == base.len();

    // !
    if len == 1
    {
        return TagScan::new(Token::NonSpecificTag, len);
    }

    // !!suffix
    if let Some(suffix) = tag.strip_prefix("!!")
    {
        if at_eof && is_core_prefix(suffix)
        {
            return TagScan::error(ErrorCode::LexicalAmbiguity, len);
        }

        if suffix.is_empty()
        {
            return TagScan::new(Token::UnspecifiedTag, len);
        }

        if !is_valid_suffix(suffix)
        {
            return TagScan::error(ErrorCode::InvalidTagSuffix, len);
        }

        let token = CORE_TAGS
            .iter()
            .find(|(name, _)| *name == suffix)
            .map_or(Token::SecondaryTag, |(_, token)| *token);

        return TagScan::new(token, len);
    }

    // !named!suffix
    if let Some(split) = tag[1..].find('!')
    {
        let (name, suffix) = (&tag[1..split + 1], &tag[split + 2..]);

        if !is_valid_handle_name(name) || !is_valid_suffix(suffix)
        {
            return TagScan::error(ErrorCode::InvalidTagSuffix, len);
        }

        return match suffix.is_empty()
        {
            true => TagScan::new(Token::UnspecifiedTag, len),
            false => TagScan::new(Token::NamedTag, len),
        };
    }

    // !suffix
    match is_valid_suffix(&tag[1..])
    {
        true => TagScan::new(Token::PrimaryTag, len),
        false => TagScan::error(ErrorCode::InvalidTagSuffix, len),
    }
}

/// Is this string a valid %TAG directive handle: ! or !! or
/// !:alphanumeric:!
pub(crate) fn is_tag_handle(handle: &str) -> bool
{
    match handle
    {
        "!" | "!!" => true,
        h => h
            .strip_prefix('!')
            .and_then(|h| h.strip_suffix('!'))
            .map_or(false, is_valid_handle_name),
    }
}

/// Scan a '!<uri>' tag
fn scan_verbatim(buffer: &[u8]) -> TagScan
{
    // Skip the '!<'
    let mut index = 2;

    while !isWhiteSpaceZ!(buffer, index) && !check!(buffer, index => b'>')
    {
        index += 1;
    }

    match check!(buffer, index => b'>')
    {
        // !<>
        true if index == 2 => TagScan::error(ErrorCode::InvalidTagSuffix, index + 1),
        true => TagScan::new(Token::VerbatimTag, index + 1),
        false => TagScan::error(ErrorCode::InvalidTagSuffix, index),
    }
}

/// Length of the tag starting at .buffer, with .from bytes
/// already known to be part of it
fn tag_extent(buffer: &[u8], from: usize) -> usize
{
    let mut index = from;

    while !isWhiteSpaceZ!(buffer, index) && !isFlowIndicator!(buffer, index)
    {
        index += 1;
    }

    index
}

/// Could .suffix still grow into one of the core tags
fn is_core_prefix(suffix: &str) -> bool
{
    CORE_TAGS
        .iter()
        .any(|(name, _)| name.len() > suffix.len() && name.starts_with(suffix))
}

fn is_valid_handle_name(name: &str) -> bool
{
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Suffixes may not contain further '!', and any '%' must
/// start a URI escape
fn is_valid_suffix(suffix: &str) -> bool
{
    let buffer = suffix.as_bytes();
    let mut index = 0;

    while let Some(b) = buffer.get(index)
    {
        match b
        {
            b'!' => return false,
            b'%' if isHex!(buffer, index + 1) && isHex!(buffer, index + 2) => index += 3,
            b'%' => return false,
            _ => index += 1,
        }
    }

    true
}
