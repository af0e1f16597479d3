/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::{scanner::break_len, token::Token};

/// Classify the double quoted escape sequence at the head
/// of .base, returning the family's token and the length
/// of the sequence.
///
/// If the sequence is unknown or malformed, None is
/// returned alongside the length of the offending slice,
/// which is always at least the '\'.
///
/// See 5.7: Escaped Characters
/// yaml.org/spec/1.2/spec.html#id2776092
pub(crate) fn classify_escape(base: &str) -> (Option<Token>, usize)
{
    let buffer = base.as_bytes();

    if !check!(buffer => b'\\')
    {
        return (None, 0);
    }

    let (token, mut len) = match &buffer[1..]
    {
        [b'x', ..] => return numeric(base, 2),
        [b'u', ..] => return numeric(base, 4),
        [b'U', ..] => return numeric(base, 8),

        [b'0', ..]
        | [b'a', ..]
        | [b'b', ..]
        | [b'e', ..]
        | [b'f', ..]
        | [b'n', ..]
        | [b'r', ..]
        | [b't', ..]
        | [b'v', ..] => (Token::CStyleEscape, 2),

        // Forward slashes are not supported in the 1.1 spec,
        // but are harmless to accept
        [b'\\', ..] | [b'"', ..] | [b'/', ..] | [b'\t', ..] | [b' ', ..] =>
        {
            (Token::ProtectiveEscape, 2)
        },

        [b'N', ..] | [b'_', ..] | [b'L', ..] | [b'P', ..] => (Token::AdditionalEscape, 2),

        rest => match break_len(rest)
        {
            // An escaped line break, the break is part of the
            // sequence
            Some(brk) => (Token::AdditionalEscape, 1 + brk),
            None => return (None, 1 + next_char_len(&base[1..])),
        },
    };

    // Guard against a caller handing us a truncated sequence
    len = std::cmp::min(len, base.len());

    (Some(token), len)
}

/// Scan a \x \u or \U escape, which must be followed by
/// exactly .digits hexadecimal digits
fn numeric(base: &str, digits: usize) -> (Option<Token>, usize)
{
    let buffer = base.as_bytes();
    // '\' + 'x' | 'u' | 'U'
    let mut len = 2;

    while len < 2 + digits && isHex!(buffer, len)
    {
        len += 1;
    }

    match len == 2 + digits
    {
        true => (Some(Token::NumericEscape), len),
        false => (None, len),
    }
}

fn next_char_len(s: &str) -> usize
{
    s.chars().next().map_or(0, char::len_utf8)
}
