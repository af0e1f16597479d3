/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::scanner::{DOUBLE, SINGLE};

/// Measure the quoted scalar at the head of .base,
/// returning the length including both quotes, or None if
/// the scalar is never closed.
///
/// Quoted scalars may span lines, and nothing inside them
/// (comments, document markers, indicators) is
/// significant other than escapes and the closing quote.
pub(crate) fn quoted_extent(base: &str) -> Option<usize>
{
    let buffer = base.as_bytes();

    let single = match buffer
    {
        [SINGLE, ..] => true,
        [DOUBLE, ..] => false,
        _ => return None,
    };

    // Skip the opening quote
    let mut index = 1;

    // Every byte we care about here is ASCII, so stepping a
    // byte at a time never mistakes part of a multibyte
    // character for a delimiter
    while let Some(b) = buffer.get(index)
    {
        match (single, *b)
        {
            (true, SINGLE) if check!(buffer, index + 1 => [SINGLE, ..]) => index += 2,
            (true, SINGLE) => return Some(index + 1),
            (false, b'\\') => index += 2,
            (false, DOUBLE) => return Some(index + 1),
            _ => index += 1,
        }
    }

    None
}

/// Length of the run of quoted scalar content at the head
/// of .base, stopping at the closing quote, a line break
/// or (double quoted only) an escape.
pub(crate) fn content_len(base: &str, single: bool) -> usize
{
    let buffer = base.as_bytes();
    let mut index = 0;

    while index < buffer.len()
    {
        let stop = match buffer[index]
        {
            SINGLE if single => true,
            DOUBLE | b'\\' if !single => true,
            _ => isBreak!(buffer, index),
        };

        if stop
        {
            break;
        }

        index += 1;
    }

    index
}
