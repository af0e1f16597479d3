/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Contains the structure used for tracking marker stats in
//! a buffer, namely:
//!
//! - How far into the buffer have we read?
//! - How many lines have we read?
//! - What is the current column?

use crate::error::{internal, ErrorCode};

/// Vessel for tracking various stats about the underlying
/// buffer that are required for correct tokenizing of
/// certain elements, and when contextualizing an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct MStats
{
    /// Amount of bytes read from the underlying byte stream
    pub read:   usize,
    /// Number of lines seen in the underlying byte stream
    pub lines:  usize,
    /// The offset from the last line break into a line, in
    /// characters
    pub column: usize,
}

impl MStats
{
    /// Construct a new empty MStats instance
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Update the stored stats as if .slice was read, a
    /// CR LF pair counts as one line break
    pub fn advance(&mut self, slice: &str)
    {
        let mut chars = slice.chars().peekable();

        while let Some(c) = chars.next()
        {
            match c
            {
                '\r' if chars.peek() == Some(&'\n') =>
                {},
                '\r' | '\n' | '\u{0085}' | '\u{2028}' | '\u{2029}' =>
                {
                    self.lines += 1;
                    self.column = 0;
                },
                _ => self.column += 1,
            }
        }

        self.read += slice.len();
    }

    /// Produce an error contextualized to this position
    pub fn error(&self, code: ErrorCode) -> crate::error::Error
    {
        internal::Error::with_context(
            code,
            self.read as u64,
            self.lines as u64 + 1,
            self.column as u64,
        )
        .into()
    }
}

impl PartialEq<(usize, usize, usize)> for MStats
{
    fn eq(&self, (read, lines, column): &(usize, usize, usize)) -> bool
    {
        self.read == *read && self.lines == *lines && self.column == *column
    }
}
