/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The high level entry point of this library.
//!
//! A [`Reader`] takes a YAML byte stream, splits it into
//! documents and tokenizes and validates each one,
//! producing a [`Stream`] which can be inspected document
//! by document.
//!
//! ```
//! use yamlscan::reader::from_str;
//!
//! let stream = from_str("---\nkey: 1\n---\nkey: [2\n")?;
//!
//! assert_eq!(stream.documents().len(), 2);
//! assert_eq!(stream.first_invalid(), Some(1));
//! # Ok::<(), yamlscan::error::Error>(())
//! ```
//!
//! Only problems with the input itself (IO failures,
//! invalid UTF8 or input above the configured limit) fail
//! the call. Everything wrong with the YAML is attached to
//! the document it was found in.

mod stream;

use std::io::{self, Read};

pub use self::stream::{Document, Stream};
use crate::{
    error::{internal, ErrorCode, Result},
    flag::{Flags, O_NIL},
    splitter::split,
};

/// Default ceiling on the amount of bytes a [`Reader`]
/// will accept, 64 MiB
pub const DEFAULT_LIMIT: usize = 64 * 1024 * 1024;

/// Read and check a YAML stream from .data, with the
/// default options
pub fn from_str(data: &str) -> Result<Stream>
{
    Reader::new().parse_str(data)
}

/// Read and check a YAML stream from .src, with the
/// default options
pub fn from_reader<R>(src: R) -> Result<Stream>
where
    R: io::Read,
{
    Reader::new().parse(src)
}

/// A configurable YAML stream reader.
///
/// ```
/// use yamlscan::{flag::*, reader::Reader};
///
/// let reader = Reader::new().flags(O_DENY_WARNINGS).limit(1024);
/// let stream = reader.parse("%FOO bar\n---\nkey: value\n".as_bytes())?;
///
/// assert!(!stream.is_valid());
/// # Ok::<(), yamlscan::error::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Reader
{
    flags: Flags,
    limit: usize,
}

impl Reader
{
    pub const fn new() -> Self
    {
        Self {
            flags: O_NIL,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Set the [`Flags`] documents are validated with
    pub const fn flags(self, flags: Flags) -> Self
    {
        Self { flags, ..self }
    }

    /// Set the maximum amount of bytes that will be read
    /// before giving up
    pub const fn limit(self, limit: usize) -> Self
    {
        Self { limit, ..self }
    }

    /// Read .src to its end, then check every document in
    /// it
    pub fn parse<R>(&self, src: R) -> Result<Stream>
    where
        R: io::Read,
    {
        let buffer = self.read_fill(src)?;
        let content = String::from_utf8(buffer)
            .map_err(|e| internal::Error::from(e.utf8_error()))?;

        Ok(self.build(content))
    }

    /// Check every document in .data
    pub fn parse_str(&self, data: &str) -> Result<Stream>
    {
        self.check_limit(data.len())?;

        Ok(self.build(data.to_owned()))
    }

    /// Read .src to its end, stopping early if it exceeds
    /// the limit
    fn read_fill<R>(&self, src: R) -> Result<Vec<u8>>
    where
        R: io::Read,
    {
        let mut buffer = Vec::new();

        // Read one byte past the limit, so we can tell an
        // input that exactly fits from one that doesn't
        let ceiling = (self.limit as u64).saturating_add(1);

        src.take(ceiling)
            .read_to_end(&mut buffer)
            .map_err(internal::Error::from)?;
        self.check_limit(buffer.len())?;

        Ok(buffer)
    }

    fn check_limit(&self, len: usize) -> Result<()>
    {
        match len > self.limit
        {
            true => Err(internal::Error::new(ErrorCode::InputTooLarge).into()),
            false => Ok(()),
        }
    }

    fn build(&self, content: String) -> Stream
    {
        let documents = split(&content)
            .iter()
            .map(|text| Document::new(text, self.flags))
            .collect();

        Stream::new(content, documents)
    }
}

impl Default for Reader
{
    fn default() -> Self
    {
        Self::new()
    }
}
