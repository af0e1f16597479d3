/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This library tokenizes and structurally validates YAML
//! 1.1/1.2 byte streams.
//!
//! A stream is split into its documents, each document is
//! turned into a flat sequence of lexical tokens, and each
//! token sequence is checked for structural problems such
//! as mixed indentation or unbalanced flow collections.
//! Building a node tree from the tokens is left to the
//! caller.
//!
//! The simplest entry point is [`from_str`]:
//!
//! ```
//! let stream = yamlscan::from_str("key: value\n")?;
//!
//! assert!(stream.is_valid());
//! # Ok::<(), yamlscan::error::Error>(())
//! ```
//!
//! The individual stages are exposed too: [`split`],
//! [`tokenize`] and [`validate`].

#![allow(clippy::suspicious_else_formatting)]

pub mod error;
pub mod flag;
pub mod reader;
pub mod token;

// Note that this module must come before the splitter, as
// it depends on the macros which expand into this scope
#[macro_use]
mod scanner;

mod splitter;
mod validator;

pub use crate::{
    reader::{from_reader, from_str, Reader},
    scanner::{tokenize, Scan},
    splitter::{split, DocumentText, Segment},
    validator::{validate, Verdict},
};
