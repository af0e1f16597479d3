/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scalar scanning helpers. These only measure and
//! classify; emitting tokens is left to the caller, which
//! lets the document splitter track scalar context without
//! running the tokenizer.

pub(crate) mod block;
pub(crate) mod escape;
pub(crate) mod flow;
pub(crate) mod plain;
