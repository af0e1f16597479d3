/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::ops::Range;

use crate::{
    error::Error,
    flag::Flags,
    scanner::tokenize_at,
    splitter::DocumentText,
    token::TokenEntry,
    validator::{validate, Verdict},
};

/// A checked YAML stream. Owns the stream's text, which
/// the [`TokenEntry`]s of each [`Document`] refer into
#[derive(Debug)]
pub struct Stream
{
    content:   String,
    documents: Vec<Document>,
}

impl Stream
{
    pub(super) fn new(content: String, documents: Vec<Document>) -> Self
    {
        Self { content, documents }
    }

    /// The full text of the stream
    pub fn content(&self) -> &str
    {
        &self.content
    }

    /// Every document in the stream, in stream order. There
    /// is always at least one
    pub fn documents(&self) -> &[Document]
    {
        &self.documents
    }

    /// Are all documents in this stream valid
    pub fn is_valid(&self) -> bool
    {
        self.documents.iter().all(Document::is_valid)
    }

    /// Index of the first invalid document, if any
    pub fn first_invalid(&self) -> Option<usize>
    {
        self.invalid().next()
    }

    /// Indexes of every invalid document
    pub fn invalid(&self) -> impl Iterator<Item = usize> + '_
    {
        self.documents
            .iter()
            .filter(|doc| !doc.is_valid())
            .map(Document::index)
    }

    /// The source text .entry covers
    pub fn slice(&self, entry: &TokenEntry) -> Option<&str>
    {
        entry.slice(&self.content)
    }

    /// The full text of .document
    pub fn text(&self, document: &Document) -> &str
    {
        &self.content[document.span()]
    }
}

/// A single tokenized and validated document
#[derive(Debug)]
pub struct Document
{
    index:    usize,
    span:     Range<usize>,
    explicit: bool,

    tokens:      Vec<TokenEntry>,
    diagnostics: Vec<Error>,
    verdict:     Verdict,

    deny_warnings: bool,
}

impl Document
{
    pub(super) fn new(text: &DocumentText<'_>, flags: Flags) -> Self
    {
        let whole = text.whole();
        let (tokens, diagnostics) = tokenize_at(whole.text(), whole.start().clone()).into_parts();
        let verdict = validate(&tokens, flags);

        Self {
            index: text.index(),
            span: text.span(),
            explicit: text.is_explicit(),
            tokens,
            diagnostics,
            verdict,
            deny_warnings: flags.contains(Flags::DENY_WARNINGS),
        }
    }

    /// Position of this document in the stream, starting
    /// from 0
    pub fn index(&self) -> usize
    {
        self.index
    }

    /// Byte range of this document in the stream, including
    /// any prologue and its header
    pub fn span(&self) -> Range<usize>
    {
        self.span.clone()
    }

    /// Was this document opened by a '---' header
    pub fn is_explicit(&self) -> bool
    {
        self.explicit
    }

    pub fn tokens(&self) -> &[TokenEntry]
    {
        &self.tokens
    }

    /// The structural verdict, which does not include any
    /// diagnostics the tokenizer produced
    pub fn verdict(&self) -> &Verdict
    {
        &self.verdict
    }

    /// Every diagnostic the tokenizer produced, fatal or
    /// not
    pub fn diagnostics(&self) -> &[Error]
    {
        &self.diagnostics
    }

    /// Fatal tokenizer diagnostics, followed by structural
    /// violations
    pub fn errors(&self) -> impl Iterator<Item = &Error> + '_
    {
        self.diagnostics
            .iter()
            .filter(|e| e.is_fatal())
            .chain(self.verdict.violations())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Error> + '_
    {
        self.diagnostics.iter().filter(|e| !e.is_fatal())
    }

    /// A document is valid if it has no errors, and no
    /// warnings when [`O_DENY_WARNINGS`][crate::flag::O_DENY_WARNINGS]
    /// is set
    pub fn is_valid(&self) -> bool
    {
        self.errors().next().is_none()
            && !(self.deny_warnings && self.warnings().next().is_some())
    }
}
