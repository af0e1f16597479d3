/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Partitions a YAML stream into its documents.
//!
//! Documents are separated by a '---' header at the start
//! of a line, followed by whitespace or the end of input.
//! A header inside a quoted scalar does not count, and
//! neither does anything that merely looks like one inside
//! a block scalar, so the splitter walks the stream with
//! enough lexical context to tell the difference:
//!
//! ```yaml
//! key: "a quoted scalar
//! --- is not a new document"
//! ---
//! # but this is
//! ```
//!
//! Lines holding only comments or directives before a
//! header are not a document of their own, they become the
//! prologue of the document the header opens. Content
//! after a completed '...' line opens a new, bare document.

use std::ops::Range;

use crate::scanner::{
    break_len,
    line_len,
    scalar::{block, flow, plain},
    MStats,
    ALIAS,
    ANCHOR,
    DIRECTIVE,
    DOUBLE,
    SINGLE,
    TAG,
};

/// Split .data into its documents, in stream order.
///
/// A stream without any document headers or content after
/// a '...' line is always exactly one document, holding the
/// whole stream. A leading byte order mark is not part of
/// any document, so such a stream's single document starts
/// after it.
pub fn split(data: &str) -> Vec<DocumentText<'_>>
{
    Splitter::new(data).run()
}

/// A contiguous slice of the stream, and where it starts
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<'a>
{
    text:  &'a str,
    start: MStats,
}

impl<'a> Segment<'a>
{
    pub fn text(&self) -> &'a str
    {
        self.text
    }

    /// Byte range of this segment in the stream
    pub fn span(&self) -> Range<usize>
    {
        self.start.read..self.start.read + self.text.len()
    }

    /// Line this segment starts on, starting from 1
    pub fn line(&self) -> usize
    {
        self.start.lines + 1
    }

    /// Character offset into the line this segment starts
    /// at
    pub fn column(&self) -> usize
    {
        self.start.column
    }

    pub(crate) fn start(&self) -> &MStats
    {
        &self.start
    }
}

/// The text of a single document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentText<'a>
{
    index:    usize,
    whole:    Segment<'a>,
    prologue: Option<Segment<'a>>,
    body:     Segment<'a>,
    explicit: bool,
}

impl<'a> DocumentText<'a>
{
    /// Position of this document in the stream, starting
    /// from 0
    pub fn index(&self) -> usize
    {
        self.index
    }

    /// Everything belonging to this document: its prologue,
    /// header and body
    pub fn text(&self) -> &'a str
    {
        self.whole.text
    }

    pub fn span(&self) -> Range<usize>
    {
        self.whole.span()
    }

    /// Any directive or comment lines preceding this
    /// document's header
    pub fn prologue(&self) -> Option<&Segment<'a>>
    {
        self.prologue.as_ref()
    }

    /// The document content, after the header if there was
    /// one
    pub fn body(&self) -> &Segment<'a>
    {
        &self.body
    }

    /// Was this document opened by a '---' header
    pub fn is_explicit(&self) -> bool
    {
        self.explicit
    }

    pub(crate) fn whole(&self) -> &Segment<'a>
    {
        &self.whole
    }
}

const BOM: &str = "\u{FEFF}";

#[derive(Debug)]
struct Splitter<'a>
{
    data:  &'a str,
    index: usize,
    /// Stats of the furthest position a segment has been
    /// cut at
    mark:  MStats,

    flow:         usize,
    line_indent:  usize,
    line_start:   bool,
    blank_before: bool,
    /// Only a header, node properties or whitespace have
    /// been seen on this line
    line_props:   bool,

    /// Start of the next document's text
    doc_start:          usize,
    /// The header opening the current document
    header:             Option<usize>,
    /// Has the current document seen any content
    content:            bool,
    /// A '...' was seen on this line
    terminator_pending: bool,
    /// End of the last '...' line, if no content followed
    terminator_end:     Option<usize>,
    /// No content since the start of the stream or the last
    /// '...', so directives are allowed
    prologue:           bool,

    docs: Vec<DocumentText<'a>>,
}

impl<'a> Splitter<'a>
{
    fn new(data: &'a str) -> Self
    {
        let origin = bom_len(data);

        Self {
            data,
            index: origin,
            mark: MStats {
                read:   origin,
                lines:  0,
                column: 0,
            },
            flow: 0,
            line_indent: 0,
            line_start: true,
            blank_before: true,
            line_props: true,
            doc_start: origin,
            header: None,
            content: false,
            terminator_pending: false,
            terminator_end: None,
            prologue: true,
            docs: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<DocumentText<'a>>
    {
        while self.index < self.data.len()
        {
            if self.at_line_start()
            {
                if self.is_marker(b'-')
                {
                    self.boundary();

                    continue;
                }

                if self.is_marker(b'.')
                {
                    self.terminator_pending = true;
                    self.prologue = true;
                    self.flow = 0;
                    self.skip(3);

                    continue;
                }

                // Directive lines are never document content
                if self.prologue && self.flow == 0 && check!(~self.rest() => [DIRECTIVE, ..])
                {
                    let len = line_len(self.rest().as_bytes());
                    self.skip(len);

                    continue;
                }
            }

            self.step();
        }

        self.emit(self.data.len());

        self.docs
    }

    fn rest(&self) -> &'a str
    {
        &self.data[self.index..]
    }

    fn at_line_start(&self) -> bool
    {
        self.index == self.origin()
            || self.data[..self.index]
                .ends_with(|c: char| matches!(c, '\r' | '\n' | '\u{85}' | '\u{2028}' | '\u{2029}'))
    }

    fn origin(&self) -> usize
    {
        bom_len(self.data)
    }

    fn is_marker(&self, byte: u8) -> bool
    {
        let rest = self.rest().as_bytes();

        rest.len() >= 3 && rest[..3].iter().all(|b| *b == byte) && isWhiteSpaceZ!(rest, 3)
    }

    /// Skip .len bytes that are not document content
    fn skip(&mut self, len: usize)
    {
        self.index += len;
        self.line_start = false;
        self.blank_before = false;
    }

    /// Walk over the next whitespace, comment or lexical
    /// element
    fn step(&mut self)
    {
        let rest = self.rest();
        let buffer = rest.as_bytes();

        if let Some(brk) = break_len(buffer)
        {
            if self.terminator_pending
            {
                self.terminator_end = Some(self.index + brk);
                self.terminator_pending = false;
            }

            self.index += brk;
            self.line_indent = 0;
            self.line_start = true;
            self.blank_before = true;
            self.line_props = true;

            return;
        }

        match buffer
        {
            [b' ', ..] =>
            {
                if self.line_start
                {
                    self.line_indent += 1;
                }

                self.index += 1;
                self.blank_before = true;
            },
            [b'\t', ..] =>
            {
                self.index += 1;
                self.blank_before = true;
            },
            [b'#', ..] if self.blank_before => self.skip(line_len(buffer)),
            _ => self.content(rest),
        }
    }

    /// Walk over a lexical element, noting that the current
    /// document has content
    fn content(&mut self, rest: &'a str)
    {
        let buffer = rest.as_bytes();
        let flow = self.flow > 0;
        let props = matches!(buffer, [ANCHOR, ..] | [TAG, ..]);

        // Content after a completed '...' line starts a new
        // document
        if let Some(end) = self.terminator_end.take()
        {
            if self.header.is_some() || self.content
            {
                self.emit(end);
                self.header = None;
            }
        }

        let len = match buffer
        {
            // Unterminated quotes run to the end of input
            [SINGLE, ..] | [DOUBLE, ..] => flow::quoted_extent(rest).unwrap_or_else(|| rest.len()),
            [b'|', ..] | [b'>', ..] if !flow => self.block_extent(rest),
            [b'[', ..] | [b'{', ..] =>
            {
                self.flow += 1;
                1
            },
            [b']', ..] | [b'}', ..] =>
            {
                self.flow = self.flow.saturating_sub(1);
                1
            },
            [b',', ..] => 1,
            [b'?', ..] | [b':', ..] | [b'-', ..]
                if isWhiteSpaceZ!(buffer, 1) || (flow && isFlowIndicator!(buffer, 1)) =>
            {
                1
            },
            [ANCHOR, ..] | [ALIAS, ..] | [TAG, ..] =>
            {
                let mut len = 1;

                while !isWhiteSpaceZ!(buffer, len) && !isFlowIndicator!(buffer, len)
                {
                    len += 1;
                }

                len
            },
            _ => plain::plain_extent(rest, flow),
        };

        self.content = true;
        self.prologue = false;
        self.terminator_pending = false;
        self.line_props &= props;

        self.skip(len);

        // Block scalars consume whole lines
        if self.at_line_start()
        {
            self.line_indent = 0;
            self.line_start = true;
            self.blank_before = true;
            self.line_props = true;
        }
    }

    /// Length of the block scalar at the head of .rest,
    /// including its header line and body
    fn block_extent(&self, rest: &str) -> usize
    {
        let header = match block::scan_header(rest)
        {
            Some(header) => header,
            None => return plain::plain_extent(rest, false),
        };

        // A scalar that is the document's top level node has
        // no parent indentation
        let parent = match self.line_props && self.line_indent == 0
        {
            true => None,
            false => Some(self.line_indent),
        };
        let buffer = rest.as_bytes();
        let mut len = header.len();

        // Trailing whitespace or comment
        len += line_len(&buffer[len..]);

        if let Some(brk) = break_len(&buffer[len..])
        {
            len += brk;
            len += block::body_lines(&rest[len..], parent, header.indent)
                .iter()
                .map(|line| line.len())
                .sum::<usize>();
        }

        len
    }

    /// Handle a document header at the current position
    fn boundary(&mut self)
    {
        let at = self.index;

        // Anything before the first header that is not
        // content belongs to the header's document
        if self.header.is_some() || self.content
        {
            let end = self.terminator_end.unwrap_or(at);

            self.emit(end);
        }

        self.header = Some(at);
        self.content = false;
        self.prologue = false;
        self.terminator_pending = false;
        self.terminator_end = None;
        self.line_props = true;
        self.flow = 0;

        self.skip(3);
    }

    /// Cut the current document at .end
    fn emit(&mut self, end: usize)
    {
        let data = self.data;
        let start = self.stats_at(self.doc_start);

        let (prologue, body) = match self.header
        {
            Some(header) =>
            {
                let prologue = Segment {
                    text:  &data[self.doc_start..header],
                    start: start.clone(),
                };
                let body = Segment {
                    text:  &data[header + 3..end],
                    start: self.stats_at(header + 3),
                };

                (Some(prologue).filter(|p| !p.text.is_empty()), body)
            },
            None => (
                None,
                Segment {
                    text:  &data[self.doc_start..end],
                    start: start.clone(),
                },
            ),
        };

        self.docs.push(DocumentText {
            index: self.docs.len(),
            whole: Segment {
                text: &data[self.doc_start..end],
                start,
            },
            prologue,
            body,
            explicit: self.header.is_some(),
        });

        self.doc_start = end;
    }

    /// Stats at .position, which must not be before any
    /// previously requested position
    fn stats_at(&mut self, position: usize) -> MStats
    {
        let slice = &self.data[self.mark.read..position];

        self.mark.advance(slice);

        self.mark.clone()
    }
}

fn bom_len(data: &str) -> usize
{
    match data.starts_with(BOM)
    {
        true => BOM.len(),
        false => 0,
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    fn texts<'a>(docs: &[DocumentText<'a>]) -> Vec<&'a str>
    {
        docs.iter().map(DocumentText::text).collect()
    }

    #[test]
    fn no_markers()
    {
        for data in &["a: 1\nb: 2\n", "", "# just a comment", "a\n...\n"]
        {
            let docs = split(data);

            assert_eq!(texts(&docs), vec![*data]);
            assert!(!docs[0].is_explicit());
            assert_eq!(docs[0].prologue(), None);
        }
    }

    #[test]
    fn explicit_documents()
    {
        let data = "---\nkey: 1\n---\nkey: 2\n";
        let docs = split(data);

        assert_eq!(texts(&docs), vec!["---\nkey: 1\n", "---\nkey: 2\n"]);
        assert_eq!(docs[1].body().text(), "\nkey: 2\n");
        assert_eq!(docs[1].span(), 11..22);
        assert_eq!((docs[1].body().line(), docs[1].body().column()), (3, 3));
        assert!(docs.iter().all(DocumentText::is_explicit));
    }

    #[test]
    fn implicit_then_explicit()
    {
        let data = "a\n---\nb\n";
        let docs = split(data);

        assert_eq!(texts(&docs), vec!["a\n", "---\nb\n"]);
        assert!(!docs[0].is_explicit());
        assert_eq!(docs[1].index(), 1);
    }

    #[test]
    fn trailing_empty_document()
    {
        let docs = split("a\n---\n");

        assert_eq!(texts(&docs), vec!["a\n", "---\n"]);
    }

    #[test]
    fn prologue()
    {
        let data = "%YAML 1.2\n# c\n---\na\n";
        let docs = split(data);

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text(), data);
        assert_eq!(
            docs[0].prologue().map(Segment::text),
            Some("%YAML 1.2\n# c\n")
        );
        assert_eq!(docs[0].body().text(), "\na\n");
    }

    #[test]
    fn prologue_after_terminator()
    {
        let data = "---\na\n...\n%YAML 1.2\n---\nb\n";
        let docs = split(data);

        assert_eq!(texts(&docs), vec!["---\na\n...\n", "%YAML 1.2\n---\nb\n"]);
        assert_eq!(
            docs[1].prologue().map(Segment::text),
            Some("%YAML 1.2\n")
        );
        assert_eq!(docs[1].prologue().map(Segment::line), Some(4));
    }

    #[test]
    fn content_after_terminator()
    {
        let data = "a\n...\nb\n---\nc\n";
        let docs = split(data);

        assert_eq!(texts(&docs), vec!["a\n...\n", "b\n", "---\nc\n"]);
        assert!(!docs[1].is_explicit());
        assert_eq!(docs[1].body().line(), 3);
    }

    #[test]
    fn content_on_terminator_line()
    {
        let data = "a\n... b\nc\n";

        assert_eq!(texts(&split(data)), vec![data]);
    }

    #[test]
    fn leading_terminator()
    {
        let data = "...\n# c\na\n";

        assert_eq!(texts(&split(data)), vec![data]);
        assert_eq!(
            texts(&split("---\n...\na\n")),
            vec!["---\n...\n", "a\n"]
        );
    }

    #[test]
    fn directives_after_content()
    {
        let data = "a\n%YAML 1.2\n---\nb\n";
        let docs = split(data);

        assert_eq!(texts(&docs), vec!["a\n%YAML 1.2\n", "---\nb\n"]);
        assert_eq!(docs[1].prologue(), None);
    }

    #[test]
    fn directive_inside_flow()
    {
        let data = "{ a\n%YAML 1.2 }\n...\n%YAML 1.2\n---\n";
        let docs = split(data);

        assert_eq!(
            texts(&docs),
            vec!["{ a\n%YAML 1.2 }\n...\n", "%YAML 1.2\n---\n"]
        );
        assert_eq!(
            docs[1].prologue().map(Segment::text),
            Some("%YAML 1.2\n")
        );
    }

    #[test]
    fn top_level_block_scalar()
    {
        let data = "--- |\n%!PS\n---\n--- >\n text\n...\n";
        let docs = split(data);

        assert_eq!(
            texts(&docs),
            vec!["--- |\n%!PS\n", "---\n", "--- >\n text\n...\n"]
        );
        assert_eq!(
            texts(&split("&a !!str |\nbody\n---\n")),
            vec!["&a !!str |\nbody\n", "---\n"]
        );
    }

    #[test]
    fn quoted_context()
    {
        let data = "a: \"x\n---\ny\"\n---\nb: 'it''s\n--- still'\n";
        let docs = split(data);

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].body().text(), "\nb: 'it''s\n--- still'\n");
    }

    #[test]
    fn block_context()
    {
        let data = "a: |\n  'open\n---\nb\n";
        let docs = split(data);

        assert_eq!(texts(&docs), vec!["a: |\n  'open\n", "---\nb\n"]);
    }

    #[test]
    fn comments_hide_quotes()
    {
        let data = "# it's\n---\na # don't\n---\nb\n";
        let docs = split(data);

        assert_eq!(texts(&docs), vec!["# it's\n---\na # don't\n", "---\nb\n"]);
    }

    #[test]
    fn not_markers()
    {
        let data = "a\n---x\n ---\n----\n";

        assert_eq!(split(data).len(), 1);
    }

    #[test]
    fn marker_inside_flow()
    {
        let data = "[a,\n---\nb]\n";

        assert_eq!(texts(&split(data)), vec!["[a,\n", "---\nb]\n"]);
    }

    #[test]
    fn byte_order_mark()
    {
        let data = "\u{FEFF}a\n";
        let docs = split(data);

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text(), &data[BOM.len()..]);
        assert_eq!(docs[0].span(), 3..5);
        assert_eq!(docs[0].whole().column(), 0);
    }

    #[test]
    fn marker_count()
    {
        let data = "---\n---\n---";

        assert_eq!(split(data).len(), 3);
        assert_eq!(split("x\n---\n---\n---").len(), 4);
    }
}
