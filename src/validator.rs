/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Structural checks over a single document's tokens.
//!
//! The validator walks a token sequence once, tracking
//! just enough state to catch the structural mistakes a
//! tokenizer cannot see on its own:
//!
//! 1. Indentation runs mixing spaces and tabs
//! 2. Tabs used as block indentation
//! 3. Indicators out of order on a block line
//! 4. Unbalanced or mismatched flow collections
//! 5. Content or directives out of place around document
//!    indicators
//!
//! Every violation is collected unless
//! [`O_FAIL_FAST`][crate::flag::O_FAIL_FAST] is set.

use crate::{
    error::{internal, Error, ErrorCode},
    flag::Flags,
    token::{Token, TokenEntry},
};

/// Check .tokens for structural validity
pub fn validate(tokens: &[TokenEntry], flags: Flags) -> Verdict
{
    let mut validator = Validator::new(flags);

    for entry in tokens
    {
        validator.visit(entry);

        if validator.is_done()
        {
            break;
        }
    }

    validator.finish()
}

/// The outcome of validating a document
#[derive(Debug)]
pub enum Verdict
{
    Valid,
    /// Every violation found, in token order. Never empty
    Invalid(Vec<Error>),
}

impl Verdict
{
    pub fn is_valid(&self) -> bool
    {
        matches!(self, Self::Valid)
    }

    /// The first violation found, if any
    pub fn reason(&self) -> Option<&Error>
    {
        self.violations().first()
    }

    pub fn violations(&self) -> &[Error]
    {
        match self
        {
            Self::Valid => &[],
            Self::Invalid(violations) => violations,
        }
    }
}

/// Where we are relative to the document indicators
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage
{
    /// Before any content or header
    Prologue,
    /// After a header or any content
    Body,
    /// On the line of a terminator
    Ended,
}

#[derive(Debug)]
struct Validator<'t>
{
    flags:      Flags,
    violations: Vec<Error>,

    /// Indentation units counted since the last value
    /// indicator
    spaces: usize,
    tabs:   usize,

    /// Only indentation has been seen on this line
    line_start:  bool,
    /// First tab in this line's leading indentation
    leading_tab: Option<&'t TokenEntry>,
    /// This line already has an indentation violation
    line_mixed:  bool,
    /// A block context value indicator was seen on this
    /// line
    line_value:  bool,

    /// Open flow collections, innermost last
    flow:       Vec<&'t TokenEntry>,
    stage:      Stage,
    /// Inside a directive line
    directive:  bool,
    /// Directives seen without a header following them
    directives: bool,
}

impl<'t> Validator<'t>
{
    fn new(flags: Flags) -> Self
    {
        Self {
            flags,
            violations: Vec::new(),
            spaces: 0,
            tabs: 0,
            line_start: true,
            leading_tab: None,
            line_mixed: false,
            line_value: false,
            flow: Vec::new(),
            stage: Stage::Prologue,
            directive: false,
            directives: false,
        }
    }

    fn visit(&mut self, entry: &'t TokenEntry)
    {
        let token = entry.token();

        match token
        {
            Token::Newline => return self.newline(),
            t if t.is_indentation() => return self.indentation(entry),
            _ =>
            {},
        }

        self.line_content();

        match token
        {
            Token::DirectiveIndicator => return self.directive(),
            Token::DocumentHeader => return self.header(),
            Token::DocumentTerminator => return self.terminator(entry),
            // Directive names and parameters are not content
            _ if self.directive => return,
            _ =>
            {},
        }

        self.content(entry);

        match token
        {
            Token::ValueIndicator => self.value(entry),
            Token::KeyIndicator if self.is_block_value() =>
            {
                self.report(entry, ErrorCode::InvalidKey)
            },
            Token::NestedSeriesEntryIndicator if self.is_block_value() =>
            {
                self.report(entry, ErrorCode::InvalidBlockEntry)
            },

            Token::FlowSequenceStart | Token::FlowMappingStart => self.flow.push(entry),
            Token::FlowSequenceEnd | Token::FlowMappingEnd => self.flow_end(entry),
            Token::SeparateFlowEntries if self.flow.is_empty() =>
            {
                self.report(entry, ErrorCode::InvalidFlowEntry)
            },

            _ =>
            {},
        }
    }

    fn is_done(&self) -> bool
    {
        self.flags.contains(Flags::FAIL_FAST) && !self.violations.is_empty()
    }

    fn finish(mut self) -> Verdict
    {
        if !self.is_done()
        {
            self.close_flows();
        }

        match self.violations.is_empty()
        {
            true => Verdict::Valid,
            false => Verdict::Invalid(self.violations),
        }
    }

    fn report(&mut self, entry: &TokenEntry, code: ErrorCode)
    {
        if self.is_done()
        {
            return;
        }

        let error = internal::Error::with_context(
            code,
            entry.read_at() as u64,
            entry.line() as u64,
            entry.column() as u64,
        );

        self.violations.push(error.into());
    }

    fn newline(&mut self)
    {
        self.line_start = true;
        self.leading_tab = None;
        self.line_mixed = false;
        self.line_value = false;
        self.directive = false;

        // A completed terminator line returns the stream to
        // its prologue
        if self.stage == Stage::Ended
        {
            self.stage = Stage::Prologue;
        }
    }

    fn indentation(&mut self, entry: &'t TokenEntry)
    {
        let strict = self.flags.contains(Flags::STRICT_RUNS);

        match entry.token()
        {
            Token::TabIndentation =>
            {
                if self.spaces > 0
                {
                    self.mixed(entry);
                }

                if self.line_start && self.leading_tab.is_none()
                {
                    self.leading_tab = Some(entry);
                }

                self.tabs += 1;
            },
            _ =>
            {
                if strict && self.tabs > 0
                {
                    self.mixed(entry);
                }

                self.spaces += 1;
            },
        }
    }

    fn mixed(&mut self, entry: &TokenEntry)
    {
        if !self.line_mixed
        {
            self.line_mixed = true;
            self.report(entry, ErrorCode::MixedIndentation);
        }
    }

    /// The first non whitespace token of a line ends its
    /// leading indentation
    fn line_content(&mut self)
    {
        if !self.line_start
        {
            return;
        }

        self.line_start = false;

        if let Some(tab) = self.leading_tab.take()
        {
            if self.flow.is_empty() && !self.line_mixed
            {
                self.line_mixed = true;
                self.report(tab, ErrorCode::InvalidTab);
            }
        }
    }

    fn directive(&mut self)
    {
        self.stage = Stage::Prologue;
        self.directive = true;
        self.directives = true;
    }

    fn header(&mut self)
    {
        self.close_flows();

        self.stage = Stage::Body;
        self.directives = false;
        self.spaces = 0;
        self.tabs = 0;
    }

    fn terminator(&mut self, entry: &TokenEntry)
    {
        self.close_flows();
        self.missing_header(entry);

        self.stage = Stage::Ended;
    }

    fn content(&mut self, entry: &TokenEntry)
    {
        match self.stage
        {
            Stage::Ended => self.report(entry, ErrorCode::MisplacedDocumentEnd),
            Stage::Prologue => self.missing_header(entry),
            Stage::Body =>
            {},
        }

        self.stage = Stage::Body;
    }

    /// Directives must be followed by a '---' before the
    /// document they apply to
    fn missing_header(&mut self, entry: &TokenEntry)
    {
        if self.directives
        {
            self.directives = false;
            self.report(entry, ErrorCode::MissingDocumentStart);
        }
    }

    fn value(&mut self, entry: &TokenEntry)
    {
        if self.is_block_value()
        {
            self.report(entry, ErrorCode::InvalidValue);
        }

        if self.flow.is_empty()
        {
            self.line_value = true;
        }

        self.spaces = 0;
        self.tabs = 0;
    }

    /// Are we on a block context line that already has a
    /// value
    fn is_block_value(&self) -> bool
    {
        self.line_value && self.flow.is_empty()
    }

    fn flow_end(&mut self, entry: &TokenEntry)
    {
        let open = match self.flow.pop()
        {
            Some(open) => open,
            None => return self.report(entry, ErrorCode::UnexpectedFlowEnd),
        };

        let matched = matches!(
            (open.token(), entry.token()),
            (Token::FlowSequenceStart, Token::FlowSequenceEnd)
                | (Token::FlowMappingStart, Token::FlowMappingEnd)
        );

        if !matched
        {
            self.report(entry, ErrorCode::MismatchedFlowEnd);
        }
    }

    /// Report any flow collections still open, innermost
    /// first
    fn close_flows(&mut self)
    {
        while let Some(open) = self.flow.pop()
        {
            let code = match open.token()
            {
                Token::FlowMappingStart => ErrorCode::MissingFlowMappingEntryOrEnd,
                _ => ErrorCode::MissingFlowSequenceEntryOrEnd,
            };

            self.report(open, code);
        }
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{flag::*, scanner::tokenize, token::Token::*};

    fn check(data: &str, flags: Flags) -> Vec<ErrorCode>
    {
        let scan = tokenize(data);

        validate(scan.tokens(), flags)
            .violations()
            .iter()
            .filter_map(Error::code)
            .collect()
    }

    /// Entries for .tokens, one byte each on a single line
    fn entries(tokens: &[Token]) -> Vec<TokenEntry>
    {
        tokens
            .iter()
            .enumerate()
            .map(|(i, token)| TokenEntry::new(*token, i..i + 1, 1, i))
            .collect()
    }

    #[test]
    fn valid_mapping()
    {
        let scan = tokenize("key: value\n");
        let verdict = validate(scan.tokens(), O_NIL);

        assert!(verdict.is_valid());
        assert!(verdict.reason().is_none());
        assert!(verdict.violations().is_empty());
    }

    #[test]
    fn tab_indentation()
    {
        let scan = tokenize("a:\n\tb\n");
        let verdict = validate(scan.tokens(), O_NIL);
        let reason = verdict.reason().unwrap();

        assert!(!verdict.is_valid());
        assert_eq!(reason.code(), Some(ErrorCode::InvalidTab));
        assert_eq!((reason.line(), reason.column()), (2, 0));
        assert!(reason.to_string().contains("mixed indentation"));
    }

    #[test]
    fn tab_after_spaces()
    {
        assert_eq!(
            check("a:\n  \tb\n", O_NIL),
            vec![ErrorCode::MixedIndentation]
        );
    }

    #[test]
    fn indentation_runs()
    {
        let invalid = entries(&[Text, ValueIndicator, WhiteSpaceIndentation, Text, TabIndentation]);
        let reset = entries(&[
            Text,
            ValueIndicator,
            WhiteSpaceIndentation,
            Newline,
            Text,
            ValueIndicator,
            TabIndentation,
            Text,
        ]);

        assert!(!validate(&invalid, O_NIL).is_valid());
        assert!(validate(&reset, O_NIL).is_valid());
    }

    #[test]
    fn tabs_in_flow()
    {
        assert_eq!(check("[a,\n\tb]\n", O_NIL), vec![]);
        assert_eq!(check("a:\n\t# comment\n", O_NIL), vec![]);
    }

    #[test]
    fn strict_runs()
    {
        let data = "a: b\t # c\n";

        assert_eq!(check(data, O_NIL), vec![]);
        assert_eq!(
            check(data, O_STRICT_RUNS),
            vec![ErrorCode::MixedIndentation]
        );
    }

    #[test]
    fn indicator_order()
    {
        assert_eq!(check("a: b: c\n", O_NIL), vec![ErrorCode::InvalidValue]);
        assert_eq!(check("a: ? b\n", O_NIL), vec![ErrorCode::InvalidKey]);
        assert_eq!(check("a: - b\n", O_NIL), vec![ErrorCode::InvalidBlockEntry]);

        assert_eq!(check("a: 1\nb: 2\n", O_NIL), vec![]);
        assert_eq!(check("- a: b\n", O_NIL), vec![]);
        assert_eq!(check("a: {b: c, d: e}\n", O_NIL), vec![]);
    }

    #[test]
    fn flow_balance()
    {
        assert_eq!(check("[a, b}\n", O_NIL), vec![ErrorCode::MismatchedFlowEnd]);
        assert_eq!(check("]\n", O_NIL), vec![ErrorCode::UnexpectedFlowEnd]);
        assert_eq!(
            check("[a, b\n", O_NIL),
            vec![ErrorCode::MissingFlowSequenceEntryOrEnd]
        );
        assert_eq!(
            check("{a: [b\n", O_NIL),
            vec![
                ErrorCode::MissingFlowSequenceEntryOrEnd,
                ErrorCode::MissingFlowMappingEntryOrEnd
            ]
        );
        assert_eq!(check(", a\n", O_NIL), vec![ErrorCode::InvalidFlowEntry]);
        assert_eq!(check("[a, [b, c], {d: e}]\n", O_NIL), vec![]);
    }

    #[test]
    fn flow_closed_by_document()
    {
        assert_eq!(
            check("---\n[a\n---\nb\n", O_NIL),
            vec![ErrorCode::MissingFlowSequenceEntryOrEnd]
        );
    }

    #[test]
    fn document_indicators()
    {
        assert_eq!(
            check("a\n... junk\n", O_NIL),
            vec![ErrorCode::MisplacedDocumentEnd]
        );
        assert_eq!(
            check("%YAML 1.2\na\n", O_NIL),
            vec![ErrorCode::MissingDocumentStart]
        );
        assert_eq!(
            check("a\n...\n%YAML 1.2\nb\n", O_NIL),
            vec![ErrorCode::MissingDocumentStart]
        );
        assert_eq!(
            check("%YAML 1.2\n...\n", O_NIL),
            vec![ErrorCode::MissingDocumentStart]
        );
        assert_eq!(
            check("%YAML 1.2\n---\na\n...\n%YAML 1.2\n---\nb\n", O_NIL),
            vec![]
        );
        assert_eq!(check("a\n...\n# trailing\n", O_NIL), vec![]);
    }

    #[test]
    fn content_after_terminator_line()
    {
        assert_eq!(check("a\n...\nb\nc\n", O_NIL), vec![]);
        assert_eq!(check("a\n%YAML 1.2\n", O_NIL), vec![]);
        assert_eq!(check("...\n...\na\n", O_NIL), vec![]);
    }

    #[test]
    fn fail_fast()
    {
        let data = "a: b: c: d\n";

        assert_eq!(check(data, O_NIL).len(), 2);
        assert_eq!(check(data, O_FAIL_FAST), vec![ErrorCode::InvalidValue]);
        assert_eq!(
            check("[a\n", O_FAIL_FAST),
            vec![ErrorCode::MissingFlowSequenceEntryOrEnd]
        );
    }

    #[test]
    fn violation_context()
    {
        let scan = tokenize("a: 1\nb: c: d\n");
        let verdict = validate(scan.tokens(), O_NIL);
        let reason = verdict.reason().unwrap();

        assert_eq!((reason.at(), reason.line(), reason.column()), (9, 2, 4));
    }
}
