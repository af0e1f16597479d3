/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Tokens emitted by the tokenizer, and the entries that
//! locate them in the source text.

use std::ops::Range;

/// Tokens that may be emitted by the YAML tokenizer.
///
/// Tokens carry no payload text, see [`TokenEntry`] for
/// locating the source slice a token was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token
{
    /*
     * ==== Collection indicators ====
     */
    /// A '? '
    KeyIndicator,
    /// A ': ', or ':' before a tab, line break or flow
    /// indicator
    ValueIndicator,
    /// A '- '
    NestedSeriesEntryIndicator,
    /// A ','
    SeparateFlowEntries,
    /// A '['
    FlowSequenceStart,
    /// A ']'
    FlowSequenceEnd,
    /// A '{'
    FlowMappingStart,
    /// A '}'
    FlowMappingEnd,

    /*
     * ==== Scalar indicators ====
     */
    /// A single quoted scalar delimiter
    SingleQuote,
    /// A double quoted scalar delimiter
    DoubleQuote,
    /// A '|'
    Literal,
    /// A '>'
    Folded,
    /// A '-' chomp modifier in a block scalar header
    StripChomp,
    /// A '+' chomp modifier in a block scalar header
    KeepChomp,
    /// A 1..=9 indentation modifier in a block scalar
    /// header
    ExplicitIndentation(u8),
    /// Scalar content that is not otherwise classified
    Text,

    /*
     * ==== Alias indicators ====
     */
    /// A '&'
    AnchorIndicator,
    /// A '*'
    AliasIndicator,

    /*
     * ==== Tag indicators ====
     */
    /// A tag handle with no suffix, e.g '!!' or '!e!'
    UnspecifiedTag,
    /// A lone '!'
    NonSpecificTag,
    /// A '!suffix'
    PrimaryTag,
    /// A '!!suffix' not covered by the core types
    SecondaryTag,
    /// A '!named!suffix'
    NamedTag,
    /// A '!<verbatim:tag>'
    VerbatimTag,

    /*
     * ==== Document indicators ====
     */
    /// A '%' starting a directive line
    DirectiveIndicator,
    /// A '---'
    DocumentHeader,
    /// A '...'
    DocumentTerminator,

    /*
     * ==== Special keys ====
     */
    /// The plain scalar '='
    DefaultValueKey,
    /// The plain scalar '<<'
    MergeKey,

    /*
     * ==== Core types ====
     */
    /// A '!!map'
    Map,
    /// A '!!seq'
    Seq,
    /// A '!!str'
    UnicodeString,
    /// A '!!set'
    Set,
    /// A '!!omap'
    OMap,

    /*
     * ==== Scalar content ====
     */
    Null,
    Int,
    Float,
    Infinity,
    NaN,
    BoolTrue,
    BoolFalse,
    /// A '!!binary', marking base64 content
    Binary,
    /// \x.. \u.... \U........
    NumericEscape,
    /// \\ \" \/ \<TAB> \<SPACE> and '' in single quotes
    ProtectiveEscape,
    /// \0 \a \b \e \f \n \r \t \v
    CStyleEscape,
    /// \N \_ \L \P and escaped line breaks
    AdditionalEscape,

    /*
     * ==== Structural whitespace ====
     */
    Newline,
    /// A single space
    WhiteSpaceIndentation,
    /// A single tab
    TabIndentation,

    /// A character sequence that could not be resolved to
    /// any other token. Always accompanied by a diagnostic
    Unrecognized,
}

impl Token
{
    /// Is this a whitespace token (space, tab or line break)
    pub fn is_whitespace(&self) -> bool
    {
        matches!(
            self,
            Self::Newline | Self::WhiteSpaceIndentation | Self::TabIndentation
        )
    }

    /// Is this a space or tab indentation unit
    pub fn is_indentation(&self) -> bool
    {
        matches!(self, Self::WhiteSpaceIndentation | Self::TabIndentation)
    }

    /// Is this one of the tag tokens, including the core
    /// type tags
    pub fn is_tag(&self) -> bool
    {
        matches!(
            self,
            Self::UnspecifiedTag
                | Self::NonSpecificTag
                | Self::PrimaryTag
                | Self::SecondaryTag
                | Self::NamedTag
                | Self::VerbatimTag
                | Self::Map
                | Self::Seq
                | Self::UnicodeString
                | Self::Set
                | Self::OMap
                | Self::Binary
        )
    }

    /// Is this one of the double quoted escape families
    pub fn is_escape(&self) -> bool
    {
        matches!(
            self,
            Self::NumericEscape
                | Self::ProtectiveEscape
                | Self::CStyleEscape
                | Self::AdditionalEscape
        )
    }
}

/// A [`Token`] and the location of the source slice it
/// was produced from.
///
/// Spans are absolute byte offsets into the text handed to
/// the tokenizer (or the whole stream, when produced by the
/// [`reader`](crate::reader)), so the slice can be
/// recovered with [`TokenEntry::slice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEntry
{
    token:  Token,
    span:   Range<usize>,
    line:   usize,
    column: usize,
}

impl TokenEntry
{
    pub(crate) fn new(token: Token, span: Range<usize>, line: usize, column: usize) -> Self
    {
        Self {
            token,
            span,
            line,
            column,
        }
    }

    pub fn token(&self) -> Token
    {
        self.token
    }

    /// Byte range of this token in the source
    pub fn span(&self) -> Range<usize>
    {
        self.span.clone()
    }

    /// Byte offset of this token's first character
    pub fn read_at(&self) -> usize
    {
        self.span.start
    }

    /// Line of this token's first character, starting from
    /// 1
    pub fn line(&self) -> usize
    {
        self.line
    }

    /// Character offset of this token into its line
    pub fn column(&self) -> usize
    {
        self.column
    }

    /// Retrieve this token's slice from the source it was
    /// produced from. Returns None if .source is not that
    /// text.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str>
    {
        source.get(self.span.clone())
    }
}

impl PartialEq<Token> for TokenEntry
{
    fn eq(&self, other: &Token) -> bool
    {
        self.token.eq(other)
    }
}
