/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::{error::Error as StdError, fmt};

pub use self::internal::ErrorCode;

/// Result typedef used throughout this library's public API
pub type Result<T> = std::result::Result<T, Error>;

/// Opaque type representing all possible errors which can
/// occur during library usage.
///
/// Errors produced while tokenizing or validating a
/// document are attached to that document, errors produced
/// while reading the input abort the whole call.
pub struct Error
{
    inner: Box<internal::Error>,
}

impl Error
{
    /// The line at which the error occurred, starting from 1.
    pub fn line(&self) -> u64
    {
        self.inner.line
    }

    /// The column into the line where the error occurred.
    pub fn column(&self) -> u64
    {
        self.inner.column
    }

    /// The index into the byte stream at which the error
    /// occurred.
    pub fn at(&self) -> u64
    {
        self.inner.at
    }

    /// Categorize the error into one of the following:
    ///
    /// - [`Category::Syntax`] The YAML stream was
    ///   structurally or lexically invalid
    /// - [`Category::Data`] The input could not be accepted
    ///   (invalid UTF8, too large)
    /// - [`Category::IO`] The underlying byte stream
    ///   surfaced an error while doing IO
    /// - [`Category::EOF`] A document ended inside a
    ///   construct that needed terminating
    pub fn classify(&self) -> Category
    {
        self.inner.classify()
    }

    /// The library specific cause of this error, if it has
    /// one. Errors wrapping an underlying IO or UTF8 error
    /// return None.
    pub fn code(&self) -> Option<ErrorCode>
    {
        match self.inner.kind
        {
            internal::ErrorKind::Code(code) => Some(code),
            internal::ErrorKind::Source(_) => None,
        }
    }

    /// Whether this error invalidates the document it is
    /// attached to. Non fatal errors are warnings, see
    /// [`ErrorCode::is_fatal`].
    pub fn is_fatal(&self) -> bool
    {
        self.code().map_or(true, |code| code.is_fatal())
    }

    /// Checks whether this error was contextualized.
    ///
    /// If this method returns false then the methods
    ///
    /// - [`at()`](#method.at)
    /// - [`column()`](#method.column)
    /// - [`line()`](#method.line)
    ///
    /// will return meaningless values.
    pub fn has_context(&self) -> bool
    {
        self.inner.has_context()
    }

    /// Boxes the internal error, returning new public error
    /// type
    pub(crate) fn new(err: internal::Error) -> Self
    {
        Self {
            inner: Box::new(err),
        }
    }
}

/// Rough category of an [`Error`].
///
/// Useful for making decisions upon encountering an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category
{
    /// The underlying byte stream returned an error while
    /// attempting IO
    IO,

    /// The YAML stream was not syntactically valid
    Syntax,

    /// The input could not be accepted for processing
    Data,

    /// A document ended before an open construct was
    /// terminated
    EOF,
}

pub(crate) mod internal
{
    use std::{error::Error as StdError, fmt, io, str::Utf8Error};

    use super::Category;

    /// Internal error representation used throughout the
    /// library.
    ///
    /// Contains enough metadata about the position of the
    /// error that we can contextualize it later
    pub(crate) struct Error
    {
        /// Error variant encountered
        pub kind:   ErrorKind,
        /// Position in the byte stream that the error
        /// occurred
        pub at:     u64,
        /// Line number of the error
        pub line:   u64,
        /// Offset into current line the error occurred at
        pub column: u64,
    }

    impl Error
    {
        /// Create a new, contextless [`Error`].
        ///
        /// Care should be taken to later apply context, if
        /// at all possible.
        pub fn new<T>(err: T) -> Self
        where
            T: Into<ErrorKind>,
        {
            Self::with_context(err, 0, 0, 0)
        }

        /// Create a new, contextualized [`Error`].
        pub fn with_context<T>(err: T, at: u64, line: u64, column: u64) -> Self
        where
            T: Into<ErrorKind>,
        {
            let kind = err.into();

            Self {
                kind,
                at,
                line,
                column,
            }
        }

        /// Checks whether this error is contextualized
        pub fn has_context(&self) -> bool
        {
            // Only errors created without context will have a line
            // number of 0
            self.line != 0
        }

        /// Categorize this error
        pub fn classify(&self) -> Category
        {
            Into::into(&self.kind)
        }
    }

    /// Unified wrapper around the actual error variants we
    /// can produce
    #[derive(Debug)]
    pub(crate) enum ErrorKind
    {
        Code(ErrorCode),
        Source(SourceError),
    }

    /// Lightweight errors, specific to this library.
    ///
    /// This enum should never be polluted with large
    /// variants, or wrap underlying errors. Use
    /// [`SourceError`] for those.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum ErrorCode
    {
        /*
         * ==== Tokenizer Errors ====
         */
        /// A quoted scalar was still open when the document
        /// ended
        ///
        /// ```yaml
        /// key: "never closed
        /// #    ^ UnterminatedScalar
        /// ```
        UnterminatedScalar,

        /// A comment ran into the end of the document
        /// without a line break. This is a warning.
        UnterminatedComment,

        /// A multi character indicator could not be
        /// resolved before the document ended
        ///
        /// ```yaml
        /// key: !!se
        /// #    ^^^^ LexicalAmbiguity, !!seq or !!set?
        /// ```
        LexicalAmbiguity,

        /// A character that was not valid for the escape
        /// sequence was encountered
        UnknownEscape,

        /// Directive was not either YAML or TAG. This is a
        /// warning, reserved directives are ignored.
        UnknownDirective,

        /// A %YAML directive's version was not
        /// major.minor
        InvalidVersion,

        /// A %TAG directive handle was not primary (!),
        /// secondary (!!) or named (!alphanumeric!)
        InvalidTagHandle,

        /// A %TAG directive was missing its prefix
        InvalidTagPrefix,

        /// Tag suffix was invalid
        InvalidTagSuffix,

        /// Either an anchor (&) or alias (*)'s name was
        /// invalid
        InvalidAnchorName,

        /// A block scalar header contained a character
        /// sequence that is not permitted
        InvalidBlockScalar,

        /// A reserved indicator ('@' or '`') started a
        /// token
        ReservedIndicator,

        /*
         * ==== Validator Errors ====
         */
        /// A tab followed space indentation inside one
        /// indentation run
        ///
        /// ```yaml
        /// key: value
        ///   	next
        /// # ^^^ spaces then a tab
        /// ```
        MixedIndentation,

        /// A tab character '\t' was used as block
        /// indentation
        InvalidTab,

        /// A mapping key was not expected or allowed
        ///
        /// ```yaml
        /// key: ? other
        /// #    ^ InvalidKey
        /// ```
        InvalidKey,

        /// A mapping value was not expected or allowed
        ///
        /// ```yaml
        /// key: other: value
        /// #         ^ InvalidValue
        /// ```
        InvalidValue,

        /// A block entry was not expected or allowed
        ///
        /// ```yaml
        /// key: - entry
        /// #    ^ InvalidBlockEntry
        /// ```
        InvalidBlockEntry,

        /// A flow entry separator (',') was found outside
        /// of a flow collection
        InvalidFlowEntry,

        /// A flow collection terminus (']' or '}') was
        /// found without a matching start
        UnexpectedFlowEnd,

        /// A flow collection was closed by the wrong
        /// terminus
        ///
        /// ```yaml
        /// [1, 2, 3}
        /// #       ^ MismatchedFlowEnd
        /// ```
        MismatchedFlowEnd,

        /// A YAML flow sequence was missing a terminus
        /// (']') symbol.
        ///
        /// ```yaml
        /// missing terminus: [1, 2, 3
        /// #                 ^ MissingFlowSequenceEntryOrEnd
        /// ```
        MissingFlowSequenceEntryOrEnd,

        /// A YAML flow mapping was missing a terminus ('}')
        /// symbol.
        MissingFlowMappingEntryOrEnd,

        /// Document content was found on the same line as a
        /// document terminator ('...')
        ///
        /// ```yaml
        /// document: 1
        /// ... document: 2
        /// #   ^^^^^^^^ MisplacedDocumentEnd
        /// ```
        MisplacedDocumentEnd,

        /// Directives were not followed by a document start
        /// ('---')
        ///
        /// ```yaml
        /// %YAML 1.2
        /// document: 1
        /// #^^^^^^^ MissingDocumentStart
        /// ```
        MissingDocumentStart,

        /*
         * ==== Reader Errors ====
         */
        /// The input exceeded the configured byte ceiling
        InputTooLarge,
    }

    impl ErrorCode
    {
        /// Whether this code invalidates the document it
        /// is found in. The non fatal codes are warnings:
        /// surfaced, but well formed YAML may produce them.
        pub fn is_fatal(&self) -> bool
        {
            !matches!(
                self,
                ErrorCode::UnterminatedComment | ErrorCode::UnknownDirective
            )
        }
    }

    /// Heavy and/or external errors that can occur during
    /// library usage
    #[derive(Debug)]
    pub(crate) enum SourceError
    {
        /*
         * ==== Reader Errors ====
         */
        /// Catch all wrapper for any underlying IO errors
        /// reported to us
        IO(io::Error),

        /// Encountered invalid an UTF8 sequence
        UTF8(Utf8Error),
    }

    impl fmt::Debug for Error
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            let mut this = f.debug_struct("Error");

            this.field("kind", &self.kind);

            if self.has_context()
            {
                this.field("line", &self.line)
                    .field("column", &self.column)
                    .field("index", &self.at);
            }

            this.finish()
        }
    }

    impl fmt::Display for Error
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            use fmt::Display;

            if self.has_context()
            {
                f.write_fmt(format_args!(
                    "{}, on line {}, column {}, at index {}",
                    self.kind, self.line, self.column, self.at
                ))
            }
            else
            {
                Display::fmt(&self.kind, f)
            }
        }
    }

    impl StdError for Error
    {
        fn source(&self) -> Option<&(dyn StdError + 'static)>
        {
            StdError::source(&self.kind)
        }
    }

    impl From<Error> for super::Error
    {
        fn from(err: Error) -> Self
        {
            Self::new(err)
        }
    }

    impl<T> From<T> for Error
    where
        T: Into<ErrorKind>,
    {
        fn from(t: T) -> Self
        {
            Error::new(t.into())
        }
    }

    impl From<Error> for std::io::Error
    {
        fn from(err: Error) -> Self
        {
            if let ErrorKind::Source(SourceError::IO(err)) = err.kind
            {
                return err;
            }

            match err.classify()
            {
                Category::Syntax => io::Error::new(io::ErrorKind::InvalidInput, err),
                Category::Data => io::Error::new(io::ErrorKind::InvalidData, err),
                Category::EOF => io::Error::new(io::ErrorKind::UnexpectedEof, err),
                Category::IO => io::Error::new(io::ErrorKind::Other, err),
            }
        }
    }

    impl From<&'_ ErrorKind> for Category
    {
        fn from(kind: &'_ ErrorKind) -> Self
        {
            match kind
            {
                ErrorKind::Code(e) => e.into(),
                ErrorKind::Source(e) => e.into(),
            }
        }
    }

    impl fmt::Display for ErrorKind
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            match self
            {
                ErrorKind::Code(ref e) => fmt::Display::fmt(e, f),
                ErrorKind::Source(ref e) => fmt::Display::fmt(e, f),
            }
        }
    }

    impl StdError for ErrorKind
    {
        fn source(&self) -> Option<&(dyn StdError + 'static)>
        {
            match self
            {
                ErrorKind::Code(_) => None,
                ErrorKind::Source(e) => Some(e),
            }
        }
    }

    impl From<ErrorCode> for ErrorKind
    {
        fn from(e: ErrorCode) -> Self
        {
            ErrorKind::Code(e)
        }
    }

    impl From<SourceError> for ErrorKind
    {
        fn from(e: SourceError) -> Self
        {
            ErrorKind::Source(e)
        }
    }

    impl From<io::Error> for ErrorKind
    {
        fn from(e: io::Error) -> Self
        {
            ErrorKind::Source(SourceError::IO(e))
        }
    }

    impl From<Utf8Error> for ErrorKind
    {
        fn from(e: Utf8Error) -> Self
        {
            ErrorKind::Source(SourceError::UTF8(e))
        }
    }

    impl From<ErrorCode> for Category
    {
        fn from(code: ErrorCode) -> Self
        {
            use ErrorCode::*;

            match code
            {
                UnknownEscape
                | UnknownDirective
                | InvalidVersion
                | InvalidTagHandle
                | InvalidTagPrefix
                | InvalidTagSuffix
                | InvalidAnchorName
                | InvalidBlockScalar
                | ReservedIndicator
                | MixedIndentation
                | InvalidTab
                | InvalidKey
                | InvalidValue
                | InvalidBlockEntry
                | InvalidFlowEntry
                | UnexpectedFlowEnd
                | MismatchedFlowEnd
                | MissingFlowSequenceEntryOrEnd
                | MissingFlowMappingEntryOrEnd
                | MisplacedDocumentEnd
                | MissingDocumentStart => Category::Syntax,

                InputTooLarge => Category::Data,

                UnterminatedScalar | UnterminatedComment | LexicalAmbiguity => Category::EOF,
            }
        }
    }

    impl From<&'_ ErrorCode> for Category
    {
        fn from(code: &'_ ErrorCode) -> Self
        {
            From::from(*code)
        }
    }

    impl fmt::Display for ErrorCode
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            use ErrorCode::*;

            match self
            {
                UnterminatedScalar => f.write_str("quoted scalar was not terminated"),
                UnterminatedComment => f.write_str("comment was not terminated by a line break"),
                LexicalAmbiguity =>
                {
                    f.write_str("indicator could not be resolved before the end of the document")
                },
                UnknownEscape => f.write_str("unknown escape sequence"),
                UnknownDirective => f.write_str("unknown YAML directive"),
                InvalidVersion => f.write_str("%YAML directive is invalid"),
                InvalidTagHandle =>
                {
                    f.write_str("tag handle is not one of !, !!, or ![a-zA-Z0-9]+!")
                },
                InvalidTagPrefix => f.write_str("%TAG directive prefix is invalid"),
                InvalidTagSuffix => f.write_str("node tag suffix is invalid"),
                InvalidAnchorName =>
                {
                    f.write_str("node anchor or alias contains invalid characters")
                },
                InvalidBlockScalar => f.write_str("block scalar header is invalid"),
                ReservedIndicator => f.write_str("reserved indicator cannot start a token"),
                MixedIndentation =>
                {
                    f.write_str("mixed indentation: a tab follows spaces in an indentation run")
                },
                InvalidTab =>
                {
                    f.write_str("mixed indentation: block indentation contained a tab character")
                },
                InvalidKey => f.write_str("key node is not allowed in this context"),
                InvalidValue => f.write_str("value node is not allowed in this context"),
                InvalidBlockEntry => f.write_str("block entry is not allowed in this context"),
                InvalidFlowEntry => f.write_str("flow entry ',' outside of a flow collection"),
                UnexpectedFlowEnd => f.write_str("flow collection end without a matching start"),
                MismatchedFlowEnd =>
                {
                    f.write_str("flow collection closed with the wrong delimiter")
                },
                MissingFlowSequenceEntryOrEnd =>
                {
                    f.write_str("missing flow sequence delimiter ',' or ']'")
                },
                MissingFlowMappingEntryOrEnd =>
                {
                    f.write_str("missing flow mapping delimiter ',' or '}'")
                },
                MisplacedDocumentEnd =>
                {
                    f.write_str("content on the same line as a document end '...'")
                },
                MissingDocumentStart => f.write_str("missing document start '---' after directives"),
                InputTooLarge => f.write_str("input exceeds the configured size limit"),
            }
        }
    }

    impl StdError for ErrorCode {}

    impl From<&'_ SourceError> for Category
    {
        fn from(err: &'_ SourceError) -> Self
        {
            match err
            {
                SourceError::IO(_) => Category::IO,
                SourceError::UTF8(_) => Category::Data,
            }
        }
    }

    impl fmt::Display for SourceError
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            match self
            {
                SourceError::IO(ref e) => fmt::Display::fmt(e, f),
                SourceError::UTF8(ref e) => fmt::Display::fmt(e, f),
            }
        }
    }

    impl StdError for SourceError
    {
        fn source(&self) -> Option<&(dyn StdError + 'static)>
        {
            match self
            {
                SourceError::IO(e) => Some(e),
                SourceError::UTF8(e) => Some(e),
            }
        }
    }
}

impl fmt::Debug for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl StdError for Error
{
    fn source(&self) -> Option<&(dyn StdError + 'static)>
    {
        StdError::source(&self.inner)
    }
}

impl From<Error> for std::io::Error
{
    fn from(err: Error) -> Self
    {
        From::from(*err.inner)
    }
}
