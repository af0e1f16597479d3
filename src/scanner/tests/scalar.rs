/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Test cases for plain, quoted and block scalars.

use pretty_assertions::assert_eq;

use super::*;

/* === PLAIN SCALAR TESTS === */

#[test]
fn plain_core_schema()
{
    let data = "a: 0x1F\nb: -.inf\nc: ~\nd: False\ne: .NaN\n";
    let s = tokenize(data);

    tokens!(s =>
        | Text, | ValueIndicator, | Int         => "expected a hex int",        | Newline,
        | Text, | ValueIndicator, | Infinity    => "expected negative infinity", | Newline,
        | Text, | ValueIndicator, | Null        => "expected a null",           | Newline,
        | Text, | ValueIndicator, | BoolFalse   => "expected a false boolean",  | Newline,
        | Text, | ValueIndicator, | NaN         => "expected not a number",     | Newline,
        @ None
    );
}

#[test]
fn plain_special_keys()
{
    let data = "=: default\n";
    let s = tokenize(data);

    tokens!(s =>
        | DefaultValueKey   => "expected a default value key",
        | ValueIndicator,
        | Text,
        | Newline,
        @ None
    );
}

#[test]
fn plain_multi_line()
{
    let data = "a b\n  c\n";
    let s = tokenize(data);

    tokens!(s =>
        | Text                  => "expected interior spaces to be part of the scalar",
        | Newline,
        | WhiteSpaceIndentation,
        | WhiteSpaceIndentation,
        | Text,
        | Newline,
        @ None
    );

    assert_eq!(s.tokens()[0].slice(data), Some("a b"));
}

#[test]
fn plain_reserved_indicator()
{
    let data = "@foo";
    let s = tokenize(data);

    tokens!(s =>
        | Unrecognized  => "expected reserved indicators to be unrecognized",
        @ None
    );

    assert_eq!(codes(&s), vec![ErrorCode::ReservedIndicator]);
}

/* === FLOW SCALAR TESTS === */

#[test]
fn single_escaped_quote()
{
    let data = "'it''s'";
    let s = tokenize(data);

    tokens!(s =>
        | SingleQuote,
        | Text,
        | ProtectiveEscape  => "expected '' to be an escape",
        | Text,
        | SingleQuote,
        @ None
    );
}

#[test]
fn double_escapes()
{
    let data = r#""a\tb\x41\\""#;
    let s = tokenize(data);

    tokens!(s =>
        | DoubleQuote,
        | Text,
        | CStyleEscape      => "expected a C style escape",
        | Text,
        | NumericEscape     => "expected a numeric escape",
        | ProtectiveEscape  => "expected a protective escape",
        | DoubleQuote,
        @ None
    );

    assert_eq!(s.kinds().filter(|t| t.is_escape()).count(), 3);
    assert!(s.diagnostics().is_empty());
}

#[test]
fn double_unknown_escape()
{
    let data = r#""\q""#;
    let s = tokenize(data);

    tokens!(s =>
        | DoubleQuote,
        | Unrecognized  => "expected an unknown escape",
        | DoubleQuote,
        @ None
    );

    assert_eq!(codes(&s), vec![ErrorCode::UnknownEscape]);
}

#[test]
fn double_multi_line()
{
    let data = "\"one\n  two\"";
    let s = tokenize(data);

    tokens!(s =>
        | DoubleQuote,
        | Text,
        | Newline,
        | Text          => "expected leading spaces to be scalar content",
        | DoubleQuote,
        @ None
    );
}

#[test]
fn quoted_unterminated()
{
    let data = "key: \"open\n";
    let s = tokenize(data);

    tokens!(s =>
        | Text,
        | ValueIndicator,
        | DoubleQuote,
        | Text,
        | Newline,
        @ None
    );

    let error = &s.diagnostics()[0];

    assert_eq!(error.code(), Some(ErrorCode::UnterminatedScalar));
    assert_eq!((error.line(), error.column()), (1, 5));
}

/* === BLOCK SCALAR TESTS === */

#[test]
fn literal_simple()
{
    let data = "key: |\n  line one\n  line two\nnext: 1\n";
    let s = tokenize(data);

    tokens!(s =>
        | Text,
        | ValueIndicator,
        | Literal               => "expected a literal block scalar",
        | Newline,
        | WhiteSpaceIndentation,
        | WhiteSpaceIndentation,
        | Text,
        | Newline,
        | WhiteSpaceIndentation,
        | WhiteSpaceIndentation,
        | Text,
        | Newline,
        | Text                  => "expected the scalar to end at the outdent",
        | ValueIndicator,
        | Int,
        | Newline,
        @ None
    );
}

#[test]
fn folded_header()
{
    let data = "key: >-2 # note\n    text\n";
    let s = tokenize(data);

    tokens!(s =>
        | Text,
        | ValueIndicator,
        | Folded                    => "expected a folded block scalar",
        | StripChomp                => "expected a strip chomp modifier",
        | ExplicitIndentation(2)    => "expected an indentation modifier",
        | WhiteSpaceIndentation,
        | Newline,
        | WhiteSpaceIndentation,
        | WhiteSpaceIndentation,
        | Text,
        | Newline,
        @ None
    );

    assert_eq!(s.tokens()[9].slice(data), Some("  text"));
    assert_eq!(rebuild(data, &s), "key: >-2 \n    text\n");
}

#[test]
fn block_top_level()
{
    let data = "--- |\n%!PS-Adobe-2.0\n...\n";
    let s = tokenize(data);

    tokens!(s =>
        | DocumentHeader,
        | WhiteSpaceIndentation,
        | Literal,
        | Newline,
        | Text                  => "expected a column 0 content line",
        | Newline,
        | DocumentTerminator    => "expected the terminator to end the scalar",
        | Newline,
        @ None
    );

    assert_eq!(s.tokens()[4].slice(data), Some("%!PS-Adobe-2.0"));
    assert!(s.diagnostics().is_empty());
}

#[test]
fn block_top_level_properties()
{
    let data = "&a !!str |\ntext\n";
    let s = tokenize(data);

    tokens!(s =>
        | AnchorIndicator,
        | Text,
        | WhiteSpaceIndentation,
        | UnicodeString,
        | WhiteSpaceIndentation,
        | Literal,
        | Newline,
        | Text                  => "expected a column 0 content line",
        | Newline,
        @ None
    );
}

#[test]
fn block_protects_indicators()
{
    let data = "a: |\n  # not a comment\n  --- text\n";
    let s = tokenize(data);

    tokens!(s =>
        | Text,
        | ValueIndicator,
        | Literal,
        | Newline,
        | WhiteSpaceIndentation,
        | WhiteSpaceIndentation,
        | Text,
        | Newline,
        | WhiteSpaceIndentation,
        | WhiteSpaceIndentation,
        | Text,
        | Newline,
        @ None
    );

    assert_eq!(rebuild(data, &s), data);
}

#[test]
fn block_invalid_header()
{
    for data in &["|0\n", "|x\n"]
    {
        let s = tokenize(data);

        tokens!(s =>
            | Literal,
            | Unrecognized  => "expected an invalid header",
            | Newline,
            @ None
        );

        assert_eq!(codes(&s), vec![ErrorCode::InvalidBlockScalar]);
    }
}
