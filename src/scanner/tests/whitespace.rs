//! Test cases specific to the scanning of whitespace
//! between tokens

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn empty()
{
    let s = tokenize("");

    assert_eq!(s.kinds().next(), None);
    assert!(s.diagnostics().is_empty());
}

#[test]
fn comment_only()
{
    let data = "# comment only\n";
    let s = tokenize(data);

    tokens!(s =>
        | Newline   => "expected only the comment's line break",
        @ None      => "expected stream to be finished"
    );
}

#[test]
fn eat_comments()
{
    let data = "  # a comment\n\n#one two three\n       #four!";
    let s = tokenize(data);

    let kinds: Vec<_> = s.kinds().collect();
    let spaces = kinds
        .iter()
        .filter(|t| **t == WhiteSpaceIndentation)
        .count();

    assert_eq!(spaces, 9);
    assert_eq!(kinds.iter().filter(|t| **t == Newline).count(), 3);
    assert_eq!(codes(&s), vec![ErrorCode::UnterminatedComment]);
    assert!(!s.diagnostics()[0].is_fatal());
}

#[test]
fn comment_needs_whitespace()
{
    let data = "a#b # c\n";
    let s = tokenize(data);

    tokens!(s =>
        | Text      => "expected '#' inside a scalar to be content",
        | WhiteSpaceIndentation,
        | Newline,
        @ None
    );

    assert_eq!(s.tokens()[0].slice(data), Some("a#b"));
}

#[test]
fn tab_indentation()
{
    let data = "a:\n\tb\n";
    let s = tokenize(data);

    tokens!(s =>
        | Text,
        | ValueIndicator,
        | Newline,
        | TabIndentation    => "expected a tab indentation unit",
        | Text,
        | Newline,
        @ None
    );
}

#[test]
fn line_breaks()
{
    let data = "a\r\nb\rc\u{2028}d";
    let s = tokenize(data);

    tokens!(s =>
        | Text, | Newline, | Text, | Newline, | Text, | Newline, | Text,
        @ None
    );

    let last = &s.tokens()[6];

    assert_eq!(s.tokens()[1].span(), 1..3);
    assert_eq!((last.line(), last.column()), (4, 0));
}

#[test]
fn strips_only_comments()
{
    let data = "key: value # trailing\n# own line\n- [a, b] #c\n";
    let s = tokenize(data);

    assert_eq!(rebuild(data, &s), "key: value \n\n- [a, b] \n");
}
