/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module contains the various byte matching macros
//! used by lib/scanner and lib/splitter.

/// Rebinds .buffer's binding .amount forward, optionally
/// taking a .var to add .amount to
///
/// Modifiers
///     <- .buffer := return .buffer->0...amount
///
/// Variants
///     /1 .buffer, .amount
///     /2 .buffer, .amount, .var
macro_rules! advance {
    ($buffer:expr, $amount:expr $(, $var:ident )? ) => {
        let (_, rest) = $buffer.split_at($amount);

        $( advance!(@update $var, $amount); )?

        $buffer = rest
    };
    (<- $buffer:expr, $amount:expr $(, $var:ident )? ) => {{
        let (cut, rest) = $buffer.split_at($amount);

        $buffer = rest;

        $( advance!(@update $var, $amount); )?

        cut
    }};

    (@update $var:ident, $amount:expr) => {
        $var += $amount
    };
}

/// Check the .buffer (@ .offset) matches the given
/// .pattern
///
/// Modifiers
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants
///     /1 .buffer => .pattern := /2 .buffer, 0 => .pattern
///     /2 .buffer, .offset => .pattern
macro_rules! check {
    (~ $buffer:expr $(, $offset:expr )? => $( $match:tt )|+ ) => {
        check!(@priv $buffer.as_bytes() $(, $offset )? => $( $match )|+)
    };

    ($buffer:expr $(, $offset:expr )? => $( $match:tt )|+ ) => {
        check!(@priv $buffer $(, $offset )? => $( $match )|+)
    };

    /* Private variants */
    (@priv $buffer:expr, $offset:expr => $( $match:tt )|+) => {
        match $buffer.get($offset..) {
            Some(buffer) => check!(@priv buffer => $( $match )|+),
            None => check!(@eofck $( $match )|+ ),
        }
    };
    (@priv $buffer:expr => $( $match:tt )|+) => {
        match $buffer {
            $( check!(@ptn $match) )|+ => true,
            _ => false
        }
    };

    // Note we use macro path rules to first try matching the given
    // token as a literal, e.g a b'_', then try it as a pattern
    (@ptn $byte:literal) => {
        [$byte, ..]
    };
    (@ptn $match:pat) => {
        $match
    };

    // When indexing to an out of bounds .offset, we mostly want
    // to return false, however if the caller is checking for an
    // out of bounds (e.g a [] pattern) we must special case this
    // and return true
    (@eofck $( $match:tt )|+) => {{
        #[allow(unused_mut)]
        let mut checking_eof = false;
        $( check!(@eofck &mut checking_eof, $match); )+

        checking_eof
    }};
    (@eofck $is_checking:expr, []) => {
        *$is_checking = true
    };
    (@eofck $is_checking:expr, $_:literal) => {
    };
    (@eofck $is_checking:expr, $_:pat) => {
    };
}

/// Check if the byte (@ .offset) is a line break
///
/// Modifiers
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants
///     /1 .buffer := /2 .buffer, 0
///     /2 .buffer, .offset
macro_rules! isBreak {
    (~ $buffer:expr $(, $offset:expr )? ) => {
        isBreak!($buffer.as_bytes() $(, $offset )?)
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        check!($buffer $(, $offset)? =>
            b'\r'                                   /* CR   #xD     */
            | b'\n'                                 /* LF   #xA     */
            | [b'\xC2', b'\x85', ..]                /* NEL  #x85    */
            | [b'\xE2', b'\x80', b'\xA8', ..]       /* LS   #x2028  */
            | [b'\xE2', b'\x80', b'\xA9', ..]       /* PS   #x2029  */
        )
    };
}

/// Check if the byte (@ .offset) is a space or tab
///
/// Modifiers:
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants:
///     /1 .buffer := /2 .buffer, 0
///     /2 .buffer, .offset
macro_rules! isBlank {
    (~ $buffer:expr $(, $offset:expr )? ) => {
        isBlank!($buffer.as_bytes() $(, $offset )? )
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        check!($buffer $(, $offset)? => b' ' | b'\t')
    };
}

/// Check if the byte (@ .offset) is a space, tab, line
/// break or if .buffer is empty
///
/// Modifiers:
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants:
///     /1 .buffer := /2 .buffer, 0
///     /2 .buffer, .offset
macro_rules! isWhiteSpaceZ {
    (~ $buffer:expr $(, $offset:expr )? ) => {
        isWhiteSpaceZ!($buffer.as_bytes() $(, $offset )? )
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        isBlank!($buffer $(, $offset)?)
            || isBreak!($buffer $(, $offset)?)
            || check!($buffer $(, $offset)? => [])
    };
}

/// Check if the byte (@ .offset) is one of the flow
/// collection indicators: , [ ] { }
///
/// Modifiers:
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants:
///     /1 .buffer := /2 .buffer, 0
///     /2 .buffer, .offset
macro_rules! isFlowIndicator {
    (~ $buffer:expr $(, $offset:expr )? ) => {
        isFlowIndicator!($buffer.as_bytes() $(, $offset )? )
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        check!($buffer $(, $offset)? => b',' | b'[' | b']' | b'{' | b'}')
    };
}

/// Checks if byte (@ .offset) in .buffer is hexadecimal
///
/// Modifiers:
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants:
///     /1 .buffer := /2 .buffer, 0
///     /2 .buffer, .offset
macro_rules! isHex {
    (~ $buffer:expr $(, $offset:expr )? ) => {
        isHex!($buffer.as_bytes() $(, $offset)? )
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        check!($buffer $(, $offset)? =>
                [b'0'..=b'9', ..] | [b'A'..=b'F', ..] | [b'a'..=b'f', ..]
            )
    };
}

#[cfg(test)]
mod tests
{
    #![allow(non_snake_case)]

    #[test]
    fn scanner_macro_isBreak()
    {
        let data = BREAK_CHARS;

        for brk in &data
        {
            let mut c = [0; 4];
            let b = brk.encode_utf8(&mut c);

            let test = dbg!(isBreak!(~b), isBreak!(b.as_bytes()));

            assert!(test.0 && test.1);
        }
    }

    #[test]
    fn scanner_macro_isBreak_offset()
    {
        let data = BREAK_CHARS;

        for brk in &data
        {
            let mut c = [0; 8];
            brk.encode_utf8(&mut c[4..]);
            let b = std::str::from_utf8(&c).expect("valid UTF8");

            let test = dbg!(isBreak!(~b, 4), isBreak!(b.as_bytes(), 4));

            assert!(test.0 && test.1);
        }
    }

    #[test]
    fn scanner_macro_isWhiteSpaceZ()
    {
        let data: [&[char]; 2] = [&BLANK_CHARS, &BREAK_CHARS];

        for brk in data.iter().flat_map(|a| *a)
        {
            let mut c = [0; 4];
            let b = brk.encode_utf8(&mut c);

            let test = dbg!(isWhiteSpaceZ!(~b), isWhiteSpaceZ!(b.as_bytes()));

            assert!(test.0 && test.1);
        }

        let past_end = "    ";

        assert!(isWhiteSpaceZ!(~past_end, 5));
        assert!(isWhiteSpaceZ!(~""));
    }

    #[test]
    fn scanner_macro_isFlowIndicator()
    {
        for b in [",", "[", "]", "{", "}"].iter()
        {
            assert!(isFlowIndicator!(~b), "expected {} to be a flow indicator", b);
        }

        assert!(!isFlowIndicator!(~"a"));
        assert!(!isFlowIndicator!(~""));
        assert!(isFlowIndicator!(~"a]", 1));
    }

    #[test]
    fn scanner_macro_advance()
    {
        let mut buffer = "abcdef";
        let mut read = 0;

        let cut = advance!(<- buffer, 2, read);

        assert_eq!(cut, "ab");
        assert_eq!(buffer, "cdef");
        assert_eq!(read, 2);

        advance!(buffer, 3);

        assert_eq!(buffer, "f");
    }

    const BREAK_CHARS: [char; 5] = ['\r', '\n', '\u{0085}', '\u{2028}', '\u{2029}'];
    const BLANK_CHARS: [char; 2] = [' ', '\t'];
}
