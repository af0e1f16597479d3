/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::token::Token;

/// Measure the plain scalar run at the head of .base,
/// returning its length in bytes. The run never spans a
/// line; continuation lines are scanned as their own runs.
///
/// The first character is always consumed, the caller is
/// expected to have ruled out any indicator. Trailing
/// blanks are not part of the run.
///
/// See:
///     YAML 1.2: Section 7.3.3
///     yaml.org/spec/1.2/spec.html#ns-plain-first(c)
pub(crate) fn plain_extent(base: &str, flow: bool) -> usize
{
    let buffer = base.as_bytes();

    let mut index = match base.chars().next()
    {
        Some(c) => c.len_utf8(),
        None => return 0,
    };
    // End of the last non blank character seen
    let mut end = index;

    while index < buffer.len()
    {
        // Check for character sequences which end a plain scalar,
        // namely:
        //
        // ': '                         -> anywhere
        // ' #'                         -> anywhere
        // ',' | '[' | ']' | '{' | '}'  -> flow context
        let stop = isBreak!(buffer, index)
            || (check!(buffer, index => b':') && ends_value(buffer, index + 1, flow))
            || (isBlank!(buffer, index) && check!(buffer, index + 1 => b'#'))
            || (flow && isFlowIndicator!(buffer, index));

        if stop
        {
            break;
        }

        index += 1;

        if !isBlank!(buffer, index - 1)
        {
            end = index;
        }
    }

    // Never split a multibyte character, which is only
    // possible if we stopped on one of its continuation bytes
    while !base.is_char_boundary(end)
    {
        end += 1;
    }

    end
}

/// Is the ':' before .at a value indicator
fn ends_value(buffer: &[u8], at: usize, flow: bool) -> bool
{
    isWhiteSpaceZ!(buffer, at) || (flow && isFlowIndicator!(buffer, at))
}

/// Resolve a complete plain scalar to its token, using the
/// YAML 1.2 core schema and the special keys. Scalars that
/// match nothing are [`Token::Text`].
///
/// See:
///     YAML 1.2: Section 10.3.2
///     yaml.org/spec/1.2/spec.html#id2805071
pub(crate) fn resolve(scalar: &str) -> Token
{
    match scalar
    {
        "<<" => Token::MergeKey,
        "=" => Token::DefaultValueKey,

        "~" | "null" | "Null" | "NULL" => Token::Null,
        "true" | "True" | "TRUE" => Token::BoolTrue,
        "false" | "False" | "FALSE" => Token::BoolFalse,

        ".nan" | ".NaN" | ".NAN" => Token::NaN,
        s if is_infinity(s) => Token::Infinity,
        s if is_int(s) => Token::Int,
        s if is_float(s) => Token::Float,

        _ => Token::Text,
    }
}

fn is_infinity(s: &str) -> bool
{
    let s = s.strip_prefix(&['-', '+'][..]).unwrap_or(s);

    matches!(s, ".inf" | ".Inf" | ".INF")
}

/// [-+]? [0-9]+ | 0o [0-7]+ | 0x [0-9a-fA-F]+
fn is_int(s: &str) -> bool
{
    if let Some(octal) = s.strip_prefix("0o")
    {
        return !octal.is_empty() && octal.bytes().all(|b| matches!(b, b'0'..=b'7'));
    }

    if let Some(hex) = s.strip_prefix("0x")
    {
        return !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit());
    }

    let digits = s.strip_prefix(&['-', '+'][..]).unwrap_or(s);

    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// [-+]? ( \. [0-9]+ | [0-9]+ ( \. [0-9]* )? ) ( [eE] [-+]? [0-9]+ )?
fn is_float(s: &str) -> bool
{
    let buffer = s.strip_prefix(&['-', '+'][..]).unwrap_or(s).as_bytes();

    let digits = |from: usize| {
        buffer[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut index = digits(0);
    let whole = index;

    if check!(buffer, index => b'.')
    {
        let fraction = digits(index + 1);

        // '.' alone, or '.' without a whole part or fraction
        if whole == 0 && fraction == 0
        {
            return false;
        }

        index += 1 + fraction;
    }
    else if whole == 0
    {
        return false;
    }

    if check!(buffer, index => b'e' | b'E')
    {
        index += 1;

        if check!(buffer, index => b'-' | b'+')
        {
            index += 1;
        }

        let exponent = digits(index);

        if exponent == 0
        {
            return false;
        }

        index += exponent;
    }

    index == buffer.len()
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn extent_block()
    {
        assert_eq!(plain_extent("key: value", false), 3);
        assert_eq!(plain_extent("a:b c: d", false), 5);
        assert_eq!(plain_extent("value  \n", false), 5);
        assert_eq!(plain_extent("value # comment", false), 5);
        assert_eq!(plain_extent("value#not comment", false), 17);
        assert_eq!(plain_extent("[a, b]", false), 6);
        assert_eq!(plain_extent("key:", false), 3);
    }

    #[test]
    fn extent_flow()
    {
        assert_eq!(plain_extent("a, b]", true), 1);
        assert_eq!(plain_extent("ab]", true), 2);
        assert_eq!(plain_extent("key:]", true), 3);
        assert_eq!(plain_extent("http://x, y", true), 8);
    }

    #[test]
    fn extent_multibyte()
    {
        assert_eq!(plain_extent("ñandú: x", false), 7);
        assert_eq!(plain_extent("é", false), 2);
        assert_eq!(plain_extent("", false), 0);
    }

    #[test]
    fn resolve_special_keys()
    {
        assert_eq!(resolve("<<"), Token::MergeKey);
        assert_eq!(resolve("="), Token::DefaultValueKey);
        assert_eq!(resolve("<<<"), Token::Text);
    }

    #[test]
    fn resolve_null_bool()
    {
        for s in &["~", "null", "Null", "NULL"]
        {
            assert_eq!(resolve(s), Token::Null, "{}", s);
        }

        assert_eq!(resolve("True"), Token::BoolTrue);
        assert_eq!(resolve("FALSE"), Token::BoolFalse);
        assert_eq!(resolve("nULL"), Token::Text);
        assert_eq!(resolve("yes"), Token::Text);
    }

    #[test]
    fn resolve_numbers()
    {
        for s in &["0", "-19", "+7", "0o17", "0x1F"]
        {
            assert_eq!(resolve(s), Token::Int, "{}", s);
        }

        for s in &["1.5", "-.5", "1.", "1e3", "+12.5E-2", "6.8523015e+5"]
        {
            assert_eq!(resolve(s), Token::Float, "{}", s);
        }

        for s in &["0o8", "0x", "1.2.3", ".", "-", "1e", "e3", "12a"]
        {
            assert_eq!(resolve(s), Token::Text, "{}", s);
        }
    }

    #[test]
    fn resolve_inf_nan()
    {
        assert_eq!(resolve(".inf"), Token::Infinity);
        assert_eq!(resolve("-.Inf"), Token::Infinity);
        assert_eq!(resolve("+.INF"), Token::Infinity);
        assert_eq!(resolve(".NaN"), Token::NaN);
        assert_eq!(resolve("-.nan"), Token::Text);
    }
}
