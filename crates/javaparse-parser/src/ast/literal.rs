//! Decoding of literal token text into values.

use std::borrow::Cow;
use std::iter::Peekable;
use std::ops::Range;
use std::str::CharIndices;

/// Value of an integer literal: decimal, hex (`0x`), binary (`0b`) or
/// octal (leading `0`), with `_` separators and an optional `L` suffix.
///
/// Values up to `u64::MAX` are accepted and reinterpreted as `i64`, so
/// `0xFFFFFFFFFFFFFFFFL` is `-1` and `9223372036854775808L` (only legal
/// after unary minus) is `i64::MIN`.
pub(super) fn int_value(text: &str) -> Option<i64> {
    let text = text.strip_suffix(['l', 'L']).unwrap_or(text);
    let digits: String = text.chars().filter(|c| *c != '_').collect();

    let (radix, body) = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(bin) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        (2, bin)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits.as_str())
    };

    u64::from_str_radix(body, radix).ok().map(|v| v as i64)
}

/// Value of a floating-point literal, with an optional `f`/`F`/`d`/`D`
/// suffix. Hexadecimal literals (`0x1.8p1`) need a binary exponent.
pub(super) fn float_value(text: &str) -> Option<f64> {
    let text = text.strip_suffix(['f', 'F', 'd', 'D']).unwrap_or(text);
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => hex_float_value(hex),
        None => digits.parse().ok(),
    }
}

fn hex_float_value(body: &str) -> Option<f64> {
    let (mantissa, exponent) = body.split_once(['p', 'P'])?;
    let exponent: i32 = exponent.parse().ok()?;
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut value = 0.0f64;
    for c in whole.chars() {
        value = value * 16.0 + f64::from(c.to_digit(16)?);
    }
    let mut scale = 1.0 / 16.0;
    for c in fraction.chars() {
        value += f64::from(c.to_digit(16)?) * scale;
        scale /= 16.0;
    }
    Some(value * 2.0f64.powi(exponent))
}

/// Strip one pair of surrounding `quote` characters if present. Lexers
/// differ on whether quotes are part of the token text.
pub(super) fn strip_quotes(text: &str, quote: char) -> &str {
    text.strip_prefix(quote)
        .and_then(|t| t.strip_suffix(quote))
        .unwrap_or(text)
}

/// Decode Java escape sequences. Borrows when there is nothing to decode.
///
/// On failure returns the byte offset of the offending backslash.
pub(super) fn unescape(text: &str) -> Result<Cow<'_, str>, usize> {
    if !text.contains('\\') {
        return Ok(Cow::Borrowed(text));
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((at, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((_, escape)) = chars.next() else {
            return Err(at);
        };
        let decoded = match escape {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            's' => ' ',
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            'u' => {
                let code = unicode_escape(&mut chars).ok_or(at)?;
                let code = if HIGH_SURROGATES.contains(&code) {
                    // a high surrogate must be followed by an escaped low one
                    let mut ahead = chars.clone();
                    let low = match (ahead.next(), ahead.next()) {
                        (Some((_, '\\')), Some((_, 'u'))) => unicode_escape(&mut ahead),
                        _ => None,
                    };
                    let low = low.filter(|low| LOW_SURROGATES.contains(low)).ok_or(at)?;
                    chars = ahead;
                    0x10000 + ((code - HIGH_SURROGATES.start) << 10) + (low - LOW_SURROGATES.start)
                } else {
                    code
                };
                char::from_u32(code).ok_or(at)?
            }
            '0'..='7' => {
                // up to three octal digits, max \377
                let mut code = escape.to_digit(8).ok_or(at)?;
                let max_digits = if escape <= '3' { 3 } else { 2 };
                for _ in 1..max_digits {
                    match chars.peek().and_then(|(_, c)| c.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                char::from_u32(code).ok_or(at)?
            }
            _ => return Err(at),
        };
        out.push(decoded);
    }

    Ok(Cow::Owned(out))
}

const HIGH_SURROGATES: Range<u32> = 0xD800..0xDC00;
const LOW_SURROGATES: Range<u32> = 0xDC00..0xE000;

/// The four hex digits of a `\uXXXX` escape, read after its first `u`.
fn unicode_escape(chars: &mut Peekable<CharIndices<'_>>) -> Option<u32> {
    while chars.next_if(|(_, c)| *c == 'u').is_some() {}
    let mut code = 0u32;
    for _ in 0..4 {
        code = code * 16 + chars.next()?.1.to_digit(16)?;
    }
    Some(code)
}
