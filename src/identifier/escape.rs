//! Percent-escaping for segment values.
//!
//! Only the characters that carry meaning in the canonical grammar are
//! escaped, and only those may appear escaped. That keeps exactly one text
//! form per identifier.

use crate::error::IdentifierError;

pub const RESERVED: [char; 5] = ['/', ':', '[', ']', '%'];

pub fn is_reserved(c: char) -> bool {
    RESERVED.contains(&c)
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if is_reserved(c) {
            out.push_str(&format!("%{:02X}", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

/// Reverses [`escape`]. `input` is the whole identifier text, used for error
/// messages only.
pub fn unescape(input: &str, raw: &str) -> Result<String, IdentifierError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            if is_reserved(c) {
                return Err(IdentifierError::malformed(
                    input,
                    format!("unescaped reserved character '{c}' in '{raw}'"),
                ));
            }
            out.push(c);
            continue;
        }

        let hi = chars.next();
        let lo = chars.next();
        let decoded = match (hi, lo) {
            (Some(hi), Some(lo)) => decode_pair(hi, lo),
            _ => None,
        };
        match decoded {
            Some(reserved) => out.push(reserved),
            None => {
                return Err(IdentifierError::malformed(
                    input,
                    format!("unbalanced escape sequence in '{raw}'"),
                ))
            }
        }
    }

    Ok(out)
}

fn decode_pair(hi: char, lo: char) -> Option<char> {
    if hi.is_ascii_lowercase() || lo.is_ascii_lowercase() {
        return None;
    }
    let byte = (hi.to_digit(16)? << 4) | lo.to_digit(16)?;
    char::from_u32(byte).filter(|c| is_reserved(*c))
}

/// Values must be non-empty and free of control characters, which have no
/// escape in the canonical form.
pub fn validate_value(value: &str) -> Result<(), IdentifierError> {
    if value.is_empty() {
        return Err(IdentifierError::invalid_segment_value(
            value,
            "value is empty",
        ));
    }
    if value.chars().any(char::is_control) {
        return Err(IdentifierError::invalid_segment_value(
            value,
            "value contains a control character",
        ));
    }
    Ok(())
}
