// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! This module contains the character classes and validators of the HTTP
//! message grammar, independent of how the message is framed.
//!
//! # References
//! * [RFC 9110](https://www.rfc-editor.org/rfc/rfc9110.html)
//! * [RFC 9112](https://www.rfc-editor.org/rfc/rfc9112.html)

use crate::{
    abnf,
    HttpParseError,
};

/// Validate a field character. Note that in HTTP, UTF-8 is optional (US-ASCII),
/// and isn't used before validating the content.
///
/// ```text
/// field-vchar    = VCHAR / obs-text
/// ```
#[inline]
pub fn is_field_value_character(byte: u8) -> bool {
    abnf::is_visible_character(byte) || is_obs_text(byte)
}

/// Is the given character a character that can occur anywhere in the
/// request-target? The target is kept opaque, so only the lexical boundary of
/// it is checked: a target is a run of visible US-ASCII characters.
///
/// # [HTTP/1.1 (RFC 9112) Definitions](https://www.rfc-editor.org/rfc/rfc9112.html#name-request-target)
/// ```text
/// request-target = origin-form
///                / absolute-form
///                / authority-form
///                / asterisk-form
/// origin-form    = absolute-path [ "?" query ]
/// absolute-form  = absolute-URI
/// authority-form = uri-host ":" port
/// asterisk-form  = "*"
/// ```
#[inline]
pub fn is_request_target_character(byte: u8) -> bool {
    abnf::is_visible_character(byte)
}

/// Is the given character a character that can occur (anywhere) in the string?
/// This is useful for early exits, but use [`validate_token`] after the
/// token is parsed.
///
/// ```text
/// tchar          = "!" / "#" / "$" / "%" / "&" / "'" / "*"
///                / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
///                / DIGIT / ALPHA
///                ; any VCHAR, except delimiters
/// ```
#[inline]
pub fn is_token_character(byte: u8) -> bool {
    validate_token_character(byte).is_ok()
}

/// Validate obs-text.
/// ```text
/// obs-text       = %x80-FF
/// ```
#[inline]
fn is_obs_text(byte: u8) -> bool {
    matches!(byte, 0x80..=0xFF)
}

pub fn validate_token(value: &[u8]) -> Result<(), HttpParseError> {
    if value.is_empty() {
        return Err(HttpParseError::TokenEmpty);
    }

    for character in value {
        validate_token_character(*character)?;
    }

    Ok(())
}

/// Validate a token character.
///
/// ```text
/// tchar          = "!" / "#" / "$" / "%" / "&" / "'" / "*"
///                / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
///                / DIGIT / ALPHA
///                ; any VCHAR, except delimiters
/// ```
fn validate_token_character(character: u8) -> Result<(), HttpParseError> {
    match character {
        b' ' | b'\t' => Err(HttpParseError::TokenContainsWhitespace),

        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' |
        b'^' | b'_' | b'`' | b'|' | b'~' => Ok(()),

        b'0'..=b'9' => Ok(()),
        b'A'..=b'Z' => Ok(()),
        b'a'..=b'z' => Ok(()),

        b'"' | b'(' | b')' | b',' | b'/' | b':' | b';' | b'<' | b'=' | b'>' |
        b'?' | b'@' | b'[' | b'\\' | b']' | b'{' | b'}' => Err(HttpParseError::TokenContainsDelimiter),

        _ => Err(HttpParseError::TokenContainsNonVisibleAscii),
    }
}

/// Strip the optional whitespace (`OWS`) around a field value.
///
/// ```text
/// field-line   = field-name ":" OWS field-value OWS
/// ```
pub fn trim_optional_whitespace(value: &[u8]) -> &[u8] {
    let start = value.iter().position(|byte| !abnf::is_whitespace(*byte)).unwrap_or(value.len());
    let end = value.iter().rposition(|byte| !abnf::is_whitespace(*byte)).map_or(start, |index| index + 1);
    &value[start..end]
}
