// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! Various Augmented BNF (ABNF) core rules.
//!
//! # Ranges
//! Ranges are inclusive:
//! ```text
//! DIGIT       =  %x30-39
//! ```
//! is equivalent to:
//! ```text
//! DIGIT       =  "0" / "1" / "2" / "3" / "4" / "5" / "6" /
//!                "7" / "8" / "9"
//! ```
//!
//! # References
//! * [RFC 5234 Appendix B.1. Core Rules](https://www.rfc-editor.org/rfc/rfc5234.html#appendix-B.1)

/// ```text
/// CR             =  %x0D
/// ```
pub const CR: u8 = 0x0D;

/// ```text
/// LF             =  %x0A
/// ```
pub const LF: u8 = 0x0A;

/// ```text
/// SP             =  %x20
/// ```
pub const SP: u8 = 0x20;

/// ```text
/// HTAB           =  %x09
/// ```
pub const HTAB: u8 = 0x09;

/// Is the character a visible (printing) character.
///
/// ```text
/// VCHAR          =  %x21-7E
/// ```
#[inline]
pub fn is_visible_character(byte: u8) -> bool {
    matches!(byte, 0x21..=0x7E)
}

/// ```text
/// DIGIT          =  %x30-39
/// ```
#[inline]
pub fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

/// ```text
/// WSP            =  SP / HTAB
/// ```
#[inline]
pub fn is_whitespace(byte: u8) -> bool {
    byte == SP || byte == HTAB
}
