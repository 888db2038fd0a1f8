// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{
    borrow::Cow,
    fmt,
};

use crate::abnf;

/// The value of a header field, as received.
///
/// Field values are US-ASCII by convention, but `obs-text` (octets above
/// `0x7F`) is allowed by the grammar, so the value is kept as bytes and only
/// interpreted as a string on request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeaderValue(Vec<u8>);

impl HeaderValue {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the value as a string, if it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Returns the value as a string, replacing invalid sequences.
    #[must_use]
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses the value as a non-negative decimal number, as used by
    /// `Content-Length`.
    ///
    /// ```text
    /// Content-Length = 1*DIGIT
    /// ```
    #[must_use]
    pub fn parse_number(&self) -> Option<u64> {
        if self.0.is_empty() {
            return None;
        }

        let mut number: u64 = 0;
        for byte in &self.0 {
            if !abnf::is_digit(*byte) {
                return None;
            }

            number = number.checked_mul(10)?.checked_add(u64::from(byte - b'0'))?;
        }

        Some(number)
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<&[u8]> for HeaderValue {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl From<Vec<u8>> for HeaderValue {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}
