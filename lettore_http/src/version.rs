// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt;

/// The protocol versions a request-line can carry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpVersion {
    Http10,
    #[default]
    Http11,
}

impl HttpVersion {
    /// Parses an HTTP-version. The name is case-sensitive.
    ///
    /// ```text
    /// HTTP-version  = HTTP-name "/" DIGIT "." DIGIT
    /// HTTP-name     = %s"HTTP"
    /// ```
    ///
    /// # References
    /// * [RFC 9112 Section 2.3](https://www.rfc-editor.org/rfc/rfc9112.html#name-http-version)
    pub fn parse(input: &[u8]) -> Option<Self> {
        match input {
            b"HTTP/1.0" => Some(Self::Http10),
            b"HTTP/1.1" => Some(Self::Http11),
            _ => None,
        }
    }

    /// Formats the [`HttpVersion`] to a HTTP-Version, as specified by RFC 9112.
    pub fn to_http_version(&self) -> &'static str {
        match self {
            Self::Http10 => "HTTP/1.0",
            Self::Http11 => "HTTP/1.1",
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_http_version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"HTTP/1.0", Some(HttpVersion::Http10))]
    #[case(b"HTTP/1.1", Some(HttpVersion::Http11))]
    #[case(b"http/1.1", None)]
    #[case(b"HTTP/2.0", None)]
    #[case(b"HTTP/1.", None)]
    #[case(b"HTTP/1.1.1", None)]
    #[case(b"", None)]
    fn test_parse(#[case] input: &[u8], #[case] expected: Option<HttpVersion>) {
        assert_eq!(HttpVersion::parse(input), expected);
    }
}
