// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

/// The form of a request-target. The parser keeps the target opaque; this is
/// the classification for callers that route on it.
///
/// # References
/// * [RFC 9112, Section 3.2. Request Target](https://www.rfc-editor.org/rfc/rfc9112.html#name-request-target)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RequestTarget<'a> {
    Origin {
        path: &'a str,
        query: &'a str,
    },
    Absolute(&'a str),
    Authority(&'a str),
    Asterisk,
}

impl<'a> RequestTarget<'a> {
    pub fn parse(input: &'a str) -> Option<Self> {
        if input == "*" {
            return Some(Self::Asterisk);
        }

        if input.starts_with('/') {
            if let Some((path, query)) = input.split_once('?') {
                return Some(Self::Origin { path, query });
            }

            return Some(Self::Origin { path: input, query: "" });
        }

        if let Some((scheme, rest)) = input.split_once("://") {
            if !scheme.is_empty() && !rest.is_empty() && scheme.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.')) {
                return Some(Self::Absolute(input));
            }
            return None;
        }

        // authority-form = uri-host ":" port
        if let Some((host, port)) = input.rsplit_once(':') {
            if !host.is_empty() && !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) && !host.contains('/') {
                return Some(Self::Authority(input));
            }
        }

        None
    }

    /// Returns the path of the request target, or the full target for the
    /// forms without one.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        match self {
            RequestTarget::Origin { path, .. } => *path,
            RequestTarget::Absolute(string) => *string,
            RequestTarget::Authority(string) => *string,
            RequestTarget::Asterisk => "*",
        }
    }
}
