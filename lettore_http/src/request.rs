// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt;

use crate::{
    HeaderMap,
    HeaderName,
    HeaderValue,
    HttpVersion,
    Method,
    RequestTarget,
};

/// The head of a request: the request-line and the header fields. The body,
/// if any, is left to the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Request {
    pub method: Method,

    /// The request-target, opaque and exactly as received.
    pub target: String,
    pub version: HttpVersion,
    pub headers: HeaderMap,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the model to its empty state, so that nothing of a previous
    /// request remains.
    pub fn reset(&mut self) {
        self.method = Method::default();
        self.target.clear();
        self.version = HttpVersion::default();
        self.headers.clear();
    }

    /// The length of the body announced by `Content-Length`.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.headers.get(HeaderName::ContentLength)
            .and_then(HeaderValue::parse_number)
    }

    /// Classify the request-target.
    #[must_use]
    pub fn target_form(&self) -> Option<RequestTarget<'_>> {
        RequestTarget::parse(&self.target)
    }

    /// Writes the canonical form of the head, which parses back to an equal
    /// request:
    /// ```text
    /// METHOD target VERSION CRLF
    /// *( Name ":" SP Value CRLF )
    /// CRLF
    /// ```
    pub fn write_canonical(&self, output: &mut Vec<u8>) {
        output.extend_from_slice(self.method.as_str().as_bytes());
        output.push(b' ');
        output.extend_from_slice(self.target.as_bytes());
        output.push(b' ');
        output.extend_from_slice(self.version.to_http_version().as_bytes());
        output.extend_from_slice(b"\r\n");

        for field in &self.headers {
            output.extend_from_slice(field.name().as_bytes());
            output.extend_from_slice(b": ");
            output.extend_from_slice(field.value().as_bytes());
            output.extend_from_slice(b"\r\n");
        }

        output.extend_from_slice(b"\r\n");
    }

    #[must_use]
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(256);
        self.write_canonical(&mut output);
        output
    }
}

/// The canonical form for logging. Values that aren't UTF-8 are rendered
/// lossily; use [`Request::write_canonical`] for the exact bytes.
impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.method, self.target, self.version)?;
        for field in &self.headers {
            write!(f, "{}: {}\r\n", field.name(), field.value())?;
        }
        f.write_str("\r\n")
    }
}
