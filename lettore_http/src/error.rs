// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! The outcome taxonomy of request parsing.
//!
//! Every outcome is an [`ErrorCode`] from a closed registry, paired with a
//! one-line description. Syntax errors additionally carry an
//! [`HttpParseError`] explaining which rule of the grammar was violated, so
//! that callers can pick a response and log the reason.

use std::{
    collections::TryReserveError,
    fmt,
    io,
};

use lazy_static::lazy_static;
use strum::{
    EnumCount,
    EnumMessage,
    IntoEnumIterator,
};
use strum_macros::AsRefStr;

/// The registry of parse outcomes. `Success` is the only success code; the
/// others are failures. [`ErrorCode::COUNT`] marks the end of the valid range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(AsRefStr, strum_macros::EnumCount, strum_macros::EnumIter, strum_macros::EnumMessage, strum_macros::FromRepr)]
#[repr(u8)]
pub enum ErrorCode {
    #[strum(message = "the request head was accepted")]
    Success = 0,

    #[strum(message = "the request head violates the HTTP/1.1 grammar")]
    SyntaxError,

    #[strum(message = "memory for the parse could not be reserved")]
    ResourceExhausted,

    #[strum(message = "the input source could not be read")]
    IoFailure,
}

lazy_static! {
    static ref DESCRIPTIONS: [&'static str; ErrorCode::COUNT] = {
        let mut table = [""; ErrorCode::COUNT];
        for code in ErrorCode::iter() {
            table[code as usize] = code.get_message().unwrap_or_default();
        }
        table
    };
}

impl ErrorCode {
    /// The human-readable description of this code.
    #[must_use]
    pub fn description(self) -> &'static str {
        DESCRIPTIONS[self as usize]
    }

    /// Look up the description of a raw code value, as e.g. stored in a log
    /// record or received from another layer.
    #[must_use]
    pub fn describe_raw(raw: u8) -> Option<&'static str> {
        if usize::from(raw) >= ErrorCode::COUNT {
            return None;
        }

        ErrorCode::from_repr(raw).map(ErrorCode::description)
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        self == ErrorCode::Success
    }

    #[must_use]
    pub fn is_failure(self) -> bool {
        !self.is_success()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// An error that can occur while parsing an HTTP request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, thiserror::Error)]
pub enum HttpParseError {
    /// A header line was found that contains no colon between the name and
    /// the value.
    ///
    /// ## Example:
    /// ```text
    /// Content-Type
    /// ```
    #[error("header line does not contain a colon")]
    HeaderDoesNotContainColon,

    /// The header line (name + value) was too large.
    #[error("header line is too large")]
    HeaderTooLarge,

    /// The request contained more header lines than allowed.
    #[error("too many header lines")]
    TooManyHeaders,

    /// The `Content-Length` field was malformed, meaning it contained non-numeric
    /// characters, was too large, was negative, or was the empty string.
    ///
    /// ## Example:
    /// ```text
    /// Content-Length: 123abc
    /// ```
    #[error("malformed Content-Length")]
    InvalidContentLength,

    /// The `Content-Length` field occurred multiple times with different
    /// values, making the message framing ambiguous.
    ///
    /// ## Example:
    /// ```text
    /// Content-Length: 5
    /// Content-Length: 6
    /// ```
    #[error("conflicting Content-Length values")]
    ConflictingContentLength,

    /// The `Content-Length` field occurred multiple times with the same
    /// value. Only rejected by strict parsers.
    #[error("duplicate Content-Length")]
    DuplicateContentLength,

    /// The line ended with CR but not followed by an LF, or with a LF that
    /// wasn't preceded by a CR.
    ///
    /// ## Example:
    /// ```text
    /// Content-Length: 123\r
    /// ```
    #[error("line is not terminated by CRLF")]
    InvalidCRLF,

    /// The HTTP version was invalid.
    ///
    /// ## Syntax
    /// Only the following are valid, and they are case-sensitive:
    /// * `HTTP/1.0`
    /// * `HTTP/1.1`
    ///
    /// ## Examples:
    /// ```text
    /// HTTP/1.
    /// http/1.1
    /// HTTP/2.0
    /// H/1.1
    /// ```
    #[error("unsupported or malformed HTTP version")]
    InvalidHttpVersion,

    /// The request-line didn't have a request-target between the two spaces.
    ///
    /// ## Example:
    /// ```text
    /// GET  HTTP/1.1
    /// ```
    #[error("empty request-target")]
    EmptyRequestTarget,

    /// The request-line wasn't followed by a single space at a place where the
    /// grammar requires one.
    #[error("malformed request-target")]
    InvalidRequestTarget,

    /// The method was too large.
    ///
    /// ## Example:
    /// ```
    /// // Maximum = 16, length = 53
    /// ```
    /// ```text
    /// THIS-IS-A-VERY-LONG-METHOD-CONTAINING-MANY-CHARACTERS / HTTP/1.1
    /// ```
    #[error("method is too large")]
    MethodTooLarge,

    /// The request-target (e.g. URI) was too large.
    #[error("request-target is too large")]
    RequestTargetTooLarge,

    #[error("token contains a delimiter")]
    TokenContainsDelimiter,

    #[error("token contains a non-visible character")]
    TokenContainsNonVisibleAscii,

    #[error("token contains whitespace")]
    TokenContainsWhitespace,

    #[error("token is empty")]
    TokenEmpty,

    #[error("field value contains invalid characters")]
    FieldValueContainsInvalidCharacters,

    #[error("invalid octet in method")]
    InvalidOctetInMethod,

    #[error("invalid octet in request-target")]
    InvalidOctetInRequestTarget,

    /// A header line started with whitespace, continuing the previous value
    /// (`obs-fold`). This isn't supported.
    ///
    /// ## Example:
    /// ```text
    /// X-Folded: first
    ///   second
    /// ```
    #[error("obsolete line folding is not supported")]
    ObsoleteLineFolding,

    /// Whitespace between the field name and the colon.
    ///
    /// ## Example:
    /// ```text
    /// Host : example.com
    /// ```
    #[error("whitespace between field name and colon")]
    WhitespaceBeforeColon,

    /// The method isn't a registered method, and the parser is strict.
    #[error("unknown method")]
    UnknownMethod,

    /// An HTTP/1.1 request without a `Host` field, rejected by strict parsers.
    #[error("missing Host")]
    MissingHost,

    /// A request with more than one `Host` field, rejected by strict parsers.
    #[error("duplicate Host")]
    DuplicateHost,

    /// The input ended before the empty line that terminates the head.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A token appeared where the grammar doesn't allow it.
    #[error("unexpected token")]
    UnexpectedToken,
}

/// The error of a single parse attempt. It never outlives the attempt: the
/// driver can be used for the next request right away.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{reason} (at offset {offset})")]
    Parse {
        reason: HttpParseError,
        offset: usize,
    },

    #[error("resource exhausted: {0}")]
    ResourceExhausted(#[from] TryReserveError),

    #[error("input source unreadable: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn parse(reason: HttpParseError, offset: usize) -> Self {
        Self::Parse { reason, offset }
    }

    /// The registry code of this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse { .. } => ErrorCode::SyntaxError,
            Self::ResourceExhausted(..) => ErrorCode::ResourceExhausted,
            Self::Io(..) => ErrorCode::IoFailure,
        }
    }

    /// The violated grammar rule, if this is a syntax error.
    #[must_use]
    pub fn reason(&self) -> Option<HttpParseError> {
        match self {
            Self::Parse { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}
