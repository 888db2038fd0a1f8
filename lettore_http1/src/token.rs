// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use lettore_http::HttpParseError;

/// A range of the input, `start..end`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Method,
    Uri,
    Version,
    HeaderName,
    HeaderValue,
    Crlf,
    EndOfInput,

    /// The input at the start of the span can't form a token. The reason says
    /// which rule was violated.
    Invalid(HttpParseError),
}

/// The smallest lexical unit of a request head.
///
/// The span of a token covers its text only: the space after the method and
/// the target, and the colon after a field name, are consumed by the scanner
/// but not part of the span.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn invalid(reason: HttpParseError, offset: usize) -> Self {
        Self::new(TokenKind::Invalid(reason), Span::empty(offset))
    }

    /// The offset in the input where this token starts.
    pub fn offset(&self) -> usize {
        self.span.start
    }
}
