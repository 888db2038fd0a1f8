// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! The lexical analysis of a request head.
//!
//! The request-line and the field lines are lexically different: a
//! request-target may contain a colon, a field value may contain spaces. The
//! scanner therefore keeps a lexical mode, which advances with every token it
//! produces, and [`Scanner::begin_request`] puts it back into request-line
//! mode.
//!
//! # References
//! * [RFC 9112 Section 2.1. Message Format](https://www.rfc-editor.org/rfc/rfc9112.html#name-message-format)
//! * [RFC 9112 Section 3. Request Line](https://www.rfc-editor.org/rfc/rfc9112.html#name-request-line)
//! * [RFC 9112 Section 5. Field Syntax](https://www.rfc-editor.org/rfc/rfc9112.html#name-field-syntax)

use bytes::Bytes;

use lettore_http::{
    abnf,
    syntax,
    HttpParseError,
};

use crate::{
    Limits,
    Span,
    Token,
    TokenKind,
};

/// The length of `HTTP/x.y`.
const HTTP_VERSION_LENGTH: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Method,
    Target,
    Version,
    RequestLineEnd,
    FieldName,
    FieldValue,
    FieldLineEnd,

    /// The empty line after the fields was consumed. Anything after it is the
    /// body, which isn't ours to scan.
    Finished,

    /// An invalid token was produced, which is produced again on every call.
    Failed(Token),
}

#[derive(Clone, Debug)]
pub struct Scanner {
    source: Bytes,
    position: usize,
    line_start: usize,
    mode: Mode,
    limits: Limits,
}

impl Scanner {
    pub fn new(source: Bytes, limits: Limits) -> Self {
        Self {
            source,
            position: 0,
            line_start: 0,
            mode: Mode::Method,
            limits,
        }
    }

    /// Attach the scanner to another input, starting at its beginning.
    pub fn rebind(&mut self, source: Bytes) {
        self.source = source;
        self.position = 0;
        self.line_start = 0;
        self.mode = Mode::Method;
    }

    /// Expect a request-line at the current position.
    pub fn begin_request(&mut self) {
        self.mode = Mode::Method;
        self.line_start = self.position;
    }

    /// The number of bytes consumed so far. After the head was scanned, this
    /// is the offset of the body.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The text a token covers.
    pub fn slice(&self, span: Span) -> &[u8] {
        &self.source[span.start..span.end]
    }

    /// Produce the next token and advance past it.
    pub fn next_token(&mut self) -> Token {
        let token = match self.mode {
            Mode::Method => self.scan_method(),
            Mode::Target => self.scan_target(),
            Mode::Version => self.scan_version(),
            Mode::RequestLineEnd | Mode::FieldLineEnd => self.scan_line_end(),
            Mode::FieldName => self.scan_field_name(),
            Mode::FieldValue => self.scan_field_value(),
            Mode::Finished => self.end_of_input(),
            Mode::Failed(token) => token,
        };

        if let TokenKind::Invalid(..) = token.kind {
            self.mode = Mode::Failed(token);
        }

        token
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.position + offset).copied()
    }

    fn end_of_input(&self) -> Token {
        Token::new(TokenKind::EndOfInput, Span::empty(self.position))
    }

    /// Advance past the bytes accepted by `predicate`. At most `limit + 1`
    /// bytes are taken, which is enough to tell that the run is too long.
    fn take_while(&mut self, limit: usize, predicate: impl Fn(u8) -> bool) -> Span {
        let start = self.position;
        let length = self.source[start..].iter()
            .take(limit.saturating_add(1))
            .take_while(|byte| predicate(**byte))
            .count();
        self.position += length;
        Span::new(start, self.position)
    }

    /// ```text
    /// request-line   = method SP request-target SP HTTP-version
    /// method         = token
    /// ```
    fn scan_method(&mut self) -> Token {
        // A server SHOULD ignore at least one empty line (CRLF) received prior
        // to the request-line.
        while self.peek() == Some(abnf::CR) && self.peek_at(1) == Some(abnf::LF) {
            self.position += 2;
        }
        self.line_start = self.position;

        if self.peek().is_none() {
            return self.end_of_input();
        }

        let limit = self.limits.method.0;
        let span = self.take_while(limit, syntax::is_token_character);
        if span.len() > limit {
            return Token::invalid(HttpParseError::MethodTooLarge, span.start);
        }

        match self.peek() {
            Some(abnf::SP) if span.is_empty() => Token::invalid(HttpParseError::TokenEmpty, span.start),
            Some(abnf::SP) => {
                self.position += 1;
                self.mode = Mode::Target;
                Token::new(TokenKind::Method, span)
            }
            Some(_) => Token::invalid(HttpParseError::InvalidOctetInMethod, self.position),
            None => Token::invalid(HttpParseError::UnexpectedEndOfInput, self.position),
        }
    }

    fn scan_target(&mut self) -> Token {
        let limit = self.limits.request_target.0;
        let span = self.take_while(limit, syntax::is_request_target_character);
        if span.len() > limit {
            return Token::invalid(HttpParseError::RequestTargetTooLarge, span.start);
        }

        match self.peek() {
            Some(abnf::SP | abnf::CR | abnf::LF) if span.is_empty() => {
                Token::invalid(HttpParseError::EmptyRequestTarget, span.start)
            }
            Some(abnf::SP) => {
                self.position += 1;
                self.mode = Mode::Version;
                Token::new(TokenKind::Uri, span)
            }
            Some(abnf::CR | abnf::LF) => Token::invalid(HttpParseError::InvalidRequestTarget, self.position),
            Some(_) => Token::invalid(HttpParseError::InvalidOctetInRequestTarget, self.position),
            None => Token::invalid(HttpParseError::UnexpectedEndOfInput, self.position),
        }
    }

    /// ```text
    /// HTTP-version  = HTTP-name "/" DIGIT "." DIGIT
    /// HTTP-name     = %s"HTTP"
    /// ```
    fn scan_version(&mut self) -> Token {
        let span = self.take_while(HTTP_VERSION_LENGTH, abnf::is_visible_character);

        let is_version = matches!(self.slice(span),
            [b'H', b'T', b'T', b'P', b'/', major, b'.', minor] if abnf::is_digit(*major) && abnf::is_digit(*minor));
        if !is_version {
            return Token::invalid(HttpParseError::InvalidHttpVersion, span.start);
        }

        self.mode = Mode::RequestLineEnd;
        Token::new(TokenKind::Version, span)
    }

    fn scan_line_end(&mut self) -> Token {
        match (self.peek(), self.peek_at(1)) {
            (None, _) => self.end_of_input(),
            (Some(abnf::CR), Some(abnf::LF)) => {
                let start = self.position;
                self.position += 2;
                self.mode = Mode::FieldName;
                Token::new(TokenKind::Crlf, Span::new(start, self.position))
            }
            _ => Token::invalid(HttpParseError::InvalidCRLF, self.position),
        }
    }

    /// ```text
    /// field-line   = field-name ":" OWS field-value OWS
    /// field-name   = token
    /// ```
    fn scan_field_name(&mut self) -> Token {
        self.line_start = self.position;

        match (self.peek(), self.peek_at(1)) {
            (None, _) => return self.end_of_input(),
            (Some(abnf::CR), Some(abnf::LF)) => {
                let start = self.position;
                self.position += 2;
                self.mode = Mode::Finished;
                return Token::new(TokenKind::Crlf, Span::new(start, self.position));
            }
            (Some(abnf::CR | abnf::LF), _) => {
                return Token::invalid(HttpParseError::InvalidCRLF, self.position);
            }
            (Some(abnf::SP | abnf::HTAB), _) => {
                return Token::invalid(HttpParseError::ObsoleteLineFolding, self.position);
            }
            _ => (),
        }

        let limit = self.limits.header_line.0;
        let span = self.take_while(limit, syntax::is_token_character);
        if span.len() > limit {
            return Token::invalid(HttpParseError::HeaderTooLarge, self.line_start);
        }

        match self.peek() {
            Some(b':') if span.is_empty() => Token::invalid(HttpParseError::TokenEmpty, span.start),
            Some(b':') => {
                self.position += 1;
                self.mode = Mode::FieldValue;
                Token::new(TokenKind::HeaderName, span)
            }
            Some(abnf::SP | abnf::HTAB) => {
                let rest = &self.source[self.position..];
                let after_whitespace = rest.iter().copied().find(|byte| !abnf::is_whitespace(*byte));
                if after_whitespace == Some(b':') {
                    Token::invalid(HttpParseError::WhitespaceBeforeColon, self.position)
                } else {
                    Token::invalid(HttpParseError::HeaderDoesNotContainColon, self.line_start)
                }
            }
            Some(abnf::CR | abnf::LF) => Token::invalid(HttpParseError::HeaderDoesNotContainColon, self.line_start),
            Some(byte) => {
                let reason = syntax::validate_token(&[byte]).err().unwrap_or(HttpParseError::UnexpectedToken);
                Token::invalid(reason, self.position)
            }
            None => Token::invalid(HttpParseError::UnexpectedEndOfInput, self.position),
        }
    }

    fn scan_field_value(&mut self) -> Token {
        while self.peek().is_some_and(abnf::is_whitespace) {
            self.position += 1;
        }

        let start = self.position;
        let limit = self.limits.header_line.0;
        loop {
            if self.position - self.line_start > limit {
                return Token::invalid(HttpParseError::HeaderTooLarge, self.line_start);
            }

            match self.peek() {
                Some(abnf::CR | abnf::LF) | None => break,
                Some(byte) if syntax::is_field_value_character(byte) || abnf::is_whitespace(byte) => self.position += 1,
                Some(_) => return Token::invalid(HttpParseError::FieldValueContainsInvalidCharacters, self.position),
            }
        }

        let value = syntax::trim_optional_whitespace(&self.source[start..self.position]);
        let span = Span::new(start, start + value.len());

        self.mode = Mode::FieldLineEnd;
        Token::new(TokenKind::HeaderValue, span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scanner(input: &'static [u8]) -> Scanner {
        Scanner::new(Bytes::from_static(input), Limits::default())
    }

    /// Scan until the end of the input or the first invalid token.
    fn scan_all(input: &'static [u8]) -> Vec<(TokenKind, &'static [u8])> {
        let mut scanner = scanner(input);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.next_token();
            tokens.push((token.kind, &input[token.span.start..token.span.end]));
            if matches!(token.kind, TokenKind::EndOfInput | TokenKind::Invalid(..)) {
                return tokens;
            }
        }
    }

    #[test]
    fn scans_simple_request() {
        let tokens = scan_all(b"GET /index.html HTTP/1.1\r\nHost:  example.com \r\nAccept:\r\n\r\nbody");
        assert_eq!(tokens, vec![
            (TokenKind::Method, &b"GET"[..]),
            (TokenKind::Uri, &b"/index.html"[..]),
            (TokenKind::Version, &b"HTTP/1.1"[..]),
            (TokenKind::Crlf, &b"\r\n"[..]),
            (TokenKind::HeaderName, &b"Host"[..]),
            (TokenKind::HeaderValue, &b"example.com"[..]),
            (TokenKind::Crlf, &b"\r\n"[..]),
            (TokenKind::HeaderName, &b"Accept"[..]),
            (TokenKind::HeaderValue, &b""[..]),
            (TokenKind::Crlf, &b"\r\n"[..]),
            (TokenKind::Crlf, &b"\r\n"[..]),
            (TokenKind::EndOfInput, &b""[..]),
        ]);
    }

    #[test]
    fn stops_before_body() {
        let input = b"POST / HTTP/1.1\r\n\r\nhello";
        let mut scanner = scanner(input);
        while scanner.next_token().kind != TokenKind::EndOfInput {}
        assert_eq!(scanner.position(), input.len() - b"hello".len());
        assert_eq!(scanner.next_token().kind, TokenKind::EndOfInput);
        assert_eq!(scanner.position(), input.len() - b"hello".len());
    }

    #[test]
    fn skips_leading_empty_lines() {
        let tokens = scan_all(b"\r\n\r\nGET / HTTP/1.0\r\n\r\n");
        assert_eq!(tokens[0], (TokenKind::Method, &b"GET"[..]));
    }

    #[test]
    fn empty_input_is_end_of_input() {
        assert_eq!(scan_all(b""), vec![(TokenKind::EndOfInput, &b""[..])]);
    }

    #[rstest]
    #[case(b"GET/ HTTP/1.1\r\n\r\n", HttpParseError::InvalidOctetInMethod)]
    #[case(b" / HTTP/1.1\r\n\r\n", HttpParseError::TokenEmpty)]
    #[case(b"THIS-METHOD-IS-WAY-TOO-LONG-TO-BE-ACCEPTED / HTTP/1.1\r\n\r\n", HttpParseError::MethodTooLarge)]
    #[case(b"GET  HTTP/1.1\r\n\r\n", HttpParseError::EmptyRequestTarget)]
    #[case(b"GET /\r\n\r\n", HttpParseError::InvalidRequestTarget)]
    #[case(b"GET /caf\xC3\xA9 HTTP/1.1\r\n\r\n", HttpParseError::InvalidOctetInRequestTarget)]
    #[case(b"GET / HTTP/1.1x\r\n\r\n", HttpParseError::InvalidHttpVersion)]
    #[case(b"GET / http/1.1\r\n\r\n", HttpParseError::InvalidHttpVersion)]
    #[case(b"GET / HTTP/1.1\rHost: a\r\n\r\n", HttpParseError::InvalidCRLF)]
    #[case(b"GET / HTTP/1.1\nHost: a\r\n\r\n", HttpParseError::InvalidCRLF)]
    #[case(b"GET / HTTP/1.1\r\nHost a\r\n\r\n", HttpParseError::HeaderDoesNotContainColon)]
    #[case(b"GET / HTTP/1.1\r\nHost\r\n\r\n", HttpParseError::HeaderDoesNotContainColon)]
    #[case(b"GET / HTTP/1.1\r\nHost : a\r\n\r\n", HttpParseError::WhitespaceBeforeColon)]
    #[case(b"GET / HTTP/1.1\r\n: a\r\n\r\n", HttpParseError::TokenEmpty)]
    #[case(b"GET / HTTP/1.1\r\nBad/Name: a\r\n\r\n", HttpParseError::TokenContainsDelimiter)]
    #[case(b"GET / HTTP/1.1\r\nX-A: a\r\n folded\r\n\r\n", HttpParseError::ObsoleteLineFolding)]
    #[case(b"GET / HTTP/1.1\r\nX-A: a\x00b\r\n\r\n", HttpParseError::FieldValueContainsInvalidCharacters)]
    #[case(b"GET / HTTP/1.1\r\nX-A: a\r\r\n\r\n", HttpParseError::InvalidCRLF)]
    #[case(b"GET / HTTP/1.1\r\n\r", HttpParseError::InvalidCRLF)]
    #[case(b"GET", HttpParseError::UnexpectedEndOfInput)]
    fn rejects_malformed_input(#[case] input: &'static [u8], #[case] expected: HttpParseError) {
        let tokens = scan_all(input);
        assert_eq!(tokens.last().unwrap().0, TokenKind::Invalid(expected), "tokens: {tokens:?}");
    }

    #[test]
    fn invalid_token_is_sticky() {
        let mut scanner = scanner(b"GET /\x01 HTTP/1.1\r\n\r\n");
        assert_eq!(scanner.next_token().kind, TokenKind::Method);
        let invalid = scanner.next_token();
        assert_eq!(invalid.kind, TokenKind::Invalid(HttpParseError::InvalidOctetInRequestTarget));
        assert_eq!(invalid.offset(), 5);
        assert_eq!(scanner.next_token(), invalid);
    }

    #[test]
    fn header_line_limit() {
        let limits = Limits {
            header_line: crate::MaximumLength(8),
            ..Limits::default()
        };
        let mut scanner = Scanner::new(Bytes::from_static(b"GET / HTTP/1.1\r\nX-Long: 0123456789\r\n\r\n"), limits);
        let kinds: Vec<_> = std::iter::from_fn(|| Some(scanner.next_token().kind)).take(6).collect();
        assert_eq!(kinds[5], TokenKind::Invalid(HttpParseError::HeaderTooLarge));
    }

    #[test]
    fn rebind_starts_over() {
        let mut scanner = scanner(b"GET");
        assert!(matches!(scanner.next_token().kind, TokenKind::Invalid(..)));

        scanner.rebind(Bytes::from_static(b"PUT /x HTTP/1.1\r\n\r\n"));
        assert_eq!(scanner.position(), 0);
        let method = scanner.next_token();
        assert_eq!(method.kind, TokenKind::Method);
        assert_eq!(scanner.slice(method.span), b"PUT");
    }
}
