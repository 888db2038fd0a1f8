// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! The grammar of a request head, as a state machine over the tokens of the
//! [`Scanner`].
//!
//! ```text
//! Start -> Method -> Target -> Version -> RequestLineEnd
//!     RequestLineEnd -> HeaderName | HeadersDone
//!     HeaderName -> HeaderColon -> HeaderValue -> HeaderLineEnd
//!     HeaderLineEnd -> HeaderName | HeadersDone
//!     HeadersDone -> Accept
//! ```
//! An unexpected or invalid token moves any state to `Error`. Both `Accept`
//! and `Error` are terminal.

use log::{
    debug,
    trace,
};

use lettore_http::{
    Error,
    ErrorCode,
    HeaderName,
    HeaderValue,
    HttpParseError,
    HttpVersion,
    Method,
    Request,
};

use strum_macros::AsRefStr;

use crate::{
    ParserConfig,
    Scanner,
    Span,
    Token,
    TokenKind,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, AsRefStr)]
pub enum State {
    Start,
    Method,
    Target,
    Version,
    RequestLineEnd,
    HeaderName,

    /// The colon after a field name. The scanner consumes it together with
    /// the name, so this state is entered without reading a token.
    HeaderColon,
    HeaderValue,
    HeaderLineEnd,
    HeadersDone,
    Accept,
    Error,
}

impl State {
    pub fn is_terminal(self) -> bool {
        matches!(self, State::Accept | State::Error)
    }
}

type Rejection = (HttpParseError, usize);

#[derive(Debug)]
pub struct Parser {
    scanner: Scanner,
    config: ParserConfig,
    state: State,
    failure: Option<Rejection>,

    content_length: Option<u64>,
    host_count: usize,
    pending_name: Option<Span>,
}

impl Parser {
    pub fn new(scanner: Scanner, config: ParserConfig) -> Self {
        Self {
            scanner,
            config,
            state: State::Start,
            failure: None,
            content_length: None,
            host_count: 0,
            pending_name: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// The number of bytes the request head occupied, i.e. the offset of the
    /// body. Only meaningful once the request was accepted.
    pub fn head_length(&self) -> Option<usize> {
        (self.state == State::Accept).then(|| self.scanner.position())
    }

    /// Walk the grammar to a terminal state, filling in `request`.
    ///
    /// On a rejection, the contents of `request` are unspecified.
    pub fn parse(&mut self, request: &mut Request) -> Result<(), Error> {
        while !self.state.is_terminal() {
            self.step(request);
        }

        match self.failure {
            Some((reason, offset)) => Err(Error::parse(reason, offset)),
            None => Ok(()),
        }
    }

    /// Apply a single transition.
    fn step(&mut self, request: &mut Request) {
        if self.state == State::HeaderName {
            self.transition(State::HeaderColon);
            return;
        }

        let token = self.scanner.next_token();
        let next = match (self.state, token.kind) {
            (_, TokenKind::Invalid(reason)) => Err((reason, token.offset())),

            (State::Start, TokenKind::Method) => self.on_method(request, token).map(|()| State::Method),
            (State::Method, TokenKind::Uri) => self.on_target(request, token).map(|()| State::Target),
            (State::Target, TokenKind::Version) => self.on_version(request, token).map(|()| State::Version),
            (State::Version, TokenKind::Crlf) => Ok(State::RequestLineEnd),

            (State::RequestLineEnd | State::HeaderLineEnd, TokenKind::HeaderName) => {
                self.on_header_name(request, token).map(|()| State::HeaderName)
            }
            (State::RequestLineEnd | State::HeaderLineEnd, TokenKind::Crlf) => Ok(State::HeadersDone),

            (State::HeaderColon, TokenKind::HeaderValue) => self.on_header_value(request, token).map(|()| State::HeaderValue),
            (State::HeaderValue, TokenKind::Crlf) => Ok(State::HeaderLineEnd),

            (State::HeadersDone, TokenKind::EndOfInput) => self.on_headers_done(request, token).map(|()| State::Accept),

            (_, TokenKind::EndOfInput) => Err((HttpParseError::UnexpectedEndOfInput, token.offset())),
            _ => Err((HttpParseError::UnexpectedToken, token.offset())),
        };

        match next {
            Ok(state) => self.transition(state),
            Err((reason, offset)) => self.reject(reason, offset),
        }
    }

    fn transition(&mut self, next: State) {
        trace!("{} -> {}", self.state.as_ref(), next.as_ref());
        self.state = next;
    }

    fn reject(&mut self, reason: HttpParseError, offset: usize) {
        debug!("rejecting request in state {}: {reason} at offset {offset} ({})",
            self.state.as_ref(), ErrorCode::SyntaxError.description());
        self.failure = Some((reason, offset));
        self.state = State::Error;
    }

    /// The text of a token. The scanner only produces tokens of ASCII
    /// characters, except field values which may carry obs-text.
    fn text(&self, token: Token, reason: HttpParseError) -> Result<&str, Rejection> {
        std::str::from_utf8(self.scanner.slice(token.span))
            .map_err(|_| (reason, token.offset()))
    }

    fn on_method(&mut self, request: &mut Request, token: Token) -> Result<(), Rejection> {
        let text = self.text(token, HttpParseError::InvalidOctetInMethod)?;

        request.method = match Method::registered(text) {
            Some(method) => method,
            None if self.config.is_strict() => return Err((HttpParseError::UnknownMethod, token.offset())),
            None => Method::Extension(text.to_owned()),
        };

        trace!("parsed method {}", request.method);
        Ok(())
    }

    fn on_target(&mut self, request: &mut Request, token: Token) -> Result<(), Rejection> {
        let text = self.text(token, HttpParseError::InvalidOctetInRequestTarget)?;
        request.target.push_str(text);
        Ok(())
    }

    fn on_version(&mut self, request: &mut Request, token: Token) -> Result<(), Rejection> {
        request.version = HttpVersion::parse(self.scanner.slice(token.span))
            .ok_or((HttpParseError::InvalidHttpVersion, token.offset()))?;
        Ok(())
    }

    fn on_header_name(&mut self, request: &mut Request, token: Token) -> Result<(), Rejection> {
        if request.headers.len() >= self.config.limits.header_count {
            return Err((HttpParseError::TooManyHeaders, token.offset()));
        }

        self.pending_name = Some(token.span);
        Ok(())
    }

    fn on_header_value(&mut self, request: &mut Request, token: Token) -> Result<(), Rejection> {
        let Some(name_span) = self.pending_name.take() else {
            return Err((HttpParseError::UnexpectedToken, token.offset()));
        };

        let name_token = Token::new(TokenKind::HeaderName, name_span);
        let name = self.text(name_token, HttpParseError::TokenContainsNonVisibleAscii)?.to_owned();
        let value = HeaderValue::from(self.scanner.slice(token.span));

        if HeaderName::ContentLength.matches(&name) {
            self.check_content_length(&value, token.offset())?;
        } else if HeaderName::Host.matches(&name) {
            self.host_count += 1;
            if self.config.is_strict() && self.host_count > 1 {
                return Err((HttpParseError::DuplicateHost, name_span.start));
            }
        }

        request.headers.append(name, value);
        Ok(())
    }

    /// ```text
    /// Content-Length = 1*DIGIT
    /// ```
    /// Several fields are allowed as long as they carry the same value.
    fn check_content_length(&mut self, value: &HeaderValue, offset: usize) -> Result<(), Rejection> {
        let length = value.parse_number()
            .ok_or((HttpParseError::InvalidContentLength, offset))?;

        match self.content_length {
            Some(previous) if previous != length => Err((HttpParseError::ConflictingContentLength, offset)),
            Some(_) if self.config.is_strict() => Err((HttpParseError::DuplicateContentLength, offset)),
            _ => {
                self.content_length = Some(length);
                Ok(())
            }
        }
    }

    fn on_headers_done(&mut self, request: &mut Request, token: Token) -> Result<(), Rejection> {
        // A client MUST send a Host header field in all HTTP/1.1 request
        // messages.
        if self.config.is_strict() && request.version == HttpVersion::Http11 && self.host_count == 0 {
            return Err((HttpParseError::MissingHost, token.offset()));
        }

        trace!("parsed request head of {} bytes with {} fields", token.offset(), request.headers.len());
        Ok(())
    }
}
