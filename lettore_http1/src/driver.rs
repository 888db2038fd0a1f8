// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{
    io::BufRead,
    sync::Arc,
};

use bytes::Bytes;

use lettore_http::{
    Error,
    ErrorCode,
    Request,
};

use log::{
    debug,
    warn,
};

use tokio::io::AsyncBufReadExt;

use crate::{
    read_request_head,
    read_request_head_async,
    ParseStatistics,
    Parser,
    ParserConfig,
    Scanner,
};

/// Runs parses and owns what they produce.
///
/// Every parse starts from scratch: the scanner and parser of the previous
/// call are dropped first, and the request model is reset, so nothing of an
/// earlier request can leak into the next one. A driver expects one complete
/// request head per call; the readers in this crate can accumulate one from
/// a stream.
#[derive(Debug)]
pub struct Driver {
    config: ParserConfig,
    parser: Option<Parser>,
    request: Request,
    status: ErrorCode,
    statistics: Option<Arc<ParseStatistics>>,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl Driver {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            parser: None,
            request: Request::new(),
            status: ErrorCode::SyntaxError,
            statistics: None,
        }
    }

    /// Record the outcome of every parse in `statistics`.
    #[must_use]
    pub fn with_statistics(mut self, statistics: Arc<ParseStatistics>) -> Self {
        self.statistics = Some(statistics);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a request head from text.
    pub fn parse(&mut self, text: &str) -> Result<&Request, Error> {
        self.parse_bytes(Bytes::copy_from_slice(text.as_bytes()))
    }

    /// Parse a request head from a buffer. Bytes after the head are ignored,
    /// see [`Driver::head_length`].
    pub fn parse_bytes(&mut self, input: impl Into<Bytes>) -> Result<&Request, Error> {
        self.teardown();
        let result = self.run(input.into());
        self.finish(result)
    }

    /// Read a request head from `reader` and parse it. The body is left in
    /// the reader.
    pub fn parse_reader<R>(&mut self, reader: &mut R) -> Result<&Request, Error>
            where R: BufRead {
        self.teardown();
        let result = read_request_head(reader, self.config.limits.head)
            .and_then(|head| self.run(Bytes::from(head)));
        self.finish(result)
    }

    /// The asynchronous counterpart of [`Driver::parse_reader`].
    pub async fn parse_async<R>(&mut self, reader: &mut R) -> Result<&Request, Error>
            where R: AsyncBufReadExt + Unpin {
        self.teardown();
        let result = match read_request_head_async(reader, self.config.limits.head).await {
            Ok(head) => self.run(Bytes::from(head)),
            Err(error) => Err(error),
        };
        self.finish(result)
    }

    /// Drop everything the previous parse left behind. Called before any
    /// input is read, so a failing read can't expose the previous request.
    fn teardown(&mut self) {
        self.parser = None;
        self.request.reset();
        self.status = ErrorCode::SyntaxError;
    }

    /// Build a new scanner and parser over `input` and run them.
    fn run(&mut self, input: Bytes) -> Result<(), Error> {
        if let Err(error) = self.request.headers.try_reserve(self.config.header_capacity) {
            warn!("failed to reserve {} header slots: {error}", self.config.header_capacity);
            return Err(error.into());
        }

        let mut scanner = Scanner::new(input, self.config.limits);
        scanner.begin_request();

        let parser = self.parser.insert(Parser::new(scanner, self.config));
        parser.parse(&mut self.request)
    }

    fn finish(&mut self, result: Result<(), Error>) -> Result<&Request, Error> {
        if let Some(statistics) = &self.statistics {
            statistics.record(&result);
        }

        match result {
            Ok(()) => {
                self.status = ErrorCode::Success;
                debug!("accepted {} {}", self.request.method, self.request.target);
                Ok(&self.request)
            }
            Err(error) => {
                self.status = error.code();
                Err(error)
            }
        }
    }

    /// The outcome of the last parse. Before the first parse, this is a
    /// failure.
    pub fn status(&self) -> ErrorCode {
        self.status
    }

    /// The request of the last parse, if it was accepted.
    pub fn request(&self) -> Option<&Request> {
        self.status.is_success().then_some(&self.request)
    }

    /// Move the accepted request out of the driver. Afterwards the driver
    /// holds no request, and [`Driver::head_length`] is `None`.
    pub fn take_request(&mut self) -> Option<Request> {
        if !self.status.is_success() {
            return None;
        }

        self.status = ErrorCode::SyntaxError;
        self.parser = None;
        Some(std::mem::take(&mut self.request))
    }

    /// The number of bytes of the last accepted input that formed the head.
    /// The body starts at this offset.
    pub fn head_length(&self) -> Option<usize> {
        self.parser.as_ref()?.head_length()
    }

    /// The parser of the last parse.
    pub fn parser(&self) -> Option<&Parser> {
        self.parser.as_ref()
    }
}
