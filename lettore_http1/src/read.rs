// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! Accumulating a request head from a stream, so that the parser gets one
//! complete buffer. Reading stops after the empty line that ends the head,
//! which leaves the body in the stream.

use std::io::{
    BufRead,
    Read,
};

use lettore_http::{
    abnf,
    Error,
    HttpParseError,
};

use log::trace;

use tokio::io::{
    AsyncBufReadExt,
    AsyncReadExt,
};

use crate::MaximumLength;

/// The number of bytes reserved before the first read.
const INITIAL_CAPACITY: usize = 1024;

enum Progress {
    More,
    Complete,
}

struct HeadBuffer {
    head: Vec<u8>,
    limit: usize,
    seen_request_line: bool,
}

impl HeadBuffer {
    fn new(limit: MaximumLength) -> Result<Self, Error> {
        let mut head = Vec::new();
        head.try_reserve(INITIAL_CAPACITY.min(limit.0))?;
        Ok(Self {
            head,
            limit: limit.0,
            seen_request_line: false,
        })
    }

    /// The number of bytes the next read may take. One more than fits, so an
    /// overlong head is noticed.
    fn read_limit(&self) -> u64 {
        (self.limit - self.head.len()) as u64 + 1
    }

    /// Inspect the line read at `start`, which is `read` bytes long.
    fn after_read(&mut self, start: usize, read: usize) -> Result<Progress, Error> {
        if self.head.len() > self.limit {
            return Err(Error::parse(HttpParseError::HeaderTooLarge, self.limit));
        }

        let line = &self.head[start..];
        if read == 0 || line.last() != Some(&abnf::LF) {
            trace!("end of stream after {} bytes of request head", self.head.len());
            return Ok(Progress::Complete);
        }

        if line == b"\r\n" || line == b"\n" {
            // Empty lines before the request-line are skipped by the scanner.
            return Ok(if self.seen_request_line { Progress::Complete } else { Progress::More });
        }

        self.seen_request_line = true;
        Ok(Progress::More)
    }

    fn finish(self) -> Vec<u8> {
        trace!("read request head of {} bytes", self.head.len());
        self.head
    }
}

/// Read a request head, up to and including the terminating empty line.
///
/// An end of stream before the empty line returns what was read, which the
/// parser will then reject.
pub fn read_request_head<R>(reader: &mut R, limit: MaximumLength) -> Result<Vec<u8>, Error>
        where R: BufRead {
    let mut buffer = HeadBuffer::new(limit)?;

    loop {
        let start = buffer.head.len();
        let read = Read::take(&mut *reader, buffer.read_limit()).read_until(abnf::LF, &mut buffer.head)?;

        if let Progress::Complete = buffer.after_read(start, read)? {
            return Ok(buffer.finish());
        }
    }
}

/// The asynchronous counterpart of [`read_request_head`].
pub async fn read_request_head_async<R>(reader: &mut R, limit: MaximumLength) -> Result<Vec<u8>, Error>
        where R: AsyncBufReadExt + Unpin {
    let mut buffer = HeadBuffer::new(limit)?;

    loop {
        let start = buffer.head.len();
        let read = AsyncReadExt::take(&mut *reader, buffer.read_limit()).read_until(abnf::LF, &mut buffer.head).await?;

        if let Progress::Complete = buffer.after_read(start, read)? {
            return Ok(buffer.finish());
        }
    }
}
