// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! The HTTP/1.1 request head parser.
//!
//! A [`Driver`] takes a buffer (or a stream, through the readers in this
//! crate) that contains a request-line and header fields, runs a [`Scanner`]
//! and a [`Parser`] over it and exposes the resulting
//! [`Request`](lettore_http::Request):
//!
//! ```
//! use lettore_http1::Driver;
//!
//! let mut driver = Driver::default();
//! let request = driver.parse("GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();
//! assert_eq!(request.target, "/index.html");
//! ```

mod config;
mod driver;
mod parser;
mod read;
mod scanner;
mod statistics;
mod token;

pub use config::*;
pub use driver::*;
pub use parser::*;
pub use read::*;
pub use scanner::*;
pub use statistics::*;
pub use token::*;
