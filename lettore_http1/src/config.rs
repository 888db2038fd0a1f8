// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use strum_macros::{
    AsRefStr,
    EnumString,
};

/// How forgiving the parser is where the grammar leaves room for a choice.
///
/// | Rule                                          | Lenient   | Strict |
/// |-----------------------------------------------|-----------|--------|
/// | Method outside the registry                   | extension | reject |
/// | Identical duplicate `Content-Length`          | accept    | reject |
/// | Differing duplicate `Content-Length`          | reject    | reject |
/// | HTTP/1.1 without `Host`, or several `Host`s   | accept    | reject |
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Strictness {
    #[default]
    Lenient,
    Strict,
}

/// Indicates the maximum length of a certain HTTP entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MaximumLength(pub usize);

impl MaximumLength {
    /// The maximum length of a method name.
    pub const METHOD: MaximumLength = MaximumLength(32);

    /// The maximum length of a request target, including the query string.
    pub const REQUEST_TARGET: MaximumLength = MaximumLength(8192);

    /// The maximum length of a full HTTP header (name + value), excluding the CRLF.
    pub const HEADER: MaximumLength = MaximumLength(8192);

    /// The maximum length of a request head read from a stream.
    pub const HEAD: MaximumLength = MaximumLength(65536);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Limits {
    pub method: MaximumLength,
    pub request_target: MaximumLength,
    pub header_line: MaximumLength,
    pub head: MaximumLength,

    /// The maximum number of header lines.
    pub header_count: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            method: MaximumLength::METHOD,
            request_target: MaximumLength::REQUEST_TARGET,
            header_line: MaximumLength::HEADER,
            head: MaximumLength::HEAD,
            header_count: 100,
        }
    }
}

/// The settings of a [`Driver`](crate::Driver), fixed at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    pub strictness: Strictness,
    pub limits: Limits,

    /// The number of header slots reserved before each parse.
    pub header_capacity: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strictness: Strictness::default(),
            limits: Limits::default(),
            header_capacity: 16,
        }
    }
}

impl ParserConfig {
    pub fn strict() -> Self {
        Self::default().with_strictness(Strictness::Strict)
    }

    #[must_use]
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn with_header_capacity(mut self, header_capacity: usize) -> Self {
        self.header_capacity = header_capacity;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strictness == Strictness::Strict
    }
}
