// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt;

use hashbrown::HashMap;

use lettore_common::sync::{
    DefaultLock,
    Guarded,
    Lock,
};

use lettore_http::{
    Error,
    ErrorCode,
    HttpParseError,
};

use strum::EnumCount;

/// The counters at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutcomeSnapshot {
    outcomes: [u64; ErrorCode::COUNT],
    reasons: HashMap<HttpParseError, u64>,
}

impl OutcomeSnapshot {
    pub fn count(&self, code: ErrorCode) -> u64 {
        self.outcomes[code as usize]
    }

    /// The number of syntax errors with the given reason.
    pub fn count_reason(&self, reason: HttpParseError) -> u64 {
        self.reasons.get(&reason).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.outcomes.iter().sum()
    }
}

/// Parse outcome counters, shared by the drivers of a server.
pub struct ParseStatistics<L: Lock = DefaultLock> {
    counts: Guarded<OutcomeSnapshot, L>,
}

impl<L: Lock> Default for ParseStatistics<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Lock> fmt::Debug for ParseStatistics<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseStatistics")
            .field("counts", &self.counts)
            .finish()
    }
}

impl<L: Lock> ParseStatistics<L> {
    pub fn new() -> Self {
        Self {
            counts: Guarded::<OutcomeSnapshot, L>::new(OutcomeSnapshot::default()),
        }
    }

    pub fn record<T>(&self, result: &Result<T, Error>) {
        let mut counts = self.counts.lock();
        match result {
            Ok(_) => counts.outcomes[ErrorCode::Success as usize] += 1,
            Err(error) => {
                counts.outcomes[error.code() as usize] += 1;
                if let Some(reason) = error.reason() {
                    *counts.reasons.entry(reason).or_insert(0) += 1;
                }
            }
        }
    }

    pub fn count(&self, code: ErrorCode) -> u64 {
        self.counts.lock().count(code)
    }

    pub fn snapshot(&self) -> OutcomeSnapshot {
        self.counts.lock().clone()
    }
}
