// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::collections::TryReserveError;

use crate::{
    HeaderName,
    HeaderValue,
};

/// A single field line, with the name spelled as it was received.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HeaderField {
    name: String,
    value: HeaderValue,
}

impl HeaderField {
    pub fn new(name: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &HeaderValue {
        &self.value
    }

    /// Classify the name of this field.
    #[must_use]
    pub fn header_name(&self) -> HeaderName {
        HeaderName::from(self.name.as_str())
    }
}

/// The header fields of a message in the order they were received.
///
/// Duplicate names are kept as separate entries and never merged. Lookups
/// compare names case-insensitively, while iteration yields the names with
/// their original casing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderMap {
    headers: Vec<HeaderField>,
}

impl HeaderMap {
    pub fn new() -> HeaderMap {
        HeaderMap::default()
    }

    /// Appends a field after the existing ones, also if a field with the same
    /// name already exists.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<HeaderValue>) {
        self.headers.push(HeaderField::new(name, value));
    }

    /// Reserve room for `additional` fields without aborting on allocation
    /// failure.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.headers.try_reserve(additional)
    }

    pub fn clear(&mut self) {
        self.headers.clear();
    }

    #[must_use]
    pub fn contains(&self, header_name: impl AsRef<str>) -> bool {
        self.get(header_name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Get the value of the first field named `header_name`.
    #[must_use]
    pub fn get(&self, header_name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.get_all(header_name).next()
    }

    /// Get the values of all fields named `header_name`, in order.
    pub fn get_all(&self, header_name: impl AsRef<str>) -> impl Iterator<Item = &HeaderValue> {
        self.headers.iter()
            .filter(move |field| unicase::eq_ascii(field.name.as_str(), header_name.as_ref()))
            .map(HeaderField::value)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderField> {
        self.headers.iter()
    }
}

impl<'a> IntoIterator for &'a HeaderMap {
    type Item = &'a HeaderField;
    type IntoIter = std::slice::Iter<'a, HeaderField>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}
