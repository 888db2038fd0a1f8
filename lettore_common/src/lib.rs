// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! This crate contains utilities shared by the other `lettore` crates, which
//! aren't specific to any HTTP version.

pub mod sync;
