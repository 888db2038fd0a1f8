// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! This crate contains the HTTP vocabulary shared by the request parsers: the
//! character classes of the grammar, the request model and the error taxonomy
//! every parse outcome is reported through.

pub mod abnf;
pub mod error;
pub mod header_map;
pub mod header_name;
pub mod header_value;
pub mod method;
pub mod request;
pub mod request_target;
pub mod syntax;
pub mod version;

pub use error::*;
pub use header_map::*;
pub use header_name::*;
pub use header_value::*;
pub use method::*;
pub use request::*;
pub use request_target::*;
pub use version::*;
