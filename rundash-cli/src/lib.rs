// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The rundash CLI: a thin wrapper over [`rundash_engine`].

mod dispatch;
mod errors;
mod output;

pub use dispatch::RundashApp;
pub use errors::ExpectedError;
