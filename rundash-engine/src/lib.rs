// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core report aggregation pipeline for rundash.
//!
//! rundash ingests the artifacts a completed test run leaves behind (one
//! JSON results document per project directory), flattens the nested suite
//! trees inside them into a single record stream, aggregates that stream per
//! tag and per project, derives ranked insights, and renders the result as a
//! bundle of JSON documents plus an HTML dashboard.
//!
//! The pipeline is a single-pass batch job: discovery, extraction,
//! aggregation, insight generation and rendering run in sequence, each stage
//! consuming the previous stage's value. See [`pipeline::run_report`] for the
//! entry point.

pub mod aggregate;
pub mod artifact;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod extract;
mod helpers;
pub mod insights;
pub mod pipeline;
pub mod records;
pub mod render;
pub mod tags;

pub use helpers::FormattedDuration;
