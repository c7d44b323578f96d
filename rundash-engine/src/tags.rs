// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tag derivation from test titles.
//!
//! Tags are embedded in a test's own title as `@`-prefixed tokens, e.g.
//! `"rejects bad token @api @security"`. They are derived data: re-deriving
//! from the same title always yields the same set.

use regex::Regex;
use std::sync::LazyLock;

// A tag is a maximal run of word characters and hyphens immediately preceded
// by `@`.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([\w-]+)").expect("tag regex is valid"));

/// Returns the tags found in a test's own title, in first-occurrence order.
///
/// Matching is case-sensitive; duplicate tags collapse to one membership. An
/// empty result is a normal outcome, not an error.
pub fn extract_tags(title: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for captures in TAG_REGEX.captures_iter(title) {
        let tag = &captures[1];
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_owned());
        }
    }
    tags
}
