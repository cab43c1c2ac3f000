// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)

//! Query string encoding for ordered parameter sets.
//!
//! [`encode`] writes keys and values verbatim; callers must percent-encode
//! beforehand if the text needs it. [`decode`] splits each pair on the
//! **first** `=` only.
//!
//! # Hazard
//!
//! The format has no escaping, so `decode(encode(m))` only reproduces `m`
//! when no key contains `=` or `&` and no value contains `&`. Values that
//! carry distinguished names such as `cn=admin,o=system` survive the first-`=`
//! split, but anything that puts `=` in a key or `&` in a value does not.
//! Do not feed distinguished-name-bearing query strings through [`decode`]
//! and expect a faithful round trip.

use indexmap::IndexMap;

/// Ordered query parameter set. Keys are unique; insertion order is kept.
pub type QueryParams = IndexMap<String, String>;

/// Join each `key=value` pair with `&`, in insertion order.
pub fn encode(params: &QueryParams) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Split a query string back into an ordered parameter set.
///
/// Empty segments are skipped. A segment without `=` maps to an empty value.
/// When a key repeats, the last value wins and the first position is kept.
pub fn decode(query: &str) -> QueryParams {
    let mut params = QueryParams::new();

    for segment in query.split('&').filter(|s| !s.is_empty()) {
        let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
        params.insert(key.to_string(), value.to_string());
    }

    params
}
