// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Veridian

//! Post-verification body transforms.
//!
//! Verified response bodies pass through two pure steps before
//! deserialization: key normalization to snake_case, then a per-operation
//! transform (default identity) so individual endpoints can rename or
//! derive fields without touching the signing layer. Both steps run strictly
//! after signature verification and never before it.

use serde_json::{Map, Value};

/// Per-operation transform over an already-verified, key-normalized body.
pub type BodyTransform = fn(Value) -> Value;

/// The default transform.
pub fn identity(value: Value) -> Value {
    value
}

/// Recursively rewrite all object keys to snake_case.
///
/// The service responds in snake_case today; normalizing here keeps mixed or
/// camelCase keys from newer endpoints deserializing into the same models.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut normalized = Map::with_capacity(object.len());
            for (key, value) in object {
                normalized.insert(snake_case(&key), normalize_keys(value));
            }
            Value::Object(normalized)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 2);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
