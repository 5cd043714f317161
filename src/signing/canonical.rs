// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Veridian

//! Canonical message builder.
//!
//! Produces the exact byte string over which signatures are computed. Field
//! order is fixed by the wire contract, not by any map iteration order, so
//! the service can rebuild the same bytes and both sides agree across
//! languages and over time.
//!
//! Request form (newline separated): uppercased method, path with query,
//! body bytes, date header value. Response form: status code, body bytes,
//! date header value. An absent body contributes zero bytes.

/// Canonical byte form of an outbound request.
///
/// `path_and_query` must be exactly what is transmitted on the request line,
/// and `date` exactly the value of the transmitted `date` header.
pub fn request_message(
    method: &str,
    path_and_query: &str,
    body: Option<&[u8]>,
    date: &str,
) -> Vec<u8> {
    let body = body.unwrap_or_default();
    let method = method.to_ascii_uppercase();

    let mut message =
        Vec::with_capacity(method.len() + path_and_query.len() + body.len() + date.len() + 3);
    message.extend_from_slice(method.as_bytes());
    message.push(b'\n');
    message.extend_from_slice(path_and_query.as_bytes());
    message.push(b'\n');
    message.extend_from_slice(body);
    message.push(b'\n');
    message.extend_from_slice(date.as_bytes());
    message
}

/// Canonical byte form of an inbound response.
///
/// `body` must be the raw, unparsed response bytes and `date` the value of
/// the response's `date` header (empty when absent).
pub fn response_message(status: u16, body: &[u8], date: &str) -> Vec<u8> {
    let status = status.to_string();

    let mut message = Vec::with_capacity(status.len() + body.len() + date.len() + 2);
    message.extend_from_slice(status.as_bytes());
    message.push(b'\n');
    message.extend_from_slice(body);
    message.push(b'\n');
    message.extend_from_slice(date.as_bytes());
    message
}
