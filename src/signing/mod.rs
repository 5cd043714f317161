// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Veridian

//! Mutual request/response signing.
//!
//! - `canonical` - deterministic byte forms of requests and responses
//! - `hmac` - HMAC-SHA256 signature generation and constant-time verification
//! - `pipeline` - outbound signing and inbound verification around HTTPS

pub mod canonical;
pub mod hmac;
pub mod pipeline;
