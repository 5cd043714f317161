// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Veridian

//! Veridian Server SDK
//!
//! Client library for the Veridian identity service. Every outbound request
//! carries an HMAC-SHA256 signature computed over a canonical form of the
//! request, and every successful response is verified against the signature
//! the service supplies before its body is parsed or exposed.
//!
//! ## Modules
//!
//! - `client` - per-endpoint operations ([`VeridianClient`])
//! - `signing` - canonical messages, HMAC signatures, and the request pipeline
//! - `poller` - bounded polling for eventually-available resources
//! - `classifier` - non-2xx response classification with per-operation overrides
//! - `config` - deployment environments
//! - `credentials` - API token/secret pair
//! - `models` - request/response shapes
//! - `transform` - post-verification body transforms
//! - `error` - the SDK error taxonomy

pub mod classifier;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod poller;
pub mod signing;
pub mod transform;

pub use classifier::{ErrorClassifier, ErrorKind};
pub use client::VeridianClient;
pub use config::Environment;
pub use credentials::ApiCredentials;
pub use error::Error;
pub use models::{
    Authentication, AuthenticationRequest, Device, IdentityDocument, PairedCode, UserDevice,
    WebSdkConfig,
};
