// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Veridian

//! # API Data Models
//!
//! Request and response shapes for the Veridian service. Response models are
//! deliberately tolerant: optional fields default to `None`/`false` so a
//! service-side field addition never breaks deserialization of a verified
//! body.
//!
//! ## Model Categories
//!
//! - **User devices**: a device bound to a user identity, activated via an
//!   activation code
//! - **Authentications**: challenges issued against an active device
//! - **Identity documents**: documents registered for a user
//! - **Paired codes**: codes that become available asynchronously after a
//!   device scans them

use serde::{Deserialize, Serialize};

// =============================================================================
// User Device Models
// =============================================================================

/// A device bound to a user identity.
///
/// Returned by both device creation (inactive, with an activation code
/// derived from the record id) and activation (active).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserDevice {
    /// Record identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Code used to activate the device. Populated from the record id on
    /// creation responses.
    #[serde(default)]
    pub activation_code: Option<String>,
    #[serde(default)]
    pub user_identifier: Option<String>,
    #[serde(default)]
    pub device_identifier: Option<String>,
    /// Whether the binding is active.
    #[serde(default)]
    pub active: bool,
}

/// A device record, independent of any user binding.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Device {
    #[serde(default)]
    pub device_identifier: Option<String>,
    /// Whether the device is active. Derived from the service's `is_active`
    /// field by the fetch-device transform.
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub activated_at: Option<String>,
}

// =============================================================================
// Authentication Models
// =============================================================================

/// Request to create an authentication challenge against a device.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticationRequest {
    pub device_identifier: String,
    /// Action the user is asked to approve (e.g. `login`).
    pub action: String,
    /// Resource the action applies to.
    pub resource: String,
    /// Require presence (biometric or PIN) rather than possession only.
    pub user_presence: bool,
}

impl AuthenticationRequest {
    pub fn new(
        device_identifier: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            device_identifier: device_identifier.into(),
            action: action.into(),
            resource: resource.into(),
            user_presence: true,
        }
    }
}

/// An issued authentication challenge.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Authentication {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub device_identifier: Option<String>,
    #[serde(default)]
    pub user_identifier: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
}

// =============================================================================
// Identity Document Models
// =============================================================================

/// A document registered for a user identity.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct IdentityDocument {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_identifier: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub verification_status: Option<String>,
    /// Derived from the service's `is_active` field by the fetch transform.
    #[serde(default)]
    pub active: bool,
}

// =============================================================================
// Paired Code Models
// =============================================================================

/// A code that has been paired with a device.
///
/// The record does not exist until a device completes the pairing, which is
/// why fetching one is offered both directly and through polling.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PairedCode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub paired_at: Option<String>,
}

// =============================================================================
// Web SDK Configuration
// =============================================================================

/// Configuration handed to the browser SDK.
///
/// Assembled locally from the client's environment and the relying party id
/// in the credential token; no request is made.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WebSdkConfig {
    pub base_url: String,
    pub relying_party_id: String,
}
