// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Veridian

//! Veridian client and per-endpoint operations.
//!
//! Each operation builds a [`RequestSpec`] (URL, body, per-operation
//! transform and classifier overrides) and hands it to the signing
//! pipeline; all protocol work lives there. The client is immutable and
//! cheap to share across tasks.

use std::time::Duration;

use reqwest::Method;
use serde_json::{json, Value};

use crate::classifier::{ErrorClassifier, ErrorKind, Override};
use crate::config::Environment;
use crate::credentials::ApiCredentials;
use crate::error::Error;
use crate::models::{
    Authentication, AuthenticationRequest, Device, IdentityDocument, PairedCode, UserDevice,
    WebSdkConfig,
};
use crate::poller::{self, DEFAULT_POLL_INTERVAL};
use crate::signing::pipeline::{RequestSpec, SigningPipeline};

const CREATE_USER_DEVICE_OVERRIDES: &[Override] = &[
    (
        409,
        ErrorKind::Conflict,
        "another user is already bound to this device",
    ),
    (
        422,
        ErrorKind::Validation,
        "a user identifier and a device identifier are required",
    ),
];

// Activation addresses the record by activation code, so an unprocessable
// code means the record was never there, not that the payload was bad.
const ACTIVATE_USER_DEVICE_OVERRIDES: &[Override] = &[
    (404, ErrorKind::NotFound, "the activation code was not found"),
    (
        422,
        ErrorKind::NotFound,
        "the activation code was not recognized",
    ),
];

/// Client for the Veridian identity service.
pub struct VeridianClient {
    credentials: ApiCredentials,
    base_url: String,
    pipeline: SigningPipeline,
}

impl VeridianClient {
    /// Client for a named deployment environment.
    pub fn new(
        token: impl Into<String>,
        secret: impl Into<String>,
        environment: Environment,
    ) -> Result<Self, Error> {
        Self::with_base_url(token, secret, environment.base_url())
    }

    /// Client for an explicit base URL (self-hosted deployments, tests).
    pub fn with_base_url(
        token: impl Into<String>,
        secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, Error> {
        let credentials = ApiCredentials::new(token, secret);
        let base_url = base_url.into();
        let pipeline = SigningPipeline::new(base_url.clone(), credentials.clone())?;
        Ok(Self {
            credentials,
            base_url,
            pipeline,
        })
    }

    /// Bind a device to a user identity.
    ///
    /// The returned record is inactive; its `activation_code` (derived from
    /// the record id) is what [`activate_user_device`](Self::activate_user_device)
    /// consumes.
    pub async fn create_user_device(
        &self,
        user_identifier: &str,
        device_identifier: &str,
    ) -> Result<UserDevice, Error> {
        let spec = RequestSpec::new(Method::POST, "/api/v2/user_devices")
            .body(json!({
                "user_identifier": user_identifier,
                "device_identifier": device_identifier,
            }))
            .transform(derive_activation_code)
            .classifier(ErrorClassifier::with_overrides(
                CREATE_USER_DEVICE_OVERRIDES,
            ));
        let body = self.pipeline.execute(spec).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Activate a previously created user device.
    pub async fn activate_user_device(&self, activation_code: &str) -> Result<UserDevice, Error> {
        let spec = RequestSpec::new(
            Method::PATCH,
            format!("/api/v2/user_devices/{activation_code}"),
        )
        .body(json!({ "active": true }))
        .classifier(ErrorClassifier::with_overrides(
            ACTIVATE_USER_DEVICE_OVERRIDES,
        ));
        let body = self.pipeline.execute(spec).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Issue an authentication challenge against an active device.
    pub async fn create_authentication(
        &self,
        request: &AuthenticationRequest,
    ) -> Result<Authentication, Error> {
        let spec = RequestSpec::new(Method::POST, "/api/v2/authentications")
            .body(serde_json::to_value(request)?);
        let body = self.pipeline.execute(spec).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Fetch a device record.
    pub async fn get_device(&self, device_identifier: &str) -> Result<Device, Error> {
        let spec = RequestSpec::new(Method::GET, format!("/api/v2/devices/{device_identifier}"))
            .transform(derive_active_flag);
        let body = self.pipeline.execute(spec).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Deactivate a user and all of their device bindings.
    pub async fn deactivate_user(&self, user_identifier: &str) -> Result<(), Error> {
        let spec = RequestSpec::new(Method::DELETE, format!("/api/v2/users/{user_identifier}"));
        self.pipeline.execute(spec).await?;
        Ok(())
    }

    /// Fetch a single identity document.
    pub async fn get_identity_document(&self, document_id: &str) -> Result<IdentityDocument, Error> {
        let spec = RequestSpec::new(
            Method::GET,
            format!("/api/v2/identity_documents/{document_id}"),
        )
        .transform(derive_active_flag);
        let body = self.pipeline.execute(spec).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// List the identity documents registered for a user.
    pub async fn find_identity_documents(
        &self,
        user_identifier: &str,
    ) -> Result<Vec<IdentityDocument>, Error> {
        let spec = RequestSpec::new(Method::GET, "/api/v2/identity_documents")
            .query("user_identifier", user_identifier);
        let body = self.pipeline.execute(spec).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Fetch a paired code. Returns [`Error::NotFound`] until a device has
    /// completed the pairing.
    pub async fn get_paired_code(&self, code_id: &str) -> Result<PairedCode, Error> {
        let spec = RequestSpec::new(Method::GET, format!("/api/v2/paired_codes/{code_id}"));
        let body = self.pipeline.execute(spec).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Fetch a paired code, retrying until it exists or `timeout` elapses.
    ///
    /// Attempts run every [`DEFAULT_POLL_INTERVAL`]; all failures are
    /// treated as transient within the budget.
    pub async fn poll_for_paired_code(
        &self,
        code_id: &str,
        timeout: Duration,
    ) -> Result<PairedCode, Error> {
        poller::poll(
            || self.get_paired_code(code_id),
            DEFAULT_POLL_INTERVAL,
            timeout,
        )
        .await
    }

    /// Configuration for the browser SDK, as a JSON string.
    ///
    /// Derived locally from the base URL and the relying party id in the
    /// credential token; fails with [`Error::Config`] when the token is not
    /// a parseable JWT.
    pub fn web_sdk_config(&self) -> Result<String, Error> {
        let relying_party_id = self.credentials.relying_party_id()?;
        let config = WebSdkConfig {
            base_url: self.base_url.clone(),
            relying_party_id,
        };
        Ok(serde_json::to_string(&config)?)
    }
}

/// Creation responses carry the activation code as the record id.
fn derive_activation_code(mut body: Value) -> Value {
    if let Some(object) = body.as_object_mut() {
        if let Some(id) = object.get("id").cloned() {
            object.insert("activation_code".to_string(), id);
        }
    }
    body
}

/// Device-shaped responses expose activity as `is_active`.
fn derive_active_flag(mut body: Value) -> Value {
    if let Some(object) = body.as_object_mut() {
        if let Some(is_active) = object.get("is_active").cloned() {
            object.insert("active".to_string(), is_active);
        }
    }
    body
}
