// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Veridian

//! Deployment environments.
//!
//! The environment is resolved once at client construction and carried by
//! value; there is no process-wide registry. Unknown environment names fail
//! fast with [`Error::Config`] rather than silently defaulting.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Named Veridian deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// User acceptance testing.
    Uat,
    /// Production.
    Production,
}

impl Environment {
    /// Base URL for this deployment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Uat => "https://api.uat.veridian.net",
            Environment::Production => "https://api.veridian.net",
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "uat" => Ok(Environment::Uat),
            "production" => Ok(Environment::Production),
            other => Err(Error::Config(format!(
                "unknown environment '{other}' (expected 'uat' or 'production')"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Uat => write!(f, "uat"),
            Environment::Production => write!(f, "production"),
        }
    }
}
