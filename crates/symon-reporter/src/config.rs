// Copyright 2021-Present Hyperjump Technology. https://hyperjump.tech/
// SPDX-License-Identifier: MIT

use std::env;

use serde::Serialize;
use sha2::{Digest, Sha256};

pub const DEFAULT_REPORT_LIMIT: usize = 100;

/// Symon collector identity, resolved once from the agent configuration and
/// handed to the reporter explicitly. Immutable for the process lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct SymonConfig {
    /// Monika instance id assigned by Symon during provisioning.
    pub instance_id: String,
    /// Collector base URL, e.g. "https://symon.example.com".
    pub url: String,
    pub api_key: String,
    pub project_id: String,
    pub organization_id: String,
    /// Reporting interval hint in seconds, consumed by the scheduler.
    pub interval_secs: Option<u64>,
    /// Pinned configuration version. When unset the version is derived from
    /// the config content on every cycle.
    pub version: Option<String>,
}

impl SymonConfig {
    /// Version string sent with every report so the collector can detect
    /// configuration drift: the pinned version when present, otherwise a
    /// hex SHA-256 fingerprint of the serialized config.
    pub fn config_version(&self) -> String {
        match &self.version {
            Some(version) => version.clone(),
            None => self.fingerprint(),
        }
    }

    fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        // Struct serialization order is fixed, so the digest is stable for
        // identical config content.
        match serde_json::to_vec(self) {
            Ok(bytes) => hasher.update(&bytes),
            Err(_) => hasher.update(format!("{self:?}").as_bytes()),
        }
        hex::encode(hasher.finalize())
    }
}

/// Per-cycle fetch limit, overridable with the MONIKA_REPORT_LIMIT
/// environment variable.
#[must_use]
pub fn report_limit() -> usize {
    env::var("MONIKA_REPORT_LIMIT")
        .ok()
        .and_then(|limit| limit.parse::<usize>().ok())
        .unwrap_or(DEFAULT_REPORT_LIMIT)
}
