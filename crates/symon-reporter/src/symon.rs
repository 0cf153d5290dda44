// Copyright 2021-Present Hyperjump Technology. https://hyperjump.tech/
// SPDX-License-Identifier: MIT

//! HTTP client for the two Symon collector endpoints: handshake and report.
//!
//! Neither operation retries internally. A failed call surfaces as a
//! [`ReporterError`] and the caller decides what the failure means for the
//! cycle; re-delivery happens naturally on the next scheduled cycle.

use std::time::Duration;

use reqwest::header::{CONTENT_ENCODING, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ReporterError;
use crate::payload::{self, ReportPayload};

pub const HANDSHAKE_PATH: &str = "/v1/monika/handshake";
pub const REPORT_PATH: &str = "/v1/monika/report";

const API_KEY_HEADER: &str = "x-api-key";

/// Response body shared by both Symon endpoints, returned verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymonResponse {
    pub result: String,
    pub message: String,
}

#[derive(Serialize)]
struct HandshakeBody<'a> {
    #[serde(rename = "instanceId")]
    instance_id: &'a str,
    hostname: &'a str,
}

/// Client for one Symon collector.
#[derive(Debug, Clone)]
pub struct SymonApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl SymonApi {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Self {
        SymonApi {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            timeout,
        }
    }

    /// Registers this Monika instance with the collector.
    pub async fn handshake(
        &self,
        instance_id: &str,
        hostname: &str,
    ) -> Result<SymonResponse, ReporterError> {
        debug!("Sending handshake for instance {}", instance_id);
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, HANDSHAKE_PATH))
            .timeout(self.timeout)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&HandshakeBody {
                instance_id,
                hostname,
            })
            .send()
            .await?;
        Self::parse_response(resp).await
    }

    /// Delivers one report payload, gzip-compressed JSON on the wire.
    pub async fn report(&self, report: &ReportPayload) -> Result<SymonResponse, ReporterError> {
        let body = payload::encode(report)?;
        debug!(
            "Reporting {} requests and {} notifications ({} bytes compressed)",
            report.data.requests.len(),
            report.data.notifications.len(),
            body.len()
        );
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, REPORT_PATH))
            .timeout(self.timeout)
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_ENCODING, "gzip")
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        Self::parse_response(resp).await
    }

    async fn parse_response(resp: reqwest::Response) -> Result<SymonResponse, ReporterError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(ReporterError::Collector {
                status,
                message: resp.text().await.unwrap_or_default(),
            });
        }
        Ok(resp.json::<SymonResponse>().await?)
    }
}
