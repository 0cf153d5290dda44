// Copyright 2021-Present Hyperjump Technology. https://hyperjump.tech/
// SPDX-License-Identifier: MIT

//! Shapes raw history records into the Symon wire schema and compresses the
//! final report body.
//!
//! Projection is explicit per record type rather than a generic
//! field-omission helper, so the wire schema stays statically checkable:
//! adding a field to a history record without deciding whether it ships is a
//! compile error here, not a silent schema change.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::error::ReporterError;
use crate::history::{UnreportedBatch, UnreportedNotificationLog, UnreportedRequestLog};

/// A request log as Symon expects it: the local-store id dropped, tenant ids
/// merged in at the record level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymonRequestLog {
    pub timestamp: i64,
    pub probe_id: String,
    pub request_method: String,
    pub request_url: String,
    pub response_status: u16,
    pub response_time: u64,
    pub response_size: Option<u64>,
    #[serde(rename = "projectID")]
    pub project_id: String,
    #[serde(rename = "organizationID")]
    pub organization_id: String,
}

impl SymonRequestLog {
    pub fn from_unreported(
        log: &UnreportedRequestLog,
        project_id: &str,
        organization_id: &str,
    ) -> Self {
        SymonRequestLog {
            timestamp: log.timestamp,
            probe_id: log.probe_id.clone(),
            request_method: log.request_method.clone(),
            request_url: log.request_url.clone(),
            response_status: log.response_status,
            response_time: log.response_time,
            response_size: log.response_size,
            project_id: project_id.to_string(),
            organization_id: organization_id.to_string(),
        }
    }
}

/// A notification log as Symon expects it: only the local-store id dropped.
/// Tenant ids are implied by the enclosing instance, not carried per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymonNotificationLog {
    pub timestamp: i64,
    pub probe_id: String,
    pub alert_type: String,
    pub notification_type: String,
    pub channel: String,
}

impl SymonNotificationLog {
    pub fn from_unreported(log: &UnreportedNotificationLog) -> Self {
        SymonNotificationLog {
            timestamp: log.timestamp,
            probe_id: log.probe_id.clone(),
            alert_type: log.alert_type.clone(),
            notification_type: log.notification_type.clone(),
            channel: log.channel.clone(),
        }
    }
}

/// The `data` object of one report. Ephemeral, rebuilt every cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportBatch {
    pub requests: Vec<SymonRequestLog>,
    pub notifications: Vec<SymonNotificationLog>,
}

impl ReportBatch {
    /// Projects a fetched batch into the wire schema. Total: never fails on
    /// well-formed input, and empty input yields empty arrays rather than
    /// missing fields.
    pub fn from_unreported(
        batch: &UnreportedBatch,
        project_id: &str,
        organization_id: &str,
    ) -> Self {
        ReportBatch {
            requests: batch
                .requests
                .iter()
                .map(|log| SymonRequestLog::from_unreported(log, project_id, organization_id))
                .collect(),
            notifications: batch
                .notifications
                .iter()
                .map(SymonNotificationLog::from_unreported)
                .collect(),
        }
    }
}

/// Top-level report body, serialized and gzip-compressed before transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub monika_instance_id: String,
    pub config_version: String,
    pub data: ReportBatch,
}

/// Serializes the payload to JSON and compresses it with gzip, matching the
/// `Content-Encoding: gzip` header the transport sends.
pub fn encode(payload: &ReportPayload) -> Result<Vec<u8>, ReporterError> {
    let json = serde_json::to_vec(payload)?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    Ok(encoder.finish()?)
}
