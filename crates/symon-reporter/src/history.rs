// Copyright 2021-Present Hyperjump Technology. https://hyperjump.tech/
// SPDX-License-Identifier: MIT

//! Probe history records and the gateway to the durable log store.
//!
//! The store owns the canonical copy of every log record and its
//! reported/unreported flag. The reporter only ever holds a transient batch
//! view plus the set of ids to acknowledge; nothing outside a
//! [`HistoryStore`] implementation may flip the reported flag.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One HTTP probe result awaiting delivery to Symon.
///
/// `id` is the local-store primary key and never crosses the wire; every
/// other field is passed through to the collector unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnreportedRequestLog {
    pub id: i64,
    /// Unix timestamp (seconds) of the probe.
    pub timestamp: i64,
    pub probe_id: String,
    pub request_method: String,
    pub request_url: String,
    pub response_status: u16,
    /// Round-trip time in milliseconds.
    pub response_time: u64,
    pub response_size: Option<u64>,
}

/// One alert/notification event awaiting delivery to Symon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnreportedNotificationLog {
    pub id: i64,
    /// Unix timestamp (seconds) of the notification.
    pub timestamp: i64,
    pub probe_id: String,
    pub alert_type: String,
    pub notification_type: String,
    pub channel: String,
}

/// Result of one bounded fetch from the store. Either list may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnreportedBatch {
    pub requests: Vec<UnreportedRequestLog>,
    pub notifications: Vec<UnreportedNotificationLog>,
}

/// Error raised by a [`HistoryStore`] implementation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Gateway to the durable log store.
///
/// Implemented outside this crate (sqlite in the agent, in-memory mocks in
/// tests). The reporter calls `fetch_unreported` at the start of a cycle and
/// the two mark operations only after the collector accepted the batch.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Returns up to `limit` unreported records of each category.
    async fn fetch_unreported(&self, limit: usize) -> Result<UnreportedBatch, StoreError>;

    /// Flags the given request log ids as delivered.
    async fn mark_requests_reported(&self, ids: &[i64]) -> Result<(), StoreError>;

    /// Flags the given notification log ids as delivered.
    async fn mark_notifications_reported(&self, ids: &[i64]) -> Result<(), StoreError>;
}
