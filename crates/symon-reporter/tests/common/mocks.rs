// Copyright 2021-Present Hyperjump Technology. https://hyperjump.tech/
// SPDX-License-Identifier: MIT

//! Mock implementations of the reporter's collaborators for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use symon_reporter::history::{
    HistoryStore, StoreError, UnreportedBatch, UnreportedNotificationLog, UnreportedRequestLog,
};

/// In-memory history store that serves a fixed batch and records every
/// mark-reported call made against it.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    pub batch: UnreportedBatch,
    pub fail_fetch: bool,
    pub fetch_calls: AtomicUsize,
    pub marked_requests: Mutex<Vec<Vec<i64>>>,
    pub marked_notifications: Mutex<Vec<Vec<i64>>>,
}

#[async_trait::async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn fetch_unreported(&self, limit: usize) -> Result<UnreportedBatch, StoreError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch {
            return Err(StoreError("store unreachable".to_string()));
        }
        let mut batch = self.batch.clone();
        batch.requests.truncate(limit);
        batch.notifications.truncate(limit);
        Ok(batch)
    }

    async fn mark_requests_reported(&self, ids: &[i64]) -> Result<(), StoreError> {
        self.marked_requests.lock().unwrap().push(ids.to_vec());
        Ok(())
    }

    async fn mark_notifications_reported(&self, ids: &[i64]) -> Result<(), StoreError> {
        self.marked_notifications.lock().unwrap().push(ids.to_vec());
        Ok(())
    }
}

pub fn request_log(id: i64, probe_id: &str) -> UnreportedRequestLog {
    UnreportedRequestLog {
        id,
        timestamp: 1_700_000_000 + id,
        probe_id: probe_id.to_string(),
        request_method: "GET".to_string(),
        request_url: "https://example.com/health".to_string(),
        response_status: 200,
        response_time: 42,
        response_size: Some(512),
    }
}

pub fn notification_log(id: i64, probe_id: &str) -> UnreportedNotificationLog {
    UnreportedNotificationLog {
        id,
        timestamp: 1_700_000_100 + id,
        probe_id: probe_id.to_string(),
        alert_type: "status-not-2xx".to_string(),
        notification_type: "NOTIFY-INCIDENT".to_string(),
        channel: "webhook".to_string(),
    }
}
