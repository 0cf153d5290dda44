// Copyright 2021-Present Hyperjump Technology. https://hyperjump.tech/
// SPDX-License-Identifier: MIT

//! Top-level reporting cycle: fetch unreported history, encode it, deliver
//! it to Symon, then acknowledge the delivered records in the store.
//!
//! The ordering is the core correctness invariant: records are marked
//! reported only after the collector accepted the batch, so a failed cycle
//! leaves the store untouched and the next cycle re-fetches the same
//! records. The caller is expected to serialize invocations; the reporter
//! does not defend against overlapping cycles.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::SymonConfig;
use crate::error::ReporterError;
use crate::history::HistoryStore;
use crate::hostname::get_hostname;
use crate::payload::{ReportBatch, ReportPayload};
use crate::symon::{SymonApi, SymonResponse};

/// Result of one completed cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// No Symon identity is configured; reporting is disabled.
    Skipped,
    /// The collector accepted the batch and the store acknowledged it.
    Reported {
        requests: usize,
        notifications: usize,
        response: SymonResponse,
    },
}

pub struct ReporterConfig {
    /// Resolved Symon identity, or `None` when reporting is disabled.
    pub symon: Option<SymonConfig>,
    pub store: Arc<dyn HistoryStore>,
    /// Per-cycle fetch limit, see [`crate::config::report_limit`].
    pub report_limit: usize,
    /// Timeout applied to each collector request.
    pub timeout: Duration,
}

/// Orchestrates reporting cycles against one collector and one store.
pub struct Reporter {
    symon: Option<(SymonConfig, SymonApi)>,
    store: Arc<dyn HistoryStore>,
    report_limit: usize,
}

impl Reporter {
    pub fn new(config: ReporterConfig) -> Self {
        let symon = config.symon.map(|symon| {
            let api = SymonApi::new(symon.url.clone(), symon.api_key.clone(), config.timeout);
            (symon, api)
        });
        Reporter {
            symon,
            store: config.store,
            report_limit: config.report_limit,
        }
    }

    /// Registers this instance with the collector. Returns `None` when
    /// reporting is disabled.
    pub async fn handshake(&self) -> Result<Option<SymonResponse>, ReporterError> {
        let Some((config, api)) = &self.symon else {
            return Ok(None);
        };
        let response = api
            .handshake(&config.instance_id, &get_hostname())
            .await?;
        Ok(Some(response))
    }

    /// Runs one reporting cycle.
    ///
    /// An empty batch is still delivered; the collector accepts empty
    /// arrays. On any error the cycle aborts with nothing marked reported,
    /// except [`ReporterError::Acknowledge`] where delivery already
    /// succeeded and the same records may ship again next cycle.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, ReporterError> {
        let Some((config, api)) = &self.symon else {
            return Ok(CycleOutcome::Skipped);
        };

        let batch = self
            .store
            .fetch_unreported(self.report_limit)
            .await
            .map_err(ReporterError::Fetch)?;
        debug!(
            "Fetched {} requests and {} notifications to report",
            batch.requests.len(),
            batch.notifications.len()
        );

        let payload = ReportPayload {
            monika_instance_id: config.instance_id.clone(),
            config_version: config.config_version(),
            data: ReportBatch::from_unreported(
                &batch,
                &config.project_id,
                &config.organization_id,
            ),
        };
        let response = api.report(&payload).await?;

        let request_ids: Vec<i64> = batch.requests.iter().map(|log| log.id).collect();
        let notification_ids: Vec<i64> = batch.notifications.iter().map(|log| log.id).collect();

        // Both acknowledgments run concurrently and are jointly awaited.
        // There is no combined atomicity: one side can succeed while the
        // other fails, which is the accepted at-least-once risk.
        let (requests_marked, notifications_marked) = tokio::join!(
            self.store.mark_requests_reported(&request_ids),
            self.store.mark_notifications_reported(&notification_ids),
        );
        requests_marked.map_err(ReporterError::Acknowledge)?;
        notifications_marked.map_err(ReporterError::Acknowledge)?;

        Ok(CycleOutcome::Reported {
            requests: request_ids.len(),
            notifications: notification_ids.len(),
            response,
        })
    }

    /// Scheduler entry point: runs one cycle and degrades any failure to a
    /// warning so a bad cycle never takes down the host process.
    pub async fn run_cycle_logged(&self) {
        if let Err(e) = self.run_cycle().await {
            warn!("Can't report history to Symon. {}", e);
        }
    }
}
