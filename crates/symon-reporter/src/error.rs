// Copyright 2021-Present Hyperjump Technology. https://hyperjump.tech/
// SPDX-License-Identifier: MIT

use reqwest::StatusCode;

use crate::history::StoreError;

/// Errors that can abort a reporting cycle.
///
/// Everything here is non-fatal to the host process: records that were not
/// acknowledged stay unreported in the store and are fetched again on the
/// next cycle. `Acknowledge` is the one variant raised after a successful
/// delivery, so the same records may be reported twice.
#[derive(Debug, thiserror::Error)]
pub enum ReporterError {
    #[error("failed to read unreported history: {0}")]
    Fetch(#[source] StoreError),

    #[error("failed to mark history as reported: {0}")]
    Acknowledge(#[source] StoreError),

    #[error("failed to encode report payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to compress report payload: {0}")]
    Compress(#[from] std::io::Error),

    #[error("failed to reach Symon: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Symon rejected the request: {status}: {message}")]
    Collector { status: StatusCode, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::StoreError;

    #[test]
    fn test_error_display() {
        let error = ReporterError::Fetch(StoreError("database is locked".to_string()));
        assert_eq!(
            error.to_string(),
            "failed to read unreported history: database is locked"
        );
    }

    #[test]
    fn test_collector_error_display() {
        let error = ReporterError::Collector {
            status: StatusCode::UNAUTHORIZED,
            message: "invalid api key".to_string(),
        };
        assert!(error.to_string().contains("401"));
        assert!(error.to_string().contains("invalid api key"));
    }
}
