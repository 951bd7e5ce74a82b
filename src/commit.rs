//! Commit coordinator: the last gate between the staging area and the
//! external commit service.

use std::sync::Arc;

use chrono::Utc;
use lazy_static::lazy_static;
use prometheus::{IntCounter, IntCounterVec, Opts};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::errors::StagingError;
use crate::events::{Event, EventSender};
use crate::services::{CommitRequest, CommitService};
use crate::staging::StagingStore;

lazy_static! {
    static ref BATCH_COMMITS: IntCounter = IntCounter::new(
        "batch_commits_total",
        "Total number of successfully committed batches"
    )
    .expect("metric can be created");
    static ref BATCH_COMMIT_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "batch_commit_failures_total",
            "Total number of failed or refused batch commits"
        ),
        &["error_type"]
    )
    .expect("metric can be created");
}

/// Outcome surfaced to the operator after a commit attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitOutcome {
    pub success: bool,
    pub message: String,
    pub committed_lines: usize,
}

/// Submits the validated subset of a batch to the commit service.
///
/// The coordinator never mutates the staging store: on any failure the
/// batch remains staged exactly as it was, so the operator can edit and
/// retry. Atomic all-or-nothing application is the service's contract.
pub struct CommitCoordinator {
    service: Arc<dyn CommitService>,
    event_sender: Arc<EventSender>,
}

impl CommitCoordinator {
    pub fn new(service: Arc<dyn CommitService>, event_sender: Arc<EventSender>) -> Self {
        Self {
            service,
            event_sender,
        }
    }

    /// Validates and commits the batch.
    ///
    /// Refused locally, without a network call, while any hard block
    /// remains (unresolved parse errors, pending manual input, location
    /// conflicts) or while warnings exist that the caller has not
    /// explicitly acknowledged via `allow_warnings`.
    ///
    /// A transport-level failure surfaces as `Err`; a service-level refusal
    /// comes back as a `CommitOutcome` with `success == false` and the
    /// service's message verbatim. Either way the batch is unchanged.
    #[instrument(skip(self, store), fields(batch_id = %store.batch().id))]
    pub async fn commit(
        &self,
        store: &StagingStore,
        allow_warnings: bool,
    ) -> Result<CommitOutcome, StagingError> {
        let report = store.validate();
        if !report.passed() {
            BATCH_COMMIT_FAILURES
                .with_label_values(&["validation_error"])
                .inc();
            warn!(
                errors = report.errors.len(),
                "commit refused: unresolved hard blocks"
            );
            return Err(StagingError::ValidationError(report.errors.join("; ")));
        }
        if report.has_warnings() && !allow_warnings {
            BATCH_COMMIT_FAILURES
                .with_label_values(&["unacknowledged_warnings"])
                .inc();
            return Err(StagingError::InvalidOperation(format!(
                "batch has warnings that must be acknowledged before commit: {}",
                report.warnings.join("; ")
            )));
        }

        let batch = store.batch();
        let lines = batch.committable_lines(allow_warnings);
        if lines.is_empty() {
            BATCH_COMMIT_FAILURES.with_label_values(&["empty"]).inc();
            return Err(StagingError::InvalidOperation(
                "nothing to commit: no line is in a committable state".to_string(),
            ));
        }

        let line_count = lines.len();
        let request = CommitRequest {
            batch_id: batch.id,
            operation_type: batch.operation_type,
            source_name: batch.source_name.clone(),
            staged_at: batch.staged_at,
            lines,
        };

        match self.service.commit(request).await {
            Ok(response) if response.success => {
                BATCH_COMMITS.inc();
                info!(lines = line_count, "batch committed");
                self.event_sender
                    .send(Event::BatchCommitted {
                        batch_id: batch.id,
                        operation_type: batch.operation_type,
                        line_count,
                        committed_at: Utc::now(),
                    })
                    .await
                    .map_err(StagingError::EventError)?;
                Ok(CommitOutcome {
                    success: true,
                    message: response.message,
                    committed_lines: line_count,
                })
            }
            Ok(response) => {
                BATCH_COMMIT_FAILURES
                    .with_label_values(&["service_refused"])
                    .inc();
                warn!(message = %response.message, "commit service refused the batch");
                self.event_sender
                    .send(Event::BatchCommitFailed {
                        batch_id: batch.id,
                        message: response.message.clone(),
                    })
                    .await
                    .map_err(StagingError::EventError)?;
                Ok(CommitOutcome {
                    success: false,
                    message: response.message,
                    committed_lines: 0,
                })
            }
            Err(e) => {
                BATCH_COMMIT_FAILURES
                    .with_label_values(&["transport_error"])
                    .inc();
                warn!("commit call failed: {}", e);
                self.event_sender
                    .send(Event::BatchCommitFailed {
                        batch_id: batch.id,
                        message: e.to_string(),
                    })
                    .await
                    .map_err(StagingError::EventError)?;
                Err(StagingError::ExternalServiceError(e.to_string()))
            }
        }
    }
}
