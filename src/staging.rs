//! Staging store: owns the batch and the lookup collaborator.
//!
//! One store exists per parsed file or scanner submission. Commands in
//! [`crate::commands::staging`] are the only mutation path; every one of
//! them ends with a full recompute so the queryable state never drifts from
//! the staged lines.

use std::sync::Arc;

use tracing::info;

use crate::config::StagingConfig;
use crate::errors::StagingError;
use crate::events::{Event, EventSender};
use crate::models::{OperationType, ParseOutcome, StagingBatch};
use crate::services::ProductLookup;
use crate::status;
use crate::validation::{self, ValidationReport};

/// Mutable staging area plus its collaborators.
pub struct StagingStore {
    batch: StagingBatch,
    config: StagingConfig,
    lookup: Arc<dyn ProductLookup>,
}

impl StagingStore {
    /// Builds the store from a parser envelope and runs the initial
    /// recompute, so line statuses are consistent before the first edit.
    pub fn from_parse_outcome(
        operation_type: OperationType,
        source_name: impl Into<String>,
        outcome: ParseOutcome,
        config: StagingConfig,
        lookup: Arc<dyn ProductLookup>,
    ) -> Self {
        let mut batch = StagingBatch::from_parse_outcome(operation_type, source_name, outcome);
        status::recompute(&mut batch, config.ground_buffer());
        Self {
            batch,
            config,
            lookup,
        }
    }

    /// [`Self::from_parse_outcome`] plus the `BatchStaged` audit event.
    pub async fn stage(
        operation_type: OperationType,
        source_name: impl Into<String>,
        outcome: ParseOutcome,
        config: StagingConfig,
        lookup: Arc<dyn ProductLookup>,
        event_sender: &EventSender,
    ) -> Result<Self, StagingError> {
        let store = Self::from_parse_outcome(operation_type, source_name, outcome, config, lookup);
        let summary = store.batch.summary();
        info!(
            batch_id = %store.batch.id,
            operation_type = %store.batch.operation_type,
            lines = summary.total_lines,
            parse_errors = summary.unresolved_parse_errors,
            "batch staged"
        );
        event_sender
            .send(Event::BatchStaged {
                batch_id: store.batch.id,
                operation_type: store.batch.operation_type,
                line_count: summary.total_lines,
                parse_error_count: summary.unresolved_parse_errors,
                source_name: store.batch.source_name.clone(),
            })
            .await
            .map_err(StagingError::EventError)?;
        Ok(store)
    }

    pub fn batch(&self) -> &StagingBatch {
        &self.batch
    }

    pub fn config(&self) -> &StagingConfig {
        &self.config
    }

    pub(crate) fn batch_mut(&mut self) -> &mut StagingBatch {
        &mut self.batch
    }

    pub(crate) fn lookup(&self) -> &dyn ProductLookup {
        self.lookup.as_ref()
    }

    /// Full recompute over the staged set; called by every command after
    /// its mutation, and safe to call at any time.
    pub(crate) fn recompute(&mut self) {
        let ground_buffer = self.config.ground_buffer_location.clone();
        status::recompute(&mut self.batch, &ground_buffer);
    }

    /// Runs the batch validator against the current state. Re-run
    /// immediately before commit by the commit coordinator.
    pub fn validate(&self) -> ValidationReport {
        validation::validate(&self.batch, self.config.ground_buffer())
    }
}
