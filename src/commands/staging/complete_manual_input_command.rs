use crate::{
    commands::Command,
    errors::StagingError,
    events::{Event, EventSender},
    models::LineStatus,
    staging::StagingStore,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use super::{STAGING_EDITS, STAGING_EDIT_FAILURES};

/// Resolves a bare-location-scan line by supplying the SKU and quantity the
/// scanner could not provide.
///
/// The product lookup fills in the on-hand quantity at the line's location.
/// If the lookup fails the line is completed anyway with zero on hand: on
/// additive batches that is harmless, on subtract batches the recompute
/// forces the line into `Error` so a destructive operation against unknown
/// stock can never be committed.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CompleteManualInputCommand {
    pub line_number: u32,
    #[validate(length(min = 1, message = "sku must not be empty"))]
    pub sku: String,
    #[validate(range(min = 1))]
    pub quantity: i64,
}

#[async_trait]
impl Command for CompleteManualInputCommand {
    type Result = LineStatus;

    #[instrument(skip(store, event_sender))]
    async fn execute(
        &self,
        store: &mut StagingStore,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, StagingError> {
        self.validate().map_err(|e| {
            STAGING_EDIT_FAILURES
                .with_label_values(&["complete_manual_input", "validation_error"])
                .inc();
            let msg = format!("Invalid input: {}", e);
            error!("{}", msg);
            StagingError::InvalidInput(e.to_string())
        })?;

        let location = {
            let line = store.batch().line(self.line_number).ok_or_else(|| {
                STAGING_EDIT_FAILURES
                    .with_label_values(&["complete_manual_input", "not_found"])
                    .inc();
                StagingError::NotFound(format!("no staged line {}", self.line_number))
            })?;
            if !line.needs_input {
                STAGING_EDIT_FAILURES
                    .with_label_values(&["complete_manual_input", "not_pending"])
                    .inc();
                return Err(StagingError::InvalidOperation(format!(
                    "line {} does not require manual input",
                    self.line_number
                )));
            }
            line.location.clone()
        };

        let (current_quantity, description, lookup_failed) =
            match store.lookup().lookup(&self.sku, &location).await {
                Ok(result) if result.exists => (result.current_quantity, result.description, false),
                Ok(_) => (0, None, false),
                Err(e) => {
                    warn!(
                        line_number = self.line_number,
                        sku = %self.sku,
                        "stock lookup failed, completing with zero on hand: {}",
                        e
                    );
                    (0, None, true)
                }
            };

        let operation_type = store.batch().operation_type;
        let line = store
            .batch_mut()
            .line_mut(self.line_number)
            .ok_or_else(|| StagingError::NotFound(format!("no staged line {}", self.line_number)))?;
        line.sku = self.sku.clone();
        line.description = description;
        line.set_quantity(operation_type, self.quantity);
        line.current_quantity = current_quantity;
        line.needs_input = false;
        store.recompute();

        let status = store
            .batch()
            .line(self.line_number)
            .map(|l| l.status)
            .unwrap_or(LineStatus::Error);

        STAGING_EDITS
            .with_label_values(&["complete_manual_input"])
            .inc();
        info!(
            line_number = self.line_number,
            sku = %self.sku,
            status = %status,
            lookup_failed,
            "manual input completed"
        );
        event_sender
            .send(Event::ManualInputCompleted {
                batch_id: store.batch().id,
                line_number: self.line_number,
                sku: self.sku.clone(),
                lookup_failed,
            })
            .await
            .map_err(StagingError::EventError)?;
        Ok(status)
    }
}
