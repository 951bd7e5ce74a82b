use crate::{
    commands::Command,
    errors::StagingError,
    events::{Event, EventSender},
    models::LineRecord,
    staging::StagingStore,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use super::{STAGING_EDITS, STAGING_EDIT_FAILURES};

/// Resolves a parse error by turning it into a proper line record.
///
/// The parse error is consumed; the new line joins the batch in line-number
/// order and the full recompute assigns its status. On-hand quantity is
/// fetched best-effort from the product lookup; a failed lookup falls back
/// to zero, which on subtract batches leaves the line in `Error` until the
/// operator corrects it.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct FixErrorCommand {
    pub line_number: u32,
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: String,
    #[validate(length(min = 1, message = "sku must not be empty"))]
    pub sku: String,
    #[validate(range(min = 1))]
    pub quantity: i64,
}

#[async_trait]
impl Command for FixErrorCommand {
    type Result = ();

    #[instrument(skip(store, event_sender))]
    async fn execute(
        &self,
        store: &mut StagingStore,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, StagingError> {
        self.validate().map_err(|e| {
            STAGING_EDIT_FAILURES
                .with_label_values(&["fix_error", "validation_error"])
                .inc();
            let msg = format!("Invalid input: {}", e);
            error!("{}", msg);
            StagingError::InvalidInput(e.to_string())
        })?;

        let position = store
            .batch()
            .parse_errors
            .iter()
            .position(|p| p.line_number == self.line_number)
            .ok_or_else(|| {
                STAGING_EDIT_FAILURES
                    .with_label_values(&["fix_error", "not_found"])
                    .inc();
                StagingError::NotFound(format!("no parse error for line {}", self.line_number))
            })?;

        let current_quantity = match store.lookup().lookup(&self.sku, &self.location).await {
            Ok(result) if result.exists => result.current_quantity,
            Ok(_) => 0,
            Err(e) => {
                warn!(
                    line_number = self.line_number,
                    sku = %self.sku,
                    "stock lookup failed while fixing a parse error, assuming zero on hand: {}",
                    e
                );
                0
            }
        };

        let batch = store.batch_mut();
        batch.parse_errors.remove(position);
        let operation_type = batch.operation_type;
        batch.insert_line(LineRecord::new(
            self.line_number,
            self.location.clone(),
            self.sku.clone(),
            operation_type,
            self.quantity,
            current_quantity,
        ));
        store.recompute();

        STAGING_EDITS.with_label_values(&["fix_error"]).inc();
        info!(
            line_number = self.line_number,
            location = %self.location,
            sku = %self.sku,
            "parse error fixed into a staged line"
        );
        event_sender
            .send(Event::ParseErrorFixed {
                batch_id: store.batch().id,
                line_number: self.line_number,
            })
            .await
            .map_err(StagingError::EventError)?;
        Ok(())
    }
}
