use crate::{
    commands::Command,
    errors::StagingError,
    events::{Event, EventSender},
    staging::StagingStore,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use validator::Validate;

use super::{STAGING_EDITS, STAGING_EDIT_FAILURES};

/// Rewrites an existing line's location and quantity in place. The SKU is
/// not editable here; changing what is stored means removing the line and
/// fixing or re-scanning it.
///
/// A location edit can create or dissolve a conflict with any other line in
/// the batch, so the recompute that follows always rescans globally.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateOperationCommand {
    pub line_number: u32,
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: String,
    /// New quantity; zero is allowed for realign batches (empty the slot).
    #[validate(range(min = 0))]
    pub quantity: i64,
}

#[async_trait]
impl Command for UpdateOperationCommand {
    type Result = ();

    #[instrument(skip(store, event_sender))]
    async fn execute(
        &self,
        store: &mut StagingStore,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, StagingError> {
        self.validate().map_err(|e| {
            STAGING_EDIT_FAILURES
                .with_label_values(&["update_operation", "validation_error"])
                .inc();
            let msg = format!("Invalid input: {}", e);
            error!("{}", msg);
            StagingError::InvalidInput(e.to_string())
        })?;

        let operation_type = store.batch().operation_type;
        let line = store.batch_mut().line_mut(self.line_number).ok_or_else(|| {
            STAGING_EDIT_FAILURES
                .with_label_values(&["update_operation", "not_found"])
                .inc();
            StagingError::NotFound(format!("no staged line {}", self.line_number))
        })?;
        line.location = self.location.clone();
        line.set_quantity(operation_type, self.quantity);
        store.recompute();

        STAGING_EDITS.with_label_values(&["update_operation"]).inc();
        info!(
            line_number = self.line_number,
            location = %self.location,
            quantity = self.quantity,
            "staged line updated"
        );
        event_sender
            .send(Event::OperationUpdated {
                batch_id: store.batch().id,
                line_number: self.line_number,
            })
            .await
            .map_err(StagingError::EventError)?;
        Ok(())
    }
}
