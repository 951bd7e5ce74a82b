use crate::{
    commands::Command,
    errors::StagingError,
    events::{Event, EventSender},
    staging::StagingStore,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{STAGING_EDITS, STAGING_EDIT_FAILURES};

/// Deletes a line record from the batch. Removing a line can vacate a
/// location and resolve a conflict on the surviving lines, which the
/// recompute picks up.
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveOperationCommand {
    pub line_number: u32,
}

#[async_trait]
impl Command for RemoveOperationCommand {
    type Result = ();

    #[instrument(skip(store, event_sender))]
    async fn execute(
        &self,
        store: &mut StagingStore,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, StagingError> {
        let position = store
            .batch()
            .lines
            .iter()
            .position(|l| l.line_number == self.line_number)
            .ok_or_else(|| {
                STAGING_EDIT_FAILURES
                    .with_label_values(&["remove_operation", "not_found"])
                    .inc();
                StagingError::NotFound(format!("no staged line {}", self.line_number))
            })?;

        store.batch_mut().lines.remove(position);
        store.recompute();

        STAGING_EDITS.with_label_values(&["remove_operation"]).inc();
        info!(line_number = self.line_number, "staged line removed");
        event_sender
            .send(Event::OperationRemoved {
                batch_id: store.batch().id,
                line_number: self.line_number,
            })
            .await
            .map_err(StagingError::EventError)?;
        Ok(())
    }
}
