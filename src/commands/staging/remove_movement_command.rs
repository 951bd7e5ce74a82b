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

/// Movements-batch analogue of remove-operation, keyed by move number
/// rather than line number.
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveMovementCommand {
    pub move_number: u32,
}

#[async_trait]
impl Command for RemoveMovementCommand {
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
            .position(|l| l.move_number == Some(self.move_number))
            .ok_or_else(|| {
                STAGING_EDIT_FAILURES
                    .with_label_values(&["remove_movement", "not_found"])
                    .inc();
                StagingError::NotFound(format!("no staged movement {}", self.move_number))
            })?;

        store.batch_mut().lines.remove(position);
        store.recompute();

        STAGING_EDITS.with_label_values(&["remove_movement"]).inc();
        info!(move_number = self.move_number, "staged movement removed");
        event_sender
            .send(Event::MovementRemoved {
                batch_id: store.batch().id,
                move_number: self.move_number,
            })
            .await
            .map_err(StagingError::EventError)?;
        Ok(())
    }
}
