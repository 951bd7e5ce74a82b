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

/// Permanently discards a parse error without creating a line record.
#[derive(Debug, Serialize, Deserialize)]
pub struct IgnoreErrorCommand {
    pub line_number: u32,
}

#[async_trait]
impl Command for IgnoreErrorCommand {
    type Result = ();

    #[instrument(skip(store, event_sender))]
    async fn execute(
        &self,
        store: &mut StagingStore,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, StagingError> {
        let position = store
            .batch()
            .parse_errors
            .iter()
            .position(|p| p.line_number == self.line_number)
            .ok_or_else(|| {
                STAGING_EDIT_FAILURES
                    .with_label_values(&["ignore_error", "not_found"])
                    .inc();
                StagingError::NotFound(format!("no parse error for line {}", self.line_number))
            })?;

        store.batch_mut().parse_errors.remove(position);
        store.recompute();

        STAGING_EDITS.with_label_values(&["ignore_error"]).inc();
        info!(line_number = self.line_number, "parse error discarded");
        event_sender
            .send(Event::ParseErrorIgnored {
                batch_id: store.batch().id,
                line_number: self.line_number,
            })
            .await
            .map_err(StagingError::EventError)?;
        Ok(())
    }
}
