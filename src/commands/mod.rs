use crate::{errors::StagingError, events::EventSender, staging::StagingStore};
use async_trait::async_trait;
use std::sync::Arc;

/// Command trait for implementing the Command Pattern
///
/// Encapsulates one operator-initiated edit of the staging area: input
/// validation, the mutation itself, the mandatory full recompute, and the
/// domain event it publishes.
#[async_trait]
pub trait Command: Send + Sync {
    /// The return type of the command when executed successfully
    type Result;

    /// Execute the command with the given dependencies
    ///
    /// # Arguments
    /// * `store` - The staging store owning the batch and its collaborators
    /// * `event_sender` - Channel to publish domain events
    ///
    /// # Returns
    /// * `Result<Self::Result, StagingError>` - The result of command execution or an error
    async fn execute(
        &self,
        store: &mut StagingStore,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, StagingError>;
}

pub mod staging;
