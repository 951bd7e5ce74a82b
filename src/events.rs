//! Domain events published by staging mutations and commit attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::models::OperationType;

/// Events that can occur while a batch is staged, edited and committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    BatchStaged {
        batch_id: Uuid,
        operation_type: OperationType,
        line_count: usize,
        parse_error_count: usize,
        source_name: String,
    },
    ParseErrorFixed {
        batch_id: Uuid,
        line_number: u32,
    },
    ParseErrorIgnored {
        batch_id: Uuid,
        line_number: u32,
    },
    OperationUpdated {
        batch_id: Uuid,
        line_number: u32,
    },
    OperationRemoved {
        batch_id: Uuid,
        line_number: u32,
    },
    MovementRemoved {
        batch_id: Uuid,
        move_number: u32,
    },
    ManualInputCompleted {
        batch_id: Uuid,
        line_number: u32,
        sku: String,
        lookup_failed: bool,
    },
    BatchCommitted {
        batch_id: Uuid,
        operation_type: OperationType,
        line_count: usize,
        committed_at: DateTime<Utc>,
    },
    BatchCommitFailed {
        batch_id: Uuid,
        message: String,
    },
}

/// Sender half of the event channel handed to every command execution.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}
