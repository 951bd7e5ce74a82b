//! Contracts with the excluded collaborators: the line parser that produces
//! the staging envelope, the product/inventory lookup used to complete manual
//! input, and the commit service that durably applies an accepted batch.
//!
//! The core owns no wire format; implementations of these traits live in the
//! surrounding application (HTTP client, test double, ...).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StagingError;
use crate::models::{LineRecord, OperationType, ParseOutcome};

/// One parser variant exists per operation type (add, subtract, realign,
/// movements, unload container, relocate ground); all return the same
/// envelope shape.
pub trait LineParser: Send + Sync {
    /// Operation type this variant produces batches for.
    fn operation_type(&self) -> OperationType;

    /// Turns raw scanner/file input into an ordered sequence of proposed
    /// operations and parse errors.
    fn parse(&self, raw_input: &str) -> Result<ParseOutcome, StagingError>;
}

/// Answer from the product/inventory lookup for a SKU at a location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub current_quantity: i64,
}

/// SKU existence and on-hand quantity lookup. A network collaborator: the
/// only suspension point inside an edit operation.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn lookup(&self, sku: &str, location: &str) -> Result<LookupResult, StagingError>;
}

/// Payload submitted to the commit service: the accepted lines plus the
/// audit fields the backend logs against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommitRequest {
    pub batch_id: Uuid,
    pub operation_type: OperationType,
    pub source_name: String,
    pub staged_at: DateTime<Utc>,
    pub lines: Vec<LineRecord>,
}

/// Service-level verdict. All-or-nothing application is the service's
/// contract; the core never re-implements it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitResponse {
    pub success: bool,
    pub message: String,
}

/// Durable application of an accepted batch in one atomic call.
#[async_trait]
pub trait CommitService: Send + Sync {
    async fn commit(&self, request: CommitRequest) -> Result<CommitResponse, StagingError>;
}
