//! Shared fixtures for the integration tests: line builders, an event
//! channel helper, and test doubles for the two network collaborators.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use stockstage::{
    CommitRequest, CommitResponse, CommitService, Event, EventSender, LineRecord, LookupResult,
    OperationType, ParseOutcome, ProductLookup, StagingConfig, StagingError, StagingStore,
};

pub fn line(
    line_number: u32,
    location: &str,
    sku: &str,
    operation_type: OperationType,
    quantity: i64,
    current_quantity: i64,
) -> LineRecord {
    LineRecord::new(line_number, location, sku, operation_type, quantity, current_quantity)
}

pub fn outcome(recap_items: Vec<LineRecord>) -> ParseOutcome {
    ParseOutcome {
        recap_items,
        errors: vec![],
        warnings: vec![],
    }
}

pub fn event_channel() -> (Arc<EventSender>, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(64);
    (Arc::new(EventSender::new(tx)), rx)
}

pub fn store(
    operation_type: OperationType,
    outcome: ParseOutcome,
    lookup: Arc<dyn ProductLookup>,
) -> StagingStore {
    StagingStore::from_parse_outcome(
        operation_type,
        "test-import.txt",
        outcome,
        StagingConfig::default(),
        lookup,
    )
}

mockall::mock! {
    pub Lookup {}

    #[async_trait]
    impl ProductLookup for Lookup {
        async fn lookup(&self, sku: &str, location: &str) -> Result<LookupResult, StagingError>;
    }
}

/// Lookup that always answers the same; for tests that do not care about
/// the collaborator.
pub struct FixedLookup(pub LookupResult);

#[async_trait]
impl ProductLookup for FixedLookup {
    async fn lookup(&self, _sku: &str, _location: &str) -> Result<LookupResult, StagingError> {
        Ok(self.0.clone())
    }
}

/// Lookup that simulates a network failure.
pub struct FailingLookup;

#[async_trait]
impl ProductLookup for FailingLookup {
    async fn lookup(&self, _sku: &str, _location: &str) -> Result<LookupResult, StagingError> {
        Err(StagingError::ExternalServiceError(
            "lookup endpoint unreachable".to_string(),
        ))
    }
}

pub enum CommitBehavior {
    Succeed,
    Refuse(String),
    TransportError(String),
}

/// Commit service double that records every request it receives.
pub struct RecordingCommitService {
    pub behavior: CommitBehavior,
    pub requests: Mutex<Vec<CommitRequest>>,
}

impl RecordingCommitService {
    pub fn new(behavior: CommitBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("lock poisoned").len()
    }
}

#[async_trait]
impl CommitService for RecordingCommitService {
    async fn commit(&self, request: CommitRequest) -> Result<CommitResponse, StagingError> {
        self.requests.lock().expect("lock poisoned").push(request);
        match &self.behavior {
            CommitBehavior::Succeed => Ok(CommitResponse {
                success: true,
                message: "batch applied".to_string(),
            }),
            CommitBehavior::Refuse(message) => Ok(CommitResponse {
                success: false,
                message: message.clone(),
            }),
            CommitBehavior::TransportError(message) => {
                Err(StagingError::ExternalServiceError(message.clone()))
            }
        }
    }
}
