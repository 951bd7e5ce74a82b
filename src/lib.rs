//! Stockstage Library
//!
//! Batch stock-operation staging and conflict-resolution engine for warehouse
//! inventory imports. The crate sits between three external collaborators —
//! a line parser, a SKU/quantity lookup, and a commit service — and owns the
//! in-memory staging area where an operator inspects, corrects, completes, or
//! discards individual lines before the validated subset is committed as one
//! atomic batch.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod commands;
pub mod commit;
pub mod config;
pub mod conflict;
pub mod errors;
pub mod events;
pub mod logging;
pub mod models;
pub mod services;
pub mod staging;
pub mod status;
pub mod validation;

pub use commit::{CommitCoordinator, CommitOutcome};
pub use config::StagingConfig;
pub use errors::StagingError;
pub use events::{Event, EventSender};
pub use models::{
    LineRecord, LineStatus, OperationType, ParseError, ParseOutcome, StagingBatch, Warning,
    WarningKind,
};
pub use services::{
    CommitRequest, CommitResponse, CommitService, LineParser, LookupResult, ProductLookup,
};
pub use staging::StagingStore;
pub use validation::{validate, ValidationReport};
