//! Core data model: line records, warnings, parse errors and the staging batch.

pub mod batch;
pub mod line_record;
pub mod warning;

pub use batch::{BatchSummary, ParseOutcome, StagingBatch};
pub use line_record::LineRecord;
pub use warning::{ParseError, Warning};

use serde::{Deserialize, Serialize};

/// Storage location exempt from the one-SKU-per-location rule when no
/// configuration override is supplied. "TERRA" is the ground buffer where
/// mixed stock legitimately accumulates between moves.
pub const DEFAULT_GROUND_BUFFER: &str = "TERRA";

/// Per-line status, recomputed after every mutation of the staged set.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LineStatus {
    /// Committable as-is.
    Ok,
    /// Committable only after an explicit operator override.
    Warning,
    /// Hard block for this line; requires an edit before it can be sent.
    Error,
    /// Bare location scan awaiting a manually supplied SKU and quantity.
    NeedsInput,
}

/// Kind of stock operation a batch stages.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OperationType {
    Add,
    Subtract,
    Realign,
    Movements,
    UnloadContainer,
    RelocateGround,
}

impl OperationType {
    /// True for operations that remove stock and therefore must be checked
    /// against the available quantity before commit.
    pub fn is_subtractive(self) -> bool {
        matches!(self, Self::Subtract)
    }
}

/// Category of a non-fatal warning attached to a staged line.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WarningKind {
    LocationConflict,
    InsufficientStock,
}
