use serde::{Deserialize, Serialize};

use super::WarningKind;

/// Non-fatal finding attached to a staged line by the conflict detector
/// (or, for informational notes, by the upstream parser).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub line_number: u32,
    pub kind: WarningKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_sku: Option<String>,
}

/// A source line the external parser could not interpret. Stays in the batch
/// until the operator either fixes it into a proper line record or discards
/// it; unresolved parse errors block commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub line_number: u32,
    pub message: String,
    pub raw_input: String,
    /// Best-effort hints recovered by the parser, pre-filling the fix dialog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_quantity: Option<i64>,
}

impl ParseError {
    pub fn new(line_number: u32, message: impl Into<String>, raw_input: impl Into<String>) -> Self {
        Self {
            line_number,
            message: message.into(),
            raw_input: raw_input.into(),
            suggested_location: None,
            suggested_sku: None,
            suggested_quantity: None,
        }
    }
}
