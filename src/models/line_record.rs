use serde::{Deserialize, Serialize};

use super::{LineStatus, OperationType};

/// One staged stock operation: a location, a SKU and a signed quantity delta,
/// together with the projected before/after quantities and the current status.
///
/// The delta is carried as two non-negative fields (`quantity_to_add`,
/// `quantity_to_subtract`); at most one of them is non-zero at any time and
/// [`LineRecord::quantity_delta`] folds them back into the signed value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// 1-based position in the source file or scanner stream; unique within
    /// a batch and the key for every edit operation.
    pub line_number: u32,
    /// Movements batches key rows by move number instead of line number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_number: Option<u32>,
    pub location: String,
    /// Empty only while the line is awaiting manual input.
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity_to_add: i64,
    pub quantity_to_subtract: i64,
    pub current_quantity: i64,
    pub new_quantity: i64,
    pub status: LineStatus,
    pub needs_input: bool,
}

impl LineRecord {
    /// Builds a fully specified line; the status is provisional until the
    /// next recompute pass runs over the whole batch.
    pub fn new(
        line_number: u32,
        location: impl Into<String>,
        sku: impl Into<String>,
        operation_type: OperationType,
        quantity: i64,
        current_quantity: i64,
    ) -> Self {
        let mut record = Self {
            line_number,
            move_number: None,
            location: location.into(),
            sku: sku.into(),
            description: None,
            quantity_to_add: 0,
            quantity_to_subtract: 0,
            current_quantity,
            new_quantity: current_quantity,
            status: LineStatus::Ok,
            needs_input: false,
        };
        record.set_quantity(operation_type, quantity);
        record
    }

    /// Builds a line from a bare location scan: no SKU yet, quantity unknown,
    /// blocked on manual input.
    pub fn pending_input(line_number: u32, location: impl Into<String>) -> Self {
        Self {
            line_number,
            move_number: None,
            location: location.into(),
            sku: String::new(),
            description: None,
            quantity_to_add: 0,
            quantity_to_subtract: 0,
            current_quantity: 0,
            new_quantity: 0,
            status: LineStatus::NeedsInput,
            needs_input: true,
        }
    }

    /// Signed quantity delta: positive for additions, negative for
    /// subtractions. For realign batches the add field carries the absolute
    /// target instead of a delta.
    pub fn quantity_delta(&self) -> i64 {
        self.quantity_to_add - self.quantity_to_subtract
    }

    /// Routes a quantity into the field the operation type reads from,
    /// clearing the other one.
    pub fn set_quantity(&mut self, operation_type: OperationType, quantity: i64) {
        self.quantity_to_add = 0;
        self.quantity_to_subtract = 0;
        if operation_type.is_subtractive() {
            self.quantity_to_subtract = quantity;
        } else {
            self.quantity_to_add = quantity;
        }
    }

    /// Lines in `Error` or `NeedsInput` are excluded from location grouping
    /// and from the committable set.
    pub fn is_conflict_eligible(&self) -> bool {
        !matches!(self.status, LineStatus::Error | LineStatus::NeedsInput)
    }
}
