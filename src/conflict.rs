//! Conflict detection over the staged line set.
//!
//! Pure functions: no side effects, deterministic for a given input slice.
//! The caller replaces the batch's warning list with the returned vector on
//! every recompute; warnings are never appended across passes.

use std::collections::HashMap;

use crate::models::{LineRecord, LineStatus, OperationType, Warning, WarningKind};

/// True when a subtraction-path line asks for more stock than the location
/// currently holds. Shared with the status engine so the error status and
/// the attached warning can never disagree.
pub(crate) fn is_insufficient(line: &LineRecord) -> bool {
    let delta = line.quantity_delta();
    delta < 0 && -delta > line.current_quantity
}

/// Scans the whole staged set and returns the current cross-line findings:
///
/// - `location_conflict` — a location other than the ground buffer holds more
///   than one distinct non-empty SKU among eligible lines (not `Error`, not
///   `NeedsInput`). Every colliding line is flagged; there is no first-wins
///   tie-break when three or more SKUs collide.
/// - `insufficient_stock` — on subtractive batches, a line whose delta
///   magnitude exceeds the available quantity. Checked independently of the
///   grouping pass and regardless of the line's current status, so the
///   finding survives recomputes for as long as its cause does.
///
/// The full rescan is O(n) per call; acceptable at observed batch sizes
/// (hundreds of lines).
pub fn detect_conflicts(
    lines: &[LineRecord],
    operation_type: OperationType,
    ground_buffer: &str,
) -> Vec<Warning> {
    let mut warnings = Vec::new();

    let mut by_location: HashMap<&str, Vec<&LineRecord>> = HashMap::new();
    for line in lines.iter().filter(|l| l.is_conflict_eligible()) {
        if line.location == ground_buffer {
            continue;
        }
        by_location.entry(line.location.as_str()).or_default().push(line);
    }

    for (location, group) in &by_location {
        let mut skus: Vec<&str> = group
            .iter()
            .map(|l| l.sku.as_str())
            .filter(|s| !s.is_empty())
            .collect();
        skus.sort_unstable();
        skus.dedup();
        if skus.len() <= 1 {
            continue;
        }
        for line in group.iter().filter(|l| !l.sku.is_empty()) {
            warnings.push(Warning {
                line_number: line.line_number,
                kind: WarningKind::LocationConflict,
                message: format!(
                    "location {} already stages a different SKU; line {} holds {}",
                    location, line.line_number, line.sku
                ),
                related_location: Some((*location).to_string()),
                related_sku: Some(line.sku.clone()),
            });
        }
    }

    if operation_type.is_subtractive() {
        for line in lines.iter().filter(|l| l.status != LineStatus::NeedsInput) {
            if is_insufficient(line) {
                warnings.push(Warning {
                    line_number: line.line_number,
                    kind: WarningKind::InsufficientStock,
                    message: format!(
                        "cannot subtract {} of {} at {}: only {} available",
                        -line.quantity_delta(),
                        line.sku,
                        line.location,
                        line.current_quantity
                    ),
                    related_location: Some(line.location.clone()),
                    related_sku: Some(line.sku.clone()),
                });
            }
        }
    }

    // HashMap grouping is unordered; fix the output order.
    warnings.sort_by(|a, b| (a.line_number, a.kind).cmp(&(b.line_number, b.kind)));
    warnings
}
