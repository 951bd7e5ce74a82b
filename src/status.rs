//! Status engine: re-derives every line's projected quantity and status.
//!
//! Runs after the initial load and after every edit operation, so the
//! queryable state is always consistent with the current staged set.
//! The pass is idempotent: statuses are fully derived from the line data,
//! and a fresh recompute over the same lines yields the same result.

use crate::conflict::{detect_conflicts, is_insufficient};
use crate::models::{LineRecord, LineStatus, OperationType, StagingBatch, WarningKind};

/// Projected on-hand quantity after the line is applied.
///
/// `add` and the movement-style operations deposit at the destination;
/// `subtract` clamps at zero (never negative); `realign` treats the staged
/// quantity as the absolute target.
fn projected_quantity(operation_type: OperationType, line: &LineRecord) -> i64 {
    match operation_type {
        OperationType::Add
        | OperationType::Movements
        | OperationType::UnloadContainer
        | OperationType::RelocateGround => line.current_quantity + line.quantity_to_add,
        OperationType::Subtract => (line.current_quantity - line.quantity_to_subtract).max(0),
        OperationType::Realign => line.quantity_to_add,
    }
}

/// Recomputes quantities, warnings and statuses for the whole batch.
///
/// Three passes: arithmetic plus the per-line hard checks, then a full
/// conflict scan (the warning list is replaced, never appended to), then the
/// final status assignment. `NeedsInput` always wins for its line; `Error`
/// takes precedence over `Warning`; lines with no finding become `Ok`.
pub fn recompute(batch: &mut StagingBatch, ground_buffer: &str) {
    let operation_type = batch.operation_type;
    let subtractive = operation_type.is_subtractive();

    for line in &mut batch.lines {
        if line.needs_input {
            line.status = LineStatus::NeedsInput;
            line.new_quantity = line.current_quantity;
            continue;
        }
        line.new_quantity = projected_quantity(operation_type, line);
        line.status = if subtractive && is_insufficient(line) {
            LineStatus::Error
        } else {
            LineStatus::Ok
        };
    }

    batch.warnings = detect_conflicts(&batch.lines, operation_type, ground_buffer);

    for line in &mut batch.lines {
        if matches!(line.status, LineStatus::NeedsInput | LineStatus::Error) {
            continue;
        }
        let in_conflict = batch
            .warnings
            .iter()
            .any(|w| w.line_number == line.line_number && w.kind == WarningKind::LocationConflict);
        line.status = if in_conflict {
            LineStatus::Warning
        } else {
            LineStatus::Ok
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParseOutcome, DEFAULT_GROUND_BUFFER};
    use test_case::test_case;

    fn batch(operation_type: OperationType, lines: Vec<LineRecord>) -> StagingBatch {
        StagingBatch::from_parse_outcome(
            operation_type,
            "test.txt",
            ParseOutcome {
                recap_items: lines,
                errors: vec![],
                warnings: vec![],
            },
        )
    }

    #[test]
    fn add_projects_current_plus_quantity() {
        let mut b = batch(
            OperationType::Add,
            vec![LineRecord::new(1, "A01", "SKU1", OperationType::Add, 5, 10)],
        );
        recompute(&mut b, DEFAULT_GROUND_BUFFER);
        assert_eq!(b.lines[0].status, LineStatus::Ok);
        assert_eq!(b.lines[0].new_quantity, 15);
    }

    #[test]
    fn oversubtraction_clamps_to_zero_and_errors() {
        let mut b = batch(
            OperationType::Subtract,
            vec![LineRecord::new(1, "B02", "SKU9", OperationType::Subtract, 5, 3)],
        );
        recompute(&mut b, DEFAULT_GROUND_BUFFER);
        assert_eq!(b.lines[0].status, LineStatus::Error);
        assert_eq!(b.lines[0].new_quantity, 0);
        assert_eq!(b.warnings.len(), 1);
        assert_eq!(b.warnings[0].kind, WarningKind::InsufficientStock);
    }

    #[test_case(0, 10, 10 ; "subtract nothing")]
    #[test_case(4, 10, 6 ; "partial subtract")]
    #[test_case(10, 10, 0 ; "subtract everything")]
    fn subtract_arithmetic(quantity: i64, current: i64, expected: i64) {
        let mut b = batch(
            OperationType::Subtract,
            vec![LineRecord::new(1, "B02", "SKU9", OperationType::Subtract, quantity, current)],
        );
        recompute(&mut b, DEFAULT_GROUND_BUFFER);
        assert_eq!(b.lines[0].new_quantity, expected);
        assert_eq!(b.lines[0].status, LineStatus::Ok);
    }

    #[test]
    fn realign_takes_the_quantity_as_absolute_target() {
        let mut b = batch(
            OperationType::Realign,
            vec![LineRecord::new(1, "C03", "SKU4", OperationType::Realign, 7, 42)],
        );
        recompute(&mut b, DEFAULT_GROUND_BUFFER);
        assert_eq!(b.lines[0].new_quantity, 7);
        assert_eq!(b.lines[0].status, LineStatus::Ok);
    }

    #[test]
    fn colliding_lines_both_become_warning() {
        let mut b = batch(
            OperationType::Add,
            vec![
                LineRecord::new(1, "A01", "SKU1", OperationType::Add, 5, 10),
                LineRecord::new(2, "A01", "SKU2", OperationType::Add, 2, 3),
            ],
        );
        recompute(&mut b, DEFAULT_GROUND_BUFFER);
        assert_eq!(b.lines[0].status, LineStatus::Warning);
        assert_eq!(b.lines[1].status, LineStatus::Warning);
        assert_eq!(b.warnings.len(), 2);
        assert!(b
            .warnings
            .iter()
            .all(|w| w.related_location.as_deref() == Some("A01")));
    }

    #[test]
    fn needs_input_wins_over_every_other_check() {
        let mut b = batch(
            OperationType::Subtract,
            vec![LineRecord::pending_input(1, "A01")],
        );
        recompute(&mut b, DEFAULT_GROUND_BUFFER);
        assert_eq!(b.lines[0].status, LineStatus::NeedsInput);
        assert!(b.warnings.is_empty());
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut b = batch(
            OperationType::Subtract,
            vec![
                LineRecord::new(1, "A01", "SKU1", OperationType::Subtract, 5, 3),
                LineRecord::new(2, "A02", "SKU2", OperationType::Subtract, 1, 9),
                LineRecord::new(3, "A02", "SKU3", OperationType::Subtract, 1, 9),
            ],
        );
        recompute(&mut b, DEFAULT_GROUND_BUFFER);
        let first = b.clone();
        recompute(&mut b, DEFAULT_GROUND_BUFFER);
        assert_eq!(b.lines, first.lines);
        assert_eq!(b.warnings, first.warnings);
    }

    #[test]
    fn warnings_are_replaced_not_appended() {
        let mut b = batch(
            OperationType::Add,
            vec![
                LineRecord::new(1, "A01", "SKU1", OperationType::Add, 5, 10),
                LineRecord::new(2, "A01", "SKU2", OperationType::Add, 2, 3),
            ],
        );
        recompute(&mut b, DEFAULT_GROUND_BUFFER);
        recompute(&mut b, DEFAULT_GROUND_BUFFER);
        recompute(&mut b, DEFAULT_GROUND_BUFFER);
        assert_eq!(b.warnings.len(), 2);
    }

    #[test]
    fn removing_a_colliding_line_resolves_the_survivor() {
        let mut b = batch(
            OperationType::Add,
            vec![
                LineRecord::new(1, "A01", "SKU1", OperationType::Add, 5, 10),
                LineRecord::new(2, "A01", "SKU2", OperationType::Add, 2, 3),
            ],
        );
        recompute(&mut b, DEFAULT_GROUND_BUFFER);
        assert_eq!(b.lines[0].status, LineStatus::Warning);

        b.lines.remove(1);
        recompute(&mut b, DEFAULT_GROUND_BUFFER);
        assert_eq!(b.lines[0].status, LineStatus::Ok);
        assert!(b.warnings.is_empty());
    }
}
