//! Batch validator: the gate in front of the commit action.

use crate::conflict::detect_conflicts;
use crate::models::{LineStatus, StagingBatch, WarningKind};

/// Pass/fail decision with the human-readable findings behind it. Every
/// entry names its originating line number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Hard blocks: commit must be refused locally while any remain.
    pub errors: Vec<String>,
    /// Findings the operator may acknowledge and proceed past.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Aggregates the current hard blocks and warnings for a batch.
///
/// Hard blocks: unresolved parse errors, lines still awaiting manual input,
/// and location conflicts outside the ground buffer. Conflicts are detected
/// fresh here rather than read from the batch's warning list, so the report
/// is correct even against a stale snapshot.
///
/// Warnings: insufficient-stock lines (excluded from the commit set but
/// never silently dropped from the report) and informational parser notes.
pub fn validate(batch: &StagingBatch, ground_buffer: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    for parse_error in &batch.parse_errors {
        report.errors.push(format!(
            "line {}: unresolved parse error: {}",
            parse_error.line_number, parse_error.message
        ));
    }

    for line in &batch.lines {
        if line.status == LineStatus::NeedsInput {
            report.errors.push(format!(
                "line {}: waiting for manual SKU and quantity input at {}",
                line.line_number, line.location
            ));
        }
    }

    for finding in detect_conflicts(&batch.lines, batch.operation_type, ground_buffer) {
        match finding.kind {
            WarningKind::LocationConflict => report
                .errors
                .push(format!("line {}: {}", finding.line_number, finding.message)),
            WarningKind::InsufficientStock => report.warnings.push(format!(
                "line {}: {} (excluded from commit)",
                finding.line_number, finding.message
            )),
        }
    }

    for note in &batch.parser_warnings {
        report
            .warnings
            .push(format!("line {}: {}", note.line_number, note.message));
    }

    report
}
