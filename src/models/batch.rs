use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{LineRecord, LineStatus, OperationType, ParseError, Warning};

/// Envelope returned by every parser variant: successfully interpreted lines,
/// lines that could not be interpreted at all, and informational notes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub recap_items: Vec<LineRecord>,
    pub errors: Vec<ParseError>,
    pub warnings: Vec<Warning>,
}

/// Per-status line counts plus the pending parse-error count; the numbers the
/// recap view renders after every edit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_lines: usize,
    pub ok: usize,
    pub warning: usize,
    pub error: usize,
    pub needs_input: usize,
    pub unresolved_parse_errors: usize,
}

/// The mutable staging area for one parsed file or scanner submission.
///
/// Owns the ordered line records, the unresolved parse errors and the
/// detector-produced warnings. Ephemeral per-session state: never persisted,
/// discarded when the recap view closes or a commit attempt completes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StagingBatch {
    pub id: Uuid,
    pub operation_type: OperationType,
    /// File name or "scanner input"; used purely for audit logging downstream.
    pub source_name: String,
    pub staged_at: DateTime<Utc>,
    pub lines: Vec<LineRecord>,
    pub parse_errors: Vec<ParseError>,
    /// Conflict-detector output. Replaced wholesale on every recompute,
    /// never appended to.
    pub warnings: Vec<Warning>,
    /// Informational notes carried over from the parser envelope; not touched
    /// by recompute.
    pub parser_warnings: Vec<Warning>,
}

impl StagingBatch {
    /// Builds a batch from a parser envelope. Statuses are provisional until
    /// the first recompute pass, which the staging store runs on load.
    pub fn from_parse_outcome(
        operation_type: OperationType,
        source_name: impl Into<String>,
        outcome: ParseOutcome,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation_type,
            source_name: source_name.into(),
            staged_at: Utc::now(),
            lines: outcome.recap_items,
            parse_errors: outcome.errors,
            warnings: Vec::new(),
            parser_warnings: outcome.warnings,
        }
    }

    pub fn line(&self, line_number: u32) -> Option<&LineRecord> {
        self.lines.iter().find(|l| l.line_number == line_number)
    }

    pub fn line_mut(&mut self, line_number: u32) -> Option<&mut LineRecord> {
        self.lines.iter_mut().find(|l| l.line_number == line_number)
    }

    /// Movements batches address rows by move number.
    pub fn line_by_move_number(&self, move_number: u32) -> Option<&LineRecord> {
        self.lines.iter().find(|l| l.move_number == Some(move_number))
    }

    pub fn parse_error(&self, line_number: u32) -> Option<&ParseError> {
        self.parse_errors.iter().find(|p| p.line_number == line_number)
    }

    /// Inserts a line keeping the batch ordered by line number.
    pub fn insert_line(&mut self, line: LineRecord) {
        let at = self
            .lines
            .iter()
            .position(|l| l.line_number > line.line_number)
            .unwrap_or(self.lines.len());
        self.lines.insert(at, line);
    }

    /// Warnings currently attached to one line.
    pub fn warnings_for_line(&self, line_number: u32) -> Vec<&Warning> {
        self.warnings
            .iter()
            .filter(|w| w.line_number == line_number)
            .collect()
    }

    /// Lines eligible for commit: `Ok` always, `Warning` only when the caller
    /// explicitly overrode the warning gate. `Error` and `NeedsInput` lines
    /// are never sent.
    pub fn committable_lines(&self, allow_warnings: bool) -> Vec<LineRecord> {
        self.lines
            .iter()
            .filter(|l| match l.status {
                LineStatus::Ok => true,
                LineStatus::Warning => allow_warnings,
                LineStatus::Error | LineStatus::NeedsInput => false,
            })
            .cloned()
            .collect()
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            total_lines: self.lines.len(),
            unresolved_parse_errors: self.parse_errors.len(),
            ..BatchSummary::default()
        };
        for line in &self.lines {
            match line.status {
                LineStatus::Ok => summary.ok += 1,
                LineStatus::Warning => summary.warning += 1,
                LineStatus::Error => summary.error += 1,
                LineStatus::NeedsInput => summary.needs_input += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_with_lines(lines: Vec<LineRecord>) -> StagingBatch {
        StagingBatch::from_parse_outcome(
            OperationType::Add,
            "load.txt",
            ParseOutcome {
                recap_items: lines,
                errors: vec![],
                warnings: vec![],
            },
        )
    }

    #[test]
    fn insert_line_keeps_line_number_order() {
        let mut batch = batch_with_lines(vec![
            LineRecord::new(1, "A01", "SKU1", OperationType::Add, 5, 0),
            LineRecord::new(4, "A02", "SKU2", OperationType::Add, 5, 0),
        ]);
        batch.insert_line(LineRecord::new(3, "A03", "SKU3", OperationType::Add, 1, 0));
        let numbers: Vec<u32> = batch.lines.iter().map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![1, 3, 4]);
    }

    #[test]
    fn committable_lines_respect_the_warning_gate() {
        let mut batch = batch_with_lines(vec![
            LineRecord::new(1, "A01", "SKU1", OperationType::Add, 5, 0),
            LineRecord::new(2, "A02", "SKU2", OperationType::Add, 5, 0),
            LineRecord::new(3, "A03", "SKU3", OperationType::Add, 5, 0),
        ]);
        batch.lines[1].status = LineStatus::Warning;
        batch.lines[2].status = LineStatus::Error;

        let strict: Vec<u32> = batch
            .committable_lines(false)
            .iter()
            .map(|l| l.line_number)
            .collect();
        assert_eq!(strict, vec![1]);

        let overridden: Vec<u32> = batch
            .committable_lines(true)
            .iter()
            .map(|l| l.line_number)
            .collect();
        assert_eq!(overridden, vec![1, 2]);
    }

    #[test]
    fn summary_counts_every_status_bucket() {
        let mut batch = batch_with_lines(vec![
            LineRecord::new(1, "A01", "SKU1", OperationType::Add, 5, 0),
            LineRecord::pending_input(2, "A02"),
        ]);
        batch.parse_errors.push(ParseError::new(3, "unreadable", "@@@"));
        let summary = batch.summary();
        assert_eq!(summary.total_lines, 2);
        assert_eq!(summary.ok, 1);
        assert_eq!(summary.needs_input, 1);
        assert_eq!(summary.unresolved_parse_errors, 1);
    }
}
