//! Edit operations over the staging area. One command per operator action;
//! each validates its input, mutates the batch, runs the full recompute and
//! publishes a domain event.

use lazy_static::lazy_static;
use prometheus::{IntCounterVec, Opts};

pub mod complete_manual_input_command;
pub mod fix_error_command;
pub mod ignore_error_command;
pub mod remove_movement_command;
pub mod remove_operation_command;
pub mod update_operation_command;

pub use complete_manual_input_command::CompleteManualInputCommand;
pub use fix_error_command::FixErrorCommand;
pub use ignore_error_command::IgnoreErrorCommand;
pub use remove_movement_command::RemoveMovementCommand;
pub use remove_operation_command::RemoveOperationCommand;
pub use update_operation_command::UpdateOperationCommand;

lazy_static! {
    pub(crate) static ref STAGING_EDITS: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "staging_edits_total",
            "Total number of staging edit operations"
        ),
        &["operation"]
    )
    .expect("metric can be created");
    pub(crate) static ref STAGING_EDIT_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "staging_edit_failures_total",
            "Total number of failed staging edit operations"
        ),
        &["operation", "error_type"]
    )
    .expect("metric can be created");
}
