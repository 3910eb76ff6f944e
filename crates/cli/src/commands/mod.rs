pub mod analyze;
pub mod database;
pub mod dbcontext;

pub use analyze::analyze_command;
pub use database::database_command;
pub use dbcontext::dbcontext_command;

/// Process exit codes
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    /// A stage failed or an edit could not be placed
    pub const FAILURE: i32 = -1;
    /// Missing or invalid command options
    pub const INVALID_INPUT: i32 = -2;
}

use crate::display::{print_outcome, print_validation_error};
use anyhow::Result;
use dbwire_core::{Error, ScaffoldOutcome};

/// Map a scaffolder result onto output and an exit code
fn finish(result: dbwire_core::Result<ScaffoldOutcome>, json: bool) -> Result<i32> {
    match result {
        Ok(outcome) => {
            print_outcome(&outcome, json)?;
            Ok(if outcome.success() {
                exit_code::SUCCESS
            } else {
                exit_code::FAILURE
            })
        }
        Err(Error::Validation(e)) => {
            print_validation_error(&e);
            Ok(exit_code::INVALID_INPUT)
        }
        Err(e) => Err(e.into()),
    }
}
