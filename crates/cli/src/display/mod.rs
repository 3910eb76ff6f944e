pub mod formatter;

pub use formatter::{print_analysis, print_outcome, print_validation_error};
