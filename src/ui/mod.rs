//! User interface module - terminal output of release runs.

pub mod formatter;

pub use formatter::{
    display_error, display_outcome, display_status, display_success,
    format_decision, INVALID_RANGE_MESSAGE,
};
