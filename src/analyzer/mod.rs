//! Folding classified commits into a single release severity

pub mod severity_reducer;

pub use severity_reducer::{apply_floor, reduce};
