pub mod orchestration;

pub use orchestration::{semantic_release, ReleaseOutcome};
