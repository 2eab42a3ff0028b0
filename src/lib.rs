pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod history;
pub mod registry;
pub mod resolver;
pub mod ui;

pub use cli::{semantic_release, ReleaseOutcome};
pub use error::{ReleaseError, Result};
