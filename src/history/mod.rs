//! Commit history abstraction layer
//!
//! The release engine reads commits through the [HistoryProvider] trait so
//! the same workflow runs against a real repository or an in-memory fixture:
//!
//! - [repository::Git2History]: reads a local repository with the `git2` crate
//! - [mock::MockHistory]: canned commits for tests
//!
//! ```rust
//! # use semantic_release::history::HistoryProvider;
//! # fn example<H: HistoryProvider>(history: &H) -> semantic_release::Result<()> {
//! for sha in history.list_commits("0aff6e71", None)? {
//!     println!("{}: {}", sha, history.title(&sha)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockHistory;
pub use repository::Git2History;

use crate::domain::CommitRecord;
use crate::error::Result;

/// Read-only access to the commits of a range
pub trait HistoryProvider {
    /// Commits in `from..to`, most recent first
    ///
    /// `from` is exclusive and required; an empty `from` is an
    /// `InvalidRange` error. `to` defaults to the current branch tip.
    fn list_commits(&self, from: &str, to: Option<&str>) -> Result<Vec<String>>;

    /// First line of the commit message
    fn title(&self, sha: &str) -> Result<String>;

    /// Commit message after the title, possibly empty
    fn body(&self, sha: &str) -> Result<String>;

    /// Title and body together as a record
    fn read_commit(&self, sha: &str) -> Result<CommitRecord> {
        Ok(CommitRecord::new(sha, self.title(sha)?, self.body(sha)?))
    }
}
