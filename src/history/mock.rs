use crate::domain::CommitRecord;
use crate::error::{ReleaseError, Result};
use crate::history::HistoryProvider;

/// In-memory history for testing without a repository
///
/// Commits are stored most recent first. A range `from..to` starts at `to`
/// (or the first commit) and stops before `from`.
#[derive(Debug, Default)]
pub struct MockHistory {
    commits: Vec<CommitRecord>,
}

impl MockHistory {
    /// Create a new empty mock history
    pub fn new() -> Self {
        MockHistory::default()
    }

    /// Append a commit older than every commit added so far
    pub fn push_commit(&mut self, sha: &str, title: &str, body: &str) -> &mut Self {
        self.commits.push(CommitRecord::new(sha, title, body));
        self
    }

    fn find(&self, sha: &str) -> Result<&CommitRecord> {
        self.commits
            .iter()
            .find(|c| c.sha == sha)
            .ok_or_else(|| ReleaseError::invalid_range(format!("unknown commit '{}'", sha)))
    }
}

impl HistoryProvider for MockHistory {
    fn list_commits(&self, from: &str, to: Option<&str>) -> Result<Vec<String>> {
        if from.is_empty() {
            return Err(ReleaseError::invalid_range("no from provided"));
        }

        let start = match to {
            Some(to) => self
                .commits
                .iter()
                .position(|c| c.sha == to)
                .ok_or_else(|| ReleaseError::invalid_range(format!("unknown commit '{}'", to)))?,
            None => 0,
        };

        Ok(self.commits[start..]
            .iter()
            .take_while(|c| c.sha != from)
            .map(|c| c.sha.clone())
            .collect())
    }

    fn title(&self, sha: &str) -> Result<String> {
        Ok(self.find(sha)?.title.clone())
    }

    fn body(&self, sha: &str) -> Result<String> {
        Ok(self.find(sha)?.body.clone())
    }
}
