use crate::error::{ReleaseError, Result};
use crate::history::HistoryProvider;
use git2::{Commit, Repository, Sort};
use std::path::Path;
use tracing::debug;

/// Commit history of a local repository, read with `git2`
pub struct Git2History {
    repo: Repository,
}

impl Git2History {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Git2History { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Repository) -> Self {
        Git2History { repo }
    }

    /// Short name of the checked-out branch (e.g., "master")
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.shorthand()
            .map(|s| s.to_string())
            .ok_or_else(|| ReleaseError::config("HEAD is not a valid branch name"))
    }

    fn find_commit(&self, rev: &str) -> Result<Commit<'_>> {
        let object = self.repo.revparse_single(rev)?;
        Ok(object.peel_to_commit()?)
    }
}

impl HistoryProvider for Git2History {
    fn list_commits(&self, from: &str, to: Option<&str>) -> Result<Vec<String>> {
        if from.is_empty() {
            return Err(ReleaseError::invalid_range("no from provided"));
        }

        let from_commit = self
            .find_commit(from)
            .map_err(|e| ReleaseError::invalid_range(format!("cannot resolve '{}': {}", from, e)))?;
        let to_commit = match to {
            Some(rev) => self.find_commit(rev),
            None => self.find_commit("HEAD"),
        }
        .map_err(|e| {
            ReleaseError::invalid_range(format!(
                "cannot resolve '{}': {}",
                to.unwrap_or("HEAD"),
                e
            ))
        })?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to_commit.id())?;
        revwalk.hide(from_commit.id())?;

        let mut commits = Vec::new();
        for oid in revwalk {
            commits.push(oid?.to_string());
        }

        debug!(from, to = to.unwrap_or("HEAD"), count = commits.len(), "listed commits");
        Ok(commits)
    }

    fn title(&self, sha: &str) -> Result<String> {
        let commit = self.find_commit(sha)?;
        Ok(commit.summary().unwrap_or_default().to_string())
    }

    fn body(&self, sha: &str) -> Result<String> {
        let commit = self.find_commit(sha)?;
        Ok(commit.body().unwrap_or_default().trim().to_string())
    }
}
