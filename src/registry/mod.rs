//! Release registry abstraction layer
//!
//! The registry is the remote store of tag references. Listing is paginated
//! and must be drained completely before any release decision is made, see
//! [pagination::TagRefPages].
//!
//! - [github::GitHubRegistry]: GitHub (or GitHub Enterprise) REST API
//! - [local::LocalGitRegistry]: tags of a local repository, optionally pushed
//! - [mock::MockRegistry]: in-memory registry for tests

pub mod github;
pub mod local;
pub mod mock;
pub mod pagination;

pub use github::GitHubRegistry;
pub use local::LocalGitRegistry;
pub use mock::MockRegistry;
pub use pagination::{collect_release_refs, TagRefPages};

use crate::error::Result;

/// A tag reference as listed by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    /// Tag name, with or without the `refs/tags/` prefix
    pub name: String,
    /// Commit (or tag object) the reference points to
    pub sha: String,
}

impl TagRef {
    pub fn new(name: impl Into<String>, sha: impl Into<String>) -> Self {
        TagRef {
            name: name.into(),
            sha: sha.into(),
        }
    }
}

/// One page of a tag listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagRefPage {
    pub refs: Vec<TagRef>,
    /// Page number to request next, `None` on the last page
    pub next_page: Option<u32>,
}

/// Remote store of tag references
pub trait ReleaseRegistry {
    /// List one page of tag references; pages are numbered from 1
    fn list_tag_refs(&self, owner: &str, repo: &str, page: u32) -> Result<TagRefPage>;

    /// Create a tag reference pointing at `sha`
    ///
    /// Fails with `TagAlreadyExists` when the tag is already present.
    fn create_tag_ref(&self, owner: &str, repo: &str, tag: &str, sha: &str) -> Result<()>;
}
