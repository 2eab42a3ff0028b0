use crate::domain::tag::{tag_name_from_ref, tag_ref_name};
use crate::error::{ReleaseError, Result};
use crate::registry::{ReleaseRegistry, TagRef, TagRefPage};
use git2::{Cred, CredentialType, ErrorClass, ErrorCode, Oid, PushOptions, RemoteCallbacks, Repository};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Registry backed by the tags of a local repository
///
/// New tags are created as lightweight references and, when a push remote
/// is configured, pushed to it right away. `owner`/`repo` are ignored.
pub struct LocalGitRegistry {
    repo: Repository,
    per_page: usize,
    push_remote: Option<String>,
}

impl LocalGitRegistry {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P, per_page: usize, push_remote: Option<String>) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(LocalGitRegistry::from_git2(repo, per_page, push_remote))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Repository, per_page: usize, push_remote: Option<String>) -> Self {
        LocalGitRegistry {
            repo,
            per_page: per_page.max(1),
            push_remote,
        }
    }

    /// All tag references with the commit they resolve to, sorted by name
    fn tag_refs(&self) -> Result<Vec<TagRef>> {
        let mut refs = Vec::new();
        for reference in self.repo.references_glob("refs/tags/*")? {
            let reference = reference?;
            let Some(name) = reference.name() else {
                continue;
            };
            // annotated tags peel through the tag object to the commit
            match reference.peel_to_commit() {
                Ok(commit) => refs.push(TagRef::new(name, commit.id().to_string())),
                Err(e) => debug!(tag = name, error = %e, "skipping tag that does not point at a commit"),
            }
        }
        refs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(refs)
    }

    /// Pushes a tag to the configured remote.
    ///
    /// Authenticates with the SSH agent, then `~/.ssh` keys, then the
    /// default credential helper.
    fn push_tag(&self, tag: &str, remote_name: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|e| {
            ReleaseError::registry(format!("No remote named '{}' found: {}", remote_name, e))
        })?;

        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");
            if allowed_types.contains(CredentialType::SSH_KEY) {
                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
                for key in ssh_key_candidates() {
                    if key.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &key, None) {
                            return Ok(cred);
                        }
                    }
                }
            }
            Cred::default()
        });
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => {
                warn!(refname, status, "remote rejected reference");
                Err(git2::Error::from_str(&format!("Push failed for {}", refname)))
            }
            None => Ok(()),
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = tag_ref_name(tag);
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                ErrorClass::Net => ReleaseError::registry(format!("Network error during push: {}", e)),
                ErrorClass::Reference => {
                    ReleaseError::registry(format!("Reference error during push: {}", e))
                }
                _ => ReleaseError::registry(format!("Failed to push tag '{}': {}", tag, e)),
            })
    }

    /// Delete a local tag reference
    fn discard_tag(&self, tag: &str) -> Result<()> {
        let mut reference = self.repo.find_reference(&tag_ref_name(tag))?;
        reference.delete()?;
        Ok(())
    }
}

fn ssh_key_candidates() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    ["id_ed25519", "id_rsa", "id_ecdsa"]
        .iter()
        .map(|key| home.join(".ssh").join(key))
        .collect()
}

impl ReleaseRegistry for LocalGitRegistry {
    fn list_tag_refs(&self, _owner: &str, _repo: &str, page: u32) -> Result<TagRefPage> {
        let all = self.tag_refs()?;
        let start = (page.saturating_sub(1) as usize).saturating_mul(self.per_page);
        let refs: Vec<TagRef> = all.iter().skip(start).take(self.per_page).cloned().collect();
        let next_page = (start + self.per_page < all.len()).then_some(page + 1);
        Ok(TagRefPage { refs, next_page })
    }

    fn create_tag_ref(&self, _owner: &str, _repo: &str, tag: &str, sha: &str) -> Result<()> {
        let tag = tag_name_from_ref(tag);
        let oid = Oid::from_str(sha)
            .map_err(|e| ReleaseError::registry(format!("Invalid commit sha '{}': {}", sha, e)))?;
        let commit = self.repo.find_commit(oid)?;

        match self.repo.reference(
            &tag_ref_name(tag),
            commit.id(),
            false,
            &format!("semantic-release: tag {}", tag),
        ) {
            Ok(_) => {}
            Err(e) if e.code() == ErrorCode::Exists => {
                return Err(ReleaseError::TagAlreadyExists(tag.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
        info!(tag, sha, "created local tag");

        if let Some(remote) = &self.push_remote {
            if let Err(e) = self.push_tag(tag, remote) {
                // drop the unpublished tag so a rerun can create it again
                if let Err(rollback) = self.discard_tag(tag) {
                    warn!(
                        tag,
                        error = %rollback,
                        "could not remove unpublished tag, delete it before rerunning"
                    );
                }
                return Err(e);
            }
            info!(tag, remote = %remote, "pushed tag");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Repository, Vec<Oid>) {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let mut oids = Vec::new();
        {
            let tree_id = repo.index().unwrap().write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            let mut parent: Option<git2::Commit> = None;
            for message in ["chore: init", "feat: add thing"] {
                let parents: Vec<&git2::Commit> = parent.iter().collect();
                let oid = repo
                    .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
                    .unwrap();
                parent = Some(repo.find_commit(oid).unwrap());
                oids.push(oid);
            }
        }
        (dir, repo, oids)
    }

    #[test]
    fn test_local_registry_lists_and_creates() {
        let (_dir, repo, oids) = init_repo();
        let registry = LocalGitRegistry::from_git2(repo, 1, None);

        assert!(registry.list_tag_refs("o", "r", 1).unwrap().refs.is_empty());

        registry
            .create_tag_ref("o", "r", "v0.1.0", &oids[0].to_string())
            .unwrap();
        registry
            .create_tag_ref("o", "r", "v0.2.0", &oids[1].to_string())
            .unwrap();

        let first = registry.list_tag_refs("o", "r", 1).unwrap();
        assert_eq!(
            first.refs,
            vec![TagRef::new("refs/tags/v0.1.0", oids[0].to_string())]
        );
        assert_eq!(first.next_page, Some(2));

        let second = registry.list_tag_refs("o", "r", 2).unwrap();
        assert_eq!(second.refs[0].sha, oids[1].to_string());
        assert_eq!(second.next_page, None);
    }

    #[test]
    fn test_local_registry_duplicate_tag() {
        let (_dir, repo, oids) = init_repo();
        let registry = LocalGitRegistry::from_git2(repo, 100, None);
        let sha = oids[1].to_string();

        registry.create_tag_ref("o", "r", "v1.0.0", &sha).unwrap();
        let err = registry.create_tag_ref("o", "r", "v1.0.0", &sha).unwrap_err();
        assert!(matches!(err, ReleaseError::TagAlreadyExists(_)));
    }

    #[test]
    fn test_local_registry_invalid_sha() {
        let (_dir, repo, _oids) = init_repo();
        let registry = LocalGitRegistry::from_git2(repo, 100, None);
        assert!(registry.create_tag_ref("o", "r", "v1.0.0", "not-a-sha").is_err());
    }

    #[test]
    fn test_discard_tag() {
        let (_dir, repo, oids) = init_repo();
        let registry = LocalGitRegistry::from_git2(repo, 100, None);
        registry
            .create_tag_ref("o", "r", "v1.0.0", &oids[0].to_string())
            .unwrap();

        registry.discard_tag("v1.0.0").unwrap();
        assert!(registry.list_tag_refs("o", "r", 1).unwrap().refs.is_empty());
        // a second rollback has nothing left to delete and reports it
        assert!(registry.discard_tag("v1.0.0").is_err());
    }

    #[test]
    fn test_local_registry_push_to_missing_remote_fails() {
        let (_dir, repo, oids) = init_repo();
        let registry = LocalGitRegistry::from_git2(repo, 100, Some("origin".to_string()));
        let err = registry
            .create_tag_ref("o", "r", "v1.0.0", &oids[0].to_string())
            .unwrap_err();
        assert!(err.to_string().contains("No remote named 'origin'"));
        assert!(registry.list_tag_refs("o", "r", 1).unwrap().refs.is_empty());
    }
}
