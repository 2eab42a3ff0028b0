/// Why a run ends without publishing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotReleaseBranch { branch: String, release_branch: String },
    PullRequest,
}

/// The branch a run is building, and whether it is a pull-request build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_pr: bool,
}

impl BranchContext {
    pub fn new(name: impl Into<String>, is_pr: bool) -> Self {
        BranchContext {
            name: name.into(),
            is_pr,
        }
    }

    /// Check if this is the configured release branch
    pub fn is_release_branch(&self, release_branch: &str) -> bool {
        self.name == release_branch
    }

    /// `Ok(())` when a tag may be published, otherwise why not
    pub fn publish_gate(&self, release_branch: &str) -> Result<(), SkipReason> {
        if !self.is_release_branch(release_branch) {
            return Err(SkipReason::NotReleaseBranch {
                branch: self.name.clone(),
                release_branch: release_branch.to_string(),
            });
        }
        if self.is_pr {
            return Err(SkipReason::PullRequest);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_branch_push_publishes() {
        let branch = BranchContext::new("master", false);
        assert!(branch.is_release_branch("master"));
        assert_eq!(branch.publish_gate("master"), Ok(()));
    }

    #[test]
    fn test_release_branch_pull_request_is_gated() {
        let branch = BranchContext::new("master", true);
        assert_eq!(branch.publish_gate("master"), Err(SkipReason::PullRequest));
    }

    #[test]
    fn test_other_branch_is_gated() {
        let branch = BranchContext::new("develop", false);
        assert!(!branch.is_release_branch("master"));
        assert_eq!(
            branch.publish_gate("master"),
            Err(SkipReason::NotReleaseBranch {
                branch: "develop".to_string(),
                release_branch: "master".to_string(),
            })
        );
    }

    #[test]
    fn test_release_branch_is_configurable() {
        let branch = BranchContext::new("main", false);
        assert!(branch.publish_gate("main").is_ok());
        assert!(branch.publish_gate("master").is_err());
    }
}
