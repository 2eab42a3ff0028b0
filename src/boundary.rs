use crate::domain::SkipReason;
use std::fmt;

/// Non-fatal conditions met while deciding a release.
/// These are logged, never returned as errors.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String, pattern: String },
    /// No release exists yet; the 0.0.0 baseline is used
    NoPriorRelease { next_version: String },
    /// The branch or build kind does not allow publishing
    PublishSkipped { reason: SkipReason },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotReleaseBranch {
                branch,
                release_branch,
            } => write!(
                f,
                "branch '{}' is not the release branch '{}'",
                branch, release_branch
            ),
            SkipReason::PullRequest => write!(f, "pull request builds are never published"),
        }
    }
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableTag { tag, pattern } => {
                write!(f, "Skipping tag '{}': not a version under pattern '{}'", tag, pattern)
            }
            BoundaryWarning::NoPriorRelease { next_version } => {
                write!(
                    f,
                    "No prior release found, starting from 0.0.0 (next: {})",
                    next_version
                )
            }
            BoundaryWarning::PublishSkipped { reason } => {
                write!(f, "Not publishing: {}", reason)
            }
        }
    }
}
