//! Main release workflow
//!
//! The flow is linear and runs once per invocation:
//! 1. List the commits of the configured range
//! 2. Classify every commit (any failure aborts the run)
//! 3. Reduce the changes to a severity, floored at patch
//! 4. Gate on branch and pull-request status
//! 5. Resolve the latest release and compute the next version
//! 6. Create the tag at the most recent commit of the range
//!
//! Nothing is written to the registry before step 6, so a failed run leaves
//! it untouched.

use tracing::{debug, info, warn};

use crate::analyzer::{apply_floor, reduce};
use crate::boundary::BoundaryWarning;
use crate::config::ReleaseConfig;
use crate::conventional::Classifier;
use crate::domain::{BranchContext, ChangeRecord, ReleaseDecision, Severity, SkipReason};
use crate::error::{ReleaseError, Result};
use crate::history::HistoryProvider;
use crate::registry::{collect_release_refs, ReleaseRegistry};
use crate::resolver::{next_version, resolve_latest};

/// How a successful run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// A new tag was created
    Published(ReleaseDecision),
    /// Commits were analyzed but publishing was not allowed
    DryRun { severity: Severity, reason: SkipReason },
}

impl ReleaseOutcome {
    pub fn severity(&self) -> Severity {
        match self {
            ReleaseOutcome::Published(decision) => decision.severity,
            ReleaseOutcome::DryRun { severity, .. } => *severity,
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, ReleaseOutcome::Published(_))
    }
}

/// Classify every commit of the range, most recent first
///
/// Returns the commit shas alongside their change records.
fn classify_range<H>(
    config: &ReleaseConfig,
    history: &H,
    classifier: &Classifier,
) -> Result<(Vec<String>, Vec<ChangeRecord>)>
where
    H: HistoryProvider + ?Sized,
{
    let commits = history.list_commits(&config.from_commit, config.to_commit.as_deref())?;
    if commits.is_empty() {
        return Err(ReleaseError::invalid_range(format!(
            "no commits between '{}' and '{}'",
            config.from_commit,
            config.to_commit.as_deref().unwrap_or("HEAD")
        )));
    }
    debug!(
        from = %config.from_commit,
        to = config.to_commit.as_deref().unwrap_or("HEAD"),
        count = commits.len(),
        "listed commit range"
    );

    let mut changes = Vec::with_capacity(commits.len());
    for sha in &commits {
        let commit = history.read_commit(sha)?;
        let change = classifier.classify_commit(&commit)?;
        if config.verbose {
            info!(
                sha = %commit.short_sha(),
                commit_type = %change.r#type,
                scope = change.scope.as_deref().unwrap_or(""),
                subject = %change.subject,
                breaking = change.is_breaking,
                "classified commit"
            );
        } else {
            debug!(sha = %commit.short_sha(), commit_type = %change.r#type, "classified commit");
        }
        changes.push(change);
    }

    Ok((commits, changes))
}

/// Run one release: analyze the range and publish the next tag if allowed
///
/// `InvalidRange` errors mean there is nothing to release; callers decide
/// whether that is fatal (see [ReleaseError::is_invalid_range]).
pub fn semantic_release<H, R>(
    config: &ReleaseConfig,
    history: &H,
    registry: &R,
) -> Result<ReleaseOutcome>
where
    H: HistoryProvider + ?Sized,
    R: ReleaseRegistry + ?Sized,
{
    config.validate()?;
    debug!(
        owner = %config.owner,
        repo = %config.repo,
        branch = %config.branch,
        is_pr = config.is_pr,
        verbose = config.verbose,
        "starting release run"
    );
    let tag_pattern = config.tag_pattern()?;
    let classifier = Classifier::new(config.max_title_length)?;

    let (commits, changes) = classify_range(config, history, &classifier)?;

    let severity = apply_floor(reduce(&changes), commits.len());
    info!(severity = %severity, commits = commits.len(), "analyzed commits");

    let branch = BranchContext::new(config.branch.clone(), config.is_pr);
    if let Err(reason) = branch.publish_gate(&config.release_branch) {
        warn!(
            "{}",
            BoundaryWarning::PublishSkipped {
                reason: reason.clone()
            }
        );
        return Ok(ReleaseOutcome::DryRun { severity, reason });
    }

    let refs = collect_release_refs(registry, &config.owner, &config.repo, &tag_pattern)?;
    debug!(count = refs.len(), "collected release tags");

    let latest = resolve_latest(&refs, config.version_range.as_deref())?;
    let next = next_version(&latest.version, severity)?;
    info!(latest = %latest.version, next = %next, "resolved versions");

    if next == latest.version {
        return Err(ReleaseError::version(format!(
            "next version equals latest release {}",
            latest.version
        )));
    }
    if latest.is_baseline() {
        warn!(
            "{}",
            BoundaryWarning::NoPriorRelease {
                next_version: next.to_string()
            }
        );
    }

    // commits are listed most recent first
    let tag_sha = commits[0].clone();
    let tag_name = tag_pattern.format(&next);
    registry.create_tag_ref(&config.owner, &config.repo, &tag_name, &tag_sha)?;
    info!(tag = %tag_name, sha = %tag_sha, "published release");

    Ok(ReleaseOutcome::Published(ReleaseDecision {
        severity,
        base_version: latest.version,
        next_version: next,
        tag_sha,
        tag_name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Version;
    use crate::history::MockHistory;
    use crate::registry::MockRegistry;

    fn config() -> ReleaseConfig {
        ReleaseConfig::new("c0", "master", "owner", "repo")
    }

    fn history(titles: &[(&str, &str, &str)]) -> MockHistory {
        let mut history = MockHistory::new();
        for (sha, title, body) in titles {
            history.push_commit(sha, title, body);
        }
        history.push_commit("c0", "chore: initial", "");
        history
    }

    #[test]
    fn test_publishes_minor_release() {
        let history = history(&[("c2", "feat: add thing", ""), ("c1", "fix: bug", "")]);
        let mut registry = MockRegistry::new();
        registry.add_tag("refs/tags/v1.2.0", "c0");

        let outcome = semantic_release(&config(), &history, &registry).unwrap();
        let ReleaseOutcome::Published(decision) = outcome else {
            panic!("expected a published release");
        };
        assert_eq!(decision.severity, Severity::Minor);
        assert_eq!(decision.base_version, Version::new(1, 2, 0));
        assert_eq!(decision.next_version, Version::new(1, 3, 0));
        assert_eq!(decision.tag_name, "v1.3.0");
        assert_eq!(decision.tag_sha, "c2");
        assert_eq!(registry.created().len(), 1);
    }

    #[test]
    fn test_empty_range_is_invalid_range() {
        let history = history(&[]);
        let registry = MockRegistry::new();
        let err = semantic_release(&config(), &history, &registry).unwrap_err();
        assert!(err.is_invalid_range());
        assert_eq!(registry.list_calls(), 0);
    }

    #[test]
    fn test_pull_request_is_dry_run() {
        let history = history(&[("c1", "feat: add thing", "")]);
        let registry = MockRegistry::new();
        let mut config = config();
        config.is_pr = true;

        let outcome = semantic_release(&config, &history, &registry).unwrap();
        assert_eq!(
            outcome,
            ReleaseOutcome::DryRun {
                severity: Severity::Minor,
                reason: SkipReason::PullRequest
            }
        );
        assert!(!outcome.is_published());
        assert!(registry.created().is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let history = history(&[("c1", "fix: bug", "")]);
        let registry = MockRegistry::new();
        let mut config = config();
        config.owner.clear();
        assert!(matches!(
            semantic_release(&config, &history, &registry),
            Err(ReleaseError::Config(_))
        ));
    }

    #[test]
    fn test_verbose_run_publishes_same_release() {
        let history = history(&[("c1", "fix(core): bug", "")]);
        let quiet = MockRegistry::new();
        let loud = MockRegistry::new();
        let mut verbose = config();
        verbose.verbose = true;

        assert_eq!(
            semantic_release(&config(), &history, &quiet).unwrap(),
            semantic_release(&verbose, &history, &loud).unwrap()
        );
        assert_eq!(quiet.created(), loud.created());
    }
}
