//! Picking the latest release and computing the next version

use crate::domain::{ReleaseRef, Severity, Version};
use crate::error::{ResolutionError, Result};
use semver::VersionReq;
use tracing::debug;

/// Highest ref by version; among equal versions the first one seen wins.
fn max_by_version<'a, I>(refs: I) -> Option<&'a ReleaseRef>
where
    I: IntoIterator<Item = &'a ReleaseRef>,
{
    refs.into_iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.version <= current.version => Some(current),
        _ => Some(candidate),
    })
}

/// Latest non-pre-release ref, or the 0.0.0 baseline when there is none
fn latest_release(refs: &[ReleaseRef]) -> ReleaseRef {
    max_by_version(refs.iter().filter(|r| !r.version.is_prerelease()))
        .cloned()
        .unwrap_or_else(ReleaseRef::baseline)
}

/// Resolve the release the next version is computed from
///
/// Without a constraint this is the highest non-pre-release version. With a
/// constraint it is the highest ref (pre-releases included) satisfying it.
/// When nothing satisfies the constraint, the constraint itself is read as a
/// literal version anchored on the latest release's commit.
pub fn resolve_latest(refs: &[ReleaseRef], constraint: Option<&str>) -> Result<ReleaseRef> {
    let baseline = latest_release(refs);

    let constraint = match constraint.map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => c,
        None => return Ok(baseline),
    };

    let range_error = match VersionReq::parse(constraint) {
        Ok(req) => {
            let matching = refs.iter().filter(|r| req.matches(&r.version.to_semver()));
            if let Some(found) = max_by_version(matching) {
                debug!(constraint, version = %found.version, "constraint matched existing release");
                return Ok(found.clone());
            }
            None
        }
        Err(e) => Some(e.to_string()),
    };

    let literal = Version::parse(constraint).map_err(|e| ResolutionError::InvalidConstraint {
        constraint: constraint.to_string(),
        reason: range_error.unwrap_or_else(|| e.to_string()),
    })?;

    if literal.is_prerelease() && baseline.is_baseline() {
        return Err(ResolutionError::NoPriorRelease {
            constraint: constraint.to_string(),
        }
        .into());
    }

    debug!(constraint, version = %literal, sha = %baseline.sha, "using constraint as literal version");
    Ok(ReleaseRef::new(literal, baseline.sha))
}

/// Next version for a severity; `None` returns the base unchanged
pub fn next_version(base: &Version, severity: Severity) -> Result<Version> {
    base.bump(severity)
}
