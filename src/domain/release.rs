use crate::domain::severity::Severity;
use crate::domain::version::Version;

/// An existing tag in the release registry: its version and the commit it points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRef {
    pub version: Version,
    pub sha: String,
}

impl ReleaseRef {
    pub fn new(version: Version, sha: impl Into<String>) -> Self {
        ReleaseRef {
            version,
            sha: sha.into(),
        }
    }

    /// Synthetic 0.0.0 with no commit, used when nothing has been released yet
    pub fn baseline() -> Self {
        ReleaseRef::new(Version::zero(), "")
    }

    pub fn is_baseline(&self) -> bool {
        self.sha.is_empty() && self.version == Version::zero()
    }
}

/// Everything the publish step needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDecision {
    pub severity: Severity,
    pub base_version: Version,
    pub next_version: Version,
    /// Commit the new tag will point at
    pub tag_sha: String,
    /// Formatted tag name, e.g. "v1.3.0"
    pub tag_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline() {
        let base = ReleaseRef::baseline();
        assert_eq!(base.version, Version::zero());
        assert!(base.sha.is_empty());
        assert!(base.is_baseline());
    }

    #[test]
    fn test_real_release_is_not_baseline() {
        let release = ReleaseRef::new(Version::zero(), "abc123");
        assert!(!release.is_baseline());
    }
}
