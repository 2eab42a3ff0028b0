use crate::domain::prerelease::PreRelease;
use crate::domain::severity::Severity;
use crate::error::{ReleaseError, Result};
use semver::Prerelease;
use std::fmt;

/// Semantic version with optional pre-release label
///
/// Field order drives the derived ordering: numeric fields first, then the
/// label. `semver::Prerelease` orders an empty label above any non-empty one,
/// so `1.0.0-rc.1 < 1.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Prerelease,
}

impl Version {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
        }
    }

    /// The "no prior release" baseline
    pub fn zero() -> Self {
        Version::new(0, 0, 0)
    }

    /// Parse a version, accepting a leading 'v' or 'V' (e.g., "v1.2.3-rc.1")
    ///
    /// Build metadata is accepted and dropped.
    pub fn parse(s: &str) -> Result<Self> {
        let clean = s.trim().trim_start_matches(['v', 'V']);
        let parsed = semver::Version::parse(clean)
            .map_err(|e| ReleaseError::version(format!("Invalid version '{}': {}", s, e)))?;

        Ok(Version {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            pre: parsed.pre,
        })
    }

    /// Replace the pre-release label
    pub fn with_prerelease(&self, label: &str) -> Result<Self> {
        let pre = Prerelease::new(label).map_err(|e| {
            ReleaseError::version(format!("Invalid pre-release label '{}': {}", label, e))
        })?;
        Ok(Version {
            pre,
            ..self.clone()
        })
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// Next version for the given severity
    ///
    /// `None` leaves the version untouched. A pre-release version keeps its
    /// numeric fields and bumps the label iteration instead.
    pub fn bump(&self, severity: Severity) -> Result<Self> {
        if severity == Severity::None {
            return Ok(self.clone());
        }

        if self.is_prerelease() {
            let next = PreRelease::parse(self.pre.as_str())?.increment_iteration()?;
            return self.with_prerelease(&next.to_string());
        }

        let overflow = || ReleaseError::version(format!("Version overflow bumping {}", self));
        Ok(match severity {
            Severity::Major => Version::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
            Severity::Minor => Version::new(
                self.major,
                self.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            Severity::Patch => Version::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
            Severity::None => self.clone(),
        })
    }

    /// View as a `semver::Version` for range matching
    pub fn to_semver(&self) -> semver::Version {
        semver::Version {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            pre: self.pre.clone(),
            build: semver::BuildMetadata::EMPTY,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.is_prerelease() {
            write!(f, "-{}", self.pre)?;
        }
        Ok(())
    }
}
