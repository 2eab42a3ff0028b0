//! Pre-release labels of the form `identifier[.iteration]`
//!
//! Only the first two dot-separated components matter when bumping: `rc.2`
//! becomes `rc.3`, `beta` becomes `beta.1`, and an iteration that is not a
//! number restarts at 1.

use crate::error::{ReleaseError, Result};
use std::fmt;

/// Pre-release label with optional iteration number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRelease {
    /// Leading identifier ("alpha", "beta", "rc", or anything custom)
    pub identifier: String,
    /// Numeric second component, if present
    pub iteration: Option<u64>,
}

impl PreRelease {
    pub fn new(identifier: impl Into<String>, iteration: Option<u64>) -> Self {
        PreRelease {
            identifier: identifier.into(),
            iteration,
        }
    }

    /// Parse a label such as "beta.1", "rc" or "dev.5"
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(ReleaseError::version("Empty pre-release identifier"));
        }

        let mut parts = s.split('.');
        let identifier = parts.next().unwrap_or_default();

        if identifier.is_empty() || !identifier.chars().all(|c| c.is_alphanumeric() || c == '-')
        {
            return Err(ReleaseError::version(format!(
                "Invalid pre-release identifier: '{}'",
                s
            )));
        }

        let iteration = parts.next().and_then(|p| p.parse::<u64>().ok());

        Ok(PreRelease {
            identifier: identifier.to_string(),
            iteration,
        })
    }

    /// Next iteration of the same identifier; a missing iteration becomes 1
    pub fn increment_iteration(&self) -> Result<Self> {
        let iteration = match self.iteration {
            None => 1,
            Some(n) => n.checked_add(1).ok_or_else(|| {
                ReleaseError::version(format!("Pre-release iteration overflow: '{}'", self))
            })?,
        };
        Ok(PreRelease {
            identifier: self.identifier.clone(),
            iteration: Some(iteration),
        })
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)?;
        if let Some(iter) = self.iteration {
            write!(f, ".{}", iter)?;
        }
        Ok(())
    }
}
