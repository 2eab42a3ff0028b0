use thiserror::Error;

/// Why a commit title could not be turned into a change record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("invalid empty commit message")]
    EmptyTitle,

    #[error("commit title too long ({len} > {max} characters)")]
    TitleTooLong { len: usize, max: usize },

    #[error(
        "commit title did not follow semantic versioning: {title}. Please see \
         https://github.com/angular/angular.js/blob/master/DEVELOPERS.md#commit-message-format"
    )]
    GrammarMismatch { title: String },
}

/// Why the latest release could not be determined
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("no prior release to anchor pre-release '{constraint}'")]
    NoPriorRelease { constraint: String },

    #[error("invalid version constraint '{constraint}': {reason}")]
    InvalidConstraint { constraint: String, reason: String },
}

/// Unified error type for semantic-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("invalid commit range: {0}")]
    InvalidRange(String),

    #[error("{kind}, commit: {sha}")]
    Classification {
        sha: String,
        kind: ClassificationError,
    },

    #[error("Version resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Tag already exists: {0}")]
    TagAlreadyExists(String),

    #[error("Registry operation failed: {0}")]
    Registry(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semantic-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create an invalid range error with context
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        ReleaseError::InvalidRange(msg.into())
    }

    /// Attach the offending commit to a classification failure
    pub fn classification(sha: impl Into<String>, kind: ClassificationError) -> Self {
        ReleaseError::Classification {
            sha: sha.into(),
            kind,
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a registry error with context
    pub fn registry(msg: impl Into<String>) -> Self {
        ReleaseError::Registry(msg.into())
    }

    /// `InvalidRange` means "nothing to release", callers may soft-continue on it.
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, ReleaseError::InvalidRange(_))
    }
}
