use crate::conventional::DEFAULT_MAX_TITLE_LENGTH;
use crate::domain::TagPattern;
use crate::error::{ReleaseError, Result};
use crate::registry::github::{DEFAULT_API_URL, DEFAULT_PER_PAGE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const LOCAL_CONFIG_FILE: &str = "./semantic-release.toml";
const USER_CONFIG_FILE: &str = ".semantic-release.toml";

fn default_release_branch() -> String {
    "master".to_string()
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

fn default_max_title_length() -> usize {
    DEFAULT_MAX_TITLE_LENGTH
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

/// Settings read from `semantic-release.toml`.
///
/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FileConfig {
    /// Only this branch publishes tags
    #[serde(default = "default_release_branch")]
    pub release_branch: String,

    /// Tag naming, must contain `{version}`
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,

    /// Optional semver constraint selecting the base release
    #[serde(default)]
    pub version_range: Option<String>,

    #[serde(default)]
    pub registry: RegistryConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        FileConfig {
            release_branch: default_release_branch(),
            tag_pattern: default_tag_pattern(),
            max_title_length: default_max_title_length(),
            version_range: None,
            registry: RegistryConfig::default(),
        }
    }
}

/// Where tags are listed and created
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegistryKind {
    #[default]
    GitHub,
    Git,
}

impl FromStr for RegistryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "github" => Ok(RegistryKind::GitHub),
            "git" => Ok(RegistryKind::Git),
            other => Err(format!(
                "unknown registry '{}', expected 'github' or 'git'",
                other
            )),
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKind::GitHub => write!(f, "github"),
            RegistryKind::Git => write!(f, "git"),
        }
    }
}

/// Registry connection settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RegistryConfig {
    #[serde(default)]
    pub kind: RegistryKind,

    /// GitHub API root; GitHub Enterprise uses `https://<host>/api/v3`
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Remote to push new tags to (`git` registry only)
    #[serde(default)]
    pub push_remote: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            kind: RegistryKind::default(),
            api_url: default_api_url(),
            per_page: default_per_page(),
            push_remote: None,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semantic-release.toml` in current directory
/// 3. `.semantic-release.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<FileConfig> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(FileConfig::default());
        }
    } else {
        return Ok(FileConfig::default());
    };

    parse_config(&config_str)
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<FileConfig> {
    let config: FileConfig = toml::from_str(config_str)
        .map_err(|e| ReleaseError::config(format!("Invalid configuration: {}", e)))?;
    TagPattern::new(config.tag_pattern.clone())?;
    Ok(config)
}

/// Split an `owner/repo` slug
pub fn parse_slug(slug: &str) -> Result<(String, String)> {
    match slug.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ReleaseError::config(format!("invalid slug '{}'", slug))),
    }
}

/// Everything one release run needs
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Range start (exclusive)
    pub from_commit: String,
    /// Range end, defaults to the branch tip
    pub to_commit: Option<String>,
    /// Branch being built
    pub branch: String,
    pub owner: String,
    pub repo: String,
    /// Pull-request builds never publish
    pub is_pr: bool,
    pub verbose: bool,
    pub release_branch: String,
    pub tag_pattern: String,
    pub max_title_length: usize,
    pub version_range: Option<String>,
}

impl ReleaseConfig {
    /// Run configuration with file defaults
    pub fn new(
        from_commit: impl Into<String>,
        branch: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        ReleaseConfig::with_file_config(
            &FileConfig::default(),
            from_commit,
            branch,
            owner,
            repo,
        )
    }

    /// Run configuration taking release settings from a loaded file
    pub fn with_file_config(
        file: &FileConfig,
        from_commit: impl Into<String>,
        branch: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        ReleaseConfig {
            from_commit: from_commit.into(),
            to_commit: None,
            branch: branch.into(),
            owner: owner.into(),
            repo: repo.into(),
            is_pr: false,
            verbose: false,
            release_branch: file.release_branch.clone(),
            tag_pattern: file.tag_pattern.clone(),
            max_title_length: file.max_title_length,
            version_range: file.version_range.clone(),
        }
    }

    /// Reject configurations that cannot address a repository
    pub fn validate(&self) -> Result<()> {
        if self.owner.is_empty() {
            return Err(ReleaseError::config("missing repo owner"));
        }
        if self.repo.is_empty() {
            return Err(ReleaseError::config("missing repo name"));
        }
        if self.branch.is_empty() {
            return Err(ReleaseError::config("missing branch"));
        }
        if self.max_title_length == 0 {
            return Err(ReleaseError::config("max_title_length must be positive"));
        }
        self.tag_pattern()?;
        Ok(())
    }

    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(self.tag_pattern.clone())
    }
}

/// Build settings provided by a Travis CI job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravisEnvironment {
    pub from_commit: String,
    pub to_commit: Option<String>,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub is_pr: bool,
}

impl TravisEnvironment {
    /// Read the job settings from the process environment
    pub fn from_env() -> Result<Self> {
        TravisEnvironment::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the job settings through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key).ok_or_else(|| ReleaseError::config(format!("missing {}", key)))
        };

        let branch = require("TRAVIS_BRANCH")?;
        let range = require("TRAVIS_COMMIT_RANGE")?;
        let slug = require("TRAVIS_REPO_SLUG")?;
        let pull_request = require("TRAVIS_PULL_REQUEST")?;

        let (from_commit, to_commit) = match range.split_once("...") {
            Some((from, to)) => (from.to_string(), Some(to.to_string())),
            None => match range.split_once("..") {
                Some((from, to)) => (from.to_string(), Some(to.to_string())),
                None => (range.clone(), None),
            },
        };
        let to_commit = to_commit.filter(|to| !to.is_empty());
        let (owner, repo) = parse_slug(&slug)?;
        let is_pr = !matches!(pull_request.trim(), "false" | "0" | "");

        Ok(TravisEnvironment {
            from_commit,
            to_commit,
            owner,
            repo,
            branch,
            is_pr,
        })
    }
}
