use std::fmt;
use std::str::FromStr;

/// A commit as read from history: identifier, title line and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub sha: String,
    pub title: String,
    pub body: String,
}

impl CommitRecord {
    pub fn new(sha: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        CommitRecord {
            sha: sha.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// First 8 characters of the sha, for display
    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(8) {
            Some((idx, _)) => &self.sha[..idx],
            None => &self.sha,
        }
    }
}

/// The fixed vocabulary of conventional commit types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Chore,
}

impl CommitType {
    pub const ALL: [CommitType; 8] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Refactor,
        CommitType::Perf,
        CommitType::Test,
        CommitType::Chore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
        }
    }
}

impl FromStr for CommitType {
    type Err = String;

    /// Case-insensitive match against the type vocabulary
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        CommitType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| format!("unknown commit type '{}'", s))
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured view of a conventional commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub r#type: CommitType,
    pub scope: Option<String>,
    pub subject: String,
    pub is_breaking: bool,
}
