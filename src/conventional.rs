use crate::domain::{ChangeRecord, CommitRecord, CommitType};
use crate::error::{ClassificationError, ReleaseError, Result};
use regex::Regex;

/// Longest commit title accepted by default
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 70;

/// Only the type token is case-insensitive; scope and subject are verbatim.
const COMMIT_GRAMMAR: &str =
    r"^(?i:(feat|fix|docs|style|refactor|perf|test|chore))(?:\((.*)\))?: (.*)$";

/// Body substring that forces a major release. Also matches "BREAKING CHANGES".
const BREAKING_MARKER: &str = "BREAKING CHANGE";

/// Parses commit titles and bodies into change records
///
/// Build one per run and pass it by reference; the grammar is compiled once.
#[derive(Debug, Clone)]
pub struct Classifier {
    grammar: Regex,
    max_title_length: usize,
}

impl Classifier {
    pub fn new(max_title_length: usize) -> Result<Self> {
        let grammar = Regex::new(COMMIT_GRAMMAR)
            .map_err(|e| ReleaseError::config(format!("Invalid commit grammar: {}", e)))?;
        Ok(Classifier {
            grammar,
            max_title_length,
        })
    }

    pub fn max_title_length(&self) -> usize {
        self.max_title_length
    }

    /// Classify a single title/body pair
    pub fn classify(
        &self,
        title: &str,
        body: &str,
    ) -> std::result::Result<ChangeRecord, ClassificationError> {
        if title.is_empty() {
            return Err(ClassificationError::EmptyTitle);
        }

        let len = title.chars().count();
        if len > self.max_title_length {
            return Err(ClassificationError::TitleTooLong {
                len,
                max: self.max_title_length,
            });
        }

        let mismatch = || ClassificationError::GrammarMismatch {
            title: title.to_string(),
        };

        let captures = self.grammar.captures(title).ok_or_else(mismatch)?;
        let r#type = captures
            .get(1)
            .and_then(|m| m.as_str().parse::<CommitType>().ok())
            .ok_or_else(mismatch)?;
        let scope = captures.get(2).map(|m| m.as_str().to_string());
        let subject = captures
            .get(3)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        Ok(ChangeRecord {
            r#type,
            scope,
            subject,
            is_breaking: body.contains(BREAKING_MARKER),
        })
    }

    /// Classify a commit, naming it in the error so history can be fixed
    pub fn classify_commit(&self, commit: &CommitRecord) -> Result<ChangeRecord> {
        self.classify(&commit.title, &commit.body)
            .map_err(|kind| ReleaseError::classification(commit.sha.clone(), kind))
    }
}
