use crate::domain::version::Version;
use crate::error::{ReleaseError, Result};

const TAG_REF_PREFIX: &str = "refs/tags/";

/// Strip a leading `refs/tags/` from a reference name
pub fn tag_name_from_ref(reference: &str) -> &str {
    reference.strip_prefix(TAG_REF_PREFIX).unwrap_or(reference)
}

/// Full reference name for a tag (e.g., "v1.2.3" -> "refs/tags/v1.2.3")
pub fn tag_ref_name(tag: &str) -> String {
    format!("{}{}", TAG_REF_PREFIX, tag)
}

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pub pattern: String,
}

impl TagPattern {
    /// Create a new tag pattern, which must contain `{version}`
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !pattern.contains("{version}") {
            return Err(ReleaseError::config(format!(
                "Tag pattern '{}' must contain {{version}} placeholder",
                pattern
            )));
        }
        Ok(TagPattern { pattern })
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        self.pattern.replace("{version}", &version.to_string())
    }

    /// Extract the version from a tag name, or `None` if it doesn't fit the pattern
    ///
    /// Accepts either a bare tag name or a full `refs/tags/...` reference.
    /// The pattern prefix is optional, so "1.2.3" still parses under "v{version}".
    pub fn parse(&self, tag: &str) -> Option<Version> {
        let name = tag_name_from_ref(tag);
        let (prefix, suffix) = self.pattern.split_once("{version}")?;
        let inner = name.strip_prefix(prefix).unwrap_or(name).strip_suffix(suffix)?;
        Version::parse(inner).ok()
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            pattern: "v{version}".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_from_ref() {
        assert_eq!(tag_name_from_ref("refs/tags/v1.2.3"), "v1.2.3");
        assert_eq!(tag_name_from_ref("v1.2.3"), "v1.2.3");
    }

    #[test]
    fn test_tag_ref_name() {
        assert_eq!(tag_ref_name("v1.2.3"), "refs/tags/v1.2.3");
    }

    #[test]
    fn test_pattern_requires_placeholder() {
        assert!(TagPattern::new("release").is_err());
        assert!(TagPattern::new("release-{version}").is_ok());
    }

    #[test]
    fn test_pattern_format() {
        let pattern = TagPattern::default();
        assert_eq!(pattern.format(&Version::new(1, 2, 3)), "v1.2.3");
    }

    #[test]
    fn test_pattern_format_with_prefix() {
        let pattern = TagPattern::new("release-{version}").unwrap();
        assert_eq!(pattern.format(&Version::new(1, 2, 3)), "release-1.2.3");
    }

    #[test]
    fn test_pattern_parse() {
        let pattern = TagPattern::default();
        assert_eq!(pattern.parse("refs/tags/v1.2.0"), Some(Version::new(1, 2, 0)));
        assert_eq!(
            pattern.parse("v2.0.0-rc.1").map(|v| v.to_string()),
            Some("2.0.0-rc.1".to_string())
        );
        assert_eq!(pattern.parse("refs/tags/latest"), None);
        assert_eq!(pattern.parse("release-1.0.0"), None);
    }

    #[test]
    fn test_pattern_prefix_is_optional() {
        let pattern = TagPattern::default();
        assert_eq!(pattern.parse("1.0.0"), Some(Version::new(1, 0, 0)));

        let pattern = TagPattern::new("release-{version}").unwrap();
        assert_eq!(pattern.parse("release-1.0.0"), Some(Version::new(1, 0, 0)));
        assert_eq!(pattern.parse("release-1.0.0-final"), Some(Version::parse("1.0.0-final").unwrap()));
    }

    #[test]
    fn test_pattern_with_suffix() {
        let pattern = TagPattern::new("{version}-stable").unwrap();
        assert_eq!(pattern.parse("2.1.0-stable"), Some(Version::new(2, 1, 0)));
        assert_eq!(pattern.parse("2.1.0"), None);
    }
}
