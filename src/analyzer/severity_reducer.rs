use crate::domain::{ChangeRecord, CommitType, Severity};

/// Severity a single change contributes on its own
fn change_severity(change: &ChangeRecord) -> Severity {
    if change.is_breaking {
        return Severity::Major;
    }
    match change.r#type {
        CommitType::Feat => Severity::Minor,
        CommitType::Fix
        | CommitType::Docs
        | CommitType::Style
        | CommitType::Refactor
        | CommitType::Perf
        | CommitType::Test
        | CommitType::Chore => Severity::Patch,
    }
}

/// Maximum severity across a sequence of changes
///
/// Empty input yields `None`. A breaking change short-circuits to `Major`.
pub fn reduce<'a, I>(changes: I) -> Severity
where
    I: IntoIterator<Item = &'a ChangeRecord>,
{
    let mut severity = Severity::None;
    for change in changes {
        severity = severity.max(change_severity(change));
        if severity == Severity::Major {
            break;
        }
    }
    severity
}

/// A non-empty commit set releases at least a patch
pub fn apply_floor(severity: Severity, commit_count: usize) -> Severity {
    if commit_count > 0 {
        severity.max(Severity::Patch)
    } else {
        severity
    }
}
