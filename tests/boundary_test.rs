use semantic_release::boundary::BoundaryWarning;
use semantic_release::domain::SkipReason;

#[test]
fn test_unparsable_tag_display() {
    let warning = BoundaryWarning::UnparsableTag {
        tag: "refs/tags/latest".to_string(),
        pattern: "v{version}".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("refs/tags/latest"),
        "Message should contain the tag, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("v{version}"),
        "Message should contain the pattern, got: {}",
        display_msg
    );
}

#[test]
fn test_no_prior_release_display() {
    let warning = BoundaryWarning::NoPriorRelease {
        next_version: "0.0.1".to_string(),
    };
    let display_msg = warning.to_string();
    assert!(display_msg.contains("0.0.0"));
    assert!(display_msg.contains("0.0.1"));
}

#[test]
fn test_publish_skipped_not_release_branch_display() {
    let warning = BoundaryWarning::PublishSkipped {
        reason: SkipReason::NotReleaseBranch {
            branch: "develop".to_string(),
            release_branch: "master".to_string(),
        },
    };
    assert_eq!(
        warning.to_string(),
        "Not publishing: branch 'develop' is not the release branch 'master'"
    );
}

#[test]
fn test_publish_skipped_pull_request_display() {
    let warning = BoundaryWarning::PublishSkipped {
        reason: SkipReason::PullRequest,
    };
    assert!(warning.to_string().contains("pull request"));
}

#[test]
fn test_boundary_warning_equality() {
    let a = BoundaryWarning::PublishSkipped {
        reason: SkipReason::PullRequest,
    };
    assert_eq!(a.clone(), a);
    assert_ne!(
        a,
        BoundaryWarning::NoPriorRelease {
            next_version: "0.0.1".to_string()
        }
    );
}
