// tests/integration_test.rs
use git2::{Oid, Repository, Signature};
use semantic_release::config::ReleaseConfig;
use semantic_release::history::{Git2History, HistoryProvider};
use semantic_release::registry::{LocalGitRegistry, ReleaseRegistry};
use semantic_release::{semantic_release, ReleaseOutcome};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_semantic-release");

/// Repository with one commit per message, oldest first
fn init_repo(messages: &[&str]) -> (TempDir, Vec<Oid>) {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    let sig = Signature::now("Test", "test@example.com").unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let mut oids: Vec<Oid> = Vec::new();
    for message in messages {
        let parent = oids.last().map(|oid| repo.find_commit(*oid).unwrap());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap();
        oids.push(oid);
    }
    (dir, oids)
}

fn run_in(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(BIN)
        .args(args)
        .current_dir(dir)
        .env_remove("GITHUB_TOKEN")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_semantic_release_help() {
    let output = Command::new(BIN).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("semantic-release"));
    assert!(stdout.contains("conventional commits"));
}

#[test]
fn test_semantic_release_version() {
    let output = Command::new(BIN).arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_git_history_range() {
    let (dir, oids) = init_repo(&[
        "chore: initial commit",
        "feat(api): add endpoint\n\nLonger description.",
        "fix: patch bug\n\nBREAKING CHANGE: removes field",
    ]);
    let history = Git2History::open(dir.path()).unwrap();

    let commits = history.list_commits(&oids[0].to_string(), None).unwrap();
    assert_eq!(commits, vec![oids[2].to_string(), oids[1].to_string()]);

    let commit = history.read_commit(&commits[0]).unwrap();
    assert_eq!(commit.title, "fix: patch bug");
    assert!(commit.body.contains("BREAKING CHANGE"));

    let limited = history
        .list_commits(&oids[0].to_string(), Some(oids[1].to_string().as_str()))
        .unwrap();
    assert_eq!(limited, vec![oids[1].to_string()]);
}

#[test]
fn test_git_history_invalid_range() {
    let (dir, _oids) = init_repo(&["chore: initial commit"]);
    let history = Git2History::open(dir.path()).unwrap();

    assert!(history.list_commits("", None).unwrap_err().is_invalid_range());
    assert!(history
        .list_commits("0000000000000000000000000000000000000001", None)
        .unwrap_err()
        .is_invalid_range());
}

#[test]
fn test_release_against_local_repository() {
    let (dir, oids) = init_repo(&["chore: initial commit", "fix: first fix"]);
    let history = Git2History::open(dir.path()).unwrap();
    let registry = LocalGitRegistry::open(dir.path(), 100, None).unwrap();
    registry
        .create_tag_ref("o", "r", "v1.4.0", &oids[0].to_string())
        .unwrap();

    let branch = history.current_branch().unwrap();
    let mut config = ReleaseConfig::new(oids[0].to_string(), branch.clone(), "o", "r");
    config.release_branch = branch;

    let outcome = semantic_release(&config, &history, &registry).unwrap();
    let ReleaseOutcome::Published(decision) = outcome else {
        panic!("expected a published release");
    };
    assert_eq!(decision.tag_name, "v1.4.1");
    assert_eq!(decision.tag_sha, oids[1].to_string());

    let repo = Repository::open(dir.path()).unwrap();
    let tagged = repo
        .find_reference("refs/tags/v1.4.1")
        .unwrap()
        .peel_to_commit()
        .unwrap();
    assert_eq!(tagged.id(), oids[1]);
}

#[test]
fn test_cli_invalid_range_exits_cleanly() {
    let (dir, _oids) = init_repo(&["chore: initial commit"]);

    let output = run_in(
        dir.path(),
        &[
            "--from",
            "0000000000000000000000000000000000000001",
            "--branch",
            "master",
            "--slug",
            "o/r",
            "--registry",
            "git",
        ],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("invalid commit range, cannot execute semantic-release"));
}

#[test]
fn test_cli_classification_error_fails() {
    let (dir, oids) = init_repo(&["chore: initial commit", "Update README"]);

    let output = run_in(
        dir.path(),
        &[
            "--from",
            &oids[0].to_string(),
            "--branch",
            "master",
            "--slug",
            "o/r",
            "--registry",
            "git",
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("did not follow semantic versioning"));

    let repo = Repository::open(dir.path()).unwrap();
    assert!(repo.tag_names(None).unwrap().is_empty());
}

#[test]
fn test_cli_publishes_local_tag() {
    let (dir, oids) = init_repo(&["chore: initial commit", "feat: add thing"]);

    let output = run_in(
        dir.path(),
        &[
            "--from",
            &oids[0].to_string(),
            "--branch",
            "master",
            "--slug",
            "o/r",
            "--registry",
            "git",
        ],
    );
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("v0.1.0"));

    let repo = Repository::open(dir.path()).unwrap();
    assert!(repo.find_reference("refs/tags/v0.1.0").is_ok());
}

#[test]
fn test_cli_pull_request_is_dry_run() {
    let (dir, oids) = init_repo(&["chore: initial commit", "feat: add thing"]);

    let output = run_in(
        dir.path(),
        &[
            "--from",
            &oids[0].to_string(),
            "--branch",
            "master",
            "--slug",
            "o/r",
            "--registry",
            "git",
            "--pr",
        ],
    );
    assert!(output.status.success());

    let repo = Repository::open(dir.path()).unwrap();
    assert!(repo.tag_names(None).unwrap().is_empty());
}
