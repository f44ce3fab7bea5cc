//! End-to-end session tests with scripted backend and console.
//!
//! These drive `run_session` through complete runs to verify the folders on
//! disk mirror the accepted proposal and that declined or failed runs leave
//! the filesystem untouched.

use std::path::{Path, PathBuf};

use scaffolder::gate::{INVALID_INPUT, REJECTED};
use scaffolder::session::{COMPLETE, SessionOutcome, run_session};
use scaffolder::test_support::{ScriptedConsole, ScriptedRequester, TestWorkspace};
use scaffolder::tree::FolderTree;

const NOVEL: &str = r#"{
  "Novel": {
    "manuscript": {"drafts": {"first": null, "second": null}, "final": null},
    "research": {"history": {}, "places": []},
    "notes": null
  }
}"#;

fn expected_dirs(tree: &FolderTree, prefix: &Path, out: &mut Vec<PathBuf>) {
    for entry in tree.entries() {
        let path = prefix.join(&entry.name);
        out.push(path.clone());
        expected_dirs(&entry.children, &path, out);
    }
}

/// Accepting writes exactly the folders shown, nested the same way.
#[test]
fn accepted_tree_is_mirrored_on_disk() {
    let workspace = TestWorkspace::new().expect("workspace");
    let requester = ScriptedRequester::ok(NOVEL);
    let mut console = ScriptedConsole::new(["Book", "Historical fiction", "Y"]);

    let outcome = run_session(&workspace.config(), &requester, &mut console).expect("session");

    let mut expected = Vec::new();
    expected_dirs(&FolderTree::parse(NOVEL).expect("parse"), Path::new(""), &mut expected);
    expected.sort();
    assert_eq!(workspace.created_dirs(), expected);
    assert!(matches!(outcome, SessionOutcome::Completed(ref report) if report.created.len() == expected.len()));
    assert_eq!(console.output().last().map(String::as_str), Some(COMPLETE));
}

/// A second accepted run over the same tree creates nothing and still completes.
#[test]
fn rerun_is_idempotent() {
    let workspace = TestWorkspace::new().expect("workspace");
    let config = workspace.config();
    let requester = ScriptedRequester::ok(NOVEL);

    let mut first = ScriptedConsole::new(["Book", "Historical fiction", "y"]);
    run_session(&config, &requester, &mut first).expect("first session");
    let before = workspace.created_dirs();

    let mut second = ScriptedConsole::new(["Book", "Historical fiction", "y"]);
    let outcome = run_session(&config, &requester, &mut second).expect("second session");

    match outcome {
        SessionOutcome::Completed(report) => {
            assert!(report.created.is_empty());
            assert_eq!(report.existing.len(), before.len());
        }
        other => panic!("expected completion, got {other:?}"),
    }
    assert_eq!(workspace.created_dirs(), before);
    assert_eq!(second.count(COMPLETE), 1);
}

#[test]
fn invalid_answer_then_no_is_rejected_without_writes() {
    let workspace = TestWorkspace::new().expect("workspace");
    let requester = ScriptedRequester::ok(NOVEL);
    let mut console = ScriptedConsole::new(["Book", "Historical fiction", "x", "N"]);

    let outcome = run_session(&workspace.config(), &requester, &mut console).expect("session");

    assert_eq!(outcome, SessionOutcome::Rejected);
    assert_eq!(console.count(INVALID_INPUT), 1);
    assert_eq!(console.output().last().map(String::as_str), Some(REJECTED));
    assert!(workspace.created_dirs().is_empty());
    assert!(!workspace.base_path().exists());
}

#[test]
fn non_object_payload_never_reaches_the_filesystem() {
    let workspace = TestWorkspace::new().expect("workspace");
    let requester = ScriptedRequester::ok(r#"["src", "docs"]"#);
    let mut console = ScriptedConsole::new(["Library", "CLI tool", "Y"]);

    let outcome = run_session(&workspace.config(), &requester, &mut console).expect("session");

    assert!(matches!(outcome, SessionOutcome::RequestFailed(_)));
    assert!(!workspace.base_path().exists());
    assert!(!console.printed(COMPLETE));
}

/// A key that cannot be a folder aborts the run as an error, keeping earlier folders.
#[test]
fn malformed_key_fails_after_partial_creation() {
    let workspace = TestWorkspace::new().expect("workspace");
    let requester = ScriptedRequester::ok(r#"{"ok": null, "../escape": null}"#);
    let mut console = ScriptedConsole::new(["Library", "CLI tool", "Y"]);

    let err = run_session(&workspace.config(), &requester, &mut console).unwrap_err();

    assert!(err.to_string().contains("not a single folder name"), "{err}");
    assert_eq!(workspace.created_dirs(), vec![PathBuf::from("ok")]);
    assert!(!workspace.path().join("escape").exists());
    assert!(!console.printed(COMPLETE));
}

/// Empty-string, `false` and zero values are leaf folders, not parse failures.
#[test]
fn empty_scalar_values_become_leaf_folders() {
    let workspace = TestWorkspace::new().expect("workspace");
    let requester =
        ScriptedRequester::ok(r#"{"site": {"docs": "", "assets": false, "tmp": 0}}"#);
    let mut console = ScriptedConsole::new(["Website", "Portfolio", "Y"]);

    let outcome = run_session(&workspace.config(), &requester, &mut console).expect("session");

    assert!(matches!(outcome, SessionOutcome::Completed(_)), "{outcome:?}");
    assert_eq!(
        workspace.created_dirs(),
        vec![
            PathBuf::from("site"),
            PathBuf::from("site/assets"),
            PathBuf::from("site/docs"),
            PathBuf::from("site/tmp"),
        ]
    );
}
