//! End-to-end tests for the non-interactive `aj` commands

use std::fs;
use std::path::{Path, PathBuf};

use aidedjournal::{DraftStore, Entry};
use assert_cmd::Command;
use draftstore::FileStore;
use predicates::prelude::*;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = format!(
            "store:\n  path: {}\nexport:\n  dir: {}\n",
            dir.path().join("drafts").display(),
            dir.path().join("journal").display()
        );
        fs::write(dir.path().join("aj.yml"), config).expect("Failed to write config");
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn journal(&self) -> PathBuf {
        self.path().join("journal")
    }

    fn aj(&self) -> Command {
        let mut cmd = Command::cargo_bin("aj").expect("aj binary should build");
        // Keep logs and discovered config files inside the sandbox
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_DATA_HOME", self.path().join("data"))
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .arg("--config")
            .arg(self.path().join("aj.yml"));
        cmd
    }

    fn save_draft(&self, entry: &Entry) {
        let store = FileStore::open(self.path().join("drafts")).expect("Failed to open store");
        DraftStore::new(Box::new(store)).persist(entry).expect("Failed to persist draft");
    }
}

fn sample_entry() -> Entry {
    Entry::new(["First?".to_string(), "Second?".to_string(), "Third?".to_string()])
        .with_title("Quiet Sunday")
        .with_answers(["Read".to_string(), String::new(), "Slept early".to_string()])
}

#[test]
fn test_prompts_lists_catalog() {
    let sandbox = Sandbox::new();
    sandbox
        .aj()
        .arg("prompts")
        .assert()
        .success()
        .stdout(predicate::str::contains("What's one thing you learned today?"))
        .stdout(predicate::str::contains("30 prompts"));
}

#[test]
fn test_prompts_draw_is_reproducible_with_seed() {
    let sandbox = Sandbox::new();
    let first = sandbox.aj().args(["prompts", "--draw", "--seed", "7"]).output().unwrap();
    let second = sandbox.aj().args(["prompts", "--draw", "--seed", "7"]).output().unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    let text = String::from_utf8_lossy(&first.stdout);
    assert!(text.contains("1. ") && text.contains("2. ") && text.contains("3. "));
}

#[test]
fn test_custom_catalog_file() {
    let sandbox = Sandbox::new();
    let prompts = sandbox.path().join("mine.yml");
    fs::write(&prompts, "- Alpha?\n- Beta?\n- Gamma?\n").unwrap();
    let config = fs::read_to_string(sandbox.path().join("aj.yml")).unwrap();
    fs::write(
        sandbox.path().join("aj.yml"),
        format!("{}prompts:\n  file: {}\n", config, prompts.display()),
    )
    .unwrap();

    sandbox
        .aj()
        .arg("prompts")
        .assert()
        .success()
        .stdout(predicate::str::contains("Beta?"))
        .stdout(predicate::str::contains("3 prompts"));
}

#[test]
fn test_draft_show_and_discard() {
    let sandbox = Sandbox::new();
    sandbox
        .aj()
        .args(["draft", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved draft"));

    sandbox.save_draft(&sample_entry());
    sandbox
        .aj()
        .args(["draft", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiet Sunday"));

    sandbox.aj().args(["draft", "discard"]).assert().success();
    sandbox
        .aj()
        .args(["draft", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved draft"));
}

#[test]
fn test_export_preview_does_not_write() {
    let sandbox = Sandbox::new();
    sandbox.save_draft(&sample_entry());

    sandbox
        .aj()
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Quiet Sunday"))
        .stdout(predicate::str::contains("## Second?\n\n*No response*"))
        .stdout(predicate::str::contains("quiet-sunday-"));

    assert!(!sandbox.journal().exists());
}

#[test]
fn test_export_yes_writes_file_and_clears_draft() {
    let sandbox = Sandbox::new();
    sandbox.save_draft(&sample_entry());
    let out = sandbox.path().join("elsewhere");

    sandbox
        .aj()
        .arg("export")
        .arg("--out-dir")
        .arg(&out)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));

    let files: Vec<_> = fs::read_dir(&out).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(files.len(), 1);
    let name = files[0].to_string_lossy().to_string();
    assert!(name.starts_with("quiet-sunday-") && name.ends_with(".md"));

    sandbox
        .aj()
        .args(["draft", "show"])
        .assert()
        .stdout(predicate::str::contains("No saved draft"));
}

#[test]
fn test_export_without_draft_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .aj()
        .args(["export", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No saved draft"));
}

#[test]
fn test_export_blank_draft_fails() {
    let sandbox = Sandbox::new();
    sandbox.save_draft(&Entry::new(["A?".to_string(), "B?".to_string(), "C?".to_string()]).with_title("Only a title"));

    sandbox
        .aj()
        .args(["export", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to save yet"));
}
