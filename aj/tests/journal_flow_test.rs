//! Journal session flows over a real file-backed draft store

use aidedjournal::{
    Catalog, DRAFT_KEY, DirectorySink, DraftStore, FormError, JournalForm, Leave, Reroll, SequenceSource,
};
use chrono::NaiveDate;
use draftstore::{FileStore, KvStore};
use tempfile::TempDir;

fn drafts_at(dir: &TempDir) -> DraftStore {
    let store = FileStore::open(dir.path().join("drafts")).expect("Failed to open store");
    DraftStore::new(Box::new(store))
}

fn open_form(dir: &TempDir, picks: Vec<usize>) -> JournalForm {
    JournalForm::load(Catalog::embedded(), drafts_at(dir), Box::new(SequenceSource::new(picks)))
        .expect("Failed to load form")
}

fn march_5() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date")
}

#[test]
fn test_draft_survives_restart() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let first = {
        let mut form = open_form(&dir, vec![7, 2, 9]);
        assert!(!form.was_restored());
        form.set_title("Rainy Tuesday").unwrap();
        form.set_answer(0, "Finished the chapter").unwrap();
        form.toggle_lock(2).unwrap();
        form.entry().clone()
    };

    // Different picks: a restored draft must not redraw
    let form = open_form(&dir, vec![0]);
    assert!(form.was_restored());
    assert_eq!(form.entry(), &first);
    // Identical to what is on disk, yet never exported
    assert!(!form.has_unsaved_changes());
    assert_eq!(form.leave_guard().check(), Leave::Allow);
    assert!(form.can_export());
}

#[test]
fn test_corrupt_draft_starts_fresh() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = FileStore::open(dir.path().join("drafts")).unwrap();
    store.set(DRAFT_KEY, "{ not json").unwrap();

    let form = open_form(&dir, vec![0]);
    assert!(!form.was_restored());
    assert!(!form.has_unsaved_changes());
    assert!(form.entry().has_distinct_prompts());
}

#[test]
fn test_export_writes_markdown_and_clears_draft() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let out = dir.path().join("journal");
    let mut form = open_form(&dir, vec![0]);
    let guard = form.leave_guard();

    form.set_title("My Day").unwrap();
    form.set_answer(1, "A long walk").unwrap();
    assert_eq!(guard.check(), Leave::Confirm);

    form.request_export().unwrap();
    let mut sink = DirectorySink::new(&out);
    let path = form.confirm_export(&mut sink, march_5()).unwrap().path;

    assert_eq!(path, out.join("my-day-05-mar-2024.md"));
    let body = std::fs::read_to_string(&path).unwrap();
    assert!(body.starts_with("# My Day\n\n"));
    assert!(body.contains("A long walk"));
    assert!(body.contains("*No response*"));

    assert_eq!(guard.check(), Leave::Allow);
    assert_eq!(form.drafts().raw().unwrap(), None);

    // Exporting the same day twice never clobbers the first file
    form.set_answer(0, "More").unwrap();
    form.request_export().unwrap();
    let second = form.confirm_export(&mut sink, march_5()).unwrap().path;
    assert_eq!(second, out.join("my-day-05-mar-2024-2.md"));
    assert!(path.exists());
}

#[test]
fn test_export_requires_confirmation_and_content() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut form = open_form(&dir, vec![0]);
    let mut sink = DirectorySink::new(dir.path().join("journal"));

    assert!(matches!(form.request_export(), Err(FormError::NothingToExport)));

    form.set_answer(0, "text").unwrap();
    assert!(matches!(
        form.confirm_export(&mut sink, march_5()),
        Err(FormError::NotRequested)
    ));
    assert!(form.has_unsaved_changes());
}

#[test]
fn test_locked_slots_survive_reroll_and_restart() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut form = open_form(&dir, vec![0]);
    form.toggle_lock(1).unwrap();
    let locked_prompt = form.entry().prompt(1).to_string();

    assert_eq!(form.reroll(1).unwrap(), Reroll::Locked);
    assert!(matches!(form.reroll(0).unwrap(), Reroll::Replaced { .. }));
    drop(form);

    let form = open_form(&dir, vec![5]);
    assert!(form.entry().is_locked(1));
    assert_eq!(form.entry().prompt(1), locked_prompt);
    assert!(form.entry().has_distinct_prompts());
}

#[test]
fn test_start_new_discards_draft_on_disk() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut form = open_form(&dir, vec![0]);
    form.set_answer(0, "scratch").unwrap();
    form.start_new().unwrap();
    drop(form);

    let form = open_form(&dir, vec![0]);
    assert!(!form.was_restored());
    assert!(form.entry().is_blank());
}
