//! Markdown export
//!
//! Renders an entry into a markdown document, names it after the title and
//! date, and hands it to a [`DocumentSink`] (the terminal stand-in for a
//! browser download).

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, info};

use crate::entry::Entry;

/// MIME type of exported documents
pub const MARKDOWN_MIME: &str = "text/markdown";

/// Placeholder written for unanswered prompts
pub const NO_RESPONSE: &str = "*No response*";

/// Errors from saving an exported document
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Source of "today" for headings and file names
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// `DD-mon-YYYY` with a lowercase three-letter month, e.g. `05-mar-2024`
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string().to_lowercase()
}

/// Lowercase, keep ASCII letters and digits, join words with single hyphens
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    kept.split(|c: char| c.is_whitespace() || c == '-')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// `<slug>-<stamp>.md`, or just `<stamp>.md` when the title has no usable characters
pub fn filename(entry: &Entry, today: NaiveDate) -> String {
    let slug = slugify(entry.title());
    let stamp = date_stamp(today);
    if slug.is_empty() {
        format!("{}.md", stamp)
    } else {
        format!("{}-{}.md", slug, stamp)
    }
}

/// Render the entry as markdown: title heading, then one section per slot
pub fn render(entry: &Entry, today: NaiveDate) -> String {
    // Written as typed; only an all-whitespace title falls back to the date
    let title = entry.title();
    let heading = if title.trim().is_empty() { date_stamp(today) } else { title.to_string() };

    let mut doc = format!("# {}\n\n", heading);
    for (prompt, answer) in entry.prompts().iter().zip(entry.answers()) {
        let body = if answer.trim().is_empty() { NO_RESPONSE } else { answer.as_str() };
        doc.push_str(&format!("## {}\n\n{}\n\n", prompt, body));
    }
    doc
}

/// A rendered, named document ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    pub mime: &'static str,
    pub body: String,
}

impl Document {
    pub fn build(entry: &Entry, today: NaiveDate) -> Self {
        Self {
            filename: filename(entry, today),
            mime: MARKDOWN_MIME,
            body: render(entry, today),
        }
    }
}

/// Destination for exported documents
pub trait DocumentSink {
    /// Save the document, returning where it ended up
    fn save(&mut self, doc: &Document) -> Result<PathBuf, ExportError>;
}

/// Writes documents into a directory without overwriting existing files
///
/// A taken name gets a numeric suffix: `x.md`, `x-2.md`, `x-3.md`, ...
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn candidate(&self, filename: &str, attempt: u32) -> PathBuf {
        if attempt <= 1 {
            return self.dir.join(filename);
        }
        let path = Path::new(filename);
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(filename);
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.dir.join(format!("{}-{}.{}", stem, attempt, ext)),
            None => self.dir.join(format!("{}-{}", stem, attempt)),
        }
    }
}

impl DocumentSink for DirectorySink {
    fn save(&mut self, doc: &Document) -> Result<PathBuf, ExportError> {
        debug!(dir = ?self.dir, filename = %doc.filename, "DirectorySink::save: called");
        fs::create_dir_all(&self.dir).map_err(|source| ExportError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut attempt = 1;
        loop {
            let path = self.candidate(&doc.filename, attempt);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(doc.body.as_bytes())
                        .map_err(|source| ExportError::Io { path: path.clone(), source })?;
                    info!("Exported {} ({})", path.display(), doc.mime);
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(?path, "DirectorySink::save: name taken");
                    attempt += 1;
                }
                Err(source) => return Err(ExportError::Io { path, source }),
            }
        }
    }
}

/// Keeps saved documents in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub saved: Vec<Document>,
}

impl DocumentSink for MemorySink {
    fn save(&mut self, doc: &Document) -> Result<PathBuf, ExportError> {
        self.saved.push(doc.clone());
        Ok(PathBuf::from(&doc.filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn march_5() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn entry(title: &str) -> Entry {
        Entry::new([
            "What made you smile today?".to_string(),
            "What's a decision you made today?".to_string(),
            "What's a habit you're working on?".to_string(),
        ])
        .with_title(title)
        .with_answers(["The sun.".to_string(), String::new(), "Running".to_string()])
    }

    #[test]
    fn test_filename_with_title() {
        assert_eq!(filename(&entry("My Day!"), march_5()), "my-day-05-mar-2024.md");
    }

    #[test]
    fn test_filename_without_title() {
        assert_eq!(filename(&entry(""), march_5()), "05-mar-2024.md");
        assert_eq!(filename(&entry("!!!"), march_5()), "05-mar-2024.md");
    }

    #[test]
    fn test_slugify_collapses_and_trims() {
        assert_eq!(slugify("  Hello   World  "), "hello-world");
        assert_eq!(slugify("--a - b--"), "a-b");
        assert_eq!(slugify("Café 2024: déjà vu"), "caf-2024-dj-vu");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_date_stamp_format() {
        assert_eq!(date_stamp(march_5()), "05-mar-2024");
        assert_eq!(date_stamp(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()), "31-dec-2023");
    }

    #[test]
    fn test_render_document() {
        let doc = render(&entry("My Day!"), march_5());
        let expected = "# My Day!\n\n\
            ## What made you smile today?\n\nThe sun.\n\n\
            ## What's a decision you made today?\n\n*No response*\n\n\
            ## What's a habit you're working on?\n\nRunning\n\n";
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_render_uses_date_heading_without_title() {
        let doc = render(&entry("   "), march_5());
        assert!(doc.starts_with("# 05-mar-2024\n\n"));
    }

    #[test]
    fn test_render_keeps_title_as_typed() {
        let doc = render(&entry("  My Day "), march_5());
        assert!(doc.starts_with("#   My Day \n\n"));
        assert_eq!(filename(&entry("  My Day "), march_5()), "my-day-05-mar-2024.md");
    }

    #[test]
    fn test_document_build() {
        let doc = Document::build(&entry("My Day!"), march_5());
        assert_eq!(doc.filename, "my-day-05-mar-2024.md");
        assert_eq!(doc.mime, "text/markdown");
        assert!(doc.body.contains(NO_RESPONSE));
    }

    #[test]
    fn test_directory_sink_never_clobbers() {
        let temp = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(temp.path().join("journal"));
        let doc = Document::build(&entry("My Day!"), march_5());

        let first = sink.save(&doc).unwrap();
        let second = sink.save(&doc).unwrap();

        assert_eq!(first.file_name().unwrap(), "my-day-05-mar-2024.md");
        assert_eq!(second.file_name().unwrap(), "my-day-05-mar-2024-2.md");
        assert_eq!(std::fs::read_to_string(&second).unwrap(), doc.body);
    }

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(march_5()).today(), march_5());
    }
}
