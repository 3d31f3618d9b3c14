//! Startup configuration: database location and question set.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;
use trivia_core::model::QuestionSet;

/// Relative to the working directory; resolved by `normalize_sqlite_url`.
pub const DEFAULT_DB_URL: &str = "sqlite:trivia.sqlite3";

/// Turn `sqlite:relative.db` or a bare path into an absolute `sqlite://` URL.
///
/// In-memory URLs and URLs already in `sqlite://` form pass through.
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database file and its parent directory exist.
pub fn prepare_sqlite_file(db_url: &str) -> Result<()> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let Some(path) = db_url.strip_prefix("sqlite://") else {
        bail!("invalid --db value: {db_url}");
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        bail!("invalid --db value: {db_url}");
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("creating {}", path.display()))?;
        debug!(path = %path.display(), "created database file");
    }

    Ok(())
}

/// Load the question set from a JSON file, or fall back to the built-in set.
pub fn load_questions(path: Option<&Path>) -> Result<QuestionSet> {
    let Some(path) = path else {
        return Ok(QuestionSet::builtin());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading question file {}", path.display()))?;
    let questions = QuestionSet::from_json(&raw)
        .with_context(|| format!("parsing question file {}", path.display()))?;
    debug!(path = %path.display(), count = questions.len(), "loaded questions");
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_and_absolute_urls_pass_through() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/trivia.db"),
            "sqlite:///tmp/trivia.db"
        );
    }

    #[test]
    fn relative_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/trivia.db");
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/trivia.db"));
    }

    #[test]
    fn default_url_resolves_to_absolute_path() {
        let url = normalize_sqlite_url(DEFAULT_DB_URL);
        let path = url.strip_prefix("sqlite://").unwrap();
        assert!(Path::new(path).is_absolute());
        assert!(path.ends_with("trivia.sqlite3"));
    }

    #[test]
    fn prepare_creates_missing_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("trivia.db");
        let url = format!("sqlite://{}", path.display());
        prepare_sqlite_file(&url).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn prepare_rejects_non_sqlite_urls() {
        assert!(prepare_sqlite_file("postgres://nope").is_err());
    }

    #[test]
    fn missing_question_path_uses_builtin() {
        let questions = load_questions(None).unwrap();
        assert_eq!(questions.len(), QuestionSet::builtin().len());
    }

    #[test]
    fn loads_question_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(
            &path,
            r#"[{"text": "Capital of France?", "options": ["Paris", "Lyon"], "correct": "Paris"}]"#,
        )
        .unwrap();
        let questions = load_questions(Some(&path)).unwrap();
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn invalid_question_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, "[]").unwrap();
        assert!(load_questions(Some(&path)).is_err());
        assert!(load_questions(Some(&dir.path().join("missing.json"))).is_err());
    }
}
