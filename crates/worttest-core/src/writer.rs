//! Test-set serialization.
//!
//! Files are staged to a temporary file in the target directory and
//! persisted only after every line has been written, so an aborted run
//! never leaves a truncated test set behind.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::EvalError;
use crate::model::{Question, QuestionGroup};
use crate::umlaut::replace_umlauts;

/// Path of the umlaut-folded sibling of a test-set file.
pub fn nouml_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".nouml");
    PathBuf::from(os)
}

/// Write a categorized test set: each group as a `": " + label` header
/// followed by its questions in generator order. With `fold` set, the
/// `.nouml` sibling mirrors the file line for line with umlauts folded.
pub fn write_question_groups(
    path: &Path,
    groups: &[QuestionGroup],
    fold: bool,
) -> Result<(), EvalError> {
    let mut lines = Vec::new();
    for group in groups {
        if group.label.trim().is_empty() {
            return Err(EvalError::malformed(
                path,
                lines.len() + 1,
                "refusing to write an empty group label",
            ));
        }
        lines.push(format!(": {}", group.label));
        for question in &group.questions {
            lines.push(question.to_string());
        }
    }
    write_lines(path, &lines, fold)
}

/// Write a flat test set without group headers; the evaluator assigns a
/// synthetic label on read.
pub fn write_questions(path: &Path, questions: &[Question], fold: bool) -> Result<(), EvalError> {
    let lines: Vec<String> = questions.iter().map(|q| q.to_string()).collect();
    write_lines(path, &lines, fold)
}

fn write_lines(path: &Path, lines: &[String], fold: bool) -> Result<(), EvalError> {
    if let Some(i) = lines.iter().position(|l| l.trim().is_empty()) {
        return Err(EvalError::malformed(
            path,
            i + 1,
            "refusing to write an empty test-set line",
        ));
    }
    write_file(path, lines)?;
    if fold {
        let folded: Vec<String> = lines.iter().map(|l| replace_umlauts(l)).collect();
        write_file(&nouml_path(path), &folded)?;
    }
    Ok(())
}

fn write_file(path: &Path, lines: &[String]) -> Result<(), EvalError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| EvalError::io(dir, e))?;

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| EvalError::io(dir, e))?;
    for line in lines {
        writeln!(staged, "{line}").map_err(|e| EvalError::io(path, e))?;
    }
    staged
        .persist(path)
        .map_err(|e| EvalError::io(path, e.error))?;
    Ok(())
}
