use std::{fs::File, io, path::Path};

use sha2::{Digest, Sha256};

use crate::{ExportError, Issue};

/// One line of the tasks CSV. The four trailing columns are reserved and
/// always empty.
#[derive(Debug, serde::Serialize, PartialEq, Eq)]
pub struct TaskRow {
    pub category: &'static str,
    pub title: String,
    pub reserved_1: &'static str,
    pub reserved_2: &'static str,
    pub reserved_3: &'static str,
    pub reserved_4: &'static str,
}

impl TaskRow {
    pub fn from_issue(issue: &Issue) -> Self {
        Self {
            category: "Task",
            title: task_title(issue),
            reserved_1: "",
            reserved_2: "",
            reserved_3: "",
            reserved_4: "",
        }
    }
}

/// `<name> by <assignee>`, with every comma in the name turned into ` &`
pub fn task_title(issue: &Issue) -> String {
    format!(
        "{} by {}",
        issue.name.replace(',', " &"),
        issue.assignee_display_name()
    )
}

/// Write one row per issue to the given CSV file, with no header line.
/// Returns the number of rows written.
///
/// The file is created (or truncated) and its folders created if necessary.
/// Rows are buffered and flushed once at the end.
pub fn write_tasks_csv(
    csv_file: impl AsRef<Path>,
    issues: &[Issue],
) -> Result<usize, ExportError> {
    let path = csv_file.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
        }
    }
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    let mut count_entries = 0;
    for issue in issues {
        writer
            .serialize(TaskRow::from_issue(issue))
            .map_err(|e| write_error(path, e))?;
        count_entries += 1;
    }

    writer.flush().map_err(|e| ExportError::io(path, e))?;
    Ok(count_entries)
}

/// File failures keep their `Io` kind, anything else is a CSV error
fn write_error(path: &Path, error: csv::Error) -> ExportError {
    let reason = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => ExportError::io(path, source),
        _ => ExportError::Csv {
            path: path.to_path_buf(),
            reason,
        },
    }
}

/// SHA256 of a file's content, hex-encoded
pub fn file_sha256(path: impl AsRef<Path>) -> Result<String, ExportError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| ExportError::io(path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| ExportError::io(path, e))?;
    Ok(hex::encode(hasher.finalize()))
}
