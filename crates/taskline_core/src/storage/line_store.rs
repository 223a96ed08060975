use crate::error::AppError;
use crate::model::Record;
use std::io::Write;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "tasks.txt";

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var("TASKLINE_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("taskline")
            .join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskline")
            .join(STORE_FILE_NAME))
    }
}

/// A missing file is an empty store. Blank lines are not records and are
/// dropped; everything else parses into some [`Record`] variant.
pub fn load_records(path: &Path) -> Result<Vec<Record>, AppError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|err| AppError::io(err.to_string()))?;
    Ok(content
        .lines()
        .filter(|line| !line.is_empty())
        .map(Record::parse)
        .collect())
}

/// Writes the full replacement content in a single operation.
pub fn save_records(path: &Path, records: &[Record]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let mut content = String::new();
    for record in records {
        content.push_str(&record.render());
        content.push('\n');
    }
    std::fs::write(path, content).map_err(|err| AppError::io(err.to_string()))?;

    restrict_permissions(path)
}

/// Pure append: existing content is never read, truncated, or reordered.
pub fn append_record(path: &Path, record: &Record) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let existed = path.exists();
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| AppError::io(err.to_string()))?;
    writeln!(file, "{}", record.render()).map_err(|err| AppError::io(err.to_string()))?;

    if !existed {
        restrict_permissions(path)?;
    }

    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), AppError> {
    use std::os::unix::fs::PermissionsExt;
    let permissions = std::fs::Permissions::from_mode(0o600);
    std::fs::set_permissions(path, permissions).map_err(|err| AppError::io(err.to_string()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), AppError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{append_record, load_records, save_records};
    use crate::model::Record;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("taskline-{nanos}-{file_name}"))
    }

    #[test]
    fn load_missing_file_is_empty_store() {
        let path = temp_path("missing.txt");
        let records = load_records(&path).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn append_then_load_round_trip() {
        let path = temp_path("append.txt");
        append_record(&path, &Record::parse("Task 1")).unwrap();
        append_record(&path, &Record::parse("Task 2 || 2026-01-05 09:30")).unwrap();

        let records = load_records(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description(), "Task 1");
        assert_eq!(records[1].time(), Some("2026-01-05 09:30"));
    }

    #[test]
    fn append_preserves_existing_content() {
        let path = temp_path("append-preserve.txt");
        fs::write(&path, "kept as is || x || y || z\nTask 1\n").unwrap();

        append_record(&path, &Record::parse("Task 2")).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(content, "kept as is || x || y || z\nTask 1\nTask 2\n");
    }

    #[test]
    fn save_writes_one_line_per_record_with_trailing_newline() {
        let path = temp_path("save.txt");
        let records = vec![
            Record::parse("Task 1"),
            Record::parse("Task 2 || 2026-01-05 09:30"),
        ];

        save_records(&path, &records).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(content, "Task 1\nTask 2 || 2026-01-05 09:30\n");
    }

    #[test]
    fn load_skips_blank_lines() {
        let path = temp_path("blank-lines.txt");
        fs::write(&path, "Task 1\n\nTask 2\n\n").unwrap();

        let records = load_records(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description(), "Task 1");
        assert_eq!(records[1].description(), "Task 2");
    }

    #[test]
    fn malformed_lines_survive_a_rewrite_byte_for_byte() {
        let path = temp_path("malformed.txt");
        let line = "odd || 2026-01-05 09:30 || done || extra";
        fs::write(&path, format!("{line}\n")).unwrap();

        let records = load_records(&path).unwrap();
        save_records(&path, &records).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(content, format!("{line}\n"));
    }
}
