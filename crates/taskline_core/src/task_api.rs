use crate::error::AppError;
use crate::model::{Record, SEPARATOR};
use crate::notify::{Notifier, notifier_from_env};
use crate::storage::line_store;
use std::path::Path;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Store timestamp format: 24-hour, zero-padded, no seconds, no zone.
pub const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    NoTasks,
    InvalidNumber,
    OutOfRange { count: usize },
    Deleted { line: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredReminder {
    pub description: String,
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderStatus {
    Fired,
    NoScheduled,
    NoneDue,
}

#[derive(Debug)]
pub struct NotificationFailure {
    pub description: String,
    pub error: AppError,
}

#[derive(Debug)]
pub struct ReminderOutcome {
    pub fired: Vec<FiredReminder>,
    pub status: ReminderStatus,
    pub failures: Vec<NotificationFailure>,
}

pub fn add_task(description: &str, time: Option<&str>) -> Result<Record, AppError> {
    let path = line_store::store_path()?;
    add_task_with_path(&path, description, time)
}

pub fn list_tasks() -> Result<Vec<Record>, AppError> {
    let path = line_store::store_path()?;
    line_store::load_records(&path)
}

pub fn delete_task(position: &str) -> Result<DeleteOutcome, AppError> {
    let path = line_store::store_path()?;
    delete_task_with_path(&path, position)
}

pub fn check_reminders() -> Result<ReminderOutcome, AppError> {
    let path = line_store::store_path()?;
    let notifier = notifier_from_env()?;
    check_reminders_with_path(&path, local_now(), notifier.as_ref())
}

fn add_task_with_path(
    path: &Path,
    description: &str,
    time: Option<&str>,
) -> Result<Record, AppError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("description is required"));
    }
    if trimmed.contains(SEPARATOR) {
        return Err(AppError::invalid_input(format!(
            "description must not contain '{SEPARATOR}'"
        )));
    }

    // The time is stored verbatim; format problems surface at check time.
    let record = match time.map(str::trim) {
        Some(value) if value.contains(SEPARATOR) => {
            return Err(AppError::invalid_input(format!(
                "time must not contain '{SEPARATOR}'"
            )));
        }
        Some(value) if !value.is_empty() => Record::Scheduled {
            description: trimmed.to_string(),
            time: value.to_string(),
        },
        _ => Record::Plain {
            description: trimmed.to_string(),
        },
    };

    line_store::append_record(path, &record)?;
    Ok(record)
}

fn delete_task_with_path(path: &Path, position: &str) -> Result<DeleteOutcome, AppError> {
    let mut records = line_store::load_records(path)?;
    if records.is_empty() {
        return Ok(DeleteOutcome::NoTasks);
    }

    let parsed: i64 = match position.trim().parse() {
        Ok(value) => value,
        Err(_) => return Ok(DeleteOutcome::InvalidNumber),
    };

    if parsed < 1 || parsed as usize > records.len() {
        return Ok(DeleteOutcome::OutOfRange {
            count: records.len(),
        });
    }

    let removed = records.remove(parsed as usize - 1);
    line_store::save_records(path, &records)?;

    Ok(DeleteOutcome::Deleted {
        line: removed.render().trim().to_string(),
    })
}

fn local_now() -> PrimitiveDateTime {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let now = OffsetDateTime::now_utc().to_offset(offset);
    PrimitiveDateTime::new(now.date(), now.time())
}

fn check_reminders_with_path(
    path: &Path,
    now: PrimitiveDateTime,
    notifier: &dyn Notifier,
) -> Result<ReminderOutcome, AppError> {
    let mut records = line_store::load_records(path)?;
    let mut fired = Vec::new();
    let mut failures = Vec::new();
    let mut has_time_field = false;

    for record in &mut records {
        let (description, time) = match record {
            Record::Scheduled { description, time } => {
                has_time_field = true;
                (description.clone(), time.clone())
            }
            Record::Reminded { .. } => {
                has_time_field = true;
                continue;
            }
            Record::Plain { .. } | Record::Malformed { .. } => continue,
        };

        // An unparseable time is not an error: the record stays untouched
        // and out of the evaluation.
        let due = match PrimitiveDateTime::parse(&time, TIME_FORMAT) {
            Ok(value) => value,
            Err(_) => continue,
        };

        if due > now {
            continue;
        }

        if let Err(err) = notifier.notify(&description, &time) {
            failures.push(NotificationFailure {
                description: description.clone(),
                error: err,
            });
        }

        *record = Record::Reminded {
            description: description.clone(),
            time: time.clone(),
        };
        fired.push(FiredReminder { description, time });
    }

    let status = if !fired.is_empty() {
        line_store::save_records(path, &records)?;
        ReminderStatus::Fired
    } else if has_time_field {
        ReminderStatus::NoneDue
    } else {
        ReminderStatus::NoScheduled
    };

    Ok(ReminderOutcome {
        fired,
        status,
        failures,
    })
}
