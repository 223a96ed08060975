use clap::Parser;
use taskline_cli::cli::{Cli, Command};
use taskline_core::error::AppError;
use taskline_core::model::Record;
use taskline_core::task_api::{self, DeleteOutcome, ReminderOutcome, ReminderStatus};

fn record_json(record: &Record, position: Option<usize>) -> serde_json::Value {
    serde_json::json!({
        "position": position,
        "description": record.description(),
        "time": record.time(),
        "reminded": record.is_reminded(),
    })
}

fn delete_json(outcome: &DeleteOutcome) -> serde_json::Value {
    match outcome {
        DeleteOutcome::NoTasks => serde_json::json!({ "status": "no_tasks" }),
        DeleteOutcome::InvalidNumber => serde_json::json!({ "status": "invalid_number" }),
        DeleteOutcome::OutOfRange { count } => {
            serde_json::json!({ "status": "out_of_range", "count": count })
        }
        DeleteOutcome::Deleted { line } => {
            serde_json::json!({ "status": "deleted", "line": line })
        }
    }
}

fn remind_json(outcome: &ReminderOutcome) -> serde_json::Value {
    let reminders: Vec<_> = outcome
        .fired
        .iter()
        .map(|reminder| {
            serde_json::json!({
                "description": reminder.description,
                "time": reminder.time,
            })
        })
        .collect();
    let status = match outcome.status {
        ReminderStatus::Fired => "fired",
        ReminderStatus::NoScheduled => "no_scheduled",
        ReminderStatus::NoneDue => "none_due",
    };
    serde_json::json!({ "status": status, "reminders": reminders })
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Add { description, time } => {
            let record = task_api::add_task(&description, time.as_deref())?;
            if cli.json {
                println!("{}", record_json(&record, None));
            } else {
                match record.time() {
                    Some(time) => println!(
                        "Task added: {} (scheduled for {})",
                        record.description(),
                        time
                    ),
                    None => println!("Task added: {}", record.description()),
                }
            }
        }
        Command::List => {
            let records = task_api::list_tasks()?;
            if cli.json {
                let payload: Vec<_> = records
                    .iter()
                    .enumerate()
                    .map(|(index, record)| record_json(record, Some(index + 1)))
                    .collect();
                println!("{}", serde_json::Value::Array(payload));
            } else if records.is_empty() {
                println!("No tasks found.");
            } else {
                for (index, record) in records.iter().enumerate() {
                    println!("{}", record.display_line(index + 1));
                }
            }
        }
        Command::Delete { position } => {
            let outcome = task_api::delete_task(&position)?;
            if cli.json {
                println!("{}", delete_json(&outcome));
            } else {
                match outcome {
                    DeleteOutcome::NoTasks => println!("No tasks found."),
                    DeleteOutcome::InvalidNumber => println!("Please enter a valid number."),
                    DeleteOutcome::OutOfRange { count } => println!(
                        "Invalid task number. Please choose a number between 1 and {count}."
                    ),
                    DeleteOutcome::Deleted { line } => println!("Deleted task: {line}"),
                }
            }
        }
        Command::Remind => {
            let outcome = task_api::check_reminders()?;
            for failure in &outcome.failures {
                eprintln!(
                    "WARNING: could not notify '{}': {}",
                    failure.description, failure.error
                );
            }
            if cli.json {
                println!("{}", remind_json(&outcome));
            } else {
                for reminder in &outcome.fired {
                    println!(
                        "REMINDER: '{}' was due on {}",
                        reminder.description, reminder.time
                    );
                }
                match outcome.status {
                    ReminderStatus::Fired => {}
                    ReminderStatus::NoScheduled => println!("No scheduled tasks."),
                    ReminderStatus::NoneDue => println!("No reminders due right now."),
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
        Err(err) => {
            let _ = err.print();
            return;
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
