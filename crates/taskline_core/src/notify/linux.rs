use crate::error::AppError;
use crate::notify::Notifier;
use notify_rust::Notification;

pub struct LinuxNotifier;

impl Notifier for LinuxNotifier {
    fn notify(&self, description: &str, time: &str) -> Result<(), AppError> {
        Notification::new()
            .summary("taskline")
            .body(&format!("{description} (due {time})"))
            .show()
            .map_err(|err| AppError::io(err.to_string()))?;
        Ok(())
    }
}
