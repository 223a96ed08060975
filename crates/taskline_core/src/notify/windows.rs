use crate::error::AppError;
use crate::notify::Notifier;
use tauri_winrt_notification::Toast;

pub struct WindowsNotifier;

impl Notifier for WindowsNotifier {
    fn notify(&self, description: &str, time: &str) -> Result<(), AppError> {
        Toast::new(Toast::POWERSHELL_APP_ID)
            .title("taskline")
            .text1(description)
            .text2(&format!("due {time}"))
            .show()
            .map_err(|err| AppError::io(err.to_string()))?;
        Ok(())
    }
}
