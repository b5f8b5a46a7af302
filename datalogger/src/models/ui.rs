//! Notifications for the user interface.
//!
//! The UI context owns the receiving end of the channel; the sweep and the upload task only hold
//! `UiHandle`s, so notifications raised on the upload task are handed back to the UI context
//! instead of touching it directly.

use std::fmt;
use tokio::sync::mpsc;

use common::types::SensorType;

pub const COMPLETION_TITLE: &str = "Data Collection Complete";
pub const COMPLETION_MESSAGE: &str = "The app can be closed, and uninstalled now.";
pub const SENSOR_UNAVAILABLE_TITLE: &str = "Sensor Unavailable";
pub const SENSOR_UNAVAILABLE_MESSAGE: &str = "Unfortunately, one of the sensors is not available, so we can't proceed with the experiment. Feel free to uninstall the app.";

/// Short lived message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NetworkUnavailable,
    SendingData,
    UploadSucceeded,
    UploadFailed,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Notice::NetworkUnavailable => "Network is unavailable",
            Notice::SendingData => "Sending Data",
            Notice::UploadSucceeded => "Successful",
            Notice::UploadFailed => "Failed to send the data, Try again later.",
        };
        write!(f, "{}", message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ProgressVisible(bool),
    Progress { current: u64, max: u64 },
    Notice(Notice),
    /// Modal dialog shown once the data was uploaded.
    CompletionDialog,
    /// Blocking modal; the application closes once it is dismissed.
    SensorUnavailableAlert(SensorType),
}

impl fmt::Display for UiEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiEvent::ProgressVisible(true) => write!(f, "[progress shown]"),
            UiEvent::ProgressVisible(false) => write!(f, "[progress hidden]"),
            UiEvent::Progress { current, max } => write!(f, "[progress {}/{}]", current, max),
            UiEvent::Notice(notice) => write!(f, "{}", notice),
            UiEvent::CompletionDialog => write!(f, "{}: {}", COMPLETION_TITLE, COMPLETION_MESSAGE),
            UiEvent::SensorUnavailableAlert(sensor_type) => write!(
                f,
                "{} ({}): {}",
                SENSOR_UNAVAILABLE_TITLE, sensor_type, SENSOR_UNAVAILABLE_MESSAGE
            ),
        }
    }
}

/// Sending side of the UI channel.
#[derive(Clone, Debug)]
pub struct UiHandle {
    tx: mpsc::UnboundedSender<UiEvent>,
}

/// Creates the UI channel. The receiver belongs to the UI context.
pub fn ui_channel() -> (UiHandle, mpsc::UnboundedReceiver<UiEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (UiHandle { tx }, rx)
}

impl UiHandle {
    pub fn send(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            log::debug!("UI closed, notification dropped");
        }
    }

    pub fn progress_visible(&self, visible: bool) {
        self.send(UiEvent::ProgressVisible(visible));
    }

    pub fn progress(&self, current: u64, max: u64) {
        self.send(UiEvent::Progress { current, max });
    }

    pub fn notice(&self, notice: Notice) {
        self.send(UiEvent::Notice(notice));
    }

    pub fn completion_dialog(&self) {
        log::debug!("Creating alert box");
        self.send(UiEvent::CompletionDialog);
    }

    pub fn sensor_unavailable(&self, sensor_type: SensorType) {
        self.send(UiEvent::SensorUnavailableAlert(sensor_type));
    }
}
