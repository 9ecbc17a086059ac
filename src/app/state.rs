/// Mutable session state owned by the dispatcher.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Channel that plain input lines are sent to.
    pub current_target: Option<String>,
    /// Used when `/quit` carries no message of its own.
    pub quit_message: Option<String>,
    /// `chrono` format string for display timestamps.
    pub timestamp_format: String,
}

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl SessionState {
    pub fn new(quit_message: Option<String>, timestamp_format: String) -> Self {
        Self {
            current_target: None,
            quit_message,
            timestamp_format,
        }
    }

    pub fn join(&mut self, channel: String) {
        self.current_target = Some(channel);
    }

    /// Clear the current target, returning it if one was set.
    pub fn part(&mut self) -> Option<String> {
        self.current_target.take()
    }
}
