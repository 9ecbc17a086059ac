use crate::irc::message::ParsedMessage;

/// Produced by the server reader task.
#[derive(Debug)]
pub enum ServerEvent {
    /// A parsed server line
    Message(ParsedMessage),
    /// End of stream, or the read failed
    Closed { error: Option<String> },
}

/// Produced by the standard-input reader thread.
#[derive(Debug)]
pub enum InputEvent {
    Line(String),
    Closed { error: Option<String> },
}
