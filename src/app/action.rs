use crate::irc::message::Outbound;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Write a command to the server and flush
    Send(Outbound),
    /// Print a line for the user
    Display(String),
    /// Stop the event loop
    Quit,
}
