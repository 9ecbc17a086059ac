//! IRC protocol layer: wire parsing, connection setup, and user command parsing.

pub mod commands;
pub mod connection;
pub mod message;
