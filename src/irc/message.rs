//! IRC wire messages.
//!
//! [`parse`] splits a raw server line into prefix, command and parameters
//! following the RFC 1459 grammar. [`Outbound`] covers the handful of
//! commands this client ever writes.

use std::fmt;

/// One server line, decomposed.
///
/// A degenerate line (empty, or a prefix with nothing after it) parses to the
/// default value; callers treat an empty `command` as nothing to act on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMessage {
    pub prefix: Option<String>,
    pub command: String,
    pub params: Vec<String>,
}

impl ParsedMessage {
    /// `true` for lines that carried no command at all.
    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}

/// Parse a raw line. Never fails.
///
/// A trailing `\r\n` is ignored. Only the last parameter, when introduced by
/// `:`, may contain spaces.
pub fn parse(line: &str) -> ParsedMessage {
    let mut rest = line.trim_end_matches(['\r', '\n']);
    if rest.is_empty() {
        return ParsedMessage::default();
    }

    let mut prefix = None;
    if let Some(after_colon) = rest.strip_prefix(':') {
        let Some((p, tail)) = after_colon.split_once(' ') else {
            return ParsedMessage::default();
        };
        if !p.is_empty() {
            prefix = Some(p.to_string());
        }
        rest = tail;
    }

    let Some((command, mut rest)) = rest.split_once(' ') else {
        if rest.is_empty() {
            return ParsedMessage::default();
        }
        return ParsedMessage {
            prefix,
            command: rest.to_string(),
            params: Vec::new(),
        };
    };

    if command.is_empty() {
        return ParsedMessage::default();
    }

    let mut params = Vec::new();
    while !rest.is_empty() {
        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing.to_string());
            break;
        }
        match rest.split_once(' ') {
            Some((param, tail)) => {
                params.push(param.to_string());
                rest = tail;
            }
            None => {
                params.push(rest.to_string());
                break;
            }
        }
    }

    ParsedMessage {
        prefix,
        command: command.to_string(),
        params,
    }
}

/// Messages written by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Nick(String),
    User { username: String, realname: String },
    Join(String),
    Part(String),
    Privmsg { target: String, text: String },
    Pong(String),
    Quit(Option<String>),
}

impl Outbound {
    /// NICK followed by USER, using the nickname for both user fields.
    pub fn registration(nick: &str) -> [Outbound; 2] {
        [
            Outbound::Nick(nick.to_string()),
            Outbound::User {
                username: nick.to_string(),
                realname: nick.to_string(),
            },
        ]
    }

    /// The line as sent on the wire, `\r\n` included.
    pub fn to_wire(&self) -> String {
        format!("{}\r\n", self)
    }
}

impl fmt::Display for Outbound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outbound::Nick(nick) => write!(f, "NICK {}", nick),
            Outbound::User { username, realname } => {
                write!(f, "USER {} 0 * :{}", username, realname)
            }
            Outbound::Join(channel) => write!(f, "JOIN {}", channel),
            Outbound::Part(channel) => write!(f, "PART {}", channel),
            Outbound::Privmsg { target, text } => write!(f, "PRIVMSG {} :{}", target, text),
            Outbound::Pong(token) => write!(f, "PONG :{}", token),
            Outbound::Quit(Some(message)) => write!(f, "QUIT :{}", message),
            Outbound::Quit(None) => write!(f, "QUIT"),
        }
    }
}
