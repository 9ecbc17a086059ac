//! User slash-command parser.
//!
//! Parses `/command arg1 arg2 ...` input lines into typed [`ParsedCommand`]
//! values that the event handler can act on.

/// A parsed user command. Each variant corresponds to a `/command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Join { channel: String },
    Part,
    Nick { nick: String },
    Msg { target: String, text: String },
    Quit { message: Option<String> },
    Help,
}

/// Lines shown for `/help`.
pub const HELP_LINES: &[&str] = &[
    "/join <channel>        join a channel and make it the current target",
    "/part                  leave the current channel",
    "/nick <name>           change nickname",
    "/msg <target> <text>   send a private message",
    "/quit [message]        disconnect and exit",
];

/// Strip characters that would let user text terminate or split a protocol
/// line.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\0'))
        .collect()
}

/// Parse a slash-command string into a [`ParsedCommand`].
///
/// Returns `None` if the input does not start with `/`, is not a recognized
/// command, or lacks a required argument. Commands are case-insensitive.
pub fn parse_command(input: &str) -> Option<ParsedCommand> {
    if !input.starts_with('/') {
        return None;
    }

    let clean = sanitize(input);
    let fields: Vec<&str> = clean.split_whitespace().collect();
    let cmd = fields.first()?.strip_prefix('/')?.to_lowercase();
    let args = &fields[1..];

    match cmd.as_str() {
        "join" => {
            let channel = args.first()?.to_string();
            Some(ParsedCommand::Join { channel })
        }
        "part" => Some(ParsedCommand::Part),
        "nick" => {
            let nick = args.first()?.to_string();
            Some(ParsedCommand::Nick { nick })
        }
        "msg" => {
            if args.len() < 2 {
                return None;
            }
            Some(ParsedCommand::Msg {
                target: args[0].to_string(),
                text: args[1..].join(" "),
            })
        }
        "quit" => {
            let message = if args.is_empty() {
                None
            } else {
                Some(args.join(" "))
            };
            Some(ParsedCommand::Quit { message })
        }
        "help" => Some(ParsedCommand::Help),
        _ => None,
    }
}
