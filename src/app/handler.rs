use crate::app::action::Action;
use crate::app::state::{SessionState, DEFAULT_TIMESTAMP_FORMAT};
use crate::irc::commands::{self, ParsedCommand, HELP_LINES};
use crate::irc::message::{Outbound, ParsedMessage};
use chrono::{DateTime, Local};
use std::fmt::Write;

/// Label used when a server line carries no prefix.
const SERVER_SOURCE: &str = "SERVER";

/// Decide what to do with one parsed server line.
///
/// Keep-alive PINGs are answered and never displayed. Lines without a
/// command are skipped.
pub fn handle_server_message(msg: &ParsedMessage, timestamp: &str) -> Vec<Action> {
    if msg.is_empty() {
        return vec![];
    }

    if msg.command == "PING" {
        if let Some(token) = msg.params.first() {
            return vec![Action::Send(Outbound::Pong(token.clone()))];
        }
    }

    let source = msg.prefix.as_deref().unwrap_or(SERVER_SOURCE);
    let line = match msg.command.as_str() {
        "PRIVMSG" | "NOTICE" if msg.params.len() >= 2 => {
            format!("[{}] {} {}", timestamp, source, msg.params[1])
        }
        _ => format!(
            "[{}] {} {} [{}]",
            timestamp,
            source,
            msg.command,
            msg.params.join(" ")
        ),
    };
    vec![Action::Display(line)]
}

/// Decide what to do with one line typed by the user.
pub fn handle_user_line(state: &mut SessionState, line: &str) -> Vec<Action> {
    if line.starts_with('/') {
        let Some(cmd) = commands::parse_command(line) else {
            return vec![];
        };
        return handle_command(state, cmd);
    }

    let Some(target) = state.current_target.clone() else {
        return vec![];
    };
    let text = commands::sanitize(line);
    if text.is_empty() {
        return vec![];
    }
    vec![Action::Send(Outbound::Privmsg { target, text })]
}

fn handle_command(state: &mut SessionState, cmd: ParsedCommand) -> Vec<Action> {
    match cmd {
        ParsedCommand::Join { channel } => {
            state.join(channel.clone());
            vec![Action::Send(Outbound::Join(channel))]
        }
        ParsedCommand::Part => match state.part() {
            Some(channel) => vec![Action::Send(Outbound::Part(channel))],
            None => vec![],
        },
        ParsedCommand::Nick { nick } => vec![Action::Send(Outbound::Nick(nick))],
        ParsedCommand::Msg { target, text } => {
            vec![Action::Send(Outbound::Privmsg { target, text })]
        }
        ParsedCommand::Quit { message } => {
            let message = message.or_else(|| state.quit_message.clone());
            vec![Action::Send(Outbound::Quit(message)), Action::Quit]
        }
        ParsedCommand::Help => HELP_LINES
            .iter()
            .map(|line| Action::Display(line.to_string()))
            .collect(),
    }
}

/// Format `now` for display, falling back to the default format if `format`
/// is not a valid strftime string.
pub fn timestamp(now: DateTime<Local>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", now.format(format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", now.format(DEFAULT_TIMESTAMP_FORMAT));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::irc::message::parse;
    use chrono::TimeZone;

    const TS: &str = "2024-01-02 03:04:05";

    fn state() -> SessionState {
        SessionState::new(None, DEFAULT_TIMESTAMP_FORMAT.to_string())
    }

    #[test]
    fn test_ping_is_answered_silently() {
        let actions = handle_server_message(&parse("PING :irc.example.net"), TS);
        assert_eq!(
            actions,
            vec![Action::Send(Outbound::Pong("irc.example.net".into()))]
        );
    }

    #[test]
    fn test_ping_without_param_is_displayed() {
        let actions = handle_server_message(&parse("PING"), TS);
        assert_eq!(
            actions,
            vec![Action::Display(format!("[{}] SERVER PING []", TS))]
        );
    }

    #[test]
    fn test_privmsg_shows_body_with_prefix() {
        let msg = parse(":nick!user@host PRIVMSG #chan :hello world");
        assert_eq!(
            handle_server_message(&msg, TS),
            vec![Action::Display(format!("[{}] nick!user@host hello world", TS))]
        );
    }

    #[test]
    fn test_notice_without_prefix_uses_server_label() {
        let msg = parse("NOTICE * :*** Looking up your hostname");
        assert_eq!(
            handle_server_message(&msg, TS),
            vec![Action::Display(format!("[{}] SERVER *** Looking up your hostname", TS))]
        );
    }

    #[test]
    fn test_other_commands_show_params() {
        let msg = parse(":irc.example.net 001 alice :Welcome alice");
        assert_eq!(
            handle_server_message(&msg, TS),
            vec![Action::Display(format!(
                "[{}] irc.example.net 001 [alice Welcome alice]",
                TS
            ))]
        );

        let short = parse(":bob PRIVMSG #chan");
        assert_eq!(
            handle_server_message(&short, TS),
            vec![Action::Display(format!("[{}] bob PRIVMSG [#chan]", TS))]
        );
    }

    #[test]
    fn test_degenerate_line_is_skipped() {
        assert!(handle_server_message(&parse(":onlyprefix"), TS).is_empty());
        assert!(handle_server_message(&parse(""), TS).is_empty());
    }

    #[test]
    fn test_join_part_and_plain_lines() {
        let mut state = state();
        assert!(handle_user_line(&mut state, "hello").is_empty());

        assert_eq!(
            handle_user_line(&mut state, "/join #test"),
            vec![Action::Send(Outbound::Join("#test".into()))]
        );
        assert_eq!(state.current_target.as_deref(), Some("#test"));

        assert_eq!(
            handle_user_line(&mut state, "hi all"),
            vec![Action::Send(Outbound::Privmsg {
                target: "#test".into(),
                text: "hi all".into()
            })]
        );

        assert_eq!(
            handle_user_line(&mut state, "/part"),
            vec![Action::Send(Outbound::Part("#test".into()))]
        );
        assert_eq!(state.current_target, None);
        assert!(handle_user_line(&mut state, "anyone?").is_empty());
        assert!(handle_user_line(&mut state, "/part").is_empty());
    }

    #[test]
    fn test_plain_line_is_sanitized() {
        let mut state = state();
        state.join("#test".into());
        let actions = handle_user_line(&mut state, "hi\r\nQUIT\0");
        let Action::Send(out) = &actions[0] else {
            panic!("expected a send, got {:?}", actions);
        };
        let wire = out.to_wire();
        assert_eq!(wire, "PRIVMSG #test :hiQUIT\r\n");
        assert!(!wire.trim_end_matches("\r\n").contains(['\r', '\n', '\0']));

        assert!(handle_user_line(&mut state, "\r\n").is_empty());
    }

    #[test]
    fn test_nick_msg_and_unknown() {
        let mut state = state();
        assert_eq!(
            handle_user_line(&mut state, "/NICK carol"),
            vec![Action::Send(Outbound::Nick("carol".into()))]
        );
        assert_eq!(
            handle_user_line(&mut state, "/msg bob are you there"),
            vec![Action::Send(Outbound::Privmsg {
                target: "bob".into(),
                text: "are you there".into()
            })]
        );
        assert!(handle_user_line(&mut state, "/whois bob").is_empty());
    }

    #[test]
    fn test_quit_uses_configured_message_as_fallback() {
        let mut state = SessionState::new(Some("bye".into()), DEFAULT_TIMESTAMP_FORMAT.into());
        assert_eq!(
            handle_user_line(&mut state, "/quit"),
            vec![Action::Send(Outbound::Quit(Some("bye".into()))), Action::Quit]
        );
        assert_eq!(
            handle_user_line(&mut state, "/quit gone fishing"),
            vec![
                Action::Send(Outbound::Quit(Some("gone fishing".into()))),
                Action::Quit
            ]
        );
    }

    #[test]
    fn test_help_writes_nothing() {
        let mut state = state();
        let actions = handle_user_line(&mut state, "/help");
        assert_eq!(actions.len(), HELP_LINES.len());
        assert!(actions.iter().all(|a| matches!(a, Action::Display(_))));
    }

    #[test]
    fn test_timestamp_format_and_fallback() {
        let now = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(timestamp(now, DEFAULT_TIMESTAMP_FORMAT), TS);
        assert_eq!(timestamp(now, "%H:%M"), "03:04");
        assert_eq!(timestamp(now, "%Q"), TS);
    }
}
