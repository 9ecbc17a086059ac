//! The event loop.
//!
//! [`Dispatcher`] is the only writer on the connection. It waits on the three
//! producer queues, turns each event into [`Action`]s via the handler, and
//! applies them in order. When the loop ends, for whatever reason, the write
//! half is shut down exactly once.

use crate::app::action::Action;
use crate::app::event::{InputEvent, ServerEvent};
use crate::app::handler;
use crate::app::sources::EventSources;
use crate::app::state::SessionState;
use crate::irc::message::{Outbound, ParsedMessage};
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Why the event loop stopped. Every variant is a graceful exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    Interrupted,
    ServerClosed { error: Option<String> },
    InputClosed { error: Option<String> },
}

/// Upper bound on shutting down the write half; a peer that stopped reading
/// must not keep the process alive.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

enum Flow {
    Continue,
    Stop,
}

/// One dequeued event awaiting handling.
enum Work {
    Server(ParsedMessage),
    Input(String),
}

pub struct Dispatcher<W, D> {
    writer: W,
    display: D,
    state: SessionState,
}

impl<W, D> Dispatcher<W, D>
where
    W: AsyncWrite + Unpin,
    D: AsyncWrite + Unpin,
{
    pub fn new(writer: W, display: D, state: SessionState) -> Self {
        Self {
            writer,
            display,
            state,
        }
    }

    /// Send NICK and USER for `nick`.
    pub async fn register(&mut self, nick: &str) {
        for msg in Outbound::registration(nick) {
            self.send(&msg).await;
        }
    }

    /// Run until quit, interrupt, or either stream ends, then close the
    /// connection.
    ///
    /// An interrupt is honored even while a write to the server is stalled.
    pub async fn run(mut self, mut sources: EventSources) -> ExitReason {
        let reason = loop {
            if sources.interrupt.try_recv().is_ok() {
                break ExitReason::Interrupted;
            }

            let work = tokio::select! {
                Some(()) = sources.interrupt.recv() => break ExitReason::Interrupted,
                event = sources.server.recv() => match event {
                    Some(ServerEvent::Message(msg)) => Work::Server(msg),
                    Some(ServerEvent::Closed { error }) => break ExitReason::ServerClosed { error },
                    None => break ExitReason::ServerClosed { error: None },
                },
                event = sources.input.recv() => match event {
                    Some(InputEvent::Line(line)) => Work::Input(line),
                    Some(InputEvent::Closed { error }) => break ExitReason::InputClosed { error },
                    None => break ExitReason::InputClosed { error: None },
                },
            };

            let flow = tokio::select! {
                flow = self.handle(work) => flow,
                Some(()) = sources.interrupt.recv() => break ExitReason::Interrupted,
            };
            if let Flow::Stop = flow {
                break ExitReason::Quit;
            }
        };

        match &reason {
            ExitReason::ServerClosed { error: Some(e) } => {
                tracing::warn!("server read failed: {}", e)
            }
            ExitReason::InputClosed { error: Some(e) } => {
                tracing::warn!("stdin read failed: {}", e)
            }
            _ => tracing::debug!(?reason, "event loop finished"),
        }

        self.close().await;
        reason
    }

    async fn handle(&mut self, work: Work) -> Flow {
        match work {
            Work::Server(msg) => self.on_server_message(&msg).await,
            Work::Input(line) => self.on_user_line(&line).await,
        }
    }

    async fn on_server_message(&mut self, msg: &ParsedMessage) -> Flow {
        let ts = handler::timestamp(chrono::Local::now(), &self.state.timestamp_format);
        let actions = handler::handle_server_message(msg, &ts);
        self.apply(actions).await
    }

    async fn on_user_line(&mut self, line: &str) -> Flow {
        let actions = handler::handle_user_line(&mut self.state, line);
        self.apply(actions).await
    }

    async fn apply(&mut self, actions: Vec<Action>) -> Flow {
        for action in actions {
            match action {
                Action::Send(msg) => {
                    if let Outbound::Pong(token) = &msg {
                        tracing::debug!("replied to PING with PONG :{}", token);
                    }
                    self.send(&msg).await;
                }
                Action::Display(line) => self.display(&line).await,
                Action::Quit => return Flow::Stop,
            }
        }
        Flow::Continue
    }

    /// Write and flush one command. Failures are reported and swallowed.
    async fn send(&mut self, msg: &Outbound) {
        let verb = verb_of(msg);
        if let Err(e) = self.writer.write_all(msg.to_wire().as_bytes()).await {
            tracing::error!("write {} failed: {}", verb, e);
        }
        if let Err(e) = self.writer.flush().await {
            tracing::error!("flush {} failed: {}", verb, e);
        }
    }

    async fn display(&mut self, line: &str) {
        let mut out = String::with_capacity(line.len() + 1);
        out.push_str(line);
        out.push('\n');
        if let Err(e) = self.display.write_all(out.as_bytes()).await {
            tracing::error!("display write failed: {}", e);
            return;
        }
        let _ = self.display.flush().await;
    }

    async fn close(mut self) {
        match tokio::time::timeout(CLOSE_TIMEOUT, self.writer.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!("connection shutdown: {}", e),
            Err(_) => tracing::warn!("connection shutdown timed out after {:?}", CLOSE_TIMEOUT),
        }
    }
}

fn verb_of(msg: &Outbound) -> &'static str {
    match msg {
        Outbound::Nick(_) => "NICK",
        Outbound::User { .. } => "USER",
        Outbound::Join(_) => "JOIN",
        Outbound::Part(_) => "PART",
        Outbound::Privmsg { .. } => "PRIVMSG",
        Outbound::Pong(_) => "PONG",
        Outbound::Quit(_) => "QUIT",
    }
}
