//! Event producers: server reader, standard-input reader, interrupt watcher.
//!
//! Each producer pushes into its own unbounded queue. Only the dispatcher
//! consumes them, and none of the producers ever writes to the connection.

use crate::app::event::{InputEvent, ServerEvent};
use crate::irc::message::parse;
use std::io::BufRead;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// The three queues the dispatcher waits on.
pub struct EventSources {
    pub server: mpsc::UnboundedReceiver<ServerEvent>,
    pub input: mpsc::UnboundedReceiver<InputEvent>,
    pub interrupt: mpsc::UnboundedReceiver<()>,
}

/// Longest server line kept, newline included. Longer lines are dropped.
pub const MAX_LINE_BYTES: u64 = 64 * 1024;

/// Read `\n`-terminated lines from the server, parse each one, and push the
/// result. Sends a single `Closed` event on end of stream or read failure.
pub fn spawn_server_reader<R>(
    reader: R,
    tx: mpsc::UnboundedSender<ServerEvent>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        let mut skipping = false;
        let error = loop {
            buf.clear();
            match (&mut reader).take(MAX_LINE_BYTES).read_until(b'\n', &mut buf).await {
                Ok(0) => break None,
                Ok(_) => {
                    let complete = buf.ends_with(b"\n");
                    let overlong = !complete && buf.len() as u64 >= MAX_LINE_BYTES;
                    if skipping || overlong {
                        if overlong && !skipping {
                            tracing::warn!(
                                "dropping server line longer than {} bytes",
                                MAX_LINE_BYTES
                            );
                        }
                        skipping = !complete;
                        continue;
                    }
                    let line = String::from_utf8_lossy(&buf);
                    if tx.send(ServerEvent::Message(parse(&line))).is_err() {
                        return;
                    }
                }
                Err(e) => break Some(e.to_string()),
            }
        };
        let _ = tx.send(ServerEvent::Closed { error });
    })
}

/// Read lines from a blocking reader (stdin in production) on a dedicated
/// thread.
///
/// The thread is never joined; it ends with the process if it is still
/// blocked in a read.
pub fn spawn_input_reader<R>(
    mut reader: R,
    tx: mpsc::UnboundedSender<InputEvent>,
) -> std::io::Result<()>
where
    R: BufRead + Send + 'static,
{
    std::thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            let mut buf = Vec::new();
            let error = loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break None,
                    Ok(_) => {
                        let line = String::from_utf8_lossy(&buf);
                        let line = line.trim_end_matches(['\r', '\n']).to_string();
                        if tx.send(InputEvent::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(e) => break Some(e.to_string()),
                }
            };
            let _ = tx.send(InputEvent::Closed { error });
        })?;
    Ok(())
}

/// Push one value when Ctrl-C is received. If the handler cannot be
/// installed the sender is dropped without sending.
pub fn spawn_interrupt_watcher(tx: mpsc::UnboundedSender<()>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = tx.send(());
            }
            Err(e) => tracing::warn!("could not listen for interrupts: {}", e),
        }
    })
}
