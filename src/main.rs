mod app;
mod config;
mod irc;
mod logging;
mod ui;

use crate::app::dispatcher::{Dispatcher, ExitReason};
use crate::app::sources::{self, EventSources};
use crate::app::state::SessionState;
use crate::config::{prompt, Cli, Settings, DEFAULT_SERVER};
use crate::irc::connection;
use crate::ui::banner;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::BufReader;
use std::process::ExitCode;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(reason) => {
            if reason == ExitReason::Interrupted {
                eprintln!("\nReceived interrupt, shutting down...");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitReason> {
    let file = config::load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, file);
    logging::init(settings.verbose);

    // The one generator for everything random in this process.
    let mut rng = rand::rng();
    let width = banner::terminal_width();
    print!("{}", banner::render(&mut rng, "Welcome to Kawaii IRC! (◕‿◕✿)", width));

    let nick = match (&settings.nickname, settings.nickname_from_cli) {
        (Some(nick), true) => nick.clone(),
        _ => prompt::ask_stdin("Nickname", &settings.default_nickname(&mut rng))
            .context("failed to read nickname")?,
    };
    let host = match &settings.host {
        Some(host) => host.clone(),
        None => prompt::ask_stdin("Server", DEFAULT_SERVER).context("failed to read server")?,
    };

    let transport = settings.transport(host);
    tracing::debug!(
        address = %transport.address(),
        %nick,
        tls = transport.tls,
        "connecting"
    );
    let conn = connection::connect(&transport)
        .await
        .context("connection error")?;

    if settings.verbose {
        tracing::info!("connected");
    } else {
        let text = banner::render(&mut rng, "Connected to server! (ﾉ◕ヮ◕)ﾉ*:･ﾟ✧", width);
        print!("{}", text);
    }

    let (reader, writer) = tokio::io::split(conn);

    let (server_tx, server) = mpsc::unbounded_channel();
    let (input_tx, input) = mpsc::unbounded_channel();
    let (interrupt_tx, interrupt) = mpsc::unbounded_channel();

    sources::spawn_server_reader(reader, server_tx);
    sources::spawn_input_reader(BufReader::new(std::io::stdin()), input_tx)
        .context("failed to start stdin reader")?;
    sources::spawn_interrupt_watcher(interrupt_tx);

    let state = SessionState::new(
        settings.quit_message.clone(),
        settings.timestamp_format.clone(),
    );
    let mut dispatcher = Dispatcher::new(writer, tokio::io::stdout(), state);
    dispatcher.register(&nick).await;

    let reason = dispatcher
        .run(EventSources {
            server,
            input,
            interrupt,
        })
        .await;
    Ok(reason)
}
