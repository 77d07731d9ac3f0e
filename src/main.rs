//! Roundabouts - terminal front-end
//!
//! Reads one command per line from stdin and prints board changes on stdout.
//! Logs go to stderr.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use roundabouts::{
    DelayedAnimator, EventPrinter, GameSession, PlayCommand, SessionConfig,
};
use roundabouts_rules::Board;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,roundabouts=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play {
            config,
            tick_ms,
            format,
        } => run_play(config, tick_ms, format).await,
        Command::Connectors => list_connectors(),
    }
}

/// Run an interactive two-player game
#[instrument(skip(config_path), fields(config = %config_path.display()))]
async fn run_play(
    config_path: PathBuf,
    tick_ms: Option<u64>,
    format: Option<roundabouts::EventFormat>,
) -> Result<()> {
    let mut config = SessionConfig::load_or_default(&config_path)?.with_env()?;
    if let Some(tick_ms) = tick_ms {
        config = config.with_tick_interval_ms(tick_ms);
    }
    if let Some(format) = format {
        config = config.with_event_format(format);
    }
    info!(
        tick_ms = config.tick_interval_ms(),
        format = %config.event_format(),
        "Starting game"
    );

    let session = GameSession::from_config(&config)?;
    session.set_ui_adapter(Arc::new(DelayedAnimator::new(config.animation_delay())));
    session.add_board_change_listener(EventPrinter::new(*config.event_format()));

    println!("{}", session.render());
    prompt(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<PlayCommand>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            PlayCommand::Move { source, target } => {
                if !session.notify_input(source, target) {
                    println!("Illegal move");
                }
            }
            PlayCommand::Loop { source } => match session.notify_loop_input(source) {
                Ok(true) => {
                    session.settled().await;
                    if let Some(e) = session.take_stepper_error() {
                        warn!(error = %e, "Long move ended with an error");
                        println!("{}", e);
                    }
                    println!("{}", session.render());
                }
                Ok(false) => println!("Illegal loop move"),
                Err(e) => println!("{}", e),
            },
            PlayCommand::Board => println!("{}", session.render()),
            PlayCommand::Turn => {}
            PlayCommand::Quit => break,
        }
        prompt(&session);
    }

    info!("Game over");
    Ok(())
}

fn prompt(session: &GameSession) {
    match session.active_player() {
        Some(player) => println!("{} to play", player),
        None => println!("No active player"),
    }
}

/// Print every loop with its two endpoints
fn list_connectors() -> Result<()> {
    let board = Board::filled();
    for connector in board.connectors() {
        println!("{}", connector);
    }
    Ok(())
}
