//! Headless session driver.
//!
//! Composition root that wires configuration, logging, the item catalog, and
//! the runtime, then reads player commands from stdin and writes every
//! session event to stdout as one JSON line.
//!
//! Commands:
//! - `start` - start (or retry) the current round
//! - `match <item-id> <label>` - drop a picture on a label
//! - `difficulty <easy|medium|hard>` - switch tier and start over
//! - `restart` - start over after a lost round
//! - `status` - print the session snapshot
//! - `quit`

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use match_bootstrap::{Bootstrap, BootstrapConfig, setup_logging};
use match_core::{DifficultyTier, ItemId};
use match_runtime::{Event, SessionHandle, Topic};

#[tokio::main]
async fn main() -> Result<()> {
    let config = BootstrapConfig::from_env();
    let _log_guard = setup_logging(config.log_dir.as_deref())?;

    let setup = Bootstrap::new(config).build().await?;
    let handle = setup.handle();

    let printer = tokio::spawn(print_events(handle.clone()));

    if let Err(error) = handle.start_round().await {
        tracing::warn!("First round failed to start: {error}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }
        if let Err(error) = run_command(&handle, line).await {
            eprintln!("{error:#}");
        }
    }

    printer.abort();
    drop(handle);
    setup.runtime.shutdown().await?;
    Ok(())
}

async fn run_command(handle: &SessionHandle, line: &str) -> Result<()> {
    let mut parts = line.splitn(3, ' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("start"), None, None) => {
            handle.start_round().await?;
        }
        (Some("match"), Some(id), Some(label)) => {
            let id: u32 = id.parse().with_context(|| format!("invalid item id `{id}`"))?;
            let outcome = handle.attempt_match(ItemId(id), label).await?;
            tracing::debug!("Match outcome: {outcome:?}");
        }
        (Some("difficulty"), Some(selector), None) => {
            handle
                .change_difficulty(DifficultyTier::from_selector(selector))
                .await?;
        }
        (Some("restart"), None, None) => {
            handle.restart().await?;
        }
        (Some("status"), None, None) => {
            let snapshot = handle.snapshot().await?;
            println!("{}", serde_json::to_string(&snapshot)?);
        }
        _ => anyhow::bail!("unknown command `{line}`"),
    }
    Ok(())
}

async fn print_events(handle: SessionHandle) {
    let mut receivers = handle.subscribe_multiple(&[Topic::Board, Topic::Hud, Topic::Outcome]);
    let (Some(mut board), Some(mut hud), Some(mut outcome)) = (
        receivers.remove(&Topic::Board),
        receivers.remove(&Topic::Hud),
        receivers.remove(&Topic::Outcome),
    ) else {
        return;
    };
    drop(handle);

    loop {
        let received = tokio::select! {
            event = board.recv() => event,
            event = hud.recv() => event,
            event = outcome.recv() => event,
        };
        match received {
            Ok(event) => print_event(&event),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Event printer lagged, skipped {skipped} events");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn print_event(event: &Event) {
    match serde_json::to_string(event) {
        Ok(json) => println!("{json}"),
        Err(error) => tracing::warn!("Failed to encode event: {error}"),
    }
}
