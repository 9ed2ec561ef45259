//! Translate a saved event log into a script.

use std::path::PathBuf;

use guirecord_common::config::RecorderConfig;
use guirecord_common::error::RecorderError;
use guirecord_event_model::parse_events;
use guirecord_input_tracker::backends::StubBackend;
use guirecord_input_tracker::{Recorder, StopReason};
use guirecord_script_engine::{ScriptWriter, Session};

pub async fn run(config: RecorderConfig, input: PathBuf, script: PathBuf) -> anyhow::Result<()> {
    let session = Session::new(&config)?;

    if !input.exists() {
        return Err(RecorderError::FileNotFound { path: input }.into());
    }
    let content = std::fs::read_to_string(&input)?;
    let events = parse_events(&content)?;
    tracing::info!(events = events.len(), input = %input.display(), "Loaded event log");

    let started_at = guirecord_common::clock::GapClock::start()
        .epoch_wall()
        .to_string();
    let writer = ScriptWriter::create(&script, config.format, &started_at)?;
    let mut recorder = Recorder::new(Box::new(StubBackend::new(events)), session, writer);
    let summary = recorder.run().await?;

    println!("Translated {} events into {}", summary.events, script.display());
    println!("  Statements: {}", summary.statements);
    if summary.reason == StopReason::ExitKey {
        println!("  Stopped at exit key {}", config.exit_key);
    }

    Ok(())
}
