//! Record live input into a script.

use std::path::PathBuf;
use std::time::Duration;

use guirecord_common::clock::GapClock;
use guirecord_common::config::RecorderConfig;
use guirecord_input_tracker::backends::detect_best_backend;
use guirecord_input_tracker::writer::EventLogWriter;
use guirecord_input_tracker::Recorder;
use guirecord_script_engine::{ScriptWriter, Session};

pub async fn run(
    config: RecorderConfig,
    script: PathBuf,
    events: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Configuration problems are fatal before anything is opened
    let session = Session::new(&config)?;

    let started_at = GapClock::start().epoch_wall().to_string();
    let writer = ScriptWriter::create(&script, config.format, &started_at)?;

    tokio::time::sleep(Duration::from_secs(u64::from(config.wait_secs))).await;

    let backend = detect_best_backend(config.screen_width, config.screen_height)?;
    let mut recorder = Recorder::new(backend, session, writer);
    if let Some(path) = events {
        recorder = recorder.with_event_log(EventLogWriter::new(path, &started_at)?);
    }

    let stop_flag = recorder.stop_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop_flag.store(true, std::sync::atomic::Ordering::SeqCst);
        }
    });

    println!("Recording started, press {} to exit.", config.exit_key);

    let summary = recorder.run().await?;

    println!();
    println!("Recording finished.");
    println!("  Script: {}", script.display());
    println!("  Events: {}", summary.events);
    println!("  Statements: {}", summary.statements);

    Ok(())
}
