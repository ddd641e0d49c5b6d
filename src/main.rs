//! Application entry point — Sign-to-Text, headless front-end.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Create pipeline channels (`command`, `event`) and shared state.
//! 5. Spawn the pipeline worker.
//! 6. Spawn the event writer (confirmed events as JSON lines on stdout).
//! 7. Read frames from stdin until EOF, then print the composed text.
//!
//! # Wire format
//!
//! The pose-engine collaborator writes one JSON object per line:
//!
//! ```json
//! {"type":"frame","left":{"coords":[...63 floats...],"confidence":0.93}}
//! {"type":"set_mode","mode":"Syllables"}
//! {"type":"reset"}
//! ```
//!
//! Malformed lines are logged and skipped; malformed hands inside a frame
//! are treated as absent.  Confirmed events leave on stdout, one JSON
//! object per line.

use serde::Deserialize;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use sign_to_text::config::{AppConfig, PipelineMode};
use sign_to_text::landmark::{RawFrame, RawHand};
use sign_to_text::pipeline::{new_shared_state, PipelineWorker, WorkerCommand};

// ---------------------------------------------------------------------------
// Input wire format
// ---------------------------------------------------------------------------

/// One line of stdin input.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum InputLine {
    Frame {
        #[serde(default)]
        left: Option<RawHand>,
        #[serde(default)]
        right: Option<RawHand>,
    },
    SetMode {
        mode: PipelineMode,
    },
    Reset,
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sign-to-Text starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    log::info!("mode: {:?}", config.mode);

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Channels + shared state
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>(64);
    let (event_tx, mut event_rx) = mpsc::channel(64);
    let state = new_shared_state(config.mode);

    // 5. Pipeline worker
    let worker = PipelineWorker::new(&config, state.clone());
    let worker_handle = rt.spawn(worker.run(cmd_rx, event_tx));

    // 6. Event writer — confirmed events as JSON lines on stdout.
    rt.spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(e) => log::error!("failed to serialise event: {e}"),
            }
        }
    });

    // 7. Frame intake — JSON lines from stdin until EOF.
    rt.block_on(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let command = match serde_json::from_str::<InputLine>(&line) {
                Ok(InputLine::Frame { left, right }) => {
                    WorkerCommand::Frame(RawFrame { left, right }.into_frame())
                }
                Ok(InputLine::SetMode { mode }) => WorkerCommand::SetMode(mode),
                Ok(InputLine::Reset) => WorkerCommand::Reset,
                Err(e) => {
                    log::warn!("skipping malformed input line: {e}");
                    continue;
                }
            };

            if cmd_tx.send(command).await.is_err() {
                log::warn!("pipeline worker gone, stopping intake");
                break;
            }
        }

        anyhow::Ok(())
    })?;

    // The intake loop dropped cmd_tx; wait for the worker to drain.
    if let Err(e) = rt.block_on(worker_handle) {
        log::warn!("pipeline worker task failed: {e}");
    }

    let st = state.lock().unwrap();
    log::info!(
        "session finished: {} frames, composed text: {:?}",
        st.frames_processed,
        st.composed_text
    );

    Ok(())
}
