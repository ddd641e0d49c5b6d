//! Pipeline orchestration for Sign-to-Text.
//!
//! This module wires the full frame → quality filter → classifier battery →
//! stabilizer pipeline and exposes the worker loop plus the shared state
//! that external collaborators read.
//!
//! # Architecture
//!
//! ```text
//! WorkerCommand (mpsc)
//!        │
//!        ▼
//! PipelineWorker::run()  ← async tokio task
//!        │
//!        └─ Frame(frame)
//!              │
//!              ├─ QualityFilter      (gate + smooth per hand)
//!              ├─ FeatureExtractor   (FeatureRecord per hand)
//!              ├─ classifier battery (priority order, first producer wins)
//!              ├─ Stabilizers        (majority window + cooldown per stream)
//!              └─ ConfirmedEvent ──▶ event channel + TextComposer
//!
//! SharedState (Arc<Mutex<SessionState>>) ←── read by UI / API collaborators
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use tokio::sync::mpsc;
//! use sign_to_text::config::AppConfig;
//! use sign_to_text::pipeline::{new_shared_state, PipelineWorker, WorkerCommand};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let state = new_shared_state(config.mode);
//!
//!     let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>(64);
//!     let (event_tx, event_rx) = mpsc::channel(64);
//!
//!     let worker = PipelineWorker::new(&config, state.clone());
//!     tokio::spawn(worker.run(cmd_rx, event_tx));
//!
//!     // cmd_tx receives frames from the pose-engine collaborator;
//!     // event_rx delivers confirmed events to the UI/API.
//!     # drop((cmd_tx, event_rx));
//! }
//! ```

pub mod core;
pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use self::core::{ConfirmedEvent, Pipeline};
pub use runner::{PipelineWorker, WorkerCommand};
pub use state::{new_shared_state, SessionState, SharedState};
