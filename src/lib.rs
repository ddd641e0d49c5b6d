//! Sign-to-Text — real-time sign-language gesture classification.
//!
//! Turns a live stream of per-frame hand-landmark observations (21 3-D
//! points per hand, produced by an external pose-estimation engine) into
//! stable, debounced symbolic events: alphabet letters, two-hand
//! syllables, whole-word gestures and discrete control commands.
//!
//! # Pipeline
//!
//! ```text
//! MultiHandFrame (per camera tick)
//!     │
//!     ├─ landmark::QualityFilter     gate on confidence + plausibility,
//!     │                              smooth against recent history
//!     ├─ landmark::FeatureExtractor  geometric FeatureRecord per hand
//!     ├─ classify::*                 priority battery: controls → words →
//!     │                              letters | syllables
//!     ├─ stabilize::Stabilizer       majority window + cooldown per stream
//!     └─ pipeline::ConfirmedEvent    at most one per frame
//! ```
//!
//! The pipeline is synchronous and single-threaded; [`pipeline::PipelineWorker`]
//! drives it from a command channel on a dedicated tokio task, and the
//! UI/API collaborators consume [`pipeline::ConfirmedEvent`]s and the
//! read-only [`pipeline::SharedState`].  Camera acquisition, pose
//! estimation, rendering and serving live outside this crate.

pub mod classify;
pub mod compose;
pub mod config;
pub mod landmark;
pub mod pipeline;
pub mod stabilize;

pub use classify::{ControlCommand, Label, StreamKind};
pub use config::{AppConfig, PipelineMode};
pub use landmark::{HandSide, LandmarkSet, MultiHandFrame, RawFrame};
pub use pipeline::{ConfirmedEvent, Pipeline, PipelineWorker, WorkerCommand};
