//! Pipeline worker — drives the frame → event loop on a dedicated task.
//!
//! [`PipelineWorker`] owns the [`Pipeline`] and the [`TextComposer`] and
//! responds to [`WorkerCommand`]s received over a `tokio::sync::mpsc`
//! channel:
//!
//! ```text
//! WorkerCommand::Frame(frame)
//!   └─▶ Pipeline::process → (maybe) ConfirmedEvent
//!         ├─▶ TextComposer::apply
//!         ├─▶ SharedState update
//!         └─▶ event channel → UI / API collaborators
//!
//! WorkerCommand::SetMode(mode)  → Pipeline::set_mode (atomic reset)
//! WorkerCommand::Reset          → full pipeline + composer reset
//! ```
//!
//! Frames arrive one at a time and are processed in arrival order — the
//! quality smoothing and the stabilizer windows are order-sensitive.  The
//! per-frame work never blocks; the only suspension point is waiting for
//! the next command.  A cooperative stop flag is checked once per command
//! so the loop can be cancelled from outside without special teardown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::compose::TextComposer;
use crate::config::{AppConfig, PipelineMode};
use crate::landmark::MultiHandFrame;

use super::core::{ConfirmedEvent, Pipeline};
use super::state::SharedState;

// ---------------------------------------------------------------------------
// WorkerCommand
// ---------------------------------------------------------------------------

/// Commands accepted by the pipeline worker.
#[derive(Debug, Clone)]
pub enum WorkerCommand {
    /// One camera tick's worth of hands.
    Frame(MultiHandFrame),
    /// Switch letters ↔ syllables.
    SetMode(PipelineMode),
    /// Reset all pipeline state and the composed text.
    Reset,
}

// ---------------------------------------------------------------------------
// PipelineWorker
// ---------------------------------------------------------------------------

/// Owns the pipeline's mutable state and runs the command loop.
///
/// Create with [`PipelineWorker::new`], then spawn [`run`](Self::run) as a
/// tokio task.  The pipeline internals are owned exclusively by this loop;
/// collaborators interact only through the command channel, the event
/// channel and the read-only [`SharedState`].
pub struct PipelineWorker {
    pipeline: Pipeline,
    composer: TextComposer,
    state: SharedState,
    stop: Arc<AtomicBool>,
}

impl PipelineWorker {
    pub fn new(config: &AppConfig, state: SharedState) -> Self {
        state.lock().unwrap().mode = config.mode;
        Self {
            pipeline: Pipeline::new(config),
            composer: TextComposer::new(),
            state,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Cooperative stop flag; set it to `true` to end the loop at the next
    /// frame boundary.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Run until the command channel closes or the stop flag is raised.
    ///
    /// Spawn as a tokio task; it never returns while the channel is open.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<WorkerCommand>,
        events: mpsc::Sender<ConfirmedEvent>,
    ) {
        while let Some(command) = commands.recv().await {
            if self.stop.load(Ordering::Relaxed) {
                log::info!("pipeline: stop flag raised, worker shutting down");
                return;
            }

            match command {
                WorkerCommand::Frame(frame) => {
                    let event = self.pipeline.process(frame);

                    if let Some(event) = &event {
                        self.composer.apply(&event.label);
                    }

                    {
                        let mut st = self.state.lock().unwrap();
                        st.frames_processed = self.pipeline.frames_processed();
                        if let Some(event) = &event {
                            st.last_event = Some(event.clone());
                            st.composed_text = self.composer.text().to_string();
                        }
                    }

                    if let Some(event) = event {
                        // Receiver gone is not fatal; the pipeline keeps
                        // classifying for the shared-state readers.
                        let _ = events.send(event).await;
                    }
                }

                WorkerCommand::SetMode(mode) => {
                    self.pipeline.set_mode(mode);
                    self.state.lock().unwrap().mode = mode;
                }

                WorkerCommand::Reset => {
                    log::debug!("pipeline: explicit reset");
                    self.pipeline.reset();
                    self.composer.clear();
                    let mut st = self.state.lock().unwrap();
                    st.composed_text.clear();
                    st.last_event = None;
                }
            }
        }

        log::info!("pipeline: command channel closed, worker shutting down");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{ControlCommand, Label};
    use crate::landmark::{fixtures, HandSide};
    use crate::pipeline::state::new_shared_state;

    fn a_frame() -> WorkerCommand {
        WorkerCommand::Frame(fixtures::frame_one(
            HandSide::Left,
            fixtures::fist_a(),
            0.95,
        ))
    }

    fn fists_frame() -> WorkerCommand {
        WorkerCommand::Frame(fixtures::frame_two(
            fixtures::fist_a(),
            0.95,
            fixtures::fist_a(),
            0.95,
        ))
    }

    async fn run_worker(
        config: AppConfig,
        commands: Vec<WorkerCommand>,
    ) -> (SharedState, Vec<ConfirmedEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let (event_tx, mut event_rx) = mpsc::channel(64);

        let state = new_shared_state(config.mode);
        let worker = PipelineWorker::new(&config, Arc::clone(&state));

        for cmd in commands {
            cmd_tx.send(cmd).await.unwrap();
        }
        drop(cmd_tx); // close the channel so run() returns

        worker.run(cmd_rx, event_tx).await;

        let mut events = Vec::new();
        while let Ok(ev) = event_rx.try_recv() {
            events.push(ev);
        }
        (state, events)
    }

    /// Five clean A-frames confirm one letter and compose it.
    #[tokio::test]
    async fn letter_flows_through_to_text() {
        let config = AppConfig::default();
        let window = config.letters.stability.window;

        let commands = std::iter::repeat_with(a_frame).take(window).collect();
        let (state, events) = run_worker(config, commands).await;

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].label, Label::Letter('A'));

        let st = state.lock().unwrap();
        assert_eq!(st.composed_text, "A");
        assert_eq!(st.frames_processed, window as u64);
        assert_eq!(
            st.last_event.as_ref().map(|e| &e.label),
            Some(&Label::Letter('A'))
        );
    }

    /// A confirmed Clear control wipes previously composed text.
    #[tokio::test]
    async fn clear_gesture_wipes_composed_text() {
        let config = AppConfig::default();
        let letters = config.letters.stability.window;
        let controls = config.controls.window;

        let mut commands: Vec<WorkerCommand> =
            std::iter::repeat_with(a_frame).take(letters).collect();
        commands.extend(std::iter::repeat_with(fists_frame).take(controls));

        let (state, events) = run_worker(config, commands).await;

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].label, Label::Letter('A'));
        assert_eq!(events[1].label, Label::Control(ControlCommand::Clear));
        assert_eq!(state.lock().unwrap().composed_text, "");
    }

    /// Reset clears pipeline state and the composed text.
    #[tokio::test]
    async fn reset_command_clears_session() {
        let config = AppConfig::default();
        let window = config.letters.stability.window;

        let mut commands: Vec<WorkerCommand> =
            std::iter::repeat_with(a_frame).take(window).collect();
        commands.push(WorkerCommand::Reset);

        let (state, events) = run_worker(config, commands).await;

        assert_eq!(events.len(), 1, "the letter confirmed before the reset");
        let st = state.lock().unwrap();
        assert_eq!(st.composed_text, "");
        assert!(st.last_event.is_none());
    }

    /// SetMode switches the pipeline and is visible in shared state.
    #[tokio::test]
    async fn set_mode_updates_state() {
        let config = AppConfig::default();
        let commands = vec![WorkerCommand::SetMode(PipelineMode::Syllables)];

        let (state, events) = run_worker(config, commands).await;

        assert!(events.is_empty());
        assert_eq!(state.lock().unwrap().mode, PipelineMode::Syllables);
    }

    /// The stop flag ends the loop before the next command is processed.
    #[tokio::test]
    async fn stop_flag_halts_processing() {
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, _event_rx) = mpsc::channel(8);

        let config = AppConfig::default();
        let state = new_shared_state(config.mode);
        let worker = PipelineWorker::new(&config, Arc::clone(&state));

        worker.stop_handle().store(true, Ordering::Relaxed);
        cmd_tx.send(a_frame()).await.unwrap();
        drop(cmd_tx);

        worker.run(cmd_rx, event_tx).await;

        assert_eq!(state.lock().unwrap().frames_processed, 0);
    }

    /// A dropped event receiver does not stall the worker.
    #[tokio::test]
    async fn worker_survives_dropped_event_receiver() {
        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let (event_tx, event_rx) = mpsc::channel(1);
        drop(event_rx);

        let config = AppConfig::default();
        let window = config.letters.stability.window;
        let state = new_shared_state(config.mode);
        let worker = PipelineWorker::new(&config, Arc::clone(&state));

        for _ in 0..window {
            cmd_tx.send(a_frame()).await.unwrap();
        }
        drop(cmd_tx);

        worker.run(cmd_rx, event_tx).await;

        // The event was lost but the state still reflects it.
        assert_eq!(state.lock().unwrap().composed_text, "A");
    }
}
