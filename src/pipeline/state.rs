//! Shared session state readable by external collaborators.
//!
//! [`SessionState`] is the snapshot the UI/API layers read after each
//! frame: the last confirmed event, the composed text, the active mode and
//! a frame counter.  It is held behind [`SharedState`]
//! (`Arc<Mutex<SessionState>>`) — cheap to clone and safe to share.
//!
//! Only the pipeline worker mutates it; everyone else reads immutable
//! copies of the values inside a short lock.

use std::sync::{Arc, Mutex};

use crate::config::PipelineMode;

use super::core::ConfirmedEvent;

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Snapshot of the translation session.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Active interpretation mode.
    pub mode: PipelineMode,

    /// The most recent confirmed event.
    ///
    /// `None` until the first confirmation.
    pub last_event: Option<ConfirmedEvent>,

    /// Text composed from all confirmed events so far.
    pub composed_text: String,

    /// Frames processed since the worker started.
    pub frames_processed: u64,
}

impl SessionState {
    pub fn new(mode: PipelineMode) -> Self {
        Self {
            mode,
            last_event: None,
            composed_text: String::new(),
            frames_processed: 0,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(PipelineMode::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`SessionState`].
///
/// Lock with `.lock().unwrap()` for a short critical section; do **not**
/// hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<SessionState>>;

/// Construct a new [`SharedState`] for `mode`.
pub fn new_shared_state(mode: PipelineMode) -> SharedState {
    Arc::new(Mutex::new(SessionState::new(mode)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
