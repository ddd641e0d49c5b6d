//! Temporal stabilization — majority vote over a rolling window + cooldown.
//!
//! A single rule-based classification is extremely noisy frame to frame
//! (hand jitter, lighting).  [`Stabilizer`] converts the raw per-frame
//! label stream of one classifier into a clean discrete event stream:
//!
//! ```text
//! Idle ──samples──▶ Accumulating ──majority reached──▶ Confirmed (emit)
//!                        ▲                                   │
//!                        └────────── Cooldown ◀──────────────┘
//! ```
//!
//! * Every frame one raw sample (possibly `None`) is pushed into a bounded
//!   ring buffer of the last `window` samples.
//! * Once the buffer is full and a configurable majority of it agrees on
//!   one non-`None` label **different from the last confirmed label**, the
//!   label is emitted, the buffer cleared, and the stream enters cooldown.
//! * During cooldown no evaluation occurs; the counter just decrements.
//!
//! Holding one pose therefore fires exactly once.  Deliberately signing the
//! same symbol twice requires an intervening different pose (or an
//! out-of-band manual trigger at the UI layer) — that is a policy choice,
//! not an accident; do not re-interpret it.
//!
//! `None` samples occupy window slots, so they dilute a run toward not
//! confirming but can never confirm anything themselves.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::classify::Label;

// ---------------------------------------------------------------------------
// StabilizerConfig
// ---------------------------------------------------------------------------

/// Per-stream stabilization tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilizerConfig {
    /// Ring-buffer length in frames (3–15 depending on the stream).
    pub window: usize,
    /// Fraction of the window that must agree (0.5–0.7 typical).
    pub majority: f32,
    /// Frames of enforced quiet after each confirmation.
    pub cooldown: u32,
}

impl StabilizerConfig {
    /// Number of agreeing samples required to confirm.
    fn needed(&self) -> usize {
        ((self.window as f32) * self.majority).ceil() as usize
    }
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            window: 5,
            majority: 0.6,
            cooldown: 15,
        }
    }
}

// ---------------------------------------------------------------------------
// StabilizerPhase
// ---------------------------------------------------------------------------

/// Observable phase of a stabilizer stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilizerPhase {
    /// Empty window, waiting for samples.
    Idle,
    /// Collecting samples toward a majority.
    Accumulating,
    /// Quiet period after a confirmation.
    Cooldown,
}

// ---------------------------------------------------------------------------
// Stabilizer
// ---------------------------------------------------------------------------

/// Majority-vote + cooldown state machine for one classifier stream.
///
/// Owned exclusively by the pipeline; never shared across streams.
///
/// # Example
///
/// ```rust
/// use sign_to_text::classify::Label;
/// use sign_to_text::stabilize::{Stabilizer, StabilizerConfig};
///
/// let mut st = Stabilizer::new(StabilizerConfig {
///     window: 3,
///     majority: 0.6,
///     cooldown: 5,
/// });
///
/// assert_eq!(st.push(Some(Label::Letter('A'))), None);
/// assert_eq!(st.push(Some(Label::Letter('A'))), None);
/// // The third agreeing sample fills the window and confirms.
/// assert_eq!(st.push(Some(Label::Letter('A'))), Some(Label::Letter('A')));
/// ```
#[derive(Debug, Clone)]
pub struct Stabilizer {
    config: StabilizerConfig,
    window: VecDeque<Option<Label>>,
    last_confirmed: Option<Label>,
    cooldown: u32,
}

impl Stabilizer {
    pub fn new(config: StabilizerConfig) -> Self {
        let window = VecDeque::with_capacity(config.window.max(1));
        Self {
            config,
            window,
            last_confirmed: None,
            cooldown: 0,
        }
    }

    /// Push one raw per-frame sample and return the confirmed label, if the
    /// majority condition was reached this frame.
    pub fn push(&mut self, raw: Option<Label>) -> Option<Label> {
        if self.cooldown > 0 {
            // No evaluation during cooldown; the sample is dropped.
            self.cooldown -= 1;
            return None;
        }

        self.window.push_back(raw);
        while self.window.len() > self.config.window.max(1) {
            self.window.pop_front();
        }
        if self.window.len() < self.config.window.max(1) {
            return None;
        }

        let winner = self.majority_label()?;
        if Some(&winner) == self.last_confirmed.as_ref() {
            // A held pose must not re-fire; see the module docs.
            return None;
        }

        self.last_confirmed = Some(winner.clone());
        self.window.clear();
        self.cooldown = self.config.cooldown;
        Some(winner)
    }

    /// The non-`None` label filling at least the majority of the window.
    fn majority_label(&self) -> Option<Label> {
        let needed = self.config.needed().clamp(1, self.config.window.max(1));

        let mut best: Option<(&Label, usize)> = None;
        for candidate in self.window.iter().flatten() {
            let count = self
                .window
                .iter()
                .flatten()
                .filter(|l| *l == candidate)
                .count();
            if best.map_or(true, |(_, n)| count > n) {
                best = Some((candidate, count));
            }
        }

        match best {
            Some((label, count)) if count >= needed => Some(label.clone()),
            _ => None,
        }
    }

    /// Current phase, for observability.
    pub fn phase(&self) -> StabilizerPhase {
        if self.cooldown > 0 {
            StabilizerPhase::Cooldown
        } else if self.window.is_empty() {
            StabilizerPhase::Idle
        } else {
            StabilizerPhase::Accumulating
        }
    }

    /// Last confirmed label, if any.
    pub fn last_confirmed(&self) -> Option<&Label> {
        self.last_confirmed.as_ref()
    }

    /// Full reset: window, cooldown and the repeat guard.
    ///
    /// Used on explicit user action (mode switch), never automatically.
    pub fn reset(&mut self) {
        self.window.clear();
        self.last_confirmed = None;
        self.cooldown = 0;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
