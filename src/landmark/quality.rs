//! Per-hand quality scoring, gating and temporal smoothing.
//!
//! [`QualityFilter`] is the one stateful, history-dependent stage before
//! classification.  For every detected hand it:
//!
//! | Step | Effect on score |
//! |------|-----------------|
//! | Detection floor | confidence below the floor → hand treated as absent |
//! | Bounds penalty | subtract a fixed penalty per landmark outside `[0,1]` |
//! | Anatomy factor | multiply by a factor penalising implausible finger lengths |
//! | Stability factor | multiply by a factor penalising large frame-to-frame jumps |
//!
//! and then smooths the landmarks against a short per-side history using an
//! exponentially decaying weighted average biased toward the current frame.
//! A hand whose final score falls below the configured cutoff is dropped
//! for the frame — downstream classifiers never see it, and nothing is
//! retried (the next frame is independent).
//!
//! The history buffers are owned per hand side, bounded, and cleared when
//! the side disappears so smoothing never bridges a detection gap.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::frame::{points, HandObservation, HandSide, Landmark, LandmarkSet, MultiHandFrame};

// ---------------------------------------------------------------------------
// QualityTuning
// ---------------------------------------------------------------------------

/// Mode-independent tuning knobs for the quality filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityTuning {
    /// Score subtracted per landmark outside the normalized image bounds.
    pub bounds_penalty: f32,
    /// Minimum plausible fingertip-to-base distance.
    pub finger_min_len: f32,
    /// Maximum plausible fingertip-to-base distance.
    pub finger_max_len: f32,
    /// Anatomy factor reduction per finger outside the plausible range.
    pub anatomy_penalty: f32,
    /// Number of history frames (including the current one) blended by the
    /// smoother.  Clamped to at least 1.
    pub smoothing_taps: usize,
    /// Weight ratio between consecutive history frames (newest = 1.0,
    /// previous = decay, then decay², …).
    pub smoothing_decay: f32,
    /// Mean per-landmark displacement considered ordinary hand motion.
    pub jitter_tolerance: f32,
    /// Lowest value the stability factor can reach for violent jumps.
    pub jitter_floor: f32,
}

impl Default for QualityTuning {
    fn default() -> Self {
        Self {
            bounds_penalty: 0.1,
            finger_min_len: 0.05,
            finger_max_len: 0.30,
            anatomy_penalty: 0.1,
            smoothing_taps: 4,
            smoothing_decay: 0.6,
            jitter_tolerance: 0.02,
            jitter_floor: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered output
// ---------------------------------------------------------------------------

/// One hand that survived gating: smoothed landmarks plus its quality score.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredHand {
    pub landmarks: LandmarkSet,
    /// Composite quality score in `[0, 1]`.
    pub score: f32,
}

/// Per-frame quality-filter output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredFrame {
    pub left: Option<FilteredHand>,
    pub right: Option<FilteredHand>,
}

impl FilteredFrame {
    pub fn hand(&self, side: HandSide) -> Option<&FilteredHand> {
        match side {
            HandSide::Left => self.left.as_ref(),
            HandSide::Right => self.right.as_ref(),
        }
    }
}

// ---------------------------------------------------------------------------
// QualityFilter
// ---------------------------------------------------------------------------

/// Stateful quality gate: scores, smooths and drops hands per frame.
///
/// Frames must be fed in arrival order — both the smoothing history and the
/// stability term are order-sensitive.
#[derive(Debug)]
pub struct QualityFilter {
    tuning: QualityTuning,
    /// Hard floor on the detector confidence.
    detection_floor: f32,
    /// Final-score cutoff below which the hand is dropped.
    cutoff: f32,
    /// Raw-landmark history, one bounded buffer per side (left, right).
    history: [VecDeque<LandmarkSet>; 2],
}

impl QualityFilter {
    pub fn new(tuning: QualityTuning, detection_floor: f32, cutoff: f32) -> Self {
        Self {
            tuning,
            detection_floor,
            cutoff,
            history: [VecDeque::new(), VecDeque::new()],
        }
    }

    /// Replace the per-mode gates (used on mode switches).
    pub fn set_gates(&mut self, detection_floor: f32, cutoff: f32) {
        self.detection_floor = detection_floor;
        self.cutoff = cutoff;
    }

    /// Drop all smoothing history (mode switch / explicit reset).
    pub fn reset(&mut self) {
        self.history[0].clear();
        self.history[1].clear();
    }

    #[cfg(test)]
    pub(crate) fn history_depth(&self, side: HandSide) -> usize {
        self.history[side_index(side)].len()
    }

    /// Score and smooth both hands of `frame`.
    pub fn filter(&mut self, frame: &MultiHandFrame) -> FilteredFrame {
        FilteredFrame {
            left: self.filter_hand(HandSide::Left, frame.hand(HandSide::Left)),
            right: self.filter_hand(HandSide::Right, frame.hand(HandSide::Right)),
        }
    }

    fn filter_hand(
        &mut self,
        side: HandSide,
        observation: Option<&HandObservation>,
    ) -> Option<FilteredHand> {
        let idx = side_index(side);

        let Some(obs) = observation else {
            // Smoothing must not bridge a detection gap.
            self.history[idx].clear();
            return None;
        };

        if obs.confidence < self.detection_floor {
            log::debug!(
                "{} hand below detection floor ({:.2} < {:.2})",
                side.label(),
                obs.confidence,
                self.detection_floor
            );
            self.history[idx].clear();
            return None;
        }

        let mut score = obs.confidence;
        score -= self.tuning.bounds_penalty * obs.landmarks.out_of_bounds_count() as f32;
        score *= self.anatomy_factor(&obs.landmarks);
        if let Some(previous) = self.history[idx].back() {
            score *= self.stability_factor(previous, &obs.landmarks);
        }
        let score = score.clamp(0.0, 1.0);

        let taps = self.tuning.smoothing_taps.max(1);
        let buf = &mut self.history[idx];
        buf.push_back(obs.landmarks.clone());
        while buf.len() > taps {
            buf.pop_front();
        }

        if score < self.cutoff {
            log::debug!(
                "{} hand dropped by quality cutoff ({score:.2} < {:.2})",
                side.label(),
                self.cutoff
            );
            return None;
        }

        let landmarks = smooth(buf, self.tuning.smoothing_decay);
        Some(FilteredHand { landmarks, score })
    }

    /// Multiplicative factor from finger-length sanity checks.
    fn anatomy_factor(&self, lm: &LandmarkSet) -> f32 {
        let mut violations = 0usize;
        for (&tip, &base) in points::TIPS.iter().zip(points::BASES.iter()) {
            let len = lm.point(tip).distance(&lm.point(base));
            if len < self.tuning.finger_min_len || len > self.tuning.finger_max_len {
                violations += 1;
            }
        }
        (1.0 - self.tuning.anatomy_penalty * violations as f32).max(0.0)
    }

    /// Multiplicative factor from frame-to-frame displacement.
    ///
    /// Motion within the jitter tolerance scores 1.0; beyond it the factor
    /// ramps linearly down, bottoming out at the configured floor.
    fn stability_factor(&self, previous: &LandmarkSet, current: &LandmarkSet) -> f32 {
        let tol = self.tuning.jitter_tolerance.max(1e-6);
        let mean_displacement = previous
            .iter()
            .zip(current.iter())
            .map(|(a, b)| a.distance(b))
            .sum::<f32>()
            / super::frame::LANDMARK_COUNT as f32;

        if mean_displacement <= tol {
            return 1.0;
        }
        let excess = (mean_displacement - tol) / (4.0 * tol);
        (1.0 - excess * (1.0 - self.tuning.jitter_floor)).clamp(self.tuning.jitter_floor, 1.0)
    }
}

fn side_index(side: HandSide) -> usize {
    match side {
        HandSide::Left => 0,
        HandSide::Right => 1,
    }
}

/// Exponentially weighted average over the history buffer, newest frame
/// weighted heaviest.
fn smooth(history: &VecDeque<LandmarkSet>, decay: f32) -> LandmarkSet {
    // Single-frame history: nothing to blend.
    if history.len() == 1 {
        return history[0].clone();
    }

    let mut weights = Vec::with_capacity(history.len());
    let mut w = 1.0_f32;
    for _ in 0..history.len() {
        weights.push(w);
        w *= decay.clamp(0.0, 1.0);
    }
    let total: f32 = weights.iter().sum();

    let mut accum = [[0.0_f32; 3]; super::frame::LANDMARK_COUNT];
    // History runs oldest→newest; weights run newest→oldest.
    for (set, weight) in history.iter().rev().zip(weights.iter()) {
        for (i, p) in set.iter().enumerate() {
            accum[i][0] += p.x * weight;
            accum[i][1] += p.y * weight;
            accum[i][2] += p.z * weight;
        }
    }

    let mut pts = [Landmark::default(); super::frame::LANDMARK_COUNT];
    for (i, [x, y, z]) in accum.iter().enumerate() {
        pts[i] = Landmark::new(x / total, y / total, z / total);
    }
    LandmarkSet::new(pts)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
