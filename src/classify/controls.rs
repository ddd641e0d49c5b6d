//! Control-gesture classification — Delete / Space / Clear.
//!
//! Highest-priority member of the classifier battery.  Clear and Space are
//! two-hand AND combinations (both fists, both open palms) so they cannot
//! fire from a single stray hand; Delete is a one-hand thumb-index pinch.
//!
//! The pinch deliberately requires a half-bent index meeting the thumb:
//! a fully curled index (any plain fist, letters A/S) and a straight one
//! (pointing, letter D) both fall outside the angle window, which keeps the
//! high-priority Delete from swallowing common letter shapes.

use serde::{Deserialize, Serialize};

use crate::landmark::FeatureRecord;

use super::label::{ControlCommand, Label};

// ---------------------------------------------------------------------------
// ControlThresholds
// ---------------------------------------------------------------------------

/// Cutoffs for the control gestures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlThresholds {
    /// Maximum thumb–index tip distance closing a pinch.
    pub pinch_dist_max: f32,
    /// Index PIP angle window for a pinching index (degrees).
    pub pinch_angle_min: f32,
    pub pinch_angle_max: f32,
}

impl Default for ControlThresholds {
    fn default() -> Self {
        Self {
            pinch_dist_max: 0.06,
            pinch_angle_min: 100.0,
            pinch_angle_max: 170.0,
        }
    }
}

// ---------------------------------------------------------------------------
// ControlClassifier
// ---------------------------------------------------------------------------

/// Pure per-frame control classifier over both hands' features.
#[derive(Debug, Clone)]
pub struct ControlClassifier {
    thresholds: ControlThresholds,
}

impl ControlClassifier {
    pub fn new(thresholds: ControlThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify a frame's hands; Clear and Space require both hands,
    /// Delete needs only one (the right hand is checked first).
    pub fn classify(
        &self,
        left: Option<&FeatureRecord>,
        right: Option<&FeatureRecord>,
    ) -> Option<Label> {
        if let (Some(l), Some(r)) = (left, right) {
            if is_fist(l) && is_fist(r) {
                return Some(Label::Control(ControlCommand::Clear));
            }
            if is_open_palm(l) && is_open_palm(r) {
                return Some(Label::Control(ControlCommand::Space));
            }
        }

        for rec in [right, left].into_iter().flatten() {
            if self.is_pinch(rec) {
                return Some(Label::Control(ControlCommand::Delete));
            }
        }

        None
    }

    fn is_pinch(&self, rec: &FeatureRecord) -> bool {
        let t = &self.thresholds;
        rec.thumb_index_dist < t.pinch_dist_max
            && !rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
            && rec.index_angle > t.pinch_angle_min
            && rec.index_angle < t.pinch_angle_max
    }
}

impl Default for ControlClassifier {
    fn default() -> Self {
        Self::new(ControlThresholds::default())
    }
}

/// Every digit curled.
fn is_fist(rec: &FeatureRecord) -> bool {
    rec.extended_count == 0
}

/// All four fingers extended with the thumb visibly out or up.
fn is_open_palm(rec: &FeatureRecord) -> bool {
    rec.index_extended
        && rec.middle_extended
        && rec.ring_extended
        && rec.pinky_extended
        && (rec.thumb_extended || rec.thumb_up)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
