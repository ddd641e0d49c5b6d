//! Geometric feature extraction — one [`FeatureRecord`] per hand per frame.
//!
//! [`FeatureExtractor::extract`] is a pure, total function over a
//! [`LandmarkSet`]: it never fails, and degenerate geometry (zero-length
//! joint vectors) yields defined neutral values instead of NaN.
//!
//! Conventions: normalized image space, `y` grows downward, so an extended
//! finger has `tip.y < pip.y - gap`.  The thumb extends sideways rather
//! than upward and is therefore compared on `x` with its own threshold.
//!
//! All thresholds live in [`FeatureConfig`] so they can be tuned without
//! touching classification logic.

use serde::{Deserialize, Serialize};

use super::frame::{points, Landmark, LandmarkSet};

// ---------------------------------------------------------------------------
// FeatureConfig
// ---------------------------------------------------------------------------

/// Tunable thresholds for feature extraction.
///
/// The defaults reproduce the calibration the rule cascade was written
/// against; changing them requires re-validating the letter cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Vertical gap a fingertip must clear past its PIP joint to count as
    /// extended.  Requiring a clear gap (not mere equality) avoids flag
    /// jitter at the border.
    pub extension_gap: f32,
    /// Horizontal displacement of the thumb tip from its IP joint required
    /// to count the thumb as extended.
    pub thumb_gap: f32,
    /// Vertical gap below the thumb MCP for the thumb-down flag.
    pub thumb_down_gap: f32,
    /// How far above the wrist the thumb tip must sit for the
    /// `thumb_above_wrist` flag (thumbs-up shapes).
    pub raised_clearance: f32,
    /// How far above its own MCP the index tip must sit for the
    /// `index_raised` flag (pointing shapes).
    pub strong_raise: f32,
    /// Maximum x-difference between index and middle tips for the
    /// `tips_aligned` flag.
    pub aligned_eps: f32,
    /// Horizontal gap left of the wrist for the `thumb_left_of_wrist` flag.
    pub lateral_gap: f32,
    /// Maximum adjacent-tip distance for `fingers_together`.
    pub together_dist: f32,
    /// Horizontal wrist-to-thumb-tip distance for `thumb_across_palm`.
    pub across_palm_dist: f32,
    /// Reference hand width used to normalize `hand_openness`.
    pub openness_reference: f32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            extension_gap: 0.03,
            thumb_gap: 0.04,
            thumb_down_gap: 0.05,
            raised_clearance: 0.10,
            strong_raise: 0.08,
            aligned_eps: 0.03,
            lateral_gap: 0.05,
            together_dist: 0.05,
            across_palm_dist: 0.10,
            openness_reference: 0.3,
        }
    }
}

// ---------------------------------------------------------------------------
// FeatureRecord
// ---------------------------------------------------------------------------

/// Derived, per-hand, per-frame geometric descriptors.
///
/// A pure function of its source [`LandmarkSet`]; no identity beyond the
/// frame that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRecord {
    // Extension flags.
    pub thumb_extended: bool,
    pub index_extended: bool,
    pub middle_extended: bool,
    pub ring_extended: bool,
    pub pinky_extended: bool,

    // Thumb orientation.
    /// Thumb tip clearly above its IP joint (vertical thumb).
    pub thumb_up: bool,
    /// Thumb tip clearly below its MCP joint.
    pub thumb_down: bool,
    /// Thumb tip well above the wrist.
    pub thumb_above_wrist: bool,
    /// Thumb tip above every finger PIP joint (raised clear of a fist).
    pub thumb_above_fingers: bool,
    /// Thumb tip left of the wrist by more than the lateral gap.
    pub thumb_left_of_wrist: bool,
    /// Thumb tip left of the index MCP (tucked beside or behind the palm).
    pub thumb_behind_fingers: bool,
    /// Thumb tip displaced horizontally across the palm from the wrist.
    pub thumb_across_palm: bool,

    // Index orientation.
    /// Index tip well above its own MCP.
    pub index_raised: bool,
    /// Index and middle tips horizontally aligned.
    pub tips_aligned: bool,

    // Bend angles at the middle joint of each finger, in degrees
    // (180° = straight, small = fully curled; 0° for degenerate geometry).
    pub thumb_angle: f32,
    pub index_angle: f32,
    pub middle_angle: f32,
    pub ring_angle: f32,
    pub pinky_angle: f32,

    // Base angles at each finger MCP (wrist–MCP–PIP).
    pub thumb_base_angle: f32,
    pub index_base_angle: f32,
    pub middle_base_angle: f32,
    pub ring_base_angle: f32,
    pub pinky_base_angle: f32,

    // Pairwise fingertip distances.
    pub thumb_index_dist: f32,
    pub thumb_middle_dist: f32,
    pub thumb_ring_dist: f32,
    pub thumb_pinky_dist: f32,
    pub index_middle_dist: f32,
    pub index_ring_dist: f32,
    pub index_pinky_dist: f32,
    pub middle_ring_dist: f32,
    pub middle_pinky_dist: f32,
    pub ring_pinky_dist: f32,

    // Bounding box over the five fingertips.
    pub hand_width: f32,
    pub hand_height: f32,
    /// `hand_width` normalized by the configured reference width.
    pub hand_openness: f32,

    // Aggregates.
    /// Number of extended digits, thumb included (0–5).
    pub extended_count: u8,
    /// The four non-thumb fingers are all curled.
    pub fist_closed: bool,
    /// Adjacent fingertips (index…pinky) all within the together distance.
    pub fingers_together: bool,
    /// Exactly index + middle extended.
    pub two_fingers_up: bool,
    /// Index + middle + ring extended, pinky curled.
    pub three_fingers_up: bool,
    /// Index extended and the only extended digit.
    pub pointing: bool,
}

// ---------------------------------------------------------------------------
// FeatureExtractor
// ---------------------------------------------------------------------------

/// Stateless extractor turning a [`LandmarkSet`] into a [`FeatureRecord`].
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    config: FeatureConfig,
}

impl FeatureExtractor {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Extract all features from one hand.  Pure and total.
    pub fn extract(&self, lm: &LandmarkSet) -> FeatureRecord {
        let cfg = &self.config;

        let wrist = lm.point(points::WRIST);

        let thumb_mcp = lm.point(points::THUMB_MCP);
        let thumb_ip = lm.point(points::THUMB_IP);
        let thumb_tip = lm.point(points::THUMB_TIP);

        let index_mcp = lm.point(points::INDEX_MCP);
        let index_pip = lm.point(points::INDEX_PIP);
        let index_tip = lm.point(points::INDEX_TIP);

        let middle_mcp = lm.point(points::MIDDLE_MCP);
        let middle_pip = lm.point(points::MIDDLE_PIP);
        let middle_tip = lm.point(points::MIDDLE_TIP);

        let ring_mcp = lm.point(points::RING_MCP);
        let ring_pip = lm.point(points::RING_PIP);
        let ring_tip = lm.point(points::RING_TIP);

        let pinky_mcp = lm.point(points::PINKY_MCP);
        let pinky_pip = lm.point(points::PINKY_PIP);
        let pinky_tip = lm.point(points::PINKY_TIP);

        // Extension flags: tip clearly past the joint, not merely level.
        let thumb_extended = (thumb_tip.x - thumb_ip.x).abs() > cfg.thumb_gap;
        let index_extended = index_tip.y < index_pip.y - cfg.extension_gap;
        let middle_extended = middle_tip.y < middle_pip.y - cfg.extension_gap;
        let ring_extended = ring_tip.y < ring_pip.y - cfg.extension_gap;
        let pinky_extended = pinky_tip.y < pinky_pip.y - cfg.extension_gap;

        let extended_count = [
            thumb_extended,
            index_extended,
            middle_extended,
            ring_extended,
            pinky_extended,
        ]
        .iter()
        .filter(|&&e| e)
        .count() as u8;

        // Thumb / index orientation flags.
        let min_finger_pip_y = index_pip
            .y
            .min(middle_pip.y)
            .min(ring_pip.y)
            .min(pinky_pip.y);

        let thumb_up = thumb_tip.y < thumb_ip.y - cfg.extension_gap;
        let thumb_down = thumb_tip.y > thumb_mcp.y + cfg.thumb_down_gap;
        let thumb_above_wrist = thumb_tip.y < wrist.y - cfg.raised_clearance;
        let thumb_above_fingers = thumb_tip.y < min_finger_pip_y - cfg.extension_gap;
        let thumb_left_of_wrist = thumb_tip.x < wrist.x - cfg.lateral_gap;
        let thumb_behind_fingers = thumb_tip.x < index_mcp.x;
        let thumb_across_palm = (thumb_tip.x - wrist.x).abs() > cfg.across_palm_dist;

        let index_raised = index_tip.y < index_mcp.y - cfg.strong_raise;
        let tips_aligned = (index_tip.x - middle_tip.x).abs() < cfg.aligned_eps;

        // Distances between fingertips.
        let thumb_index_dist = thumb_tip.distance(&index_tip);
        let thumb_middle_dist = thumb_tip.distance(&middle_tip);
        let thumb_ring_dist = thumb_tip.distance(&ring_tip);
        let thumb_pinky_dist = thumb_tip.distance(&pinky_tip);
        let index_middle_dist = index_tip.distance(&middle_tip);
        let index_ring_dist = index_tip.distance(&ring_tip);
        let index_pinky_dist = index_tip.distance(&pinky_tip);
        let middle_ring_dist = middle_tip.distance(&ring_tip);
        let middle_pinky_dist = middle_tip.distance(&pinky_tip);
        let ring_pinky_dist = ring_tip.distance(&pinky_tip);

        // Fingertip bounding box.
        let tips = [thumb_tip, index_tip, middle_tip, ring_tip, pinky_tip];
        let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
        for tip in &tips {
            min_x = min_x.min(tip.x);
            max_x = max_x.max(tip.x);
            min_y = min_y.min(tip.y);
            max_y = max_y.max(tip.y);
        }
        let hand_width = max_x - min_x;
        let hand_height = max_y - min_y;
        let hand_openness = if cfg.openness_reference > 0.0 {
            hand_width / cfg.openness_reference
        } else {
            0.0
        };

        let fist_closed = !index_extended && !middle_extended && !ring_extended && !pinky_extended;
        let fingers_together = index_middle_dist < cfg.together_dist
            && middle_ring_dist < cfg.together_dist
            && ring_pinky_dist < cfg.together_dist;
        let two_fingers_up =
            index_extended && middle_extended && !ring_extended && !pinky_extended;
        let three_fingers_up =
            index_extended && middle_extended && ring_extended && !pinky_extended;
        let pointing = index_extended && extended_count == 1;

        FeatureRecord {
            thumb_extended,
            index_extended,
            middle_extended,
            ring_extended,
            pinky_extended,
            thumb_up,
            thumb_down,
            thumb_above_wrist,
            thumb_above_fingers,
            thumb_left_of_wrist,
            thumb_behind_fingers,
            thumb_across_palm,
            index_raised,
            tips_aligned,
            thumb_angle: joint_angle(thumb_mcp, thumb_ip, thumb_tip),
            index_angle: joint_angle(index_mcp, index_pip, index_tip),
            middle_angle: joint_angle(middle_mcp, middle_pip, middle_tip),
            ring_angle: joint_angle(ring_mcp, ring_pip, ring_tip),
            pinky_angle: joint_angle(pinky_mcp, pinky_pip, pinky_tip),
            thumb_base_angle: joint_angle(wrist, thumb_mcp, thumb_ip),
            index_base_angle: joint_angle(wrist, index_mcp, index_pip),
            middle_base_angle: joint_angle(wrist, middle_mcp, middle_pip),
            ring_base_angle: joint_angle(wrist, ring_mcp, ring_pip),
            pinky_base_angle: joint_angle(wrist, pinky_mcp, pinky_pip),
            thumb_index_dist,
            thumb_middle_dist,
            thumb_ring_dist,
            thumb_pinky_dist,
            index_middle_dist,
            index_ring_dist,
            index_pinky_dist,
            middle_ring_dist,
            middle_pinky_dist,
            ring_pinky_dist,
            hand_width,
            hand_height,
            hand_openness,
            extended_count,
            fist_closed,
            fingers_together,
            two_fingers_up,
            three_fingers_up,
            pointing,
        }
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(FeatureConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Angle helper
// ---------------------------------------------------------------------------

/// Angle at `b` formed by the segments `b→a` and `b→c`, in degrees.
///
/// Returns `0.0` when either segment is (near) zero length, so degenerate
/// landmark geometry never produces a domain error.
fn joint_angle(a: Landmark, b: Landmark, c: Landmark) -> f32 {
    const EPS: f32 = 1e-6;

    let (v1x, v1y, v1z) = (a.x - b.x, a.y - b.y, a.z - b.z);
    let (v2x, v2y, v2z) = (c.x - b.x, c.y - b.y, c.z - b.z);

    let n1 = (v1x * v1x + v1y * v1y + v1z * v1z).sqrt();
    let n2 = (v2x * v2x + v2y * v2y + v2z * v2z).sqrt();
    if n1 < EPS || n2 < EPS {
        return 0.0;
    }

    let cos = ((v1x * v2x + v1y * v2y + v1z * v2z) / (n1 * n2)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
