//! Alphabet letter classification — an ordered cascade of geometric rules.
//!
//! [`LetterClassifier::classify`] walks one clause per letter, A through Z,
//! and returns at the **first** clause whose predicate matches.  The clauses
//! are not mutually exclusive by construction; their order approximates
//! exclusivity, so confusable shapes (all-fingers-curled letters, the
//! hooked-index X) are tested before more permissive ones.  Do not reorder
//! clauses without re-validating the whole cascade.
//!
//! When no clause matches tightly, a finger-count fallback guarantees an
//! answer for the common counts (a fully open hand answers `'5'`).
//!
//! Every distance and angle cutoff is a named field of
//! [`LetterThresholds`] so tuning never touches the cascade itself.

use serde::{Deserialize, Serialize};

use crate::landmark::FeatureRecord;

use super::label::Label;

/// The alphabet the cascade can produce (excluding the `'5'` fallback).
pub const SUPPORTED_LETTERS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

// ---------------------------------------------------------------------------
// LetterThresholds
// ---------------------------------------------------------------------------

/// Distance/angle cutoffs used by the letter cascade, named per clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterThresholds {
    pub c_thumb_index_min: f32,
    pub c_thumb_index_max: f32,
    pub c_openness_min: f32,
    pub d_thumb_middle_max: f32,
    pub e_index_angle_min: f32,
    pub f_thumb_index_max: f32,
    pub g_thumb_index_min: f32,
    pub h_index_middle_max: f32,
    pub k_index_middle_min: f32,
    pub k_thumb_middle_max: f32,
    pub l_thumb_index_min: f32,
    pub o_thumb_index_max: f32,
    pub o_openness_min: f32,
    pub p_thumb_middle_max: f32,
    pub p_index_middle_min: f32,
    pub r_index_middle_max: f32,
    pub t_thumb_index_max: f32,
    pub u_index_middle_max: f32,
    pub v_index_middle_min: f32,
    pub x_index_angle_min: f32,
    pub x_index_angle_max: f32,
    pub y_thumb_pinky_min: f32,
    pub z_thumb_index_min: f32,
    /// Index–middle split separating V from U in the count fallback.
    pub split_index_middle: f32,
}

impl Default for LetterThresholds {
    fn default() -> Self {
        Self {
            c_thumb_index_min: 0.10,
            c_thumb_index_max: 0.25,
            c_openness_min: 0.3,
            d_thumb_middle_max: 0.08,
            e_index_angle_min: 90.0,
            f_thumb_index_max: 0.06,
            g_thumb_index_min: 0.15,
            h_index_middle_max: 0.08,
            k_index_middle_min: 0.10,
            k_thumb_middle_max: 0.08,
            l_thumb_index_min: 0.12,
            o_thumb_index_max: 0.08,
            o_openness_min: 0.2,
            p_thumb_middle_max: 0.10,
            p_index_middle_min: 0.08,
            r_index_middle_max: 0.05,
            t_thumb_index_max: 0.05,
            u_index_middle_max: 0.05,
            v_index_middle_min: 0.08,
            x_index_angle_min: 45.0,
            x_index_angle_max: 120.0,
            y_thumb_pinky_min: 0.15,
            z_thumb_index_min: 0.10,
            split_index_middle: 0.08,
        }
    }
}

// ---------------------------------------------------------------------------
// LetterClassifier
// ---------------------------------------------------------------------------

/// Pure per-frame letter classifier.  No hidden state: the same
/// [`FeatureRecord`] always yields the same answer.
#[derive(Debug, Clone)]
pub struct LetterClassifier {
    thresholds: LetterThresholds,
}

impl LetterClassifier {
    pub fn new(thresholds: LetterThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify one hand's features; `None` only when even the fallback has
    /// no answer for the extension pattern.
    pub fn classify(&self, rec: &FeatureRecord) -> Option<Label> {
        self.cascade(rec)
            .or_else(|| self.by_finger_count(rec))
            .map(Label::Letter)
    }

    /// The ordered A–Z rule cascade.  First matching clause wins.
    fn cascade(&self, rec: &FeatureRecord) -> Option<char> {
        let t = &self.thresholds;

        // A: closed fist, thumb resting beside the fingers.
        if rec.fist_closed && rec.thumb_behind_fingers {
            return Some('A');
        }
        // B: four fingers extended and together, thumb folded in.
        if rec.index_extended
            && rec.middle_extended
            && rec.ring_extended
            && rec.pinky_extended
            && !rec.thumb_extended
            && rec.fingers_together
        {
            return Some('B');
        }
        // C: curved, partly open hand.
        if rec.extended_count >= 2
            && rec.thumb_index_dist > t.c_thumb_index_min
            && rec.thumb_index_dist < t.c_thumb_index_max
            && rec.hand_openness > t.c_openness_min
        {
            return Some('C');
        }
        // D: index up, thumb touching the middle fingertip.
        if rec.index_extended
            && !rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
            && rec.thumb_middle_dist < t.d_thumb_middle_max
        {
            return Some('D');
        }
        // E: fingers curled inward with the thumb visible.
        if rec.fist_closed && rec.thumb_extended && rec.index_angle > t.e_index_angle_min {
            return Some('E');
        }
        // F: thumb-index circle, remaining fingers extended.
        if !rec.index_extended
            && rec.middle_extended
            && rec.ring_extended
            && rec.pinky_extended
            && rec.thumb_index_dist < t.f_thumb_index_max
        {
            return Some('F');
        }
        // G: index and thumb both out, held apart.
        if rec.index_extended
            && !rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
            && rec.thumb_extended
            && rec.thumb_index_dist > t.g_thumb_index_min
        {
            return Some('G');
        }
        // H: index and middle extended side by side.
        if rec.index_extended
            && rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
            && rec.thumb_behind_fingers
            && rec.index_middle_dist < t.h_index_middle_max
        {
            return Some('H');
        }
        // I: only the pinky extended, thumb tucked.
        if !rec.index_extended
            && !rec.middle_extended
            && !rec.ring_extended
            && rec.pinky_extended
            && rec.thumb_behind_fingers
        {
            return Some('I');
        }
        // J: pinky extended with the thumb clear of the palm.
        if !rec.index_extended
            && !rec.middle_extended
            && !rec.ring_extended
            && rec.pinky_extended
            && !rec.thumb_behind_fingers
        {
            return Some('J');
        }
        // K: index and middle in a V with the thumb on the middle finger.
        if rec.index_extended
            && rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
            && rec.index_middle_dist > t.k_index_middle_min
            && rec.thumb_middle_dist < t.k_thumb_middle_max
        {
            return Some('K');
        }
        // L: index and thumb forming an L.
        if rec.index_extended
            && !rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
            && rec.thumb_extended
            && rec.thumb_index_dist > t.l_thumb_index_min
        {
            return Some('L');
        }
        // M: thumb laid across the palm under the curled fingers.
        if rec.fist_closed && rec.thumb_extended && rec.thumb_across_palm {
            return Some('M');
        }
        // N: ring and pinky extended over a tucked thumb.
        if !rec.index_extended
            && !rec.middle_extended
            && rec.ring_extended
            && rec.pinky_extended
            && rec.thumb_behind_fingers
        {
            return Some('N');
        }
        // O: all fingertips gathered into a ring.
        if rec.fist_closed
            && rec.thumb_index_dist < t.o_thumb_index_max
            && rec.hand_openness > t.o_openness_min
        {
            return Some('O');
        }
        // P: K-shape tipped over.
        if rec.index_extended
            && rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
            && rec.thumb_middle_dist < t.p_thumb_middle_max
            && rec.index_middle_dist > t.p_index_middle_min
        {
            return Some('P');
        }
        // Q: G-shape pointing downward (tall, narrow hand).
        if rec.index_extended
            && !rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
            && rec.thumb_extended
            && rec.hand_height > rec.hand_width
        {
            return Some('Q');
        }
        // R: index and middle crossed.
        if rec.index_extended
            && rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
            && rec.index_middle_dist < t.r_index_middle_max
            && !rec.thumb_extended
        {
            return Some('R');
        }
        // S: fist with the thumb crossed over the fingers.
        if rec.fist_closed && !rec.thumb_behind_fingers && rec.thumb_across_palm {
            return Some('S');
        }
        // T: fist with the thumb wedged against the index.
        if rec.fist_closed && rec.thumb_extended && rec.thumb_index_dist < t.t_thumb_index_max {
            return Some('T');
        }
        // U: index and middle together pointing up.
        if rec.two_fingers_up
            && rec.index_middle_dist < t.u_index_middle_max
            && rec.thumb_behind_fingers
        {
            return Some('U');
        }
        // V: index and middle spread apart.
        if rec.two_fingers_up
            && rec.index_middle_dist > t.v_index_middle_min
            && rec.thumb_behind_fingers
        {
            return Some('V');
        }
        // W: index, middle and ring extended.
        if rec.three_fingers_up && rec.thumb_behind_fingers {
            return Some('W');
        }
        // X: hooked index, everything else curled.
        if !rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
            && rec.thumb_behind_fingers
            && rec.index_angle > t.x_index_angle_min
            && rec.index_angle < t.x_index_angle_max
        {
            return Some('X');
        }
        // Y: thumb and pinky flung out.
        if !rec.index_extended
            && !rec.middle_extended
            && !rec.ring_extended
            && rec.pinky_extended
            && rec.thumb_extended
            && rec.thumb_pinky_dist > t.y_thumb_pinky_min
        {
            return Some('Y');
        }
        // Z: bare pointing index held away from the thumb.
        if rec.pointing && rec.thumb_index_dist > t.z_thumb_index_min {
            return Some('Z');
        }

        None
    }

    /// Fallback keyed on the number of extended digits.
    fn by_finger_count(&self, rec: &FeatureRecord) -> Option<char> {
        match rec.extended_count {
            0 => Some(if rec.thumb_behind_fingers { 'A' } else { 'S' }),
            1 => {
                if rec.index_extended {
                    Some('D')
                } else if rec.pinky_extended {
                    Some('I')
                } else if rec.thumb_extended {
                    Some('T')
                } else {
                    None
                }
            }
            2 => {
                if rec.two_fingers_up {
                    Some(if rec.index_middle_dist > self.thresholds.split_index_middle {
                        'V'
                    } else {
                        'U'
                    })
                } else {
                    Some('C')
                }
            }
            3 => Some('W'),
            4 => Some('B'),
            // Fully open hand.
            5 => Some('5'),
            _ => None,
        }
    }
}

impl Default for LetterClassifier {
    fn default() -> Self {
        Self::new(LetterThresholds::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{fixtures, FeatureExtractor, LandmarkSet};

    fn classify(set: &LandmarkSet) -> Option<Label> {
        let rec = FeatureExtractor::default().extract(set);
        LetterClassifier::default().classify(&rec)
    }

    fn letter(set: &LandmarkSet) -> char {
        match classify(set) {
            Some(Label::Letter(c)) => c,
            other => panic!("expected a letter, got {other:?}"),
        }
    }

    // ---- Cascade clauses ---------------------------------------------------

    #[test]
    fn fist_with_thumb_beside_is_a() {
        assert_eq!(letter(&fixtures::fist_a()), 'A');
    }

    #[test]
    fn flat_hand_is_b() {
        assert_eq!(letter(&fixtures::flat_b()), 'B');
    }

    #[test]
    fn curved_hand_is_c() {
        assert_eq!(letter(&fixtures::curved_c()), 'C');
    }

    #[test]
    fn point_with_thumb_on_middle_is_d() {
        assert_eq!(letter(&fixtures::point_d()), 'D');
    }

    #[test]
    fn claw_with_thumb_out_is_e() {
        assert_eq!(letter(&fixtures::claw_e()), 'E');
    }

    #[test]
    fn thumb_index_circle_is_f() {
        assert_eq!(letter(&fixtures::ok_sign()), 'F');
    }

    #[test]
    fn wide_thumb_and_index_is_g() {
        assert_eq!(letter(&fixtures::pistol_g()), 'G');
    }

    #[test]
    fn paired_fingers_are_h() {
        assert_eq!(letter(&fixtures::together_h()), 'H');
    }

    #[test]
    fn lone_pinky_is_i() {
        assert_eq!(letter(&fixtures::pinky_i()), 'I');
    }

    #[test]
    fn thumb_across_palm_is_m() {
        assert_eq!(letter(&fixtures::thumb_m()), 'M');
    }

    #[test]
    fn thumb_over_fist_is_s() {
        assert_eq!(letter(&fixtures::fist_s()), 'S');
    }

    #[test]
    fn spread_pair_is_v() {
        assert_eq!(letter(&fixtures::victory_v()), 'V');
    }

    #[test]
    fn three_fingers_are_w() {
        assert_eq!(letter(&fixtures::three_w()), 'W');
    }

    #[test]
    fn hooked_index_is_x() {
        assert_eq!(letter(&fixtures::hook_x()), 'X');
    }

    #[test]
    fn bare_pointing_index_is_z() {
        assert_eq!(letter(&fixtures::pointing_up()), 'Z');
    }

    // ---- Clause ordering ---------------------------------------------------

    /// The hooked-index pose also satisfies the later Z clause; the earlier
    /// X clause must win deterministically.
    #[test]
    fn x_clause_preempts_z() {
        let rec = FeatureExtractor::default().extract(&fixtures::hook_x());
        assert!(rec.pointing && rec.thumb_index_dist > 0.10, "pose matches Z too");
        assert_eq!(letter(&fixtures::hook_x()), 'X');
    }

    // ---- Finger-count fallback --------------------------------------------

    #[test]
    fn spread_four_fingers_fall_back_to_b() {
        // Not "together", so the B clause abstains; count 4 answers B.
        assert_eq!(letter(&fixtures::spread_four()), 'B');
    }

    #[test]
    fn open_hand_falls_back_to_five() {
        assert_eq!(letter(&fixtures::open_palm()), '5');
    }

    // ---- Determinism -------------------------------------------------------

    #[test]
    fn classification_is_deterministic() {
        let rec = FeatureExtractor::default().extract(&fixtures::fist_a());
        let clf = LetterClassifier::default();
        let first = clf.classify(&rec);
        for _ in 0..100 {
            assert_eq!(clf.classify(&rec), first);
        }
    }

    #[test]
    fn alphabet_table_is_complete() {
        assert_eq!(SUPPORTED_LETTERS.len(), 26);
        assert_eq!(SUPPORTED_LETTERS[0], 'A');
        assert_eq!(SUPPORTED_LETTERS[25], 'Z');
    }
}
