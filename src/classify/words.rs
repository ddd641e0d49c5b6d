//! Complete-word gestures — one pose, one whole word.
//!
//! [`WordClassifier`] recognizes a small set of named single-hand poses
//! ([`WordShape`]) and maps each through a [`WordLexicon`] to the word it
//! speaks, e.g. a raised thumb says "HOLA".  Compared with spelling letter
//! by letter this is the fast path of the translator.
//!
//! Shape detection is an ordered clause list like the letter cascade, with
//! two deliberate differences from the plainest reading of each pose:
//! clauses that would otherwise swallow common letter shapes carry extra
//! guards (a thumbs-up must rise clear of the curled fingers, a raised
//! index must be straight and have the thumb clear of the other fingers),
//! because word detection runs *before* letter detection in the battery.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::landmark::FeatureRecord;

use super::label::Label;

// ---------------------------------------------------------------------------
// WordShape
// ---------------------------------------------------------------------------

/// Named single-hand poses with a word mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordShape {
    ThumbsUp,
    Peace,
    OkSign,
    PrayHands,
    PointingUp,
    Shaka,
    HeartHands,
    CallMe,
    ThumbsDown,
}

impl WordShape {
    pub const ALL: [WordShape; 9] = [
        WordShape::ThumbsUp,
        WordShape::Peace,
        WordShape::OkSign,
        WordShape::PrayHands,
        WordShape::PointingUp,
        WordShape::Shaka,
        WordShape::HeartHands,
        WordShape::CallMe,
        WordShape::ThumbsDown,
    ];
}

// ---------------------------------------------------------------------------
// WordLexicon
// ---------------------------------------------------------------------------

/// Mapping from detected shapes to the words they speak.
///
/// Ships with the built-in table; entries can be re-mapped at runtime so a
/// user can bind their own word to any supported shape.
#[derive(Debug, Clone)]
pub struct WordLexicon {
    entries: HashMap<WordShape, String>,
}

impl WordLexicon {
    /// The built-in shape → word table.
    pub fn builtin() -> Self {
        let entries = [
            (WordShape::ThumbsUp, "HOLA"),
            (WordShape::Peace, "BUENOS"),
            (WordShape::OkSign, "GRACIAS"),
            (WordShape::PrayHands, "POR FAVOR"),
            (WordShape::PointingUp, "NECESITO"),
            (WordShape::Shaka, "OK"),
            (WordShape::HeartHands, "TE AMO"),
            (WordShape::CallMe, "AYUDA"),
            (WordShape::ThumbsDown, "NO"),
        ]
        .into_iter()
        .map(|(shape, word)| (shape, word.to_string()))
        .collect();
        Self { entries }
    }

    /// Word spoken by `shape`.
    pub fn word_for(&self, shape: WordShape) -> Option<&str> {
        self.entries.get(&shape).map(String::as_str)
    }

    /// Bind a custom word to `shape`, replacing the built-in entry.
    pub fn set_word(&mut self, shape: WordShape, word: impl Into<String>) {
        self.entries.insert(shape, word.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for WordLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// WordThresholds
// ---------------------------------------------------------------------------

/// Cutoffs for the word-shape clauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordThresholds {
    /// Minimum index–middle spread for the peace V.
    pub peace_spread_min: f32,
    /// Maximum thumb–index distance closing the OK-sign circle.
    pub circle_max: f32,
    /// Maximum index–middle distance for joined pray hands.
    pub pray_together_max: f32,
    /// Minimum thumb–pinky span for the shaka.
    pub shaka_span_min: f32,
    /// Maximum thumb–index distance for the heart pinch.
    pub heart_pinch_max: f32,
    /// Minimum straightness (PIP angle) of a pointing index.
    pub pointing_straight_angle: f32,
    /// Minimum thumb clearance from the middle fingertip when pointing.
    pub pointing_clearance: f32,
}

impl Default for WordThresholds {
    fn default() -> Self {
        Self {
            peace_spread_min: 0.06,
            circle_max: 0.06,
            pray_together_max: 0.04,
            shaka_span_min: 0.15,
            heart_pinch_max: 0.10,
            pointing_straight_angle: 150.0,
            pointing_clearance: 0.08,
        }
    }
}

// ---------------------------------------------------------------------------
// WordClassifier
// ---------------------------------------------------------------------------

/// Pure per-frame word classifier over one hand's features.
#[derive(Debug, Clone)]
pub struct WordClassifier {
    thresholds: WordThresholds,
    lexicon: WordLexicon,
}

impl WordClassifier {
    pub fn new(thresholds: WordThresholds, lexicon: WordLexicon) -> Self {
        Self {
            thresholds,
            lexicon,
        }
    }

    pub fn lexicon_mut(&mut self) -> &mut WordLexicon {
        &mut self.lexicon
    }

    /// Classify one hand; abstains unless a word shape matches.
    pub fn classify(&self, rec: &FeatureRecord) -> Option<Label> {
        let shape = self.shape(rec)?;
        let word = self.lexicon.word_for(shape)?;
        Some(Label::Word(word.to_string()))
    }

    /// Ordered shape clauses; first match wins.
    pub fn shape(&self, rec: &FeatureRecord) -> Option<WordShape> {
        let t = &self.thresholds;
        let fingers_curled = !rec.index_extended
            && !rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended;

        // Thumb raised clear above a fist.
        if rec.thumb_up && fingers_curled && rec.thumb_above_wrist && rec.thumb_above_fingers {
            return Some(WordShape::ThumbsUp);
        }
        // Index + middle in a V, thumb down.
        if rec.index_extended
            && rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
            && !rec.thumb_up
            && rec.index_middle_dist > t.peace_spread_min
        {
            return Some(WordShape::Peace);
        }
        // Thumb-index circle with the remaining fingers up.
        if rec.thumb_index_dist < t.circle_max
            && rec.middle_extended
            && rec.ring_extended
            && rec.pinky_extended
        {
            return Some(WordShape::OkSign);
        }
        // Every digit up, fingers pressed flat together.
        if rec.index_extended
            && rec.middle_extended
            && rec.ring_extended
            && rec.pinky_extended
            && rec.thumb_up
            && rec.index_middle_dist < t.pray_together_max
            && rec.tips_aligned
        {
            return Some(WordShape::PrayHands);
        }
        // A single straight index raised high, thumb tucked and clear.
        if rec.index_extended
            && !rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
            && !rec.thumb_up
            && !rec.thumb_extended
            && rec.index_raised
            && rec.index_angle > t.pointing_straight_angle
            && rec.thumb_middle_dist > t.pointing_clearance
        {
            return Some(WordShape::PointingUp);
        }
        // Thumb and pinky out, middle fingers curled.
        if rec.thumb_up
            && !rec.index_extended
            && !rec.middle_extended
            && !rec.ring_extended
            && rec.pinky_extended
            && rec.thumb_pinky_dist > t.shaka_span_min
        {
            return Some(WordShape::Shaka);
        }
        // Thumb and index pinched into a heart top.
        if rec.thumb_up
            && rec.index_extended
            && !rec.middle_extended
            && rec.thumb_index_dist < t.heart_pinch_max
            && rec.index_raised
        {
            return Some(WordShape::HeartHands);
        }
        // Shaka held against the side of the head.
        if rec.thumb_up
            && rec.pinky_extended
            && !rec.index_extended
            && !rec.middle_extended
            && !rec.ring_extended
            && rec.thumb_left_of_wrist
        {
            return Some(WordShape::CallMe);
        }
        // Thumb hanging below the fist.
        if rec.thumb_down && fingers_curled {
            return Some(WordShape::ThumbsDown);
        }

        None
    }
}

impl Default for WordClassifier {
    fn default() -> Self {
        Self::new(WordThresholds::default(), WordLexicon::builtin())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
